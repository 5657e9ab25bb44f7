// Livemarks services
// Services provide stateless or configuration-driven functionality: settings,
// URL validation, and the in-process auth and change feed collaborators.

pub mod change_feed;
pub mod session_auth;
pub mod settings_engine;
pub mod url_validation;
