// Livemarks state managers
// Managers own per-session state: the live bookmark list, its reconciler, and the add form.

pub mod add_form;
pub mod live_list;
pub mod reconciler;
