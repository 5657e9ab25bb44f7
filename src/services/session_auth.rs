// Livemarks Session Auth
// Holds the identity of the signed-in user for one process. Sign-in itself
// (OAuth, magic links) happens elsewhere; this only records the outcome.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::info;

use crate::backend::AuthProvider;
use crate::types::bookmark::Identity;

/// In-process [`AuthProvider`] with explicit sign in / sign out.
#[derive(Debug, Default)]
pub struct SessionAuth {
    identity: RwLock<Option<Identity>>,
}

impl SessionAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session that is already signed in.
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: RwLock::new(Some(identity)),
        }
    }

    /// Records `identity` as the current user, replacing any previous one.
    pub fn sign_in(&self, identity: Identity) {
        info!(user_id = %identity.user_id, "signed in");
        *self.identity.write().unwrap_or_else(PoisonError::into_inner) = Some(identity);
    }

    /// Clears the current user. Returns the identity that was signed in.
    pub fn sign_out(&self) -> Option<Identity> {
        let previous = self
            .identity
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(identity) = &previous {
            info!(user_id = %identity.user_id, "signed out");
        }
        previous
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl AuthProvider for SessionAuth {
    async fn current_identity(&self) -> Option<Identity> {
        self.identity()
    }
}
