// Livemarks Local Change Feed
// In-process stand-in for the backend's realtime channel: every subscriber of
// a table scope receives each published event on its own unbounded channel.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::{ChangeFeed, FeedSubscription, SubscriptionHandle};
use crate::types::bookmark::ChangeEvent;
use crate::types::errors::StoreError;

struct Subscriber {
    scope: String,
    sender: mpsc::UnboundedSender<ChangeEvent>,
}

/// Fan-out change feed shared by every session in the process.
#[derive(Default)]
pub struct LocalChangeFeed {
    subscribers: Mutex<HashMap<Uuid, Subscriber>>,
}

impl LocalChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `event` to every subscriber of `scope`.
    ///
    /// Subscribers whose receiving side is gone are dropped. Returns the
    /// number of subscribers the event was delivered to.
    pub fn publish(&self, scope: &str, event: ChangeEvent) -> usize {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut delivered = 0;
        subscribers.retain(|id, sub| {
            if sub.scope != scope {
                return true;
            }
            match sub.sender.send(event.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => {
                    debug!(subscription = %id, "dropping closed subscriber");
                    false
                }
            }
        });
        delivered
    }

    /// Number of live subscriptions across all scopes.
    pub fn active_subscriptions(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl ChangeFeed for LocalChangeFeed {
    async fn subscribe(&self, scope: &str) -> Result<FeedSubscription, StoreError> {
        if scope.is_empty() {
            return Err(StoreError::Feed("subscription scope cannot be empty".to_string()));
        }

        let (sender, events) = mpsc::unbounded_channel();
        let handle = SubscriptionHandle::new(scope);
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                handle.id(),
                Subscriber {
                    scope: scope.to_string(),
                    sender,
                },
            );
        info!(subscription = %handle.id(), scope, "feed subscribed");

        Ok(FeedSubscription { handle, events })
    }

    fn unsubscribe(&self, handle: &SubscriptionHandle) {
        let removed = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&handle.id());
        if removed.is_some() {
            info!(subscription = %handle.id(), scope = handle.scope(), "feed unsubscribed");
        }
    }
}
