use std::sync::Arc;

use tokio::sync::watch;

/// Authentication status derived from the stored token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// Stored token not yet validated.
    Loading,
    Authenticated,
    Unauthenticated,
}

impl AuthStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, AuthStatus::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::Authenticated)
    }
}

/// Shared, observable cell holding the current `AuthStatus`.
///
/// The API client and the session hold clones of the same cell, so a `401`
/// seen by any request is visible to every subscriber.
#[derive(Debug, Clone)]
pub struct StatusCell {
    tx: Arc<watch::Sender<AuthStatus>>,
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusCell {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthStatus::Loading);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> AuthStatus {
        *self.tx.borrow()
    }

    /// Store `status`, notifying subscribers only when it actually changes.
    pub fn set(&self, status: AuthStatus) {
        self.tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.tx.subscribe()
    }
}
