use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::{LoginData, RegisterData};

use super::{AuthService, AuthStatus};

/// Protected endpoint read once to confirm a stored token.
const VALIDATION_PATH: &str = "projects/";

/// The authentication session for one running client.
///
/// Construct it once at startup, call [`AuthSession::initialize`], and pass
/// it by reference to the view layer. Status lives in the API client's
/// shared cell, so a `401` from any request ends the session here too.
/// Dropping the session tears it down.
#[derive(Clone)]
pub struct AuthSession {
    api: ApiClient,
    service: AuthService,
}

impl AuthSession {
    /// Create a session in the `Loading` state.
    pub fn new(api: ApiClient) -> Self {
        api.status().set(AuthStatus::Loading);
        let service = AuthService::new(api.clone());
        Self { api, service }
    }

    pub fn status(&self) -> AuthStatus {
        self.api.status().get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status().is_authenticated()
    }

    /// Receiver notified on every status change.
    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.api.status().subscribe()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Resolve `Loading` by validating the stored token.
    ///
    /// Without a token the session becomes unauthenticated with no network
    /// call. With one, a single protected read decides; any failure clears
    /// the token. Once resolved, further calls return the current status.
    pub async fn initialize(&self) -> AuthStatus {
        if !self.status().is_loading() {
            return self.status();
        }

        if self.api.tokens().get().is_none() {
            debug!("No stored token");
            self.api.status().set(AuthStatus::Unauthenticated);
            return AuthStatus::Unauthenticated;
        }

        match self.api.get::<serde_json::Value>(VALIDATION_PATH).await {
            Ok(_) => {
                info!("Stored token accepted");
                self.api.status().set(AuthStatus::Authenticated);
            }
            Err(e) => {
                warn!(error = %e, "Stored token could not be validated");
                self.api.tokens().clear();
                self.api.status().set(AuthStatus::Unauthenticated);
            }
        }
        self.status()
    }

    /// On failure the status is left untouched and the error returned as-is.
    pub async fn login(&self, data: &LoginData) -> Result<(), ApiError> {
        self.service.login(data).await?;
        self.api.status().set(AuthStatus::Authenticated);
        Ok(())
    }

    pub async fn register(&self, data: &RegisterData) -> Result<(), ApiError> {
        self.service.register(data).await?;
        self.api.status().set(AuthStatus::Authenticated);
        Ok(())
    }

    pub fn logout(&self) {
        self.service.logout();
        self.api.status().set(AuthStatus::Unauthenticated);
        info!("Logged out");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::{MemoryTokenStore, TokenStore};

    fn session_with(store: Arc<MemoryTokenStore>) -> AuthSession {
        // Nothing listens on port 9; any request would fail fast
        let api = ApiClient::new("http://127.0.0.1:9/api/", store).unwrap();
        AuthSession::new(api)
    }

    #[tokio::test]
    async fn test_initialize_without_token() {
        let session = session_with(Arc::new(MemoryTokenStore::new()));
        assert_eq!(session.status(), AuthStatus::Loading);
        assert_eq!(session.initialize().await, AuthStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_unreachable_backend_clears_token() {
        let store = Arc::new(MemoryTokenStore::with_token("stale"));
        let session = session_with(store.clone());

        assert_eq!(session.initialize().await, AuthStatus::Unauthenticated);
        assert_eq!(store.get(), None);
    }

    #[tokio::test]
    async fn test_logout_is_synchronous_and_total() {
        let store = Arc::new(MemoryTokenStore::with_token("abc"));
        let session = session_with(store.clone());
        session.api().status().set(AuthStatus::Authenticated);

        session.logout();
        assert_eq!(session.status(), AuthStatus::Unauthenticated);
        assert_eq!(store.get(), None);

        // Logging out twice is harmless
        session.logout();
        assert_eq!(session.status(), AuthStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_initialize_runs_once() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = session_with(store.clone());
        session.initialize().await;

        // A token appearing later does not re-run validation
        store.set("late").unwrap();
        assert_eq!(session.initialize().await, AuthStatus::Unauthenticated);
        assert_eq!(store.get().as_deref(), Some("late"));
    }
}
