//! API client for communicating with the Singthesizer REST backend.
//!
//! Every request goes through one pipeline: relative paths are resolved
//! against the base URL, the stored token is attached as a bearer
//! credential, and any `401` clears the token and ends the session.

use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::auth::{AuthStatus, SharedTokenStore, StatusCell};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// API client for the Singthesizer backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling,
/// and clones share the token store and status cell.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: SharedTokenStore,
    status: StatusCell,
}

impl ApiClient {
    /// Create a new API client rooted at `base_url`
    pub fn new(base_url: &str, tokens: SharedTokenStore) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, tokens, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        base_url: &str,
        tokens: SharedTokenStore,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
            tokens,
            status: StatusCell::new(),
        })
    }

    pub fn tokens(&self) -> &SharedTokenStore {
        &self.tokens
    }

    pub fn status(&self) -> &StatusCell {
        &self.status
    }

    /// Resolve `path` against the base URL. Returns the URL and whether it
    /// targets the backend (and so may carry the credential).
    fn resolve(&self, path: &str) -> (String, bool) {
        if path.starts_with("http://") || path.starts_with("https://") {
            (path.to_string(), false)
        } else {
            (
                format!("{}{}", self.base_url, path.trim_start_matches('/')),
                true,
            )
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let (url, relative) = self.resolve(path);
        let builder = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json");

        match self.tokens.get() {
            Some(token) if relative => builder.bearer_auth(token),
            _ => builder,
        }
    }

    /// Send once, no retries. Non-2xx statuses become `ApiError`; a `401`
    /// also clears the token and marks the session unauthenticated.
    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(path = path, status = status.as_u16(), "API response");

        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            warn!(path = path, "Token rejected, ending session");
            self.tokens.clear();
            self.status.set(AuthStatus::Unauthenticated);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, &body))
    }

    async fn parse<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", path, e))
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path), path).await?;
        Self::parse(response, path).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path).json(body);
        let response = self.send(builder, path).await?;
        Self::parse(response, path).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::PATCH, path).json(body);
        let response = self.send(builder, path).await?;
        Self::parse(response, path).await
    }

    /// DELETE, ignoring any response body (backends usually answer 204)
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path), path).await?;
        Ok(())
    }
}

/// Ensure the base URL ends with exactly one slash so paths join cleanly.
fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim().trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::MemoryTokenStore;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Arc::new(MemoryTokenStore::new())).unwrap()
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://host/api"), "http://host/api/");
        assert_eq!(normalize_base_url("http://host/api///"), "http://host/api/");
    }

    #[test]
    fn test_resolve_relative_paths() {
        let api = client("http://localhost:8000/api");
        assert_eq!(
            api.resolve("projects/"),
            ("http://localhost:8000/api/projects/".to_string(), true)
        );
        assert_eq!(
            api.resolve("/auth/login/"),
            ("http://localhost:8000/api/auth/login/".to_string(), true)
        );
    }

    #[test]
    fn test_resolve_absolute_url_is_foreign() {
        let api = client("http://localhost:8000/api/");
        let (url, relative) = api.resolve("https://elsewhere.example/x");
        assert_eq!(url, "https://elsewhere.example/x");
        assert!(!relative);
    }

    #[test]
    fn test_clones_share_status() {
        let api = client("http://localhost/");
        let other = api.clone();
        other.status().set(AuthStatus::Authenticated);
        assert_eq!(api.status().get(), AuthStatus::Authenticated);
    }
}
