use tracing::info;

use crate::api::{ApiClient, ApiError};
use crate::models::{AuthResponse, LoginData, RegisterData};

const LOGIN_PATH: &str = "auth/login/";
const REGISTER_PATH: &str = "auth/register/";

/// Exchanges credentials for a token and persists it.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn login(&self, data: &LoginData) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self.api.post(LOGIN_PATH, data).await?;
        self.api.tokens().set(&response.token)?;
        info!(username = %data.username, "Logged in");
        Ok(response)
    }

    pub async fn register(&self, data: &RegisterData) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self.api.post(REGISTER_PATH, data).await?;
        self.api.tokens().set(&response.token)?;
        info!(username = %data.username, "Registered new account");
        Ok(response)
    }

    pub fn logout(&self) {
        self.api.tokens().clear();
    }
}
