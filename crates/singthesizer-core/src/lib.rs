//! Core library for the Singthesizer client.
//!
//! - `api`: HTTP pipeline with bearer credential and `401` interception
//! - `auth`: token storage, login/register, and the session state machine
//! - `routes`: navigation targets and the route guard
//! - `services`: project CRUD calls
//! - `models`: projects, credentials, and client-side form validation
//! - `messages`: user-facing strings for failed operations
//! - `config`: on-disk configuration and environment overrides

pub mod api;
pub mod auth;
pub mod config;
pub mod messages;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

pub use api::{ApiClient, ApiError, ErrorBody};
pub use auth::{AuthSession, AuthStatus};
pub use config::Config;
pub use routes::{Guarded, Route};
