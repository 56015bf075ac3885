//! Data models for Singthesizer entities.
//!
//! - `Project`, `MusicalKey`: the user-owned music project
//! - `ProjectForm`, `ProjectPayload`: client-side form and request body
//! - `LoginData`, `RegisterData`, `AuthResponse`: authentication exchange

pub mod auth;
pub mod project;

pub use auth::{AuthResponse, CredentialsError, LoginData, RegisterData};
pub use project::{
    MusicalKey, Project, ProjectForm, ProjectPayload, ProjectValidationError,
    DEFAULT_BPM, MAX_BPM, MIN_BPM,
};
