//! User-facing messages for failed operations.
//!
//! Project operations return `None` for `401`: the session has already
//! ended and the caller only stops its own loading state.

use crate::api::ApiError;

pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
pub const SAVE_PROJECT_FAILED: &str = "Failed to save project. Please try again.";
pub const LOAD_PROJECT_FAILED: &str = "Failed to load project. Please try again.";
pub const LOAD_PROJECTS_FAILED: &str = "Failed to load projects. Please try again.";
pub const DELETE_PROJECT_FAILED: &str = "Failed to delete project. Please try again.";
pub const PROJECT_NOT_FOUND: &str = "Project not found.";

const LOGIN_FIELDS: [&str; 1] = ["non_field_errors"];
const REGISTER_FIELDS: [&str; 4] = ["password", "username", "email", "non_field_errors"];
const PROJECT_FIELDS: [&str; 4] = ["name", "bpm", "key", "non_field_errors"];

/// Backend message for the first matching field, or `fallback`.
fn first_message(err: &ApiError, fields: &[&str], fallback: &str) -> String {
    err.body()
        .and_then(|body| body.first_message(fields))
        .unwrap_or(fallback)
        .to_string()
}

/// Always a message: a rejected login is a credential error, even as a `401`.
pub fn login_error(err: &ApiError) -> String {
    first_message(err, &LOGIN_FIELDS, LOGIN_FAILED)
}

pub fn register_error(err: &ApiError) -> String {
    first_message(err, &REGISTER_FIELDS, REGISTRATION_FAILED)
}

pub fn save_project_error(err: &ApiError) -> Option<String> {
    (!err.is_unauthorized()).then(|| first_message(err, &PROJECT_FIELDS, SAVE_PROJECT_FAILED))
}

pub fn load_project_error(err: &ApiError) -> Option<String> {
    match err {
        ApiError::Unauthorized(_) => None,
        ApiError::NotFound(_) => Some(PROJECT_NOT_FOUND.to_string()),
        _ => Some(LOAD_PROJECT_FAILED.to_string()),
    }
}

pub fn load_projects_error(err: &ApiError) -> Option<String> {
    (!err.is_unauthorized()).then(|| LOAD_PROJECTS_FAILED.to_string())
}

pub fn delete_project_error(err: &ApiError) -> Option<String> {
    (!err.is_unauthorized()).then(|| DELETE_PROJECT_FAILED.to_string())
}
