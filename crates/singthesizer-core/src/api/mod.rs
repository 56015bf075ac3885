//! REST API client module for the Singthesizer backend.
//!
//! This module provides the `ApiClient` used by every service call and the
//! `ApiError` taxonomy decoded at the HTTP boundary.
//!
//! The API uses bearer token authentication obtained from the
//! `auth/login/` and `auth/register/` endpoints.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{ApiError, ErrorBody};
