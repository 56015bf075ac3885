//! Authentication module for token storage and session state.
//!
//! This module provides:
//! - `TokenStore`: persistent storage for the single bearer token
//! - `AuthService`: login/register requests that persist the returned token
//! - `AuthSession`: the `loading → authenticated | unauthenticated` state machine
//! - `StatusCell`: the observable status shared with the API client

pub mod service;
pub mod session;
pub mod status;
pub mod token_store;

pub use service::AuthService;
pub use session::AuthSession;
pub use status::{AuthStatus, StatusCell};
pub use token_store::{
    FileTokenStore, KeyringTokenStore, MemoryTokenStore, SharedTokenStore, StoreError, TokenStore,
    TOKEN_KEY,
};
