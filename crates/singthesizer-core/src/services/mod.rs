//! Thin REST wrappers over the backend resources.

pub mod projects;

pub use projects::ProjectService;
