//! Utility functions for string and date formatting.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{format_date_long, format_date_short, truncate};
