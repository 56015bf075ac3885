//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Main frame rendering, layout, and overlays
//! - `input`: Keyboard event handling
//! - `styles`: Synthwave palette and text styling
//! - `views`: Per-route content (auth forms, project list, project detail)

pub mod input;
pub mod render;
pub mod styles;
pub mod views;
