//! Route content rendering.

pub mod auth;
pub mod detail;
pub mod form;
pub mod projects;

use ratatui::text::{Line, Span};

use super::styles;

/// Width of the text area inside a bracketed input field
pub const FIELD_WIDTH: usize = 24;

/// A labelled single-line input, e.g. `Username: [alice▌          ]`.
/// Only the tail of long values is shown so the cursor stays visible.
pub fn input_line(
    label: &str,
    value: &str,
    focused: bool,
    busy: bool,
    indent: usize,
) -> Line<'static> {
    let visible: String = {
        let count = value.chars().count();
        value.chars().skip(count.saturating_sub(FIELD_WIDTH - 1)).collect()
    };
    let cursor = if focused && !busy { "▌" } else { "" };
    let display = format!("{}{}", visible, cursor);
    Line::from(vec![
        Span::raw(" ".repeat(indent)),
        Span::styled(format!("{:>10} [", label), styles::muted_style()),
        Span::styled(
            format!("{:<width$}", display, width = FIELD_WIDTH),
            styles::field_style(focused, busy),
        ),
        Span::styled("]", styles::muted_style()),
    ])
}

pub fn mask(value: &str) -> String {
    "*".repeat(value.chars().count())
}

/// A button rendered as `[ ▶ Label ◀ ]` when focused.
pub fn button_span(label: &str, focused: bool, busy: bool) -> Span<'static> {
    let text = if focused {
        format!(" ▶ {} ◀ ", label)
    } else {
        format!("   {}   ", label)
    };
    Span::styled(text, styles::field_style(focused, busy))
}
