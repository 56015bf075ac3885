use ratatui::style::{Color, Modifier, Style};

// Synthwave palette
pub const PURPLE: Color = Color::Rgb(168, 85, 247);
pub const BLUE: Color = Color::Rgb(59, 130, 246);
pub const ORANGE: Color = Color::Rgb(249, 115, 22);
pub const ERROR: Color = Color::Rgb(239, 68, 68);
pub const TEXT_PRIMARY: Color = Color::Rgb(224, 231, 255);
pub const TEXT_SECONDARY: Color = Color::Rgb(165, 180, 252);
pub const CARD: Color = Color::Rgb(26, 26, 46);
pub const HIGHLIGHT: Color = Color::Rgb(48, 33, 72);

// Styles
pub fn title_style() -> Style {
    Style::default().fg(PURPLE).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default()
        .bg(HIGHLIGHT)
        .fg(TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn label_style() -> Style {
    Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn muted_style() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ORANGE)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn disabled_style() -> Style {
    Style::default().fg(TEXT_SECONDARY).add_modifier(Modifier::DIM)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PURPLE)
    } else {
        Style::default().fg(BLUE)
    }
}

pub fn danger_border_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(CARD).fg(TEXT_PRIMARY)
}

pub fn help_key_style() -> Style {
    Style::default().fg(ORANGE).add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

/// Style for a form field or button depending on focus and busy state.
pub fn field_style(focused: bool, busy: bool) -> Style {
    if busy {
        disabled_style()
    } else if focused {
        selected_style()
    } else {
        list_item_style()
    }
}
