use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use singthesizer_core::routes::{Guarded, Route};

use crate::app::{App, AppState};

use super::styles;
use super::views::{auth, detail, form, projects};

const LOGO: [&str; 3] = [
    "  ╔═╗╦╔╗╔╔═╗╔╦╗╦ ╦╔═╗╔═╗╦╔═╗╔═╗╦═╗",
    "  ╚═╗║║║║║ ╦ ║ ╠═╣║╣ ╚═╗║╔═╝║╣ ╠╦╝",
    "  ╚═╝╩╝╚╝╚═╝ ╩ ╩ ╩╚═╝╚═╝╩╚═╝╚═╝╩╚═",
];

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Render overlays
    if let Some(ref state) = app.project_form {
        form::render_project_form(frame, state);
    }

    if let Some(ref confirm) = app.delete_confirm {
        form::render_delete_confirm(frame, confirm);
    }

    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

pub fn logo_lines() -> Vec<Line<'static>> {
    LOGO.iter()
        .map(|row| Line::from(Span::styled(*row, styles::title_style())))
        .collect()
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Singthesizer";
    let nav = if app.is_authenticated() {
        let on_projects = app.route == Route::Projects;
        vec![
            Span::styled(
                "[p] My Projects",
                if on_projects {
                    styles::highlight_style()
                } else {
                    styles::muted_style()
                },
            ),
            Span::styled("  [s] Sign out  [?] Help", styles::muted_style()),
        ]
    } else {
        Vec::new()
    };
    let nav_len: usize = nav.iter().map(|s| s.content.chars().count()).sum();

    let mut spans = vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.len() + nav_len + 2),
        )),
    ];
    spans.extend(nav);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_view() {
        Guarded::Render(Route::Login) => auth::render_login(frame, app, area),
        Guarded::Render(Route::Register) => auth::render_register(frame, app, area),
        Guarded::Render(Route::Projects) => projects::render(frame, app, area),
        Guarded::Render(Route::ProjectDetail(_)) => detail::render(frame, app, area),
        // Pending redirects are applied on the next tick
        Guarded::Render(Route::Home) | Guarded::Placeholder | Guarded::Redirect(_) => {
            render_placeholder(frame, area)
        }
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect) {
    let mut lines = logo_lines();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Checking your session...",
        styles::muted_style(),
    )));

    let height = lines.len() as u16;
    let inner = centered_rect_fixed(area.width, height, area);
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.current_view() {
        Guarded::Render(Route::Login) | Guarded::Render(Route::Register) => {
            "[Tab] next field | [Enter] submit | [Ctrl+C] quit"
        }
        Guarded::Render(Route::Projects) => {
            "[n]ew | [Enter] open | [d]elete | [r]eload | [q]uit"
        }
        Guarded::Render(Route::ProjectDetail(_)) => "[e]dit | [d]elete | [Esc] back | [q]uit",
        _ => "[q]uit",
    };

    let left_text = match app.status_message {
        Some(ref msg) => format!(" {} ", msg),
        None => format!(" {} ", app.config.api_base_url),
    };
    let left_style = if app.status_message.is_some() {
        styles::error_style()
    } else {
        styles::muted_style()
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_row(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(key, styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 26, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let mut help_text = logo_lines();
    help_text.push(Line::from(Span::styled(
        format!("              version {}", version),
        styles::muted_style(),
    )));
    help_text.extend([
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_row("  p         ", "My projects"),
        help_row("  ↑/↓ j/k   ", "Move selection"),
        help_row("  PgUp/PgDn ", "Move a page"),
        help_row("  Enter     ", "Open project"),
        help_row("  Esc       ", "Back to projects"),
        Line::from(""),
        Line::from(Span::styled(" Projects", styles::highlight_style())),
        help_row("  n         ", "New project"),
        help_row("  e         ", "Edit project"),
        help_row("  d         ", "Delete project"),
        help_row("  r         ", "Reload"),
        Line::from(""),
        Line::from(Span::styled(" Session", styles::highlight_style())),
        help_row("  s         ", "Sign out"),
        help_row("  q         ", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 10, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = logo_lines();
    lines.extend([
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
