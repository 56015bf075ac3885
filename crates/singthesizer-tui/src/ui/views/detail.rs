use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use singthesizer_core::models::Project;
use singthesizer_core::utils::format_date_long;

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let view = &app.detail;

    let (title, lines) = match (&view.project, &view.error) {
        (Some(project), _) => (format!(" {} ", project.name), project_lines(project)),
        (None, Some(error)) => (
            " Project ".to_string(),
            vec![
                Line::from(""),
                Line::from(Span::styled(error.clone(), styles::error_style())),
                Line::from(""),
                Line::from(vec![
                    Span::styled("[Esc]", styles::help_key_style()),
                    Span::styled(" Back to projects", styles::muted_style()),
                ]),
            ],
        ),
        (None, None) => (
            " Project ".to_string(),
            vec![
                Line::from(""),
                Line::from(Span::styled("Loading project...", styles::muted_style())),
            ],
        ),
    };

    let alignment = if view.project.is_some() {
        Alignment::Left
    } else {
        Alignment::Center
    };

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let paragraph = Paragraph::new(lines)
        .alignment(alignment)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}

fn field(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", label), styles::label_style()),
        Span::styled(value, styles::list_item_style()),
    ])
}

fn project_lines(project: &Project) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled("  Project Details", styles::highlight_style())),
        Line::from(""),
        field("BPM", project.bpm.to_string()),
        field("Key", project.key.to_string()),
        Line::from(""),
        field("Created", format_date_long(&project.created_at)),
        field("Updated", format_date_long(&project.updated_at)),
        Line::from(""),
        Line::from(Span::styled("  Tracks", styles::highlight_style())),
        Line::from(Span::styled(
            "  No tracks yet. Tracks will appear here once added.",
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [e]", styles::help_key_style()),
            Span::styled(" Edit  ", styles::muted_style()),
            Span::styled("[d]", styles::help_key_style()),
            Span::styled(" Delete  ", styles::muted_style()),
            Span::styled("[Esc]", styles::help_key_style()),
            Span::styled(" Back to projects", styles::muted_style()),
        ]),
    ]
}
