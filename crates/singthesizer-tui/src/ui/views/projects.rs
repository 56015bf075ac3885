use ratatui::{
    layout::{Alignment, Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use singthesizer_core::utils::{format_date_short, truncate};

use crate::app::App;
use crate::ui::styles;

/// Render the project list - a table of the user's projects
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let view = &app.projects;
    let block = Block::default()
        .title(format!(" My Projects ({}) ", view.items.len()))
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    if view.loading && view.items.is_empty() {
        render_message(frame, area, block, vec![Line::from(Span::styled(
            "Loading projects...",
            styles::muted_style(),
        ))]);
        return;
    }

    if let Some(ref error) = view.error {
        render_message(frame, area, block, vec![
            Line::from(Span::styled(error.clone(), styles::error_style())),
            Line::from(""),
            Line::from(Span::styled("Press [r] to try again", styles::muted_style())),
        ]);
        return;
    }

    if view.items.is_empty() {
        render_message(frame, area, block, vec![
            Line::from(Span::styled("No projects yet", styles::label_style())),
            Line::from(Span::styled(
                "Create your first project to get started!",
                styles::muted_style(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", styles::muted_style()),
                Span::styled("[n]", styles::help_key_style()),
                Span::styled(" to create a project", styles::muted_style()),
            ]),
        ]);
        return;
    }

    let header = Row::new([
        Cell::from("Name"),
        Cell::from("BPM"),
        Cell::from("Key"),
        Cell::from("Created"),
        Cell::from("Updated"),
    ])
    .style(styles::title_style())
    .height(1);

    let name_width = (area.width as usize).saturating_sub(2 + 5 + 4 + 14 + 14 + 5);
    let rows: Vec<Row> = view
        .items
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let style = if i == view.selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            Row::new(vec![
                Cell::from(truncate(&project.name, name_width.max(8))),
                Cell::from(format!("{:>3}", project.bpm)),
                Cell::from(project.key.as_str()),
                Cell::from(format_date_short(&project.created_at)),
                Cell::from(format_date_short(&project.updated_at)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Fill(1),    // Name
        Constraint::Length(5),  // BPM
        Constraint::Length(4),  // Key
        Constraint::Length(14), // Created
        Constraint::Length(14), // Updated
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(view.selection));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_message(frame: &mut Frame, area: Rect, block: Block, lines: Vec<Line>) {
    let top_pad = (area.height.saturating_sub(lines.len() as u16 + 2)) / 2;
    let mut padded = vec![Line::from(""); top_pad as usize];
    padded.extend(lines);
    let paragraph = Paragraph::new(padded)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}
