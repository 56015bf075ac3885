//! Project create/edit and delete confirmation modals.

use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use singthesizer_core::models::{MAX_BPM, MIN_BPM};

use crate::app::{DeleteConfirm, FormFocus, ProjectFormState};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

use super::{button_span, input_line};

const MODAL_WIDTH: u16 = 48;

pub fn render_project_form(frame: &mut Frame, state: &ProjectFormState) {
    let busy = state.pending;
    let focus = state.focus;

    let mut lines = vec![
        Line::from(""),
        input_line("Name:", &state.form.name, focus == FormFocus::Name, busy, 1),
        input_line("BPM:", &state.form.bpm, focus == FormFocus::Bpm, busy, 1),
        Line::from(Span::styled(
            format!("{:>13}{}-{}", "", MIN_BPM, MAX_BPM),
            styles::muted_style(),
        )),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(format!("{:>10} ", "Key:"), styles::muted_style()),
            Span::styled(
                format!("◀ {:^3} ▶", state.form.key.as_str()),
                styles::field_style(focus == FormFocus::Key, busy),
            ),
        ]),
        Line::from(""),
    ];

    let submit = if busy { "Saving..." } else { state.submit_label() };
    lines.push(Line::from(vec![
        Span::raw("     ["),
        button_span("Cancel", focus == FormFocus::Cancel, busy),
        Span::raw("]   ["),
        button_span(submit, focus == FormFocus::Submit, busy),
        Span::raw("]"),
    ]));

    if let Some(ref error) = state.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    }

    let area = centered_rect_fixed(MODAL_WIDTH, lines.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(format!(" {} ", state.title()), styles::title_style()))
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_delete_confirm(frame: &mut Frame, confirm: &DeleteConfirm) {
    let question = match confirm.name {
        Some(ref name) => format!(" Delete \"{}\"?", name),
        None => " Delete this project?".to_string(),
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(question, styles::highlight_style())),
        Line::from(Span::styled(
            " This cannot be undone.",
            styles::muted_style(),
        )),
        Line::from(""),
    ];

    if confirm.pending {
        lines.push(Line::from(Span::styled(" Deleting...", styles::disabled_style())));
    } else {
        lines.push(Line::from(vec![
            Span::styled(" Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to delete, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]));
    }

    let area = centered_rect_fixed(MODAL_WIDTH, lines.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(" Delete Project ", styles::error_style()))
        .borders(Borders::ALL)
        .border_style(styles::danger_border_style());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
