//! Sign-in and registration screens.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, LoginFocus, RegisterFocus};
use crate::ui::render::{centered_rect_fixed, logo_lines};
use crate::ui::styles;

use super::{button_span, input_line, mask};

const CARD_WIDTH: u16 = 48;
const INDENT: usize = 2;

pub fn render_login(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.login;
    let busy = form.pending;

    let mut lines = logo_lines();
    lines.push(Line::from(""));
    lines.push(input_line(
        "Username:",
        &form.username,
        form.focus == LoginFocus::Username,
        busy,
        INDENT,
    ));
    lines.push(input_line(
        "Password:",
        &mask(&form.password),
        form.focus == LoginFocus::Password,
        busy,
        INDENT,
    ));
    lines.push(Line::from(""));

    let label = if busy { "Signing in..." } else { "Sign In" };
    lines.push(Line::from(vec![
        Span::raw("            ["),
        button_span(label, form.focus == LoginFocus::Button, busy),
        Span::raw("]"),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Don't have an account? ", styles::muted_style()),
        Span::styled(
            "Register",
            styles::field_style(form.focus == LoginFocus::RegisterLink, busy),
        ),
    ]));

    push_error(&mut lines, form.error.as_deref());
    render_card(frame, area, "Sign In", lines);
}

pub fn render_register(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.register;
    let busy = form.pending;

    let mut lines = logo_lines();
    lines.push(Line::from(""));
    lines.push(input_line(
        "Username:",
        &form.username,
        form.focus == RegisterFocus::Username,
        busy,
        INDENT,
    ));
    lines.push(input_line(
        "Email:",
        &form.email,
        form.focus == RegisterFocus::Email,
        busy,
        INDENT,
    ));
    lines.push(input_line(
        "Password:",
        &mask(&form.password),
        form.focus == RegisterFocus::Password,
        busy,
        INDENT,
    ));
    lines.push(input_line(
        "Confirm:",
        &mask(&form.password_confirm),
        form.focus == RegisterFocus::PasswordConfirm,
        busy,
        INDENT,
    ));
    lines.push(Line::from(""));

    let label = if busy { "Creating account..." } else { "Create Account" };
    lines.push(Line::from(vec![
        Span::raw("        ["),
        button_span(label, form.focus == RegisterFocus::Button, busy),
        Span::raw("]"),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Already have an account? ", styles::muted_style()),
        Span::styled(
            "Sign in",
            styles::field_style(form.focus == RegisterFocus::LoginLink, busy),
        ),
    ]));

    push_error(&mut lines, form.error.as_deref());
    render_card(frame, area, "Create Account", lines);
}

fn push_error(lines: &mut Vec<Line<'static>>, error: Option<&str>) {
    if let Some(error) = error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            styles::error_style(),
        )));
    }
}

fn render_card(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    let height = lines.len() as u16 + 2;
    let card = centered_rect_fixed(CARD_WIDTH, height, area);
    frame.render_widget(Clear, card);

    let block = Block::default()
        .title(Span::styled(format!(" {} ", title), styles::title_style()))
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), card);
}
