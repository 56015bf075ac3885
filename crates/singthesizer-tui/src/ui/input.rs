//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use crossterm::event::{KeyCode, KeyEvent};

use singthesizer_core::routes::{Guarded, Route};

use crate::app::{
    can_add_char, App, AppState, FormFocus, LoginFocus, RegisterFocus, TextField,
    PAGE_SCROLL_SIZE,
};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return false;
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return true;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return false;
    }

    // Modals take input before the view underneath
    if app.delete_confirm.is_some() {
        handle_delete_confirm_input(app, key);
        return false;
    }
    if app.project_form.is_some() {
        handle_project_form_input(app, key);
        return false;
    }

    match app.current_view() {
        Guarded::Render(Route::Login) => handle_login_input(app, key),
        Guarded::Render(Route::Register) => handle_register_input(app, key),
        Guarded::Render(Route::Projects) => {
            if !handle_global_input(app, key) {
                handle_projects_input(app, key);
            }
        }
        Guarded::Render(Route::ProjectDetail(_)) => {
            if !handle_global_input(app, key) {
                handle_detail_input(app, key);
            }
        }
        _ => {
            if key.code == KeyCode::Char('q') {
                app.state = AppState::ConfirmingQuit;
            }
        }
    }

    false
}

/// Keys available on every signed-in view. Returns true if consumed.
fn handle_global_input(app: &mut App, key: KeyEvent) -> bool {
    app.status_message = None;
    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('p') => app.navigate(Route::Projects),
        KeyCode::Char('s') => app.logout(),
        _ => return false,
    }
    true
}

fn handle_login_input(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.state = AppState::ConfirmingQuit;
        return;
    }
    if app.login.pending {
        return;
    }

    let form = &mut app.login;
    let focus = form.focus;
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.prev(),
        KeyCode::Enter => match focus {
            LoginFocus::Username => form.focus = LoginFocus::Password,
            LoginFocus::Password | LoginFocus::Button => app.submit_login(),
            LoginFocus::RegisterLink => app.navigate(Route::Register),
        },
        KeyCode::Backspace => match form.focus {
            LoginFocus::Username => {
                form.username.pop();
            }
            LoginFocus::Password => {
                form.password.pop();
            }
            _ => {}
        },
        KeyCode::Char(c) => match form.focus {
            LoginFocus::Username => {
                if can_add_char(TextField::Username, form.username.chars().count(), c) {
                    form.username.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_char(TextField::Password, form.password.chars().count(), c) {
                    form.password.push(c);
                }
            }
            _ => {}
        },
        _ => {}
    }
}

fn handle_register_input(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.navigate(Route::Login);
        return;
    }
    if app.register.pending {
        return;
    }

    let form = &mut app.register;
    let focus = form.focus;
    let field = match focus {
        RegisterFocus::Username => Some((TextField::Username, &mut form.username)),
        RegisterFocus::Email => Some((TextField::Email, &mut form.email)),
        RegisterFocus::Password => Some((TextField::Password, &mut form.password)),
        RegisterFocus::PasswordConfirm => Some((TextField::Password, &mut form.password_confirm)),
        RegisterFocus::Button | RegisterFocus::LoginLink => None,
    };

    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.prev(),
        KeyCode::Enter => match focus {
            RegisterFocus::LoginLink => app.navigate(Route::Login),
            RegisterFocus::PasswordConfirm | RegisterFocus::Button => app.submit_register(),
            _ => form.focus = form.focus.next(),
        },
        KeyCode::Backspace => {
            if let Some((_, value)) = field {
                value.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some((kind, value)) = field {
                if can_add_char(kind, value.chars().count(), c) {
                    value.push(c);
                }
            }
        }
        _ => {}
    }
}

fn handle_projects_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(1),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(1),
        KeyCode::PageUp => app.select_prev(PAGE_SCROLL_SIZE),
        KeyCode::PageDown => app.select_next(PAGE_SCROLL_SIZE),
        KeyCode::Home | KeyCode::Char('g') => app.select_prev(usize::MAX),
        KeyCode::End | KeyCode::Char('G') => app.select_next(usize::MAX),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Char('n') => app.open_create_form(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('r') => app.refresh(),
        _ => {}
    }
}

fn handle_detail_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => app.navigate(Route::Projects),
        KeyCode::Char('e') => app.open_edit_form(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('r') => app.refresh(),
        _ => {}
    }
}

fn handle_project_form_input(app: &mut App, key: KeyEvent) {
    let Some(state) = app.project_form.as_mut() else {
        return;
    };
    if state.pending {
        return;
    }
    let focus = state.focus;

    match key.code {
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Tab | KeyCode::Down => state.focus = state.focus.next(),
        KeyCode::BackTab | KeyCode::Up => state.focus = state.focus.prev(),
        KeyCode::Left => match state.focus {
            FormFocus::Key => state.form.key = state.form.key.prev(),
            FormFocus::Submit => state.focus = FormFocus::Cancel,
            _ => {}
        },
        KeyCode::Right => match state.focus {
            FormFocus::Key => state.form.key = state.form.key.next(),
            FormFocus::Cancel => state.focus = FormFocus::Submit,
            _ => {}
        },
        KeyCode::Enter => match focus {
            FormFocus::Cancel => app.cancel_form(),
            _ => app.submit_project_form(),
        },
        KeyCode::Backspace => match state.focus {
            FormFocus::Name => {
                state.form.name.pop();
            }
            FormFocus::Bpm => {
                state.form.bpm.pop();
            }
            _ => {}
        },
        KeyCode::Char(c) => match state.focus {
            FormFocus::Name => {
                if can_add_char(TextField::ProjectName, state.form.name.chars().count(), c) {
                    state.form.name.push(c);
                }
            }
            FormFocus::Bpm => {
                if can_add_char(TextField::Bpm, state.form.bpm.len(), c) {
                    state.form.bpm.push(c);
                }
            }
            _ => {}
        },
        _ => {}
    }
}

fn handle_delete_confirm_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyModifiers;
    use singthesizer_core::auth::MemoryTokenStore;
    use singthesizer_core::models::MusicalKey;
    use singthesizer_core::{ApiClient, AuthSession, AuthStatus, Config};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_input(app, key(KeyCode::Char(c)));
        }
    }

    async fn app_with_status(status: AuthStatus) -> App {
        let store = Arc::new(MemoryTokenStore::with_token("abc123"));
        let api = ApiClient::new("http://127.0.0.1:9/api/", store).unwrap();
        let session = AuthSession::new(api);
        session.api().status().set(status);
        App::new(Config::default(), session)
    }

    #[tokio::test]
    async fn test_login_typing_and_focus() {
        let mut app = app_with_status(AuthStatus::Unauthenticated).await;
        app.login.username.clear();
        app.navigate(Route::Login);

        type_str(&mut app, "alice");
        handle_input(&mut app, key(KeyCode::Tab));
        type_str(&mut app, "s3cret");
        handle_input(&mut app, key(KeyCode::Backspace));

        assert_eq!(app.login.username, "alice");
        assert_eq!(app.login.password, "s3cre");
        assert_eq!(app.login.focus, LoginFocus::Password);
    }

    #[tokio::test]
    async fn test_register_link_navigates() {
        let mut app = app_with_status(AuthStatus::Unauthenticated).await;
        app.navigate(Route::Login);
        app.login.focus = LoginFocus::RegisterLink;

        handle_input(&mut app, key(KeyCode::Enter));

        assert_eq!(app.route, Route::Register);
        handle_input(&mut app, key(KeyCode::Esc));
        assert_eq!(app.route, Route::Login);
    }

    #[tokio::test]
    async fn test_project_form_keys() {
        let mut app = app_with_status(AuthStatus::Authenticated).await;
        app.navigate(Route::Projects);
        handle_input(&mut app, key(KeyCode::Char('n')));
        assert!(app.project_form.is_some());

        type_str(&mut app, "Neon");
        handle_input(&mut app, key(KeyCode::Tab));
        for _ in 0..3 {
            handle_input(&mut app, key(KeyCode::Backspace));
        }
        type_str(&mut app, "9x5");
        handle_input(&mut app, key(KeyCode::Tab));
        handle_input(&mut app, key(KeyCode::Right));

        let state = app.project_form.as_ref().unwrap();
        assert_eq!(state.form.name, "Neon");
        assert_eq!(state.form.bpm, "95");
        assert_eq!(state.form.key, MusicalKey::CSharp);

        handle_input(&mut app, key(KeyCode::Esc));
        assert!(app.project_form.is_none());
    }

    #[tokio::test]
    async fn test_quit_confirmation() {
        let mut app = app_with_status(AuthStatus::Authenticated).await;
        app.navigate(Route::Projects);

        assert!(!handle_input(&mut app, key(KeyCode::Char('q'))));
        assert_eq!(app.state, AppState::ConfirmingQuit);
        assert!(!handle_input(&mut app, key(KeyCode::Char('n'))));
        assert_eq!(app.state, AppState::Normal);

        handle_input(&mut app, key(KeyCode::Char('q')));
        assert!(handle_input(&mut app, key(KeyCode::Char('y'))));
    }

    #[tokio::test]
    async fn test_sign_out_key() {
        let mut app = app_with_status(AuthStatus::Authenticated).await;
        app.navigate(Route::Projects);

        handle_input(&mut app, key(KeyCode::Char('s')));

        assert_eq!(app.route, Route::Login);
        assert!(!app.is_authenticated());
    }
}
