//! Application state management for Singthesizer.
//!
//! This module contains the core `App` struct that manages all application state,
//! including the current route, form state, per-view data, and the channel that
//! background network tasks report back on.

use std::future::Future;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use singthesizer_core::auth::AuthSession;
use singthesizer_core::messages;
use singthesizer_core::models::{LoginData, Project, ProjectForm, RegisterData};
use singthesizer_core::routes::{self, Guarded, Route};
use singthesizer_core::services::ProjectService;
use singthesizer_core::{ApiError, AuthStatus, Config};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// At most a handful of requests are ever in flight at once.
const CHANNEL_BUFFER_SIZE: usize = 16;

/// Maximum length for username input (the backend's username column).
const MAX_USERNAME_LENGTH: usize = 150;

/// Maximum length for email input.
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for a project name.
const MAX_PROJECT_NAME_LENGTH: usize = 100;

/// BPM never needs more than three digits.
const MAX_BPM_DIGITS: usize = 3;

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginFocus {
    #[default]
    Username,
    Password,
    Button,
    RegisterLink,
}

impl LoginFocus {
    pub fn next(&self) -> Self {
        match self {
            LoginFocus::Username => LoginFocus::Password,
            LoginFocus::Password => LoginFocus::Button,
            LoginFocus::Button => LoginFocus::RegisterLink,
            LoginFocus::RegisterLink => LoginFocus::Username,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            LoginFocus::Username => LoginFocus::RegisterLink,
            LoginFocus::Password => LoginFocus::Username,
            LoginFocus::Button => LoginFocus::Password,
            LoginFocus::RegisterLink => LoginFocus::Button,
        }
    }
}

/// Register form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterFocus {
    #[default]
    Username,
    Email,
    Password,
    PasswordConfirm,
    Button,
    LoginLink,
}

impl RegisterFocus {
    pub fn next(&self) -> Self {
        match self {
            RegisterFocus::Username => RegisterFocus::Email,
            RegisterFocus::Email => RegisterFocus::Password,
            RegisterFocus::Password => RegisterFocus::PasswordConfirm,
            RegisterFocus::PasswordConfirm => RegisterFocus::Button,
            RegisterFocus::Button => RegisterFocus::LoginLink,
            RegisterFocus::LoginLink => RegisterFocus::Username,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            RegisterFocus::Username => RegisterFocus::LoginLink,
            RegisterFocus::Email => RegisterFocus::Username,
            RegisterFocus::Password => RegisterFocus::Email,
            RegisterFocus::PasswordConfirm => RegisterFocus::Password,
            RegisterFocus::Button => RegisterFocus::PasswordConfirm,
            RegisterFocus::LoginLink => RegisterFocus::Button,
        }
    }
}

/// Project form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormFocus {
    #[default]
    Name,
    Bpm,
    Key,
    Cancel,
    Submit,
}

impl FormFocus {
    pub fn next(&self) -> Self {
        match self {
            FormFocus::Name => FormFocus::Bpm,
            FormFocus::Bpm => FormFocus::Key,
            FormFocus::Key => FormFocus::Cancel,
            FormFocus::Cancel => FormFocus::Submit,
            FormFocus::Submit => FormFocus::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormFocus::Name => FormFocus::Submit,
            FormFocus::Bpm => FormFocus::Name,
            FormFocus::Key => FormFocus::Bpm,
            FormFocus::Cancel => FormFocus::Key,
            FormFocus::Submit => FormFocus::Cancel,
        }
    }
}

#[derive(Debug, Default)]
pub struct LoginFormState {
    pub username: String,
    pub password: String,
    pub focus: LoginFocus,
    pub error: Option<String>,
    /// Request in flight; the form ignores input until it settles.
    pub pending: bool,
}

#[derive(Debug, Default)]
pub struct RegisterFormState {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub focus: RegisterFocus,
    pub error: Option<String>,
    pub pending: bool,
}

impl RegisterFormState {
    fn data(&self) -> RegisterData {
        RegisterData {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            password_confirm: self.password_confirm.clone(),
        }
    }
}

/// Whether the project form creates a new project or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Debug)]
pub struct ProjectFormState {
    pub form: ProjectForm,
    pub mode: FormMode,
    pub focus: FormFocus,
    pub error: Option<String>,
    pub pending: bool,
}

impl ProjectFormState {
    fn new(form: ProjectForm, mode: FormMode) -> Self {
        Self {
            form,
            mode,
            focus: FormFocus::Name,
            error: None,
            pending: false,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Create New Project",
            FormMode::Edit(_) => "Edit Project",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Create",
            FormMode::Edit(_) => "Save",
        }
    }
}

/// Data held for the project list while it is on screen
#[derive(Debug, Default)]
pub struct ProjectListView {
    pub items: Vec<Project>,
    pub selection: usize,
    pub loading: bool,
    pub error: Option<String>,
}

/// Data held for the project detail view while it is on screen
#[derive(Debug, Default)]
pub struct ProjectDetailView {
    pub project: Option<Project>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct DeleteConfirm {
    pub id: i64,
    pub name: Option<String>,
    pub pending: bool,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent back from spawned network tasks.
enum TaskResult {
    /// Login finished (username, outcome)
    Login(String, Result<(), ApiError>),
    /// Registration finished (username, outcome)
    Register(String, Result<(), ApiError>),
    Projects(Result<Vec<Project>, ApiError>),
    /// Single project fetched for the detail view (id, outcome)
    Project(i64, Result<Project, ApiError>),
    Created(Result<Project, ApiError>),
    Updated(Result<Project, ApiError>),
    /// Project deleted (id, outcome)
    Deleted(i64, Result<(), ApiError>),
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    pub session: AuthSession,
    projects_api: ProjectService,

    // Navigation
    pub state: AppState,
    pub route: Route,
    /// Rendered route whose data has been requested for the current visit
    entered_route: Option<Route>,
    status_rx: watch::Receiver<AuthStatus>,

    // Forms
    pub login: LoginFormState,
    pub register: RegisterFormState,
    pub project_form: Option<ProjectFormState>,
    pub delete_confirm: Option<DeleteConfirm>,

    // Per-view data, dropped when the view is left
    pub projects: ProjectListView,
    pub detail: ProjectDetailView,

    // Status message
    pub status_message: Option<String>,

    // Background task channel
    task_rx: mpsc::Receiver<TaskResult>,
    task_tx: mpsc::Sender<TaskResult>,
}

impl App {
    /// Create a new application instance around an already constructed session
    pub fn new(config: Config, session: AuthSession) -> Self {
        let (task_tx, task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let status_rx = session.subscribe();
        let projects_api = ProjectService::new(session.api().clone());

        let login = LoginFormState {
            username: config.last_username.clone().unwrap_or_default(),
            ..Default::default()
        };

        Self {
            config,
            session,
            projects_api,

            state: AppState::Normal,
            route: Route::Home,
            entered_route: None,
            status_rx,

            login,
            register: RegisterFormState::default(),
            project_form: None,
            delete_confirm: None,

            projects: ProjectListView::default(),
            detail: ProjectDetailView::default(),

            status_message: None,

            task_rx,
            task_tx,
        }
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Validate the stored token in the background
    pub fn start_session(&self) {
        let session = self.session.clone();
        tokio::spawn(async move {
            let status = session.initialize().await;
            debug!(?status, "Session initialized");
        });
    }

    pub fn auth_status(&self) -> AuthStatus {
        self.session.status()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_status().is_authenticated()
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.clear_page_data();
        self.navigate(Route::Login);
    }

    fn spawn_task<F>(&self, task: F)
    where
        F: Future<Output = TaskResult> + Send + 'static,
    {
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = task.await;
            if tx.send(result).await.is_err() {
                debug!("App closed before background task finished");
            }
        });
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn navigate(&mut self, route: Route) {
        debug!(from = %self.route, to = %route, "Navigate");
        self.route = route;
        self.entered_route = None;
        self.project_form = None;
        self.delete_confirm = None;
        self.sync_route();
    }

    /// What the current route resolves to under the route guard
    pub fn current_view(&self) -> Guarded<Route> {
        routes::resolve(self.auth_status(), self.route)
    }

    /// Apply the route guard to the current route, following redirects and
    /// loading data for a view the first time it renders.
    pub fn sync_route(&mut self) {
        loop {
            match self.current_view() {
                Guarded::Placeholder => return,
                Guarded::Redirect(target) => {
                    debug!(from = %self.route, to = %target, "Redirect");
                    self.route = target;
                    self.entered_route = None;
                    self.project_form = None;
                    self.delete_confirm = None;
                }
                Guarded::Render(route) => {
                    if self.entered_route != Some(route) {
                        self.entered_route = Some(route);
                        self.enter(route);
                    }
                    return;
                }
            }
        }
    }

    fn enter(&mut self, route: Route) {
        match route {
            Route::Projects => self.load_projects(),
            Route::ProjectDetail(id) => self.load_project(id),
            Route::Login => {
                self.login.password.clear();
                self.login.pending = false;
                self.login.focus = if self.login.username.is_empty() {
                    LoginFocus::Username
                } else {
                    LoginFocus::Password
                };
            }
            Route::Register => {
                self.register = RegisterFormState {
                    username: std::mem::take(&mut self.register.username),
                    email: std::mem::take(&mut self.register.email),
                    ..Default::default()
                };
            }
            Route::Home => {}
        }
    }

    fn clear_page_data(&mut self) {
        self.projects = ProjectListView::default();
        self.detail = ProjectDetailView::default();
        self.project_form = None;
        self.delete_confirm = None;
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub fn submit_login(&mut self) {
        if self.login.pending {
            return;
        }
        let data = LoginData::new(&self.login.username, &self.login.password);
        if let Err(e) = data.validate() {
            self.login.error = Some(e.to_string());
            return;
        }

        self.login.error = None;
        self.login.pending = true;
        let session = self.session.clone();
        self.spawn_task(async move {
            let result = session.login(&data).await;
            TaskResult::Login(data.username, result)
        });
    }

    pub fn submit_register(&mut self) {
        if self.register.pending {
            return;
        }
        let data = self.register.data();
        if let Err(e) = data.validate() {
            self.register.error = Some(e.to_string());
            return;
        }

        self.register.error = None;
        self.register.pending = true;
        let session = self.session.clone();
        self.spawn_task(async move {
            let result = session.register(&data).await;
            TaskResult::Register(data.username, result)
        });
    }

    fn remember_username(&mut self, username: String) {
        if self.config.last_username.as_deref() == Some(username.as_str()) {
            return;
        }
        self.config.last_username = Some(username);
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }
    }

    // =========================================================================
    // Projects
    // =========================================================================

    fn load_projects(&mut self) {
        self.projects.loading = true;
        self.projects.error = None;
        let api = self.projects_api.clone();
        self.spawn_task(async move { TaskResult::Projects(api.list().await) });
    }

    fn load_project(&mut self, id: i64) {
        self.detail = ProjectDetailView {
            loading: true,
            ..Default::default()
        };
        let api = self.projects_api.clone();
        self.spawn_task(async move { TaskResult::Project(id, api.get(id).await) });
    }

    /// Reload the data behind the current view
    pub fn refresh(&mut self) {
        match self.current_view() {
            Guarded::Render(Route::Projects) => self.load_projects(),
            Guarded::Render(Route::ProjectDetail(id)) => self.load_project(id),
            _ => {}
        }
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.projects.items.get(self.projects.selection)
    }

    pub fn select_next(&mut self, step: usize) {
        let last = self.projects.items.len().saturating_sub(1);
        self.projects.selection = (self.projects.selection + step).min(last);
    }

    pub fn select_prev(&mut self, step: usize) {
        self.projects.selection = self.projects.selection.saturating_sub(step);
    }

    pub fn open_selected(&mut self) {
        if let Some(id) = self.selected_project().map(|p| p.id) {
            self.navigate(Route::ProjectDetail(id));
        }
    }

    pub fn open_create_form(&mut self) {
        self.project_form = Some(ProjectFormState::new(ProjectForm::default(), FormMode::Create));
    }

    pub fn open_edit_form(&mut self) {
        if let Some(ref project) = self.detail.project {
            self.project_form = Some(ProjectFormState::new(
                ProjectForm::from_project(project),
                FormMode::Edit(project.id),
            ));
        }
    }

    pub fn cancel_form(&mut self) {
        if self.project_form.as_ref().is_some_and(|f| !f.pending) {
            self.project_form = None;
        }
    }

    /// Validate locally, then create or update. Nothing is sent when the
    /// form is invalid.
    pub fn submit_project_form(&mut self) {
        let Some(state) = self.project_form.as_mut() else {
            return;
        };
        if state.pending {
            return;
        }
        let payload = match state.form.validate() {
            Ok(payload) => payload,
            Err(e) => {
                state.error = Some(e.to_string());
                return;
            }
        };

        state.error = None;
        state.pending = true;
        let mode = state.mode;
        let api = self.projects_api.clone();
        match mode {
            FormMode::Create => {
                self.spawn_task(async move { TaskResult::Created(api.create(&payload).await) })
            }
            FormMode::Edit(id) => {
                self.spawn_task(async move { TaskResult::Updated(api.update(id, &payload).await) })
            }
        }
    }

    /// Ask to delete the project under the cursor (list) or on screen (detail)
    pub fn request_delete(&mut self) {
        let target = match self.route {
            Route::Projects => self.selected_project().map(|p| (p.id, None)),
            Route::ProjectDetail(_) => self
                .detail
                .project
                .as_ref()
                .map(|p| (p.id, Some(p.name.clone()))),
            _ => None,
        };
        if let Some((id, name)) = target {
            self.delete_confirm = Some(DeleteConfirm {
                id,
                name,
                pending: false,
            });
        }
    }

    pub fn cancel_delete(&mut self) {
        if self.delete_confirm.as_ref().is_some_and(|d| !d.pending) {
            self.delete_confirm = None;
        }
    }

    pub fn confirm_delete(&mut self) {
        let Some(confirm) = self.delete_confirm.as_mut() else {
            return;
        };
        if confirm.pending {
            return;
        }
        confirm.pending = true;
        let id = confirm.id;
        let api = self.projects_api.clone();
        self.spawn_task(async move { TaskResult::Deleted(id, api.delete(id).await) });
    }

    // =========================================================================
    // Background Tasks
    // =========================================================================

    /// Check for completed background tasks and status changes
    pub fn check_background_tasks(&mut self) {
        // Collect all pending results first to avoid borrow conflicts
        let mut results = Vec::new();
        while let Ok(result) = self.task_rx.try_recv() {
            results.push(result);
        }

        for result in results {
            self.process_task_result(result);
        }

        if self.status_rx.has_changed().unwrap_or(false) {
            let status = *self.status_rx.borrow_and_update();
            info!(?status, "Authentication status changed");
            if !status.is_authenticated() {
                self.clear_page_data();
            }
        }

        self.sync_route();
    }

    fn process_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Login(username, result) => {
                self.login.pending = false;
                match result {
                    Ok(()) => {
                        self.login.password.clear();
                        self.remember_username(username);
                        self.navigate(Route::Projects);
                    }
                    Err(e) => {
                        warn!(error = %e, "Login failed");
                        self.login.error = Some(messages::login_error(&e));
                    }
                }
            }
            TaskResult::Register(username, result) => {
                self.register.pending = false;
                match result {
                    Ok(()) => {
                        self.register.password.clear();
                        self.register.password_confirm.clear();
                        self.remember_username(username);
                        self.navigate(Route::Projects);
                    }
                    Err(e) => {
                        warn!(error = %e, "Registration failed");
                        self.register.error = Some(messages::register_error(&e));
                    }
                }
            }
            TaskResult::Projects(result) => {
                self.projects.loading = false;
                match result {
                    Ok(items) => {
                        self.projects.items = items;
                        let last = self.projects.items.len().saturating_sub(1);
                        self.projects.selection = self.projects.selection.min(last);
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to load projects");
                        self.projects.error = messages::load_projects_error(&e);
                    }
                }
            }
            TaskResult::Project(id, result) => {
                if self.route != Route::ProjectDetail(id) {
                    debug!(id, "Dropping result for a view no longer shown");
                    return;
                }
                self.detail.loading = false;
                match result {
                    Ok(project) => {
                        self.detail.project = Some(project);
                        self.detail.error = None;
                    }
                    Err(e) => {
                        warn!(error = %e, id, "Failed to load project");
                        self.detail.project = None;
                        self.detail.error = messages::load_project_error(&e);
                    }
                }
            }
            TaskResult::Created(result) => match result {
                Ok(project) => {
                    info!(id = project.id, "Project created");
                    let id = project.id;
                    self.projects.items.insert(0, project);
                    self.project_form = None;
                    self.navigate(Route::ProjectDetail(id));
                }
                Err(e) => self.fail_project_form(&e),
            },
            TaskResult::Updated(result) => match result {
                Ok(project) => {
                    info!(id = project.id, "Project updated");
                    if self.route == Route::ProjectDetail(project.id) {
                        self.detail.project = Some(project);
                    }
                    self.project_form = None;
                }
                Err(e) => self.fail_project_form(&e),
            },
            TaskResult::Deleted(id, result) => {
                self.delete_confirm = None;
                match result {
                    Ok(()) => {
                        info!(id, "Project deleted");
                        self.projects.items.retain(|p| p.id != id);
                        let last = self.projects.items.len().saturating_sub(1);
                        self.projects.selection = self.projects.selection.min(last);
                        if self.route == Route::ProjectDetail(id) {
                            self.navigate(Route::Projects);
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, id, "Failed to delete project");
                        self.status_message = messages::delete_project_error(&e);
                    }
                }
            }
        }
    }

    fn fail_project_form(&mut self, e: &ApiError) {
        warn!(error = %e, "Failed to save project");
        if let Some(ref mut form) = self.project_form {
            form.pending = false;
            form.error = messages::save_project_error(e);
        }
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Which text field a typed character is destined for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Username,
    Email,
    Password,
    ProjectName,
    Bpm,
}

impl TextField {
    fn max_len(&self) -> usize {
        match self {
            TextField::Username => MAX_USERNAME_LENGTH,
            TextField::Email => MAX_EMAIL_LENGTH,
            TextField::Password => MAX_PASSWORD_LENGTH,
            TextField::ProjectName => MAX_PROJECT_NAME_LENGTH,
            TextField::Bpm => MAX_BPM_DIGITS,
        }
    }
}

/// Check if a character should be accepted into `field`
pub fn can_add_char(field: TextField, current_len: usize, c: char) -> bool {
    if current_len >= field.max_len() || c.is_control() {
        return false;
    }
    match field {
        TextField::Bpm => c.is_ascii_digit(),
        TextField::Username | TextField::Email => !c.is_whitespace(),
        TextField::Password | TextField::ProjectName => true,
    }
}

// ============================================================================
// Tests
// ============================================================================
