//! Singthesizer TUI - a terminal client for Singthesizer music projects.
//!
//! This application provides a fast, keyboard-driven interface for signing in
//! to a Singthesizer backend and managing your music projects.

mod app;
mod ui;

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use singthesizer_core::auth::{MemoryTokenStore, SharedTokenStore};
use singthesizer_core::messages;
use singthesizer_core::models::LoginData;
use singthesizer_core::{AuthSession, Config};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

const LOG_FILE_NAME: &str = "singthesizer.log";

const USAGE: &str = "\
Usage: singthesizer [OPTION]

Options:
  --login       Sign in from the command line and exit
  --logout      Forget the stored token and exit
  --ephemeral   Keep the token in memory only for this run
  --help        Show this message

Environment:
  SINGTHESIZER_API_URL    Backend base URL (default http://localhost:8000/api/)
  SINGTHESIZER_USERNAME   Username prefilled on the sign-in form
  RUST_LOG                Log filter (default warn)";

/// Initialize the tracing subscriber for logging.
///
/// The terminal belongs to the UI, so logs go to a daily file in the cache
/// directory. The returned guard must live until exit to flush them.
fn init_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = Config::cache_dir().ok()?;
    std::fs::create_dir_all(&log_dir).ok()?;
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let mut config = Config::load()?;
    let _log_guard = init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str);

    let tokens: SharedTokenStore = match command {
        Some("--ephemeral") => Arc::new(MemoryTokenStore::new()),
        _ => config.token_store()?,
    };

    match command {
        Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some("--logout") => {
            tokens.clear();
            println!("Signed out.");
            return Ok(());
        }
        Some("--login") => return login_from_cli(&mut config, tokens).await,
        Some("--ephemeral") | None => {}
        Some(other) => {
            eprintln!("Unknown option: {}\n\n{}", other, USAGE);
            std::process::exit(2);
        }
    }

    info!(api_base_url = %config.api_base_url, "Singthesizer starting");

    let session = AuthSession::new(config.api_client(tokens)?);
    let mut app = App::new(config, session);
    app.start_session();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Singthesizer shutting down");
    Ok(())
}

/// Sign in without starting the UI, storing the token for later runs
async fn login_from_cli(config: &mut Config, tokens: SharedTokenStore) -> Result<()> {
    let default_username = config.last_username.clone().unwrap_or_default();
    if default_username.is_empty() {
        print!("Username: ");
    } else {
        print!("Username [{}]: ", default_username);
    }
    io::stdout().flush()?;

    let mut username = String::new();
    io::stdin()
        .lock()
        .read_line(&mut username)
        .context("Failed to read username")?;
    let username = match username.trim() {
        "" => default_username,
        typed => typed.to_string(),
    };

    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    let data = LoginData::new(&username, &password);
    if let Err(e) = data.validate() {
        anyhow::bail!("{}", e);
    }

    let session = AuthSession::new(config.api_client(tokens)?);
    if let Err(e) = session.login(&data).await {
        anyhow::bail!("{}", messages::login_error(&e));
    }

    config.last_username = Some(username.clone());
    config.save()?;
    println!("Signed in as {}.", username);
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key) {
                    return Ok(());
                }
            }
        }

        // Check for completed background tasks and session changes
        app.check_background_tasks();

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
