//! pkConnector TUI - interactive admin console
//!
//! This TUI provides:
//! - Sign in with the console accounts, remembered across runs
//! - A dashboard greeting the signed-in user
//! - The user directory with create, edit and delete
//! - An account menu with logout

mod app;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pkconnector_core::auth::{MockCredentialStore, SessionStore};
use pkconnector_core::config::Config;
use pkconnector_core::storage::{FileStore, KeyValueStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use app::App;

/// Log file written inside the data directory
const LOG_FILE_NAME: &str = "pkconnector-tui.log";

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    let data_dir = config.data_dir()?;
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

    // Log to a file; the terminal belongs to the console
    let log_path = data_dir.join(LOG_FILE_NAME);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pkconnector=info".parse()?),
        )
        .init();

    info!(data_dir = %data_dir.display(), "Starting console");
    let session = SessionStore::new(FileStore::in_dir(&data_dir), MockCredentialStore::demo());
    let mut app = App::new(session, &config.ui);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Console closed");
    result
}

fn run_app<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
