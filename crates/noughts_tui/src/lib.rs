//! Terminal front end for the noughts engine.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod input;
pub mod setup;
pub mod ui;

pub use app::{App, AppAction, View};
pub use cli::Cli;
pub use config::{ConfigError, ConfigOverrides, GameConfig};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use noughts::MovePolicy;
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument};

/// Longest wait for input before timers are checked again.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Sends log output to `path`, keeping the terminal clean.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Runs the terminal UI until the user quits.
#[instrument(skip_all)]
pub async fn run_tui(config: GameConfig) -> Result<()> {
    info!("Starting noughts TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("Exiting noughts TUI");
    res
}

/// Draws, reads keys and fires due timers until the app asks to quit.
async fn run_app<B: Backend, P: MovePolicy>(
    terminal: &mut Terminal<B>,
    app: &mut App<P>,
) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    loop {
        if app.take_dirty() {
            terminal.draw(|f| ui::draw(f, app))?;
        }

        let timeout = app
            .next_deadline()
            .map(|due| due.saturating_duration_since(Instant::now()))
            .map_or(POLL_INTERVAL, |wait| wait.min(POLL_INTERVAL));

        if event::poll(timeout)? {
            match event::read()? {
                // Skip key release events (crossterm fires both press and release).
                Event::Key(key) if key.kind == KeyEventKind::Release => {}
                Event::Key(key) => {
                    if app.handle_key(key, Instant::now()) == AppAction::Quit {
                        info!("User quit");
                        return Ok(());
                    }
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "Terminal resized");
                    app.request_redraw();
                }
                _ => {}
            }
        }

        app.tick(Instant::now());
        tokio::task::yield_now().await;
    }
}
