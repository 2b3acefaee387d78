//! Loan Wizard - terminal wizard for a short-term loan application
//!
//! Three steps (personal data, address and work place, loan parameters)
//! with inline validation, a locally saved draft and a retrying API client.

mod api;
mod app;
mod config;
mod logging;
mod platform;
mod state;
mod storage;
mod ui;

use anyhow::Result;
use app::App;
use config::WizardConfig;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Poll interval for terminal events; background results are applied each tick
const TICK: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    let config = WizardConfig::load()?;
    let log_handle = logging::init_logging(config.data_dir().as_deref())?;
    tracing::info!("Starting loan wizard");
    if let Some(path) = &log_handle.log_file_path {
        tracing::info!("Logging to {}", path.display());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = match App::new(&config) {
        Ok(mut app) => {
            // Optional start location, e.g. `loan-wizard /step/loan`
            if let Some(path) = std::env::args().nth(1) {
                app.open_path(&path);
            }
            run_app(&mut terminal, &mut app).await
        }
        Err(err) => Err(err),
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("Wizard failed: {err:#}");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    tracing::info!("Loan wizard closed");
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.poll_background();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit() {
            return Ok(());
        }

        // Let spawned requests make progress between ticks
        tokio::task::yield_now().await;
    }
}
