//! TaskFlow terminal app
//!
//! Entry point for the TUI binary. Owns terminal setup and teardown and
//! the event loop; every state change goes through the App key handler.
//!
//! Starts with a small demo dataset unless TASKFLOW_EMPTY is set. Logs
//! are off by default because stdout is the UI; set TASKFLOW_LOG to a
//! file path to capture them.

mod app;
mod settings;
mod ui;

use std::fs::File;
use std::io;
use std::sync::Mutex;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;

fn main() -> Result<()> {
    init_tracing()?;

    let mut app = if std::env::var_os("TASKFLOW_EMPTY").is_some() {
        App::new()
    } else {
        App::with_demo_data()
    };

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal before surfacing any error
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
        if app.should_quit {
            tracing::info!("quit requested");
            return Ok(());
        }
    }
}

fn init_tracing() -> Result<()> {
    let Some(path) = std::env::var_os("TASKFLOW_LOG") else {
        return Ok(());
    };
    let file = File::create(path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskflow_core=debug,taskflow=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    tracing::info!("tracing initialized");
    Ok(())
}
