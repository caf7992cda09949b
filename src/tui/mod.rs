use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc};
use tokio::sync::mpsc;

pub mod app;
pub mod events;
pub mod theme;
pub mod tracing_layer;
pub mod ui;
pub mod widgets;

pub use app::{App, UILogEntry};
use events::run_app_loop;

use crate::{
    auth_manager::AuthManager, config::Config, playlist_manager::PlaylistManager,
    problem_manager::ProblemManager,
};

/// Main function to run the TUI.
///
/// Initializes the terminal, creates the `App` state and enters the event
/// loop; restores the terminal on the way out.
pub async fn run_tui(
    config: Arc<Config>,
    problem_manager: Arc<ProblemManager>,
    playlist_manager: Arc<PlaylistManager>,
    auth_manager: Arc<AuthManager>,
    log_receiver: mpsc::UnboundedReceiver<UILogEntry>,
) -> Result<()> {
    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // create app
    let app = App::new(
        config,
        problem_manager,
        playlist_manager,
        auth_manager,
        log_receiver,
    );

    // run app loop
    let res = run_app_loop(&mut terminal, app).await;

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("TUI event loop failed: {:?}", err);
    }

    Ok(())
}
