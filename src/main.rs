// main.rs

mod api;
mod app;
mod board_state;
mod config;
mod dialog;
mod error;
mod filter;
mod history;
mod i18n;
mod logging;
mod models;
mod parser;
mod permissions;
mod settings;
mod ui;

use crate::api::ApiClient;
use crate::app::App;
use crate::config::Config;
use crate::ui::run_app;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::env;
use std::io;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configuration comes from .env, config.toml and the environment
    let config = Config::load()?;

    // The guard flushes the log file on exit
    let _guard = logging::init_logging(&config.log_dir)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let api = ApiClient::new(&config.instance_url, &config.api_key)?;
    info!(instance = api.base_url(), "connecting");
    let user = api.current_user().await?;

    let download_dir = dirs::download_dir()
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(env::temp_dir);
    let mut app = App::new(user, config.locale, download_dir);

    app.refresh_boards(&api).await?;
    if let Some(board_id) = config.default_board {
        if let Err(err) = app.open_board(&api, board_id).await {
            error!(board_id, "could not open default board: {}", err);
        }
    }

    // Setup terminal UI
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    terminal.hide_cursor()?; // Hide the cursor

    let res = run_app(&mut terminal, app, &api).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("terminal error: {}", err);
        eprintln!("Error: {:?}", err);
    }
    info!("stopped");

    Ok(())
}
