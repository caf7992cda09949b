// src/main.rs

mod api;
mod auth_manager;
mod cli;
mod config;
mod errors;
mod filter;
mod form;
mod models;
mod playlist_manager;
mod problem_manager;
mod schema;
mod tui;

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::sync::mpsc;

use api::ApiClient;
use auth_manager::AuthManager;
use cli::Cli;
use config::Config;
use playlist_manager::PlaylistManager;
use problem_manager::ProblemManager;
use tui::{run_tui, tracing_layer::LogCollectorLayer, UILogEntry};

use tracing::{debug, error, info, warn};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli_args = Cli::parse();

    // Load configuration before the subscriber exists; a missing default file
    // just means defaults.
    let mut config = match Config::load(cli_args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            if cli_args.config.is_some() {
                // An explicitly requested file that does not load is fatal.
                return Err(e);
            }
            Config::default()
        }
    };
    if let Some(server) = &cli_args.server {
        config.server.base_url = server.trim_end_matches('/').to_string();
    }
    let config = Arc::new(config);

    // RUST_LOG wins; the config level is the fallback.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let interactive = cli_args.command.is_none() && !cli_args.headless;
    let (log_tx, log_rx) = mpsc::unbounded_channel::<UILogEntry>();

    // Keeps the non-blocking file writer flushing until exit.
    let mut _appender_guard = None;
    if interactive {
        // Nothing may write to stdout while the TUI owns the terminal; file
        // logs plus the in-app Logs view replace it.
        let collector = LogCollectorLayer::new(log_tx);
        if config.logging.file_logging {
            let file_appender = tracing_appender::rolling::daily(config.log_dir(), "judgeboard.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            _appender_guard = Some(guard);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .with(collector)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(collector)
                .init();
        }
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    info!("Starting Judgeboard...");
    debug!("Loaded app config: {:?}", config);

    // Initialize the API client and the resource managers it backs.
    let api = match ApiClient::new(&config.server) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to initialize API client: {}", e);
            return Err(e.into());
        }
    };
    info!("API client initialized for {}", api.base_url());

    let problem_manager = Arc::new(ProblemManager::new(Arc::clone(&api)));
    let playlist_manager = Arc::new(PlaylistManager::new(Arc::clone(&api)));
    let auth_manager = Arc::new(AuthManager::new(Arc::clone(&api)));

    if let Some(command) = cli_args.command {
        info!("Handling CLI command...");
        cli::handle_command(command, &problem_manager).await?;
    } else if !cli_args.headless {
        info!("No subcommand provided and not headless, launching TUI...");
        run_tui(
            Arc::clone(&config),
            problem_manager,
            playlist_manager,
            auth_manager,
            log_rx,
        )
        .await?;
    } else {
        warn!("Headless mode with no command; nothing to do.");
        println!("Judgeboard running in headless mode. No command given. Exiting.");
    }

    info!("Judgeboard shutting down.");
    Ok(())
}
