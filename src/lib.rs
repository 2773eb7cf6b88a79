pub mod cli;
pub mod core;
pub mod feed;
pub mod providers;
pub mod query;
pub mod server;
pub mod service;
pub mod store;

use crate::core::config::AppConfig;
use crate::query::PageRequest;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Serve { bind: Option<String> },
    Search { query: String, offset: usize, limit: Option<usize> },
    Show { serial_number: u32 },
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("navdex starting...");

    let config = load_config(config_path)?;
    let provider = providers::AmfiFeedProvider::new(&config.providers.amfi)?;
    let service = service::NavService::new(Arc::new(provider), config.refresh_interval()?);

    match command {
        AppCommand::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let state = Arc::new(server::AppState {
                service,
                default_limit: config.default_limit,
            });
            server::serve(&bind, state).await
        }
        AppCommand::Search {
            query,
            offset,
            limit,
        } => {
            let request = PageRequest {
                offset,
                limit: limit.unwrap_or(config.default_limit),
            };
            cli::funds::search(&service, &query, request).await
        }
        AppCommand::Show { serial_number } => cli::funds::show(&service, serial_number).await,
    }
}
