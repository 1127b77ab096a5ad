//! Expo attendance dashboard - main entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

use expo_common::init_logging;
use expo_config::ConfigLoader;
use expo_dashboard::{create_router, AppState};
use expo_graphs::FontCatalog;
use expo_scraper::{ClientConfig, SiteClient};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "EXPO_CONFIG_PATH")]
    config: Option<String>,

    /// Log filter, overrides the configured level
    #[arg(short, long)]
    log_level: Option<String>,

    /// Listen address, overrides the configured bind
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
    .context("Failed to load configuration")?;

    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(bind) = args.bind {
        config.dashboard.bind = bind;
    }

    init_logging(&config.logging.to_logging_config()).context("Failed to initialize logging")?;
    info!("Starting expo-dashboard v{}", env!("CARGO_PKG_VERSION"));

    let client = SiteClient::new(ClientConfig::from_settings(&config.site, &config.scrape))
        .context("Failed to build HTTP client")?;

    let fonts = FontCatalog::scan(&config.fonts.dir, &config.fonts.family_hint);
    if let Err(e) = &fonts {
        warn!(error = %e, "No chart font applied");
    }

    let bind = config.dashboard.bind.clone();
    let state = AppState::new(config, Arc::new(client), fonts);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    info!(address = %bind, "Dashboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
