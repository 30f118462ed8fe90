//! drill-coach HTTP service
//!
//! # Usage
//!
//! ```bash
//! # Serve with defaults (0.0.0.0:8080, built-in drill library)
//! cargo run --release
//!
//! # Custom config and bind address
//! ./drill-coach --config drill_coach.toml --addr 127.0.0.1:3000
//!
//! # Print the loaded drill catalog as JSON
//! ./drill-coach catalog
//! ```
//!
//! # Environment Variables
//!
//! - `DRILL_COACH_CONFIG`: Path to the TOML config (default: ./drill_coach.toml)
//! - `DRILL_COACH_SERVER_ADDR`: Bind address override
//! - `DRILL_COACH_CORS_ORIGINS`: Comma-separated allowed CORS origins
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use drill_coach::api::{create_app, ApiState};
use drill_coach::config::AppConfig;
use drill_coach::types::DrillRow;
use drill_coach::{Catalog, InMemoryStore};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "drill-coach")]
#[command(about = "Daily football drill sessions for kids")]
#[command(version)]
struct CliArgs {
    /// Override the server address (default: "0.0.0.0:8080")
    #[arg(short, long)]
    addr: Option<String>,

    /// Path to the TOML config file (skips the default search order)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Expose POST /api/v1/admin/reset, which wipes all training state
    #[arg(long)]
    allow_reset: bool,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Print the loaded drill catalog as JSON and exit
    Catalog,
}

// ============================================================================
// Startup
// ============================================================================

/// Load config from `--config` or the standard search order, then apply overrides.
fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load(),
    };
    config.apply_env_overrides();
    if let Some(addr) = &args.addr {
        config.server.addr = addr.clone();
    }
    if args.allow_reset {
        config.server.allow_reset = true;
    }
    Ok(config)
}

fn print_catalog(catalog: &Catalog) -> Result<()> {
    let rows: Vec<DrillRow> = catalog.drills().iter().map(DrillRow::from).collect();
    let json = serde_json::to_string_pretty(&rows).context("Failed to serialize catalog")?;
    println!("{json}");
    Ok(())
}

async fn serve(config: AppConfig, catalog: Catalog, cancel_token: CancellationToken) -> Result<()> {
    let addr = config.server.addr.clone();
    let allow_reset = config.server.allow_reset;
    let state = ApiState::new(Box::new(InMemoryStore::new()), catalog, config);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!(addr = %addr, allow_reset, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            info!("[HttpServer] Received shutdown signal");
        })
        .await
        .map_err(|e| {
            error!("[HttpServer] Server error: {}", e);
            anyhow::anyhow!("HTTP server error: {}", e)
        })
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr keeps `catalog` output clean)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    let catalog = Catalog::load(config.catalog.path.as_deref())
        .context("Failed to load drill catalog")?;

    if let Some(SubCommand::Catalog) = args.command {
        return print_catalog(&catalog);
    }

    info!(
        drills = catalog.len(),
        session_size = config.planner.session_size,
        max_level = config.planner.max_level,
        "drill-coach starting"
    );

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    serve(config, catalog, cancel_token).await?;

    info!("drill-coach shutdown complete");
    Ok(())
}
