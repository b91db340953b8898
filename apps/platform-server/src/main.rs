//! Tablewise platform server.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use platform_server::config::LoggingConfig;
use platform_server::{AppConfig, build_router, connect, migrate};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "platform-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration (secrets redacted) and exit
    #[arg(long)]
    print_config: bool,
}

fn init_tracing(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .context("invalid log filter")?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let res = if cfg.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    res.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg = AppConfig::load(args.config.as_deref())?;

    if args.print_config {
        #[allow(clippy::print_stdout)]
        {
            println!("{cfg:#?}");
        }
        return Ok(());
    }

    init_tracing(&cfg.logging)?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting platform server");

    let db = connect(&cfg.database).await?;
    migrate(&db).await?;
    let app = build_router(&cfg, db);

    let listener = tokio::net::TcpListener::bind(cfg.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.bind))?;
    info!(addr = %cfg.server.bind, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Platform server stopped");
    Ok(())
}
