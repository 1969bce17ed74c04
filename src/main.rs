use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trendboard::api::TrendServer;
use trendboard::config::{Config, PipelineMode};
use trendboard::trends::{TrendPipeline, TrendQuery};

#[derive(Parser)]
#[command(
    name = "trendboard",
    version,
    about = "Trending keyword service with synthetic fallback for dashboards",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML); environment variables are used otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pipeline variant (live, mock)
    #[arg(long, global = true)]
    mode: Option<PipelineMode>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Host to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run the pipeline once and print the response body
    Fetch {
        /// Case-insensitive keyword filter
        #[arg(short, long)]
        keyword: Option<String>,

        /// Target date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Timeframe token, e.g. "today 7-d"
        #[arg(short, long)]
        timeframe: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(mode) = cli.mode {
        config.pipeline.mode = mode;
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }

    // Initialize tracing/logging
    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    if let Err(e) = trendboard::metrics::init_metrics() {
        tracing::warn!(error = %e, "Metrics initialization failed, continuing without metrics");
    }

    match cli.command {
        Commands::Serve { host, port } => {
            if host.is_some() || port.is_some() {
                let current = config.server.bind_address;
                let host = host.unwrap_or_else(|| current.ip().to_string());
                let port = port.unwrap_or(current.port());
                config.server.bind_address = format!("{host}:{port}")
                    .parse::<SocketAddr>()
                    .with_context(|| format!("Invalid bind address {host}:{port}"))?;
            }

            tracing::info!(
                bind = %config.server.bind_address,
                mode = %config.pipeline.mode,
                "Starting serve command"
            );
            serve(config).await?;
        }

        Commands::Fetch {
            keyword,
            date,
            timeframe,
        } => {
            tracing::info!(
                keyword = ?keyword,
                date = ?date,
                timeframe = ?timeframe,
                mode = %config.pipeline.mode,
                "Starting fetch command"
            );
            fetch(config, TrendQuery { keyword, date, timeframe }).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("trendboard=debug,tower_http=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .or_else(|_| tracing_subscriber::EnvFilter::try_new(format!("trendboard={level},warn")))
            .context("Invalid log level")?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

async fn serve(config: Config) -> Result<()> {
    let server = TrendServer::from_config(&config)?;
    println!("{}", server.info().display());

    server
        .start_with_shutdown(shutdown_signal())
        .await
        .context("Trends server failed")?;
    Ok(())
}

async fn fetch(config: Config, query: TrendQuery) -> Result<()> {
    let pipeline = TrendPipeline::from_config(&config)?;
    let report = pipeline.run(&query).await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
