//! Competitor Scout - HTTP service
//!
//! # Usage
//!
//! ```bash
//! # Against an Elasticsearch cluster
//! competitor-scout --es-url http://localhost:9200
//!
//! # Offline, from a JSON array of family documents
//! competitor-scout --fixtures families.json
//! ```
//!
//! # Environment Variables
//!
//! - `COMPETITOR_SCOUT_CONFIG`: path to a TOML config file
//! - `ELASTICSEARCH_URL`: document store base URL
//! - `COMPETITOR_SCOUT_INDEX`: family index name
//! - `COMPETITOR_SCOUT_BIND`: HTTP bind address
//! - `RUST_LOG`: logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use competitor_scout::store::{DocumentStore, ElasticStore, MemoryStore};
use competitor_scout::{create_app, CompetitorFinder, ServiceConfig, ServiceState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "competitor-scout")]
#[command(about = "Find companies with similar patent portfolios")]
#[command(version)]
struct CliArgs {
    /// TOML config file (skips the default search order)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the server address (default: "0.0.0.0:8000")
    #[arg(short, long)]
    bind: Option<String>,

    /// Elasticsearch base URL
    #[arg(long, value_name = "URL")]
    es_url: Option<String>,

    /// Family index name
    #[arg(long)]
    index: Option<String>,

    /// Serve from a JSON array of family documents instead of Elasticsearch
    #[arg(long, value_name = "FILE")]
    fixtures: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, env = "COMPETITOR_SCOUT_LOG_JSON")]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

fn resolve_config(args: &CliArgs) -> Result<ServiceConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = ServiceConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.apply_overrides(|key| std::env::var(key).ok());
            config
        }
        None => ServiceConfig::load(),
    };

    // CLI flags win over file and environment
    if let Some(bind) = &args.bind {
        config.server.bind_address.clone_from(bind);
    }
    if let Some(url) = &args.es_url {
        config.store.url.clone_from(url);
    }
    if let Some(index) = &args.index {
        config.store.index.clone_from(index);
    }
    if let Some(fixtures) = &args.fixtures {
        config.store.fixtures = Some(fixtures.clone());
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn build_store(config: &ServiceConfig) -> Result<Arc<dyn DocumentStore>> {
    if let Some(path) = &config.store.fixtures {
        let store = MemoryStore::from_json_file(path)?;
        info!(path = %path.display(), families = store.len(), "Serving from in-memory fixtures");
        return Ok(Arc::new(store));
    }

    let store = ElasticStore::from_config(&config.store)?;
    info!(
        url = %store.base_url(),
        index = %store.index(),
        timeout_secs = config.store.timeout_secs,
        "Using Elasticsearch document store"
    );
    Ok(Arc::new(store))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();
    init_tracing(args.log_json);

    let config = resolve_config(&args)?;
    let store = build_store(&config)?;

    let finder = CompetitorFinder::new(store, config.search);
    let app = create_app(ServiceState::new(finder));

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_address))?;
    info!(address = %config.server.bind_address, "Competitor Scout listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Competitor Scout shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
