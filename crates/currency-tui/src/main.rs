mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod theme;
mod typeahead;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use currency_proto::{config::Config, platform, Catalog};

/// Terminal dashboard for picking currencies from a searchable catalog.
#[derive(Debug, Parser)]
#[command(name = "currency-picker", version)]
struct Args {
    /// TOML catalog to search instead of the built-in table.
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Simulated search latency in milliseconds.
    #[arg(long, value_name = "MS")]
    latency_ms: Option<u64>,

    /// Config file (defaults to the platform config directory).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("picker.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("currency-picker log: {}", log_path.display());

    info!("currency-picker starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            warn!("config load failed, using defaults: {:#}", e);
            Config::default()
        }),
    };
    if let Some(ms) = args.latency_ms {
        config.search.latency_ms = ms;
    }
    if let Some(path) = args.catalog {
        config.catalog.path = Some(path);
    }

    // ── Load catalog ─────────────────────────────────────────────────────────
    let catalog = match &config.catalog.path {
        Some(path) => match Catalog::load(path) {
            Ok(c) => c,
            Err(e) => {
                warn!("catalog load failed, falling back to built-in table: {}", e);
                Catalog::builtin()
            }
        },
        None => Catalog::builtin(),
    };
    info!(
        "catalog: {} currencies, search latency {}ms",
        catalog.len(),
        config.search.latency_ms
    );

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let (app, filter_rx) = app::App::new(catalog, &config);
    app.run(filter_rx).await?;

    Ok(())
}
