use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use cardlens_extract::{GeminiClient, Pipeline};
use clap::Parser;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

mod config;
mod routes;

#[derive(Parser, Debug)]
#[command(name = "cardlens", version, about = "Credit-card statement parsing service")]
struct Cli {
    /// Path to a cardlens.toml config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let mut cfg = config::load_config(cli.config.as_deref())?;
    if let Ok(port) = std::env::var("PORT") {
        cfg.server.port = port.parse().context("parse PORT")?;
    }
    if let Some(port) = cli.port {
        cfg.server.port = port;
    }

    // The credential is supplied out-of-band, never via config file or flag.
    let api_key = std::env::var("GOOGLE_API_KEY")
        .context("GOOGLE_API_KEY must be set (model API credential)")?;

    let model = GeminiClient::new(api_key, cfg.model.name.clone(), cfg.model.timeout_secs)?;
    let pipeline = Pipeline::with_input_budget(Arc::new(model), cfg.model.max_input_chars);

    let app = routes::router(Arc::new(pipeline));

    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    info!(model = %cfg.model.name, "cardlens listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    axum::serve(listener, app).await.context("serve")?;

    Ok(())
}
