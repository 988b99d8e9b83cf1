use anyhow::{Context, Result};
use clap::Parser;
use kubeview::cli::Cli;
use kubeview::k8s::KubeClusterClient;
use kubeview::server::{self, AppState};
use std::process;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Kubeview v{} starting", kubeview::VERSION);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let client = KubeClusterClient::connect(cli.connect_mode())
        .await
        .context("Failed to connect to Kubernetes")?;

    let state = AppState::new(Arc::new(client));

    info!("Serving static content from '{}'", cli.static_dir.display());

    server::serve(state, &cli.static_dir, cli.listen_addr())
        .await
        .context("HTTP server failed")?;

    Ok(())
}
