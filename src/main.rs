// vertex-llm - JSON prompt endpoint backed by Vertex AI Gemini
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, Instrument};
use vertex_llm::cli::Args;
use vertex_llm::config::AppConfig;
use vertex_llm::server::create_router;
use vertex_llm::utils::logging;
use vertex_llm::vertex::VertexClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up a local .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load(&args)?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;

    // Everything after logging setup runs inside the service span
    serve(config).instrument(logging::service_span()).await
}

async fn serve(config: AppConfig) -> Result<()> {
    info!("Starting vertex-llm v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the Vertex AI client
    let vertex_client = VertexClient::new(&config.vertex)?;
    info!(
        project_id = vertex_client.project_id(),
        location = vertex_client.location(),
        model = vertex_client.model(),
        credentials = vertex_client.token_provider().source_name(),
        "Vertex AI client ready"
    );

    // Phase 4: Build and start HTTP server
    let app = create_router(config.clone(), Arc::new(vertex_client));
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
