// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use answer_node::config::NodeConfig;
use answer_node::engine::Engine;
use answer_node::server::build_router;
use answer_node::telemetry::init_telemetry;
use axum::extract::Request;
use axum::ServiceExt;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_telemetry();

    let cfg = NodeConfig::from_env()?;
    tracing::info!("Initializing answer node with config: {:?}", cfg);

    let shared_state = Engine::open(&cfg)?.into_shared();
    let app = build_router(shared_state);

    let addr = cfg.bind_addr;
    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
