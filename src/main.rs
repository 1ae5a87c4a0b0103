// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use relational_chain_gateway::{
    api::router,
    blockchain::{NodeClient, TxSender},
    config::Config,
    state::AppState,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    // Honor a .env file in development
    let _ = dotenv::dotenv();

    init_tracing();

    let config = Config::from_env().expect("Failed to load configuration");

    let node = NodeClient::connect(&config.rpc_url, config.contract_address.as_deref())
        .expect("Failed to build node client");

    let sender = TxSender::new(
        &config.rpc_url,
        &config.signer_private_key,
        node.contract_address(),
        config.confirmation_timeout,
    )
    .expect("Failed to build transaction sender");

    tracing::info!(
        rpc_url = %config.rpc_url,
        signer = %sender.signer_address(),
        contract = ?node.contract_address(),
        "Connected to node"
    );

    let state = AppState::new(node, sender);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!("Chain gateway listening on http://{addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}
