// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

pub mod accounts;
pub mod balance;
pub mod blocks;
pub mod contract;
pub mod health;
pub mod transfers;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/accounts", get(accounts::list_accounts))
        .route("/accounts/new", get(accounts::create_account))
        .route("/balance/{address}", get(balance::get_balance))
        .route("/blocks/{number}", get(blocks::get_block))
        .route("/transfers/estimate", post(transfers::estimate_transfer))
        .route("/transfers", post(transfers::send_transfer))
        .route("/contract/balance", get(contract::contract_balance))
        .route("/contract/transfer", post(contract::contract_transfer))
        .route("/contract/withdraw/{address}", get(contract::withdraw_fees))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state)
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        accounts::list_accounts,
        accounts::create_account,
        balance::get_balance,
        blocks::get_block,
        transfers::estimate_transfer,
        transfers::send_transfer,
        contract::contract_balance,
        contract::contract_transfer,
        contract::withdraw_fees,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            accounts::AccountsResponse,
            accounts::NewAccountResponse,
            balance::BalanceResponse,
            transfers::TransferRequest,
            transfers::TransferQuoteResponse,
            transfers::TransferResponse,
            contract::ContractTransferRequest,
            contract::ContractBalanceResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Accounts", description = "Account listing and balances"),
        (name = "Blocks", description = "Block lookups"),
        (name = "Transfers", description = "Fee estimation and signed transfers"),
        (name = "Contract", description = "Fee-escrow contract operations"),
        (name = "Health", description = "Service health")
    )
)]
struct ApiDoc;

#[cfg(test)]
pub(crate) mod testing {
    use std::time::Duration;

    use crate::blockchain::{NodeClient, TxSender};
    use crate::state::AppState;

    /// State pointing at an endpoint nothing listens on. Handler paths
    /// that validate before touching the node run fine against it.
    pub(crate) fn state() -> AppState {
        let key = NodeClient::generate_account().private_key;
        let node = NodeClient::connect("http://127.0.0.1:8545", None).unwrap();
        let sender =
            TxSender::new("http://127.0.0.1:8545", &key, None, Duration::from_secs(1)).unwrap();
        AppState::new(node, sender)
    }
}
