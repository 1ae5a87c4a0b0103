// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account listing and development account provisioning.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{blockchain::NodeClient, error::ApiError, state::AppState};

/// Node-managed accounts plus the current block height.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountsResponse {
    /// Addresses the node manages
    pub accounts: Vec<String>,
    /// Current block height
    pub block_height: u64,
}

/// A freshly generated development account.
///
/// The private key is returned in the body; this endpoint targets private
/// development chains only.
#[derive(Debug, Serialize, ToSchema)]
pub struct NewAccountResponse {
    /// Account address
    pub address: String,
    /// Hex-encoded private key (no 0x prefix)
    pub private_key: String,
}

/// List the node's accounts and the current block height.
#[utoipa::path(
    get,
    path = "/v1/accounts",
    tag = "Accounts",
    responses(
        (status = 200, description = "Accounts and block height", body = AccountsResponse),
        (status = 503, description = "Node unavailable")
    )
)]
pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<AccountsResponse>, ApiError> {
    let accounts = state
        .node
        .accounts()
        .await
        .map_err(|e| ApiError::service_unavailable(format!("Failed to list accounts: {e}")))?;

    let block_height = state
        .node
        .block_number()
        .await
        .map_err(|e| ApiError::service_unavailable(format!("Failed to get block height: {e}")))?;

    Ok(Json(AccountsResponse {
        accounts: accounts.iter().map(|addr| addr.to_string()).collect(),
        block_height,
    }))
}

/// Generate a throwaway account for a development chain.
///
/// Key generation is local; the node is not involved.
#[utoipa::path(
    get,
    path = "/v1/accounts/new",
    tag = "Accounts",
    responses(
        (status = 200, description = "Generated account", body = NewAccountResponse)
    )
)]
pub async fn create_account() -> Json<NewAccountResponse> {
    let account = NodeClient::generate_account();

    tracing::info!(address = %account.address, "Issued development account");

    Json(NewAccountResponse {
        address: account.address.to_string(),
        private_key: account.private_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_account_returns_address_and_key() {
        let Json(response) = create_account().await;
        assert!(response.address.starts_with("0x"));
        assert_eq!(response.address.len(), 42);
        assert_eq!(response.private_key.len(), 64);
    }
}
