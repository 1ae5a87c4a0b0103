// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Fee-escrow contract endpoints.
//!
//! Transfer and withdrawal wait for inclusion and relay the node's
//! receipt verbatim.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    blockchain::{
        ensure_gas_bounds, format_amount, parse_amount, EscrowTransfer, NodeClientError,
        NATIVE_DECIMALS,
    },
    error::ApiError,
    state::AppState,
};

use super::transfers::parse_address;

/// Request to route a transfer through the fee-escrow contract.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ContractTransferRequest {
    /// Sender address (0x + 40 hex chars)
    pub from: String,
    /// Recipient address (0x + 40 hex chars)
    pub to: String,
    /// Amount forwarded to the recipient, in display units
    pub amount: String,
    /// Fee recorded by the contract, in display units
    pub fee: String,
    /// Gas limit for the contract call
    pub gas_limit: String,
    /// Gas price for the contract call, in wei
    pub gas_price: String,
}

/// Balance held by the deployed contract.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContractBalanceResponse {
    /// Contract address
    pub address: String,
    /// Balance in wei
    pub balance_wei: String,
    /// Balance in display units
    pub balance: String,
}

fn map_contract_error(e: NodeClientError) -> ApiError {
    match e {
        NodeClientError::ContractNotConfigured => {
            ApiError::service_unavailable("Contract not configured")
        }
        NodeClientError::InvalidAddress(_) | NodeClientError::InvalidAmount(_) => {
            ApiError::bad_request(e.to_string())
        }
        other => ApiError::service_unavailable(format!("Contract call failed: {other}")),
    }
}

fn receipt_to_json(
    receipt: alloy::rpc::types::TransactionReceipt,
) -> Result<Json<serde_json::Value>, ApiError> {
    serde_json::to_value(receipt)
        .map(Json)
        .map_err(|e| ApiError::internal(format!("Failed to serialize receipt: {e}")))
}

/// Get the balance held by the deployed contract.
#[utoipa::path(
    get,
    path = "/v1/contract/balance",
    tag = "Contract",
    responses(
        (status = 200, description = "Contract balance", body = ContractBalanceResponse),
        (status = 503, description = "Contract not configured or call failed")
    )
)]
pub async fn contract_balance(
    State(state): State<AppState>,
) -> Result<Json<ContractBalanceResponse>, ApiError> {
    let address = state
        .node
        .contract_address()
        .ok_or_else(|| ApiError::service_unavailable("Contract not configured"))?;

    let balance = state
        .node
        .contract_balance()
        .await
        .map_err(map_contract_error)?;

    Ok(Json(ContractBalanceResponse {
        address: address.to_string(),
        balance_wei: balance.to_string(),
        balance: format_amount(balance, NATIVE_DECIMALS),
    }))
}

/// Transfer value through the contract, recording the fee.
///
/// Blocks until the node reports inclusion and returns the receipt.
/// Caller-supplied gas parameters are bound-checked.
#[utoipa::path(
    post,
    path = "/v1/contract/transfer",
    tag = "Contract",
    request_body = ContractTransferRequest,
    responses(
        (status = 200, description = "Transaction receipt"),
        (status = 400, description = "Invalid request"),
        (status = 503, description = "Contract not configured, call failed, or confirmation timed out")
    )
)]
pub async fn contract_transfer(
    State(state): State<AppState>,
    Json(request): Json<ContractTransferRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let from = parse_address("sender", &request.from)?;
    let to = parse_address("recipient", &request.to)?;

    let amount_wei = parse_amount(&request.amount, NATIVE_DECIMALS)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let fee_wei = parse_amount(&request.fee, NATIVE_DECIMALS)
        .map_err(|e| ApiError::bad_request(format!("Invalid fee: {e}")))?;

    let gas_limit: u64 = request
        .gas_limit
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid gas_limit"))?;
    let gas_price_wei: u128 = request
        .gas_price
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid gas_price"))?;

    ensure_gas_bounds(gas_limit, gas_price_wei).map_err(ApiError::bad_request)?;

    let transfer = EscrowTransfer {
        from,
        to,
        amount_wei,
        fee_wei,
        gas_limit,
        gas_price_wei,
    };

    let receipt = state
        .sender
        .contract_transfer(&transfer)
        .await
        .map_err(map_contract_error)?;

    tracing::info!(%from, %to, "Contract transfer confirmed");

    receipt_to_json(receipt)
}

/// Withdraw accumulated contract fees to an address.
///
/// Blocks until the node reports inclusion and returns the receipt.
#[utoipa::path(
    get,
    path = "/v1/contract/withdraw/{address}",
    tag = "Contract",
    params(
        ("address" = String, Path, description = "Withdrawal recipient (0x + 40 hex)")
    ),
    responses(
        (status = 200, description = "Transaction receipt"),
        (status = 400, description = "Malformed address"),
        (status = 503, description = "Contract not configured, call failed, or confirmation timed out")
    )
)]
pub async fn withdraw_fees(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let to = parse_address("withdrawal", &address)?;

    let receipt = state
        .sender
        .withdraw_fees(to)
        .await
        .map_err(map_contract_error)?;

    tracing::info!(%to, "Fee withdrawal confirmed");

    receipt_to_json(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn wellformed_request() -> ContractTransferRequest {
        ContractTransferRequest {
            from: "0x5425890298aed601595a70AB815c96711a31Bc65".to_string(),
            to: "0x76568BEd5Acf1A5Cd888773C8cAe9ea2a9131A63".to_string(),
            amount: "1".to_string(),
            fee: "0.18".to_string(),
            gas_limit: "100000".to_string(),
            gas_price: "50000000000".to_string(),
        }
    }

    #[tokio::test]
    async fn balance_without_contract_is_unavailable() {
        let state = crate::api::testing::state();
        let result = contract_balance(State(state)).await;
        assert_eq!(result.unwrap_err().status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn transfer_rejects_excessive_gas_limit() {
        let state = crate::api::testing::state();
        let mut request = wellformed_request();
        request.gas_limit = "999999999".to_string();

        let result = contract_transfer(State(state), Json(request)).await;
        assert_eq!(result.unwrap_err().status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn transfer_rejects_unparseable_gas_price() {
        let state = crate::api::testing::state();
        let mut request = wellformed_request();
        request.gas_price = "fifty gwei".to_string();

        let result = contract_transfer(State(state), Json(request)).await;
        assert_eq!(result.unwrap_err().status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn transfer_without_contract_is_unavailable() {
        let state = crate::api::testing::state();
        let result = contract_transfer(State(state), Json(wellformed_request())).await;
        assert_eq!(result.unwrap_err().status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn withdraw_rejects_malformed_address() {
        let state = crate::api::testing::state();
        let result = withdraw_fees(State(state), Path("0xnope".to_string())).await;
        assert_eq!(result.unwrap_err().status, StatusCode::BAD_REQUEST);
    }
}
