// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transfer endpoints: fee estimation and signed submission.

use std::str::FromStr;

use alloy::primitives::Address;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    blockchain::{format_amount, parse_amount, NATIVE_DECIMALS},
    error::ApiError,
    state::AppState,
};

/// Request to estimate or submit a native transfer.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TransferRequest {
    /// Sender address (0x + 40 hex chars)
    pub from: String,
    /// Recipient address (0x + 40 hex chars)
    pub to: String,
    /// Amount in display units (e.g. "1.5")
    pub amount: String,
}

/// Cost breakdown for a transfer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TransferQuoteResponse {
    /// Estimated gas limit
    pub gas_limit: String,
    /// Gas price used for the quote, in wei
    pub gas_price_wei: String,
    /// Contract fee in display units
    pub contract_fee: String,
    /// Gas cost in display units
    pub gas_cost: String,
    /// Total cost in display units (amount + fee + gas cost)
    pub total_cost: String,
}

/// Result of a submitted transfer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TransferResponse {
    /// Transaction hash
    pub tx_hash: String,
    /// Sender transaction count after submission
    pub transaction_count: u64,
}

/// Validate and parse an address field. Malformed input never reaches
/// the node.
pub(crate) fn parse_address(label: &str, address: &str) -> Result<Address, ApiError> {
    if !address.starts_with("0x")
        || address.len() != 42
        || !address[2..].chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(ApiError::bad_request(format!(
            "Invalid {label} address: expected 0x followed by 40 hex characters"
        )));
    }

    Address::from_str(address)
        .map_err(|e| ApiError::bad_request(format!("Invalid {label} address: {e}")))
}

/// Estimate the total cost of a transfer.
///
/// Applies the fixed fee percentage and gas price to the node's gas
/// estimate.
#[utoipa::path(
    post,
    path = "/v1/transfers/estimate",
    tag = "Transfers",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Cost estimate", body = TransferQuoteResponse),
        (status = 400, description = "Invalid request"),
        (status = 503, description = "Estimation failed")
    )
)]
pub async fn estimate_transfer(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferQuoteResponse>, ApiError> {
    let from = parse_address("sender", &request.from)?;
    let to = parse_address("recipient", &request.to)?;

    let amount_wei = parse_amount(&request.amount, NATIVE_DECIMALS)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let quote = state
        .sender
        .estimate_transfer(from, to, amount_wei)
        .await
        .map_err(|e| ApiError::service_unavailable(format!("Gas estimation failed: {e}")))?;

    Ok(Json(TransferQuoteResponse {
        gas_limit: quote.gas_limit.to_string(),
        gas_price_wei: quote.gas_price_wei.to_string(),
        contract_fee: format_amount(quote.fee_wei, NATIVE_DECIMALS),
        gas_cost: format_amount(quote.gas_cost_wei, NATIVE_DECIMALS),
        total_cost: format_amount(quote.total_wei, NATIVE_DECIMALS),
    }))
}

/// Sign and submit a transfer.
///
/// Any node or signing failure is reported as a client error, matching
/// the gateway's pass-through contract.
#[utoipa::path(
    post,
    path = "/v1/transfers",
    tag = "Transfers",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Transaction submitted", body = TransferResponse),
        (status = 400, description = "Invalid request or node/signing failure")
    )
)]
pub async fn send_transfer(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, ApiError> {
    let from = parse_address("sender", &request.from)?;
    let to = parse_address("recipient", &request.to)?;

    let amount_wei = parse_amount(&request.amount, NATIVE_DECIMALS)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let outcome = state
        .sender
        .send_transfer(from, to, amount_wei)
        .await
        .map_err(|e| ApiError::bad_request(format!("Transfer failed: {e}")))?;

    tracing::info!(tx_hash = %outcome.tx_hash, "Transfer submitted");

    Ok(Json(TransferResponse {
        tx_hash: outcome.tx_hash,
        transaction_count: outcome.transaction_count,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn parse_address_accepts_wellformed() {
        let addr = parse_address("sender", "0x5425890298aed601595a70AB815c96711a31Bc65");
        assert!(addr.is_ok());
    }

    #[test]
    fn parse_address_rejects_malformed() {
        for bad in [
            "",
            "0x",
            "5425890298aed601595a70AB815c96711a31Bc65",
            "0x5425890298aed601595a70AB815c96711a31Bc6",
            "0x5425890298aed601595a70AB815c96711a31Bcg5",
        ] {
            let result = parse_address("sender", bad);
            assert!(result.is_err(), "accepted {bad:?}");
            assert_eq!(result.unwrap_err().status, StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn estimate_rejects_malformed_sender_before_any_node_call() {
        // The state points at a routable but unused port; a handler that
        // touched the node would error differently than 400.
        let state = crate::api::testing::state();
        let request = TransferRequest {
            from: "not-an-address".to_string(),
            to: "0x5425890298aed601595a70AB815c96711a31Bc65".to_string(),
            amount: "1".to_string(),
        };

        let result = estimate_transfer(State(state), Json(request)).await;
        assert_eq!(result.unwrap_err().status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn send_rejects_malformed_recipient_before_any_node_call() {
        let state = crate::api::testing::state();
        let request = TransferRequest {
            from: "0x5425890298aed601595a70AB815c96711a31Bc65".to_string(),
            to: "0xshort".to_string(),
            amount: "1".to_string(),
        };

        let result = send_transfer(State(state), Json(request)).await;
        assert_eq!(result.unwrap_err().status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn send_rejects_malformed_amount() {
        let state = crate::api::testing::state();
        let request = TransferRequest {
            from: "0x5425890298aed601595a70AB815c96711a31Bc65".to_string(),
            to: "0x5425890298aed601595a70AB815c96711a31Bc65".to_string(),
            amount: "1.2.3".to_string(),
        };

        let result = send_transfer(State(state), Json(request)).await;
        assert_eq!(result.unwrap_err().status, StatusCode::BAD_REQUEST);
    }
}
