// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Balance query endpoint.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    blockchain::{format_amount, NATIVE_DECIMALS},
    error::ApiError,
    state::AppState,
};

/// Native balance response.
#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponse {
    /// Queried address
    pub address: String,
    /// Balance in wei
    pub balance_wei: String,
    /// Balance in display units
    pub balance: String,
}

/// Get the native balance of an address.
///
/// A malformed address or a node rejection is reported as a client error.
#[utoipa::path(
    get,
    path = "/v1/balance/{address}",
    tag = "Accounts",
    params(
        ("address" = String, Path, description = "Account address (0x + 40 hex)")
    ),
    responses(
        (status = 200, description = "Balance retrieved", body = BalanceResponse),
        (status = 400, description = "Malformed address or node rejection")
    )
)]
pub async fn get_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state
        .node
        .balance(&address)
        .await
        .map_err(|e| ApiError::bad_request(format!("Balance query failed: {e}")))?;

    Ok(Json(BalanceResponse {
        address,
        balance_wei: balance.to_string(),
        balance: format_amount(balance, NATIVE_DECIMALS),
    }))
}
