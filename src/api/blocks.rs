// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Block lookup endpoint.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::ApiError, state::AppState};

/// Get a block by number, relayed verbatim from the node.
#[utoipa::path(
    get,
    path = "/v1/blocks/{number}",
    tag = "Blocks",
    params(
        ("number" = u64, Path, description = "Block number")
    ),
    responses(
        (status = 200, description = "Block contents"),
        (status = 404, description = "Block not known to the node"),
        (status = 500, description = "Node error")
    )
)]
pub async fn get_block(
    State(state): State<AppState>,
    Path(number): Path<u64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    match state.node.block_by_number(number).await {
        Ok(Some(block)) => Ok(Json(block)),
        Ok(None) => Err(ApiError::not_found(format!("Block {number} not found"))),
        Err(e) => Err(ApiError::internal(format!(
            "Failed to fetch block {number}: {e}"
        ))),
    }
}
