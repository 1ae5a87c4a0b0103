// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration module.
//!
//! This module provides functionality for:
//! - Querying node state (accounts, balances, blocks)
//! - Costing and broadcasting signed transfers
//! - Fee-escrow contract calls with confirmation waits

pub mod client;
pub mod contract;
pub mod transactions;

pub use client::{GeneratedAccount, NodeClient, NodeClientError};
pub use contract::{ensure_gas_bounds, EscrowTransfer, MAX_GAS_LIMIT, MAX_GAS_PRICE_WEI};
pub use transactions::{
    format_amount, parse_amount, quote_transfer, TransferOutcome, TransferQuote, TxSender,
    FEE_PERCENT, FIXED_GAS_PRICE_WEI, NATIVE_DECIMALS,
};
