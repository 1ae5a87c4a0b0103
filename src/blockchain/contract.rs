// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Fee-escrow contract interactions.
//!
//! The deployed contract forwards value to a recipient while retaining a
//! fee, accumulates those fees, and lets an operator withdraw them.

use std::time::Duration;

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    rpc::types::TransactionReceipt,
    sol,
};

use super::client::NodeClientError;

// Fee-escrow interface, as deployed.
sol! {
    #[sol(rpc)]
    interface IFeeEscrow {
        function contractBalance() external view returns (uint256);
        function transferWithFee(address to, uint256 fee) external payable;
        function withdrawFees(address to) external;
    }
}

/// Upper bound for a caller-supplied gas limit on contract calls.
pub const MAX_GAS_LIMIT: u64 = 3_000_000;

/// Upper bound for a caller-supplied gas price on contract calls (500 gwei).
pub const MAX_GAS_PRICE_WEI: u128 = 500_000_000_000;

/// Reject caller-supplied gas parameters outside the accepted bounds.
pub fn ensure_gas_bounds(gas_limit: u64, gas_price_wei: u128) -> Result<(), String> {
    if gas_limit == 0 || gas_limit > MAX_GAS_LIMIT {
        return Err(format!(
            "gas_limit must be between 1 and {MAX_GAS_LIMIT}"
        ));
    }
    if gas_price_wei == 0 || gas_price_wei > MAX_GAS_PRICE_WEI {
        return Err(format!(
            "gas_price must be between 1 and {MAX_GAS_PRICE_WEI} wei"
        ));
    }
    Ok(())
}

/// Parameters for a transfer routed through the escrow contract.
#[derive(Debug, Clone)]
pub struct EscrowTransfer {
    /// Sender address (must match the service signer to be accepted)
    pub from: Address,
    /// Recipient address
    pub to: Address,
    /// Value forwarded to the recipient, in wei
    pub amount_wei: U256,
    /// Fee retained by the contract, in wei
    pub fee_wei: U256,
    /// Caller-supplied gas limit
    pub gas_limit: u64,
    /// Caller-supplied gas price, in wei
    pub gas_price_wei: u128,
}

/// Fee-escrow contract wrapper.
pub struct EscrowContract<P> {
    contract: IFeeEscrow::IFeeEscrowInstance<P>,
}

impl<P: Provider + Clone> EscrowContract<P> {
    /// Bind the interface to a deployed contract address.
    pub fn new(provider: &P, address: Address) -> Self {
        let contract = IFeeEscrow::new(address, provider.clone());
        Self { contract }
    }

    /// Accumulated balance held by the contract, in wei.
    pub async fn balance(&self) -> Result<U256, NodeClientError> {
        self.contract
            .contractBalance()
            .call()
            .await
            .map_err(|e| NodeClientError::ContractError(e.to_string()))
    }

    /// Send value through the contract, recording the fee, and wait for
    /// inclusion. The value carried by the transaction is `amount + fee`.
    pub async fn transfer_with_fee(
        &self,
        transfer: &EscrowTransfer,
        confirmation_timeout: Duration,
    ) -> Result<TransactionReceipt, NodeClientError> {
        let pending = self
            .contract
            .transferWithFee(transfer.to, transfer.fee_wei)
            .from(transfer.from)
            .value(transfer.amount_wei + transfer.fee_wei)
            .gas(transfer.gas_limit)
            .gas_price(transfer.gas_price_wei)
            .send()
            .await
            .map_err(|e| NodeClientError::ContractError(e.to_string()))?;

        pending
            .with_timeout(Some(confirmation_timeout))
            .get_receipt()
            .await
            .map_err(|e| NodeClientError::ConfirmationFailed(e.to_string()))
    }

    /// Withdraw accumulated fees to an address and wait for inclusion.
    pub async fn withdraw_fees(
        &self,
        to: Address,
        confirmation_timeout: Duration,
    ) -> Result<TransactionReceipt, NodeClientError> {
        let pending = self
            .contract
            .withdrawFees(to)
            .send()
            .await
            .map_err(|e| NodeClientError::ContractError(e.to_string()))?;

        pending
            .with_timeout(Some(confirmation_timeout))
            .get_receipt()
            .await
            .map_err(|e| NodeClientError::ConfirmationFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_bounds_accept_typical_values() {
        assert!(ensure_gas_bounds(21_000, 50_000_000_000).is_ok());
        assert!(ensure_gas_bounds(MAX_GAS_LIMIT, MAX_GAS_PRICE_WEI).is_ok());
    }

    #[test]
    fn gas_bounds_reject_zero() {
        assert!(ensure_gas_bounds(0, 50_000_000_000).is_err());
        assert!(ensure_gas_bounds(21_000, 0).is_err());
    }

    #[test]
    fn gas_bounds_reject_excessive_values() {
        assert!(ensure_gas_bounds(MAX_GAS_LIMIT + 1, 50_000_000_000).is_err());
        assert!(ensure_gas_bounds(21_000, MAX_GAS_PRICE_WEI + 1).is_err());
    }
}
