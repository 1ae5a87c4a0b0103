// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction building and broadcasting.
//!
//! Transfers are priced with the node's gas estimate, the gateway's fixed
//! gas price, and the fixed fee percentage applied to the amount. Signing
//! uses the service key loaded at startup.

use std::time::Duration;

use alloy::{
    network::{Ethereum, EthereumWallet, TransactionBuilder},
    primitives::{Address, U256},
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
        Identity, Provider, ProviderBuilder, RootProvider,
    },
    rpc::types::{TransactionReceipt, TransactionRequest},
};

use super::client::{NodeClient, NodeClientError};
use super::contract::{EscrowContract, EscrowTransfer};

/// Decimals of the native currency.
pub const NATIVE_DECIMALS: u8 = 18;

/// Fee percentage applied to transfer amounts.
pub const FEE_PERCENT: u64 = 18;

/// Fixed gas price used to cost transfers (50 gwei).
pub const FIXED_GAS_PRICE_WEI: u128 = 50_000_000_000;

/// HTTP provider with signing capabilities (all fillers + wallet).
type SigningProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
>;

/// Cost breakdown for a transfer, all values in wei.
#[derive(Debug, Clone)]
pub struct TransferQuote {
    /// Estimated gas limit
    pub gas_limit: u64,
    /// Gas price used for the quote
    pub gas_price_wei: u128,
    /// Contract fee (fixed percentage of the amount)
    pub fee_wei: U256,
    /// Gas cost (`gas_limit * gas_price`)
    pub gas_cost_wei: U256,
    /// Total cost (`amount + fee + gas cost`)
    pub total_wei: U256,
}

/// Result of a broadcast transfer.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// Transaction hash
    pub tx_hash: String,
    /// Sender transaction count after submission
    pub transaction_count: u64,
}

/// Cost a transfer from its gas estimate. Pure; no node interaction.
pub fn quote_transfer(amount_wei: U256, gas_limit: u64, gas_price_wei: u128) -> TransferQuote {
    let fee_wei = amount_wei * U256::from(FEE_PERCENT) / U256::from(100u64);
    let gas_cost_wei = U256::from(gas_limit) * U256::from(gas_price_wei);

    TransferQuote {
        gas_limit,
        gas_price_wei,
        fee_wei,
        gas_cost_wei,
        total_wei: amount_wei + fee_wei + gas_cost_wei,
    }
}

/// Transaction sender bound to the service signing key.
pub struct TxSender {
    provider: SigningProvider,
    /// Address of the service signer
    signer_address: Address,
    /// Deployed fee-escrow contract, if configured
    contract: Option<Address>,
    /// Bound on receipt waits
    confirmation_timeout: Duration,
}

impl TxSender {
    /// Build a signing provider from the service private key.
    pub fn new(
        rpc_url: &str,
        private_key_hex: &str,
        contract: Option<Address>,
        confirmation_timeout: Duration,
    ) -> Result<Self, NodeClientError> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e: url::ParseError| NodeClientError::InvalidRpcUrl(e.to_string()))?;

        let signer = NodeClient::create_signer(private_key_hex)?;
        let signer_address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

        Ok(Self {
            provider,
            signer_address,
            contract,
            confirmation_timeout,
        })
    }

    /// Address of the service signer.
    pub fn signer_address(&self) -> Address {
        self.signer_address
    }

    /// Estimate gas for a native transfer and cost it with the fixed
    /// gas price and fee percentage.
    pub async fn estimate_transfer(
        &self,
        from: Address,
        to: Address,
        amount_wei: U256,
    ) -> Result<TransferQuote, NodeClientError> {
        let tx = TransactionRequest::default()
            .from(from)
            .to(to)
            .value(amount_wei);

        let gas_limit = self
            .provider
            .estimate_gas(tx)
            .await
            .map_err(|e| NodeClientError::RpcError(format!("Gas estimation failed: {e}")))?;

        Ok(quote_transfer(amount_wei, gas_limit, FIXED_GAS_PRICE_WEI))
    }

    /// Sign and broadcast a native transfer.
    ///
    /// Fetches the sender nonce, prices the transaction with the estimated
    /// gas and the fixed gas price, and submits it. Returns the hash and
    /// the sender's transaction count after submission.
    pub async fn send_transfer(
        &self,
        from: Address,
        to: Address,
        amount_wei: U256,
    ) -> Result<TransferOutcome, NodeClientError> {
        let nonce = self
            .provider
            .get_transaction_count(from)
            .await
            .map_err(|e| NodeClientError::RpcError(format!("Nonce lookup failed: {e}")))?;

        let quote = self.estimate_transfer(from, to, amount_wei).await?;

        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_value(amount_wei)
            .with_nonce(nonce)
            .with_gas_limit(quote.gas_limit)
            .with_gas_price(quote.gas_price_wei);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| NodeClientError::TransactionFailed(e.to_string()))?;

        let tx_hash = format!("{:?}", pending.tx_hash());

        let transaction_count = self
            .provider
            .get_transaction_count(from)
            .await
            .map_err(|e| NodeClientError::RpcError(format!("Nonce lookup failed: {e}")))?;

        Ok(TransferOutcome {
            tx_hash,
            transaction_count,
        })
    }

    /// Route a transfer through the fee-escrow contract and wait for
    /// inclusion.
    pub async fn contract_transfer(
        &self,
        transfer: &EscrowTransfer,
    ) -> Result<TransactionReceipt, NodeClientError> {
        let address = self.contract.ok_or(NodeClientError::ContractNotConfigured)?;

        let contract = EscrowContract::new(&self.provider, address);
        contract
            .transfer_with_fee(transfer, self.confirmation_timeout)
            .await
    }

    /// Withdraw accumulated contract fees to an address and wait for
    /// inclusion.
    pub async fn withdraw_fees(&self, to: Address) -> Result<TransactionReceipt, NodeClientError> {
        let address = self.contract.ok_or(NodeClientError::ContractNotConfigured)?;

        let contract = EscrowContract::new(&self.provider, address);
        contract.withdraw_fees(to, self.confirmation_timeout).await
    }
}

/// Parse a human-readable amount (e.g. "1.5") to wei.
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, NodeClientError> {
    let parts: Vec<&str> = amount.split('.').collect();

    if parts.len() > 2 {
        return Err(NodeClientError::InvalidAmount(
            "Invalid amount format".to_string(),
        ));
    }

    let whole = parts[0]
        .parse::<u128>()
        .map_err(|_| NodeClientError::InvalidAmount("Invalid whole number".to_string()))?;

    let decimal_part = if parts.len() == 2 {
        let dec_str = parts[1];
        if dec_str.len() > decimals as usize {
            return Err(NodeClientError::InvalidAmount(format!(
                "Too many decimal places (max {decimals})"
            )));
        }
        // Pad with zeros to match decimals
        let padded = format!("{dec_str:0<width$}", width = decimals as usize);
        padded
            .parse::<u128>()
            .map_err(|_| NodeClientError::InvalidAmount("Invalid decimal".to_string()))?
    } else {
        0u128
    };

    let multiplier = 10u128.pow(decimals as u32);
    let total = whole
        .checked_mul(multiplier)
        .and_then(|w| w.checked_add(decimal_part))
        .ok_or_else(|| NodeClientError::InvalidAmount("Amount overflow".to_string()))?;

    Ok(U256::from(total))
}

/// Format wei to a human-readable amount.
pub fn format_amount(amount: U256, decimals: u8) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let decimal_str = format!("{remainder:0>width$}", width = decimals as usize);
        let trimmed = decimal_str.trim_end_matches('0');
        if trimmed.is_empty() {
            whole.to_string()
        } else {
            format!("{whole}.{trimmed}")
        }
    }
}
