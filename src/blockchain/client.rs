// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Read-side JSON-RPC client for the gateway.
//!
//! Wraps a single shared alloy HTTP provider. All query endpoints go through
//! this client; signing paths live in [`super::transactions`].

use std::str::FromStr;

use alloy::{
    eips::BlockNumberOrTag,
    network::Ethereum,
    primitives::{Address, U256},
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, Provider, ProviderBuilder, RootProvider,
    },
    signers::local::PrivateKeySigner,
};

use super::contract::EscrowContract;

/// HTTP provider type for read-only queries (with all fillers).
type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

/// A freshly generated key pair for a development chain.
#[derive(Debug, Clone)]
pub struct GeneratedAccount {
    /// Account address
    pub address: Address,
    /// Hex-encoded private key (64 characters, no 0x prefix)
    pub private_key: String,
}

/// Read-only node client shared across requests.
pub struct NodeClient {
    /// Alloy HTTP provider
    provider: HttpProvider,
    /// Deployed fee-escrow contract, if configured
    contract: Option<Address>,
}

impl NodeClient {
    /// Build a client for the given RPC endpoint.
    ///
    /// The provider is lazy; no connection is made until the first query.
    pub fn connect(rpc_url: &str, contract: Option<&str>) -> Result<Self, NodeClientError> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e: url::ParseError| NodeClientError::InvalidRpcUrl(e.to_string()))?;

        let contract = contract
            .map(|addr| {
                Address::from_str(addr).map_err(|e| NodeClientError::InvalidAddress(e.to_string()))
            })
            .transpose()?;

        let provider = ProviderBuilder::new().connect_http(url);

        Ok(Self { provider, contract })
    }

    /// Addresses the node manages (`eth_accounts`).
    pub async fn accounts(&self) -> Result<Vec<Address>, NodeClientError> {
        self.provider
            .get_accounts()
            .await
            .map_err(|e| NodeClientError::RpcError(e.to_string()))
    }

    /// Current block height.
    pub async fn block_number(&self) -> Result<u64, NodeClientError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| NodeClientError::RpcError(e.to_string()))
    }

    /// Native balance of an address, in wei.
    pub async fn balance(&self, address: &str) -> Result<U256, NodeClientError> {
        let addr = Address::from_str(address)
            .map_err(|e| NodeClientError::InvalidAddress(e.to_string()))?;

        self.provider
            .get_balance(addr)
            .await
            .map_err(|e| NodeClientError::RpcError(e.to_string()))
    }

    /// Fetch a block by number and normalize it to JSON.
    ///
    /// Returns `Ok(None)` when the node does not know the block.
    pub async fn block_by_number(
        &self,
        number: u64,
    ) -> Result<Option<serde_json::Value>, NodeClientError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .await
            .map_err(|e| NodeClientError::RpcError(e.to_string()))?;

        block
            .map(|b| serde_json::to_value(b).map_err(|e| NodeClientError::RpcError(e.to_string())))
            .transpose()
    }

    /// Balance held by the deployed fee-escrow contract, in wei.
    pub async fn contract_balance(&self) -> Result<U256, NodeClientError> {
        let address = self.contract.ok_or(NodeClientError::ContractNotConfigured)?;

        let contract = EscrowContract::new(&self.provider, address);
        contract.balance().await
    }

    /// The configured fee-escrow contract address, if any.
    pub fn contract_address(&self) -> Option<Address> {
        self.contract
    }

    /// Generate a fresh secp256k1 key pair.
    ///
    /// The private key is handed back to the caller; this exists for
    /// provisioning throwaway accounts on development chains.
    pub fn generate_account() -> GeneratedAccount {
        let signer = PrivateKeySigner::random();

        GeneratedAccount {
            address: signer.address(),
            private_key: alloy::hex::encode(signer.to_bytes()),
        }
    }

    /// Create a signer from a private key (hex string, 0x prefix optional).
    pub fn create_signer(private_key_hex: &str) -> Result<PrivateKeySigner, NodeClientError> {
        let trimmed = private_key_hex.trim_start_matches("0x");
        let key_bytes = alloy::hex::decode(trimmed)
            .map_err(|e| NodeClientError::InvalidPrivateKey(e.to_string()))?;

        PrivateKeySigner::from_slice(&key_bytes)
            .map_err(|e| NodeClientError::InvalidPrivateKey(e.to_string()))
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, thiserror::Error)]
pub enum NodeClientError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Contract error: {0}")]
    ContractError(String),

    #[error("Contract not configured")]
    ContractNotConfigured,

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Confirmation failed: {0}")]
    ConfirmationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_rejects_malformed_rpc_url() {
        let result = NodeClient::connect("not a url", None);
        assert!(matches!(result, Err(NodeClientError::InvalidRpcUrl(_))));
    }

    #[test]
    fn connect_rejects_malformed_contract_address() {
        let result = NodeClient::connect("http://localhost:8545", Some("0xnothex"));
        assert!(matches!(result, Err(NodeClientError::InvalidAddress(_))));
    }

    #[test]
    fn connect_parses_contract_address() {
        let client = NodeClient::connect(
            "http://localhost:8545",
            Some("0x5425890298aed601595a70AB815c96711a31Bc65"),
        )
        .unwrap();
        assert!(client.contract_address().is_some());
    }

    #[tokio::test]
    async fn contract_balance_without_contract_is_an_error() {
        let client = NodeClient::connect("http://localhost:8545", None).unwrap();
        let result = client.contract_balance().await;
        assert!(matches!(result, Err(NodeClientError::ContractNotConfigured)));
    }

    #[test]
    fn generated_accounts_are_distinct() {
        let a = NodeClient::generate_account();
        let b = NodeClient::generate_account();
        assert_ne!(a.address, b.address);
        assert_eq!(a.private_key.len(), 64);
        assert!(a.private_key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn create_signer_accepts_0x_prefix() {
        let account = NodeClient::generate_account();
        let with_prefix = format!("0x{}", account.private_key);
        let signer = NodeClient::create_signer(&with_prefix).unwrap();
        assert_eq!(signer.address(), account.address);
    }

    #[test]
    fn create_signer_rejects_garbage() {
        let result = NodeClient::create_signer("zz");
        assert!(matches!(result, Err(NodeClientError::InvalidPrivateKey(_))));
    }
}
