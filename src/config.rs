// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup (a `.env`
//! file is honored in development); there is no reload.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `RPC_URL` | Node JSON-RPC endpoint | Required |
//! | `SIGNER_PRIVATE_KEY` | Hex private key for the service signer | Required |
//! | `CONTRACT_ADDRESS` | Deployed fee-escrow contract | Optional |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `CONFIRMATION_TIMEOUT_SECS` | Bound on receipt waits | `60` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::env;
use std::time::Duration;

/// Environment variable name for the node RPC endpoint.
pub const RPC_URL_ENV: &str = "RPC_URL";

/// Environment variable name for the service signing key.
pub const SIGNER_PRIVATE_KEY_ENV: &str = "SIGNER_PRIVATE_KEY";

/// Environment variable name for the fee-escrow contract address.
pub const CONTRACT_ADDRESS_ENV: &str = "CONTRACT_ADDRESS";

/// Environment variable name for the receipt wait bound.
pub const CONFIRMATION_TIMEOUT_ENV: &str = "CONFIRMATION_TIMEOUT_SECS";

/// Gateway configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub host: String,
    /// Server bind port
    pub port: u16,
    /// Node JSON-RPC endpoint
    pub rpc_url: String,
    /// Hex private key for the service signer
    pub signer_private_key: String,
    /// Deployed fee-escrow contract address, if any
    pub contract_address: Option<String>,
    /// Bound on confirmation waits
    pub confirmation_timeout: Duration,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid("PORT", e.to_string()))?;

        let rpc_url = env::var(RPC_URL_ENV).map_err(|_| ConfigError::Missing(RPC_URL_ENV))?;

        let signer_private_key = env::var(SIGNER_PRIVATE_KEY_ENV)
            .map_err(|_| ConfigError::Missing(SIGNER_PRIVATE_KEY_ENV))?;

        let contract_address = env::var(CONTRACT_ADDRESS_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty());

        let confirmation_timeout = env::var(CONFIRMATION_TIMEOUT_ENV)
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ConfigError::Invalid(CONFIRMATION_TIMEOUT_ENV, e.to_string()))?;

        Ok(Self {
            host,
            port,
            rpc_url,
            signer_private_key,
            contract_address,
            confirmation_timeout,
        })
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment access is process-global, so the from_env cases run in a
    // single test.
    #[test]
    fn from_env_requires_node_and_signer() {
        env::remove_var(RPC_URL_ENV);
        env::remove_var(SIGNER_PRIVATE_KEY_ENV);
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing(RPC_URL_ENV))
        ));

        env::set_var(RPC_URL_ENV, "http://localhost:8545");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing(SIGNER_PRIVATE_KEY_ENV))
        ));

        env::set_var(SIGNER_PRIVATE_KEY_ENV, "00".repeat(32));
        env::set_var(CONTRACT_ADDRESS_ENV, "");
        let config = Config::from_env().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.rpc_url, "http://localhost:8545");
        // Blank contract address counts as unset
        assert!(config.contract_address.is_none());
        assert_eq!(config.confirmation_timeout, Duration::from_secs(60));

        env::remove_var(RPC_URL_ENV);
        env::remove_var(SIGNER_PRIVATE_KEY_ENV);
        env::remove_var(CONTRACT_ADDRESS_ENV);
    }
}
