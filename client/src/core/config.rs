//! # Application Configuration
//!
//! Configuration loaded from environment variables at process start and
//! validated before any network traffic. The config is passed explicitly
//! into the services that need it; the core never reads ambient process
//! state after startup.
//!
//! Required variables:
//!
//! - `RATEFORGE_RPC_URL` - chain RPC endpoint
//! - `RATEFORGE_PROTOCOL_ADDRESS` - protocol contract address
//! - `RATEFORGE_ORACLE_ADDRESS` - rate oracle contract address
//!
//! Optional:
//!
//! - `RATEFORGE_MOCK_TOKEN_ADDRESS` - faucet ERC-20, test environments only

use std::env;

use lib_chain::Address;

/// Client configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Chain RPC endpoint URL.
    pub rpc_url: String,

    /// RateForge protocol contract.
    pub protocol_address: Address,

    /// Rate oracle contract.
    pub oracle_address: Address,

    /// Mock collateral token with an open `mint`, for test environments.
    pub mock_token_address: Option<Address>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let rpc_url = env::var("RATEFORGE_RPC_URL")
            .map_err(|_| "RATEFORGE_RPC_URL must be set in environment")?;

        let protocol_address = required_address("RATEFORGE_PROTOCOL_ADDRESS")?;
        let oracle_address = required_address("RATEFORGE_ORACLE_ADDRESS")?;

        let mock_token_address = match env::var("RATEFORGE_MOCK_TOKEN_ADDRESS") {
            Ok(raw) => Some(parse_address("RATEFORGE_MOCK_TOKEN_ADDRESS", &raw)?),
            Err(_) => None,
        };

        Ok(Self {
            rpc_url,
            protocol_address,
            oracle_address,
            mock_token_address,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err("RATEFORGE_RPC_URL must be an http(s) URL".to_string());
        }

        if self.protocol_address.is_zero() {
            return Err("RATEFORGE_PROTOCOL_ADDRESS must not be the zero address".to_string());
        }

        if self.oracle_address.is_zero() {
            return Err("RATEFORGE_ORACLE_ADDRESS must not be the zero address".to_string());
        }

        Ok(())
    }
}

fn required_address(name: &str) -> Result<Address, String> {
    let raw = env::var(name).map_err(|_| format!("{name} must be set in environment"))?;
    parse_address(name, &raw)
}

fn parse_address(name: &str, raw: &str) -> Result<Address, String> {
    Address::parse(raw).map_err(|e| format!("{name} is not a valid address: {e}"))
}
