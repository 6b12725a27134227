use alloy::primitives::Address;
use serde::Deserialize;

/// Default gas limit per minted token, matching the sale contract's
/// worst-case mint cost.
pub const DEFAULT_GAS_LIMIT_PER_TOKEN: u64 = 30_000;

/// Gateway configuration loaded from TOML.
#[derive(Debug, Deserialize)]
pub struct GatewayConfig {
    /// HTTP RPC endpoint of the remote node.
    pub rpc_url: String,
    /// Deployed sale contract address.
    pub contract_address: Address,
    /// Unit mint price in wei. Must match the contract's `price` or the
    /// mint reverts for underpayment.
    pub price_wei: u64,
    /// Gas limit attached per minted token. Defaults to
    /// [`DEFAULT_GAS_LIMIT_PER_TOKEN`].
    #[serde(default = "default_gas_limit_per_token")]
    pub gas_limit_per_token: u64,
    /// Block explorer base URL for transaction links
    /// (e.g. "https://sepolia.etherscan.io/tx").
    /// When absent, raw tx hashes are reported instead.
    pub explorer_url: Option<String>,
    /// Fixed allowlist of addresses eligible for the presale phase.
    pub allowlist: Vec<Address>,
}

fn default_gas_limit_per_token() -> u64 {
    DEFAULT_GAS_LIMIT_PER_TOKEN
}

/// Errors from config loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

impl GatewayConfig {
    /// Load and validate a config from a TOML file.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allowlist.is_empty() {
            return Err(ConfigError::Validation(
                "allowlist must contain at least one address".into(),
            ));
        }

        if self.price_wei == 0 {
            return Err(ConfigError::Validation(
                "price_wei must be non-zero".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
rpc_url = "http://localhost:8545"
contract_address = "0x1234567890123456789012345678901234567890"
price_wei = 80000000000000000
allowlist = [
    "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
    "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
]
"#;
        let config: GatewayConfig = toml::from_str(toml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.allowlist.len(), 2);
        assert_eq!(config.gas_limit_per_token, DEFAULT_GAS_LIMIT_PER_TOKEN);
        assert!(config.explorer_url.is_none());
    }

    #[test]
    fn test_explorer_and_gas_override() {
        let toml = r#"
rpc_url = "http://localhost:8545"
contract_address = "0x1234567890123456789012345678901234567890"
price_wei = 1000
gas_limit_per_token = 45000
explorer_url = "https://sepolia.etherscan.io/tx"
allowlist = ["0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"]
"#;
        let config: GatewayConfig = toml::from_str(toml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.gas_limit_per_token, 45_000);
        assert_eq!(
            config.explorer_url.as_deref(),
            Some("https://sepolia.etherscan.io/tx")
        );
    }

    #[test]
    fn test_empty_allowlist_rejected() {
        let toml = r#"
rpc_url = "http://localhost:8545"
contract_address = "0x1234567890123456789012345678901234567890"
price_wei = 1000
allowlist = []
"#;
        let config: GatewayConfig = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at least one address"));
    }

    #[test]
    fn test_zero_price_rejected() {
        let toml = r#"
rpc_url = "http://localhost:8545"
contract_address = "0x1234567890123456789012345678901234567890"
price_wei = 0
allowlist = ["0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"]
"#;
        let config: GatewayConfig = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("price_wei"));
    }
}
