use alloy::primitives::B256;
use serde::Serialize;

/// Status line returned when a mint is attempted without a connected signer.
pub const STATUS_WALLET_NOT_CONNECTED: &str =
    "To be able to mint, you need to connect your wallet";

/// Status line returned when the caller is not on the allowlist.
pub const STATUS_NOT_ON_ALLOWLIST: &str =
    "Invalid membership proof - you are not on the whitelist";

/// Uniform result of a mint attempt, intended for direct display.
///
/// Every failure — precondition or external — is converted to this shape at
/// the gateway boundary; nothing propagates as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MintOutcome {
    pub success: bool,
    /// Human-readable reason on failure, transaction reference on success.
    pub status: String,
}

impl MintOutcome {
    pub fn success(status: impl Into<String>) -> Self {
        Self {
            success: true,
            status: status.into(),
        }
    }

    pub fn failure(status: impl Into<String>) -> Self {
        Self {
            success: false,
            status: status.into(),
        }
    }

    /// Success outcome referencing a submitted transaction.
    ///
    /// Links to the block explorer when a base URL is configured, otherwise
    /// reports the raw transaction hash.
    pub fn submitted(tx_hash: B256, explorer_url: Option<&str>) -> Self {
        let status = match explorer_url {
            Some(base) => format!(
                "Check out your transaction: {}/{tx_hash}",
                base.trim_end_matches('/')
            ),
            None => format!("Transaction submitted: {tx_hash}"),
        };
        Self::success(status)
    }
}

/// Sale phase derived from the contract's three state flags.
///
/// `paused` wins over both sale flags; presale wins over public when the
/// contract reports both active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SalePhase {
    Paused,
    Presale,
    Public,
    /// No sale flag set and not paused.
    Closed,
}

impl SalePhase {
    pub fn from_flags(paused: bool, presale: bool, public: bool) -> Self {
        if paused {
            SalePhase::Paused
        } else if presale {
            SalePhase::Presale
        } else if public {
            SalePhase::Public
        } else {
            SalePhase::Closed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::b256;

    #[test]
    fn test_phase_from_flags() {
        assert_eq!(SalePhase::from_flags(true, true, true), SalePhase::Paused);
        assert_eq!(SalePhase::from_flags(false, true, true), SalePhase::Presale);
        assert_eq!(SalePhase::from_flags(false, false, true), SalePhase::Public);
        assert_eq!(SalePhase::from_flags(false, false, false), SalePhase::Closed);
    }

    #[test]
    fn test_submitted_outcome_links_explorer() {
        let tx = b256!("00000000000000000000000000000000000000000000000000000000000000aa");

        let linked = MintOutcome::submitted(tx, Some("https://sepolia.etherscan.io/tx/"));
        assert!(linked.success);
        assert!(linked
            .status
            .contains("https://sepolia.etherscan.io/tx/0x00"));

        let bare = MintOutcome::submitted(tx, None);
        assert!(bare.success);
        assert!(bare.status.contains("0x00"));
    }
}
