pub mod sale;

use alloy::primitives::{B256, U256};

use crate::domain::allowlist::MembershipProof;

/// Parameters of one mint submission.
///
/// The contract's `mint(uint256, bytes32[])` signature is shared by the
/// presale and public phases; a public mint carries an empty proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    /// Number of tokens to mint.
    pub amount: u64,
    /// Membership proof siblings, empty for a public mint.
    pub proof: Vec<B256>,
    /// Attached payment: unit price times amount, in wei.
    pub value: U256,
    /// Gas limit for the transaction. `None` lets the provider estimate.
    pub gas_limit: Option<u64>,
}

impl MintRequest {
    /// Presale request carrying a membership proof.
    pub fn presale(amount: u64, proof: MembershipProof, value: U256) -> Self {
        Self {
            amount,
            proof: proof.path,
            value,
            gas_limit: None,
        }
    }

    /// Public request with no proof attached.
    pub fn public(amount: u64, value: U256) -> Self {
        Self {
            amount,
            proof: Vec::new(),
            value,
            gas_limit: None,
        }
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }
}

/// Minimal transaction receipt reported back to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: B256,
    pub block_number: u64,
    pub success: bool,
}
