use std::future::Future;

use alloy::primitives::{Address, U256};
use thiserror::Error;

use super::{MintRequest, TxReceipt};

/// Errors that can occur when talking to the sale contract.
#[derive(Debug, Error)]
pub enum SaleError {
    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("contract call failed: {0}")]
    Call(String),

    #[error("transaction failed: {0}")]
    TransactionFailed(String),

    #[error("transaction reverted: {0}")]
    TransactionReverted(String),

    #[error("signer error: {0}")]
    Signer(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Port for the NFT sale contract.
///
/// Capability set: report the connected signer, query public sale state, and
/// submit a signed mint transaction. Implementations:
/// - `EthereumRpc` (alloy provider + local signer)
/// - `MockNftSale` (in-memory, for gateway tests)
pub trait NftSale: Send + Sync {
    /// Address of the connected signer, or `None` when no wallet is attached.
    fn connected_address(&self) -> Option<Address>;

    /// Number of tokens minted so far (`totalSupply`).
    fn total_minted(&self) -> impl Future<Output = Result<u64, SaleError>> + Send;

    /// Maximum token supply (`maxToken`).
    fn max_supply(&self) -> impl Future<Output = Result<u64, SaleError>> + Send;

    /// Whether the sale is paused.
    fn is_paused(&self) -> impl Future<Output = Result<bool, SaleError>> + Send;

    /// Whether the allowlist-gated presale phase is active (`whitelistSale`).
    fn is_presale_active(&self) -> impl Future<Output = Result<bool, SaleError>> + Send;

    /// Whether the public sale phase is active (`publicSale`).
    fn is_public_sale_active(&self) -> impl Future<Output = Result<bool, SaleError>> + Send;

    /// Unit price in wei, as reported by the contract.
    fn unit_price(&self) -> impl Future<Output = Result<U256, SaleError>> + Send;

    /// Sign and submit a mint transaction, waiting for its receipt.
    fn submit_mint(
        &self,
        request: &MintRequest,
    ) -> impl Future<Output = Result<TxReceipt, SaleError>> + Send;
}
