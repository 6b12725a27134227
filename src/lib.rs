//! Client-side helper layer for an allowlist-gated NFT sale.
//!
//! Two pieces:
//! - [`domain::allowlist`]: a keccak256 Merkle tree over the sale allowlist,
//!   built once at startup, producing compact membership proofs.
//! - [`gateway::MintGateway`]: reads the sale contract's public state and
//!   submits mint transactions, attaching a membership proof during the
//!   presale phase. Mint failures are reported as [`domain::mint::MintOutcome`]
//!   values, never as propagated errors.
//!
//! Chain access goes through the [`ports::NftSale`] port; [`adapters`] holds
//! the alloy-backed adapter and an in-memory mock for tests.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod gateway;
pub mod ports;

pub use config::GatewayConfig;
pub use domain::allowlist::{verify_membership, AllowlistTree, MembershipProof};
pub use domain::mint::{MintOutcome, SalePhase};
pub use gateway::MintGateway;
