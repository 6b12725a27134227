use alloy::primitives::U256;
use tracing::{debug, info, warn};

use crate::{
    config::GatewayConfig,
    domain::{
        allowlist::{leaf_hash, verify_membership, AllowlistError, AllowlistTree},
        mint::{
            MintOutcome, SalePhase, STATUS_NOT_ON_ALLOWLIST, STATUS_WALLET_NOT_CONNECTED,
        },
    },
    ports::{
        sale::{NftSale, SaleError},
        MintRequest,
    },
};

/// Gateway over the NFT sale contract.
///
/// Owns the allowlist tree (built once, read-only afterwards) and a sale
/// port. Read operations propagate [`SaleError`]; mint operations always
/// resolve to a [`MintOutcome`].
pub struct MintGateway<C: NftSale> {
    contract: C,
    allowlist: AllowlistTree,
    price_wei: U256,
    gas_limit_per_token: u64,
    explorer_url: Option<String>,
}

impl<C: NftSale> MintGateway<C> {
    /// Build the gateway from a validated config and a sale port.
    ///
    /// Fails only if the configured allowlist is empty.
    pub fn from_config(contract: C, config: &GatewayConfig) -> Result<Self, AllowlistError> {
        let allowlist = AllowlistTree::build(&config.allowlist)?;
        info!(
            members = allowlist.len(),
            root = %allowlist.root(),
            "allowlist tree built"
        );

        Ok(Self {
            contract,
            allowlist,
            price_wei: U256::from(config.price_wei),
            gas_limit_per_token: config.gas_limit_per_token,
            explorer_url: config.explorer_url.clone(),
        })
    }

    /// The allowlist tree backing presale eligibility checks.
    pub fn allowlist(&self) -> &AllowlistTree {
        &self.allowlist
    }

    /// The sale port behind this gateway.
    pub fn contract(&self) -> &C {
        &self.contract
    }

    // ========== Reads ==========

    /// Number of tokens minted so far.
    pub async fn total_minted(&self) -> Result<u64, SaleError> {
        self.contract.total_minted().await
    }

    /// Maximum token supply.
    pub async fn max_supply(&self) -> Result<u64, SaleError> {
        self.contract.max_supply().await
    }

    /// Whether the sale is paused.
    pub async fn is_paused(&self) -> Result<bool, SaleError> {
        self.contract.is_paused().await
    }

    /// Whether the allowlist-gated presale phase is active.
    pub async fn is_presale_active(&self) -> Result<bool, SaleError> {
        self.contract.is_presale_active().await
    }

    /// Whether the public sale phase is active.
    pub async fn is_public_sale_active(&self) -> Result<bool, SaleError> {
        self.contract.is_public_sale_active().await
    }

    /// Unit price in wei, as reported by the contract.
    pub async fn unit_price(&self) -> Result<U256, SaleError> {
        self.contract.unit_price().await
    }

    /// Current sale phase derived from the three contract flags.
    pub async fn sale_phase(&self) -> Result<SalePhase, SaleError> {
        let paused = self.contract.is_paused().await?;
        let presale = self.contract.is_presale_active().await?;
        let public = self.contract.is_public_sale_active().await?;
        Ok(SalePhase::from_flags(paused, presale, public))
    }

    // ========== Mints ==========

    /// Mint during the presale phase. The caller must be on the allowlist;
    /// the membership proof is attached to the transaction.
    pub async fn presale_mint(&self, amount: u64) -> MintOutcome {
        let Some(minter) = self.contract.connected_address() else {
            return MintOutcome::failure(STATUS_WALLET_NOT_CONNECTED);
        };

        let Some(proof) = self.allowlist.proof_for(&minter) else {
            debug!(%minter, "presale mint rejected, not on allowlist");
            return MintOutcome::failure(STATUS_NOT_ON_ALLOWLIST);
        };

        // Verify the proof locally before submitting.
        if !verify_membership(&proof, leaf_hash(&minter), self.allowlist.root()) {
            return MintOutcome::failure(STATUS_NOT_ON_ALLOWLIST);
        }

        let Some(gas_limit) = self.gas_limit_per_token.checked_mul(amount) else {
            return MintOutcome::failure(format!(
                "Requested mint amount {amount} is too large"
            ));
        };

        let request = MintRequest::presale(amount, proof, self.total_value(amount))
            .with_gas_limit(gas_limit);
        self.submit(request, &minter.to_string()).await
    }

    /// Mint during the public phase, open to anyone. No proof is attached;
    /// the contract's shared `mint` signature receives an empty one.
    pub async fn public_mint(&self, amount: u64) -> MintOutcome {
        let Some(minter) = self.contract.connected_address() else {
            return MintOutcome::failure(STATUS_WALLET_NOT_CONNECTED);
        };

        let request = MintRequest::public(amount, self.total_value(amount));
        self.submit(request, &minter.to_string()).await
    }

    fn total_value(&self, amount: u64) -> U256 {
        self.price_wei * U256::from(amount)
    }

    async fn submit(&self, request: MintRequest, minter: &str) -> MintOutcome {
        match self.contract.submit_mint(&request).await {
            Ok(receipt) => {
                info!(
                    minter,
                    tx_hash = %receipt.tx_hash,
                    amount = request.amount,
                    "mint submitted"
                );
                MintOutcome::submitted(receipt.tx_hash, self.explorer_url.as_deref())
            }
            Err(e) => {
                warn!(minter, error = %e, "mint submission failed");
                MintOutcome::failure(format!("Mint transaction failed: {e}"))
            }
        }
    }
}
