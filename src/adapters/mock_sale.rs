use alloy::primitives::{Address, B256, U256};
use tokio::sync::Mutex;

use crate::ports::{
    sale::{NftSale, SaleError},
    MintRequest, TxReceipt,
};

/// In-memory mock of `NftSale` for gateway tests.
///
/// Records every submitted mint request so tests can assert on what reached
/// the contract boundary (or that nothing did).
pub struct MockNftSale {
    connected: Option<Address>,
    total_minted: u64,
    max_supply: u64,
    paused: bool,
    presale_active: bool,
    public_sale_active: bool,
    price: U256,
    fail_submission: Option<String>,
    submitted: Mutex<Vec<MintRequest>>,
}

impl MockNftSale {
    pub fn new() -> Self {
        Self {
            connected: None,
            total_minted: 0,
            max_supply: 10_000,
            paused: false,
            presale_active: true,
            public_sale_active: false,
            price: U256::from(80_000_000_000_000_000u64), // 0.08 ether
            fail_submission: None,
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn with_connected(mut self, address: Address) -> Self {
        self.connected = Some(address);
        self
    }

    pub fn with_supply(mut self, minted: u64, max: u64) -> Self {
        self.total_minted = minted;
        self.max_supply = max;
        self
    }

    pub fn with_flags(mut self, paused: bool, presale: bool, public: bool) -> Self {
        self.paused = paused;
        self.presale_active = presale;
        self.public_sale_active = public;
        self
    }

    pub fn with_price(mut self, price: U256) -> Self {
        self.price = price;
        self
    }

    /// Make every subsequent submission fail with the given reason.
    pub fn with_failing_submission(mut self, reason: impl Into<String>) -> Self {
        self.fail_submission = Some(reason.into());
        self
    }

    /// Mint requests that reached the submission boundary (for assertions).
    pub async fn submitted(&self) -> Vec<MintRequest> {
        self.submitted.lock().await.clone()
    }

    /// Deterministic fake transaction hash for the nth submission.
    fn tx_hash(n: usize) -> B256 {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&(n as u64 + 1).to_be_bytes());
        B256::from(bytes)
    }
}

impl Default for MockNftSale {
    fn default() -> Self {
        Self::new()
    }
}

impl NftSale for MockNftSale {
    fn connected_address(&self) -> Option<Address> {
        self.connected
    }

    async fn total_minted(&self) -> Result<u64, SaleError> {
        Ok(self.total_minted)
    }

    async fn max_supply(&self) -> Result<u64, SaleError> {
        Ok(self.max_supply)
    }

    async fn is_paused(&self) -> Result<bool, SaleError> {
        Ok(self.paused)
    }

    async fn is_presale_active(&self) -> Result<bool, SaleError> {
        Ok(self.presale_active)
    }

    async fn is_public_sale_active(&self) -> Result<bool, SaleError> {
        Ok(self.public_sale_active)
    }

    async fn unit_price(&self) -> Result<U256, SaleError> {
        Ok(self.price)
    }

    async fn submit_mint(&self, request: &MintRequest) -> Result<TxReceipt, SaleError> {
        let mut submitted = self.submitted.lock().await;
        submitted.push(request.clone());

        if let Some(reason) = &self.fail_submission {
            return Err(SaleError::TransactionFailed(reason.clone()));
        }

        Ok(TxReceipt {
            tx_hash: Self::tx_hash(submitted.len() - 1),
            block_number: submitted.len() as u64,
            success: true,
        })
    }
}
