use alloy::{
    network::EthereumWallet,
    primitives::{Address, U256},
    providers::{DynProvider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    sol,
};

use crate::ports::{
    sale::{NftSale, SaleError},
    MintRequest, TxReceipt,
};

// Generate contract bindings using Alloy's sol! macro
sol! {
    #[sol(rpc)]
    interface INftSale {
        function totalSupply() external view returns (uint256);
        function maxToken() external view returns (uint256);
        function paused() external view returns (bool);
        function whitelistSale() external view returns (bool);
        function publicSale() external view returns (bool);
        function price() external view returns (uint256);

        function mint(uint256 amount, bytes32[] calldata proof) external payable;
    }
}

/// Ethereum RPC adapter for the NFT sale contract.
///
/// Holds a provider with an attached local signer; the signer's address is
/// what the gateway sees as the connected wallet.
pub struct EthereumRpc {
    provider: DynProvider,
    contract: Address,
    signer_address: Address,
}

impl EthereumRpc {
    /// Create a new EthereumRpc instance.
    ///
    /// # Arguments
    /// * `rpc_url` - The HTTP RPC endpoint URL
    /// * `private_key` - The private key for signing mint transactions
    /// * `contract` - The deployed sale contract address
    pub fn new(
        rpc_url: &str,
        private_key: &str,
        contract: Address,
    ) -> Result<Self, SaleError> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|e| SaleError::Signer(format!("Invalid private key: {}", e)))?;

        let signer_address = signer.address();
        let wallet = EthereumWallet::from(signer);
        let provider =
            DynProvider::new(ProviderBuilder::new().wallet(wallet).connect_http(
                rpc_url
                    .parse()
                    .map_err(|e| SaleError::Rpc(format!("Invalid RPC URL: {}", e)))?,
            ));

        Ok(Self {
            provider,
            contract,
            signer_address,
        })
    }

    /// Get the sale contract address.
    pub fn contract_address(&self) -> Address {
        self.contract
    }

    /// Narrow a contract-reported counter to u64, rejecting out-of-range
    /// values as a malformed response.
    fn to_u64(value: U256, field: &str) -> Result<u64, SaleError> {
        value.try_into().map_err(|_| {
            SaleError::InvalidResponse(format!("{field} out of u64 range: {value}"))
        })
    }

    fn convert_receipt(receipt: &alloy::rpc::types::TransactionReceipt) -> TxReceipt {
        TxReceipt {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number.unwrap_or(0),
            success: receipt.status(),
        }
    }
}

impl NftSale for EthereumRpc {
    fn connected_address(&self) -> Option<Address> {
        Some(self.signer_address)
    }

    async fn total_minted(&self) -> Result<u64, SaleError> {
        let sale = INftSale::new(self.contract, &self.provider);
        let result = sale
            .totalSupply()
            .call()
            .await
            .map_err(|e| SaleError::Call(e.to_string()))?;
        Self::to_u64(result, "totalSupply")
    }

    async fn max_supply(&self) -> Result<u64, SaleError> {
        let sale = INftSale::new(self.contract, &self.provider);
        let result = sale
            .maxToken()
            .call()
            .await
            .map_err(|e| SaleError::Call(e.to_string()))?;
        Self::to_u64(result, "maxToken")
    }

    async fn is_paused(&self) -> Result<bool, SaleError> {
        let sale = INftSale::new(self.contract, &self.provider);
        sale.paused()
            .call()
            .await
            .map_err(|e| SaleError::Call(e.to_string()))
    }

    async fn is_presale_active(&self) -> Result<bool, SaleError> {
        let sale = INftSale::new(self.contract, &self.provider);
        sale.whitelistSale()
            .call()
            .await
            .map_err(|e| SaleError::Call(e.to_string()))
    }

    async fn is_public_sale_active(&self) -> Result<bool, SaleError> {
        let sale = INftSale::new(self.contract, &self.provider);
        sale.publicSale()
            .call()
            .await
            .map_err(|e| SaleError::Call(e.to_string()))
    }

    async fn unit_price(&self) -> Result<U256, SaleError> {
        let sale = INftSale::new(self.contract, &self.provider);
        sale.price()
            .call()
            .await
            .map_err(|e| SaleError::Call(e.to_string()))
    }

    async fn submit_mint(&self, request: &MintRequest) -> Result<TxReceipt, SaleError> {
        let sale = INftSale::new(self.contract, &self.provider);

        let mut call = sale
            .mint(U256::from(request.amount), request.proof.clone())
            .value(request.value);
        if let Some(gas_limit) = request.gas_limit {
            call = call.gas(gas_limit);
        }

        tracing::debug!(
            amount = request.amount,
            value = %request.value,
            proof_len = request.proof.len(),
            "submitting mint transaction"
        );

        let receipt = call
            .send()
            .await
            .map_err(|e| SaleError::TransactionFailed(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| SaleError::TransactionFailed(e.to_string()))?;

        if !receipt.status() {
            return Err(SaleError::TransactionReverted("mint reverted".into()));
        }

        Ok(Self::convert_receipt(&receipt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_u64_narrows_in_range_values() {
        assert_eq!(
            EthereumRpc::to_u64(U256::from(1_234u64), "totalSupply").unwrap(),
            1_234
        );
    }

    #[test]
    fn test_to_u64_rejects_out_of_range_values() {
        let err = EthereumRpc::to_u64(U256::MAX, "maxToken").unwrap_err();
        assert!(matches!(err, SaleError::InvalidResponse(_)));
        assert!(err.to_string().contains("maxToken"));
    }
}
