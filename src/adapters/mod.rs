pub mod ethereum_rpc;
pub mod mock_sale;
