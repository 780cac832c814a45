// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::chain_client::ChainProvider;
use crate::rpc::{JsonRpcClient, RpcError};
use crate::views::{ChainInfoView, TransactionInfoView};
use asset_demo_types::AccountAddress;
use async_trait::async_trait;

/// [`ChainProvider`] over the node's HTTP JSON-RPC endpoint.
#[derive(Clone, Debug)]
pub struct JsonRpcProvider {
    rpc: JsonRpcClient,
}

impl JsonRpcProvider {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc: JsonRpcClient::new(rpc_url),
        }
    }

    pub fn rpc(&self) -> &JsonRpcClient {
        &self.rpc
    }
}

#[async_trait]
impl ChainProvider for JsonRpcProvider {
    async fn chain_info(&self) -> Result<ChainInfoView, RpcError> {
        self.rpc.chain_info().await
    }

    async fn get_sequence_number(&self, address: AccountAddress) -> Result<u64, RpcError> {
        self.rpc.get_sequence_number(&address.to_hex_literal()).await
    }

    async fn submit_transaction(&self, signed_txn_hex: &str) -> Result<String, RpcError> {
        self.rpc.submit_hex_transaction(signed_txn_hex).await
    }

    async fn get_transaction_info(
        &self,
        txn_hash: &str,
    ) -> Result<Option<TransactionInfoView>, RpcError> {
        self.rpc.get_transaction_info(txn_hash).await
    }

    async fn call_contract(
        &self,
        function_id: &str,
        type_args: Vec<String>,
        args: Vec<String>,
    ) -> Result<Vec<serde_json::Value>, RpcError> {
        self.rpc.call_contract(function_id, type_args, args).await
    }

    async fn get_resource(
        &self,
        address: AccountAddress,
        resource_type: &str,
    ) -> Result<Option<serde_json::Value>, RpcError> {
        self.rpc
            .get_resource(&address.to_hex_literal(), resource_type)
            .await
    }
}
