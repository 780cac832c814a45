// Simple async JSON-RPC 2.0 client for the node's HTTP endpoint.

use crate::views::{ChainInfoView, JsonValueExt, TransactionInfoView};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Transport- and protocol-level RPC failures.
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rpc error {code}: {message}")]
    Server { code: i64, message: String },

    #[error("invalid rpc response: {0}")]
    InvalidResponse(String),
}

#[derive(Clone, Debug)]
pub struct JsonRpcClient {
    http_client: reqwest::Client,
    rpc_url: String,
    request_id: Arc<AtomicU64>,
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: Vec<Value>,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    result: Option<Value>,
    error: Option<JsonRpcErrorBody>,
    #[allow(dead_code)]
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcErrorBody {
    code: i64,
    message: String,
}

impl JsonRpcClient {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            rpc_url: rpc_url.into(),
            request_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id,
        };

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;
        if !status.is_success() {
            return Err(RpcError::InvalidResponse(format!(
                "HTTP {status}: {response_text}"
            )));
        }

        let rpc_response: JsonRpcResponse = serde_json::from_str(&response_text)
            .map_err(|e| RpcError::InvalidResponse(e.to_string()))?;

        if let Some(error) = rpc_response.error {
            // Log request and response only on error
            tracing::warn!(
                "RPC error - Request: {} | Response: {}",
                serde_json::to_string(&request).unwrap_or_default(),
                &response_text
            );
            return Err(RpcError::Server {
                code: error.code,
                message: error.message,
            });
        }

        // The result may be null, which is valid for Option-shaped queries.
        Ok(rpc_response.result.unwrap_or(Value::Null))
    }

    pub async fn chain_info(&self) -> Result<ChainInfoView, RpcError> {
        let result = self.call("chain.info", vec![]).await?;
        serde_json::from_value(result).map_err(|e| RpcError::InvalidResponse(e.to_string()))
    }

    /// Read a decoded resource under an account, `None` if absent.
    pub async fn get_resource(
        &self,
        address: &str,
        resource_type: &str,
    ) -> Result<Option<Value>, RpcError> {
        let result = self
            .call(
                "state.get_resource",
                vec![json!(address), json!(resource_type), json!({"decode": true})],
            )
            .await?;

        if result.is_null() {
            Ok(None)
        } else {
            Ok(Some(result))
        }
    }

    /// Next sequence number for an account.
    ///
    /// The txpool answer includes pending transactions; when it has no
    /// opinion the on-chain account resource is authoritative, and an
    /// account that does not exist yet starts from 0.
    pub async fn get_sequence_number(&self, address: &str) -> Result<u64, RpcError> {
        let result = self
            .call("txpool.next_sequence_number", vec![json!(address)])
            .await?;

        if let Some(seq) = result.as_u64_flex() {
            return Ok(seq);
        }

        let resource = self.get_resource(address, "0x1::account::Account").await?;
        match resource {
            Some(res) => Ok(res
                .get("json")
                .and_then(|j| j.get("sequence_number"))
                .and_then(|v| v.as_u64_flex())
                .unwrap_or(0)),
            None => Ok(0),
        }
    }

    /// Submit a hex-encoded signed transaction, returning its hash.
    pub async fn submit_hex_transaction(&self, signed_txn: &str) -> Result<String, RpcError> {
        let result = self
            .call("txpool.submit_hex_transaction", vec![json!(signed_txn)])
            .await?;
        result
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| RpcError::InvalidResponse(format!("expected hash string, got {result}")))
    }

    /// Terminal transaction info, `None` while still pending.
    pub async fn get_transaction_info(
        &self,
        txn_hash: &str,
    ) -> Result<Option<TransactionInfoView>, RpcError> {
        let result = self
            .call("chain.get_transaction_info", vec![json!(txn_hash)])
            .await?;

        if result.is_null() {
            return Ok(None);
        }
        serde_json::from_value(result)
            .map(Some)
            .map_err(|e| RpcError::InvalidResponse(e.to_string()))
    }

    /// Call a read-only contract function against current chain state.
    /// `function_id` format: `0xADDRESS::module::function`.
    pub async fn call_contract(
        &self,
        function_id: &str,
        type_args: Vec<String>,
        args: Vec<String>,
    ) -> Result<Vec<Value>, RpcError> {
        let contract_call = json!({
            "function_id": function_id,
            "type_args": type_args,
            "args": args,
        });
        let result = self.call("contract.call_v2", vec![contract_call]).await?;
        serde_json::from_value(result).map_err(|e| RpcError::InvalidResponse(e.to_string()))
    }
}
