// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

//! JSON views of node responses, shared between the HTTP provider and the
//! mock.

use serde::{Deserialize, Serialize};

/// Subset of `chain.info` the client cares about.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainInfoView {
    pub chain_id: u8,
}

/// Terminal execution status reported by `chain.get_transaction_info`.
///
/// Serialized externally tagged, so a plain `"Executed"` string and a
/// `{"MoveAbort": {...}}` object both parse.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatusView {
    Executed,
    OutOfGas,
    MoveAbort { location: String, abort_code: u64 },
    Discard { status_code: u64 },
}

impl TransactionStatusView {
    pub fn is_success(&self) -> bool {
        matches!(self, TransactionStatusView::Executed)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionInfoView {
    pub txn_hash: String,
    pub status: TransactionStatusView,
    #[serde(default)]
    pub gas_used: Option<serde_json::Value>,
}

impl TransactionInfoView {
    pub fn gas_used(&self) -> Option<u64> {
        self.gas_used.as_ref().and_then(|v| v.as_u64_flex())
    }
}

/// Nodes render u64 fields either as JSON numbers or as decimal strings
/// depending on the endpoint; accept both.
pub trait JsonValueExt {
    fn as_u64_flex(&self) -> Option<u64>;
}

impl JsonValueExt for serde_json::Value {
    fn as_u64_flex(&self) -> Option<u64> {
        self.as_u64()
            .or_else(|| self.as_str().and_then(|s| s.parse().ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_parses_string_and_object_forms() {
        let executed: TransactionStatusView = serde_json::from_value(json!("Executed")).unwrap();
        assert!(executed.is_success());

        let abort: TransactionStatusView = serde_json::from_value(json!({
            "MoveAbort": {"location": "0x1::fungible_store", "abort_code": 3}
        }))
        .unwrap();
        assert_eq!(
            abort,
            TransactionStatusView::MoveAbort {
                location: "0x1::fungible_store".to_string(),
                abort_code: 3
            }
        );
        assert!(!abort.is_success());
    }

    #[test]
    fn flexible_u64_parsing() {
        assert_eq!(json!(7).as_u64_flex(), Some(7));
        assert_eq!(json!("7").as_u64_flex(), Some(7));
        assert_eq!(json!("x").as_u64_flex(), None);
        assert_eq!(json!(null).as_u64_flex(), None);
    }

    #[test]
    fn transaction_info_gas_used_accepts_both_renderings() {
        let info: TransactionInfoView = serde_json::from_value(json!({
            "txn_hash": "0xabc",
            "status": "Executed",
            "gas_used": "4213"
        }))
        .unwrap();
        assert_eq!(info.gas_used(), Some(4213));
    }
}
