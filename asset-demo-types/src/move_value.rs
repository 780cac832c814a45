// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::account_address::AccountAddress;
use crate::error::TypeError;

/// An argument value for an entry or view function call.
///
/// Entry-function arguments travel BCS-encoded inside the transaction
/// payload; view-call arguments are rendered as the typed literal strings
/// the node's `contract.call_v2` expects (`100u64`, `0x1`, `true`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveValue {
    Bool(bool),
    U8(u8),
    U64(u64),
    U128(u128),
    Address(AccountAddress),
    Bytes(Vec<u8>),
}

impl MoveValue {
    pub fn to_bcs_bytes(&self) -> Result<Vec<u8>, TypeError> {
        let encoded = match self {
            MoveValue::Bool(v) => bcs::to_bytes(v),
            MoveValue::U8(v) => bcs::to_bytes(v),
            MoveValue::U64(v) => bcs::to_bytes(v),
            MoveValue::U128(v) => bcs::to_bytes(v),
            MoveValue::Address(v) => bcs::to_bytes(v),
            MoveValue::Bytes(v) => bcs::to_bytes(v),
        };
        encoded.map_err(|e| TypeError::ArgumentEncoding(e.to_string()))
    }

    /// Typed literal rendering for view-call arguments.
    pub fn to_rpc_string(&self) -> String {
        match self {
            MoveValue::Bool(v) => v.to_string(),
            MoveValue::U8(v) => format!("{v}u8"),
            MoveValue::U64(v) => format!("{v}u64"),
            MoveValue::U128(v) => format!("{v}u128"),
            MoveValue::Address(v) => v.to_hex_literal(),
            MoveValue::Bytes(v) => format!("0x{}", hex::encode(v)),
        }
    }
}

impl From<AccountAddress> for MoveValue {
    fn from(addr: AccountAddress) -> Self {
        MoveValue::Address(addr)
    }
}

impl From<u64> for MoveValue {
    fn from(v: u64) -> Self {
        MoveValue::U64(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bcs_encodings_match_move_layout() {
        assert_eq!(MoveValue::Bool(true).to_bcs_bytes().unwrap(), vec![1]);
        assert_eq!(
            MoveValue::U64(258).to_bcs_bytes().unwrap(),
            vec![2, 1, 0, 0, 0, 0, 0, 0]
        );
        // Vector<u8> carries a ULEB128 length prefix.
        assert_eq!(
            MoveValue::Bytes(vec![0xaa, 0xbb]).to_bcs_bytes().unwrap(),
            vec![2, 0xaa, 0xbb]
        );
        // Addresses are raw fixed-width bytes.
        assert_eq!(
            MoveValue::Address(AccountAddress::ONE)
                .to_bcs_bytes()
                .unwrap()
                .len(),
            AccountAddress::LENGTH
        );
    }

    #[test]
    fn rpc_strings_are_typed_literals() {
        assert_eq!(MoveValue::U64(100).to_rpc_string(), "100u64");
        assert_eq!(MoveValue::U8(7).to_rpc_string(), "7u8");
        assert_eq!(MoveValue::Bool(false).to_rpc_string(), "false");
        assert_eq!(
            MoveValue::Address(AccountAddress::ONE).to_rpc_string(),
            "0x1"
        );
        assert_eq!(MoveValue::Bytes(vec![0xde, 0xad]).to_rpc_string(), "0xdead");
    }
}
