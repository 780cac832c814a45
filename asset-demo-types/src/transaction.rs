// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

//! Canonical transaction forms.
//!
//! A [`RawTransaction`] is the unsigned intent: sender, sequence number,
//! entry-function payload, gas parameters, expiration and chain id. Its
//! BCS serialization is the canonical form covered by the signature.
//! A [`SignedTransaction`] adds the Ed25519 authenticator and is submitted
//! to the node hex-encoded.

use crate::account_address::AccountAddress;
use crate::error::TypeError;
use crate::type_tag::{FunctionId, TypeTag};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

/// Domain separator mixed into every transaction signing digest so
/// signatures cannot be replayed as any other kind of message.
pub const RAW_TRANSACTION_SIGNING_DOMAIN: &[u8] = b"AssetDemo::RawTransaction";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(u8);

impl ChainId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u8 {
        self.0
    }
}

/// A call to a deployed contract entry point, with its ordered type
/// arguments and BCS-encoded value arguments. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFunction {
    pub function: FunctionId,
    pub ty_args: Vec<TypeTag>,
    pub args: Vec<Vec<u8>>,
}

impl EntryFunction {
    pub fn new(function: FunctionId, ty_args: Vec<TypeTag>, args: Vec<Vec<u8>>) -> Self {
        Self {
            function,
            ty_args,
            args,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub sender: AccountAddress,
    pub sequence_number: u64,
    pub payload: EntryFunction,
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    pub expiration_timestamp_secs: u64,
    pub chain_id: ChainId,
}

impl RawTransaction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sender: AccountAddress,
        sequence_number: u64,
        payload: EntryFunction,
        max_gas_amount: u64,
        gas_unit_price: u64,
        expiration_timestamp_secs: u64,
        chain_id: ChainId,
    ) -> Self {
        Self {
            sender,
            sequence_number,
            payload,
            max_gas_amount,
            gas_unit_price,
            expiration_timestamp_secs,
            chain_id,
        }
    }

    /// The 32-byte digest covered by the account signature:
    /// `sha3_256(sha3_256(domain) || bcs(self))`.
    pub fn signing_digest(&self) -> Result<[u8; 32], TypeError> {
        let raw_bytes =
            bcs::to_bytes(self).map_err(|e| TypeError::ArgumentEncoding(e.to_string()))?;
        let mut to_sign = Sha3_256::digest(RAW_TRANSACTION_SIGNING_DOMAIN).to_vec();
        to_sign.extend_from_slice(&raw_bytes);
        Ok(Sha3_256::digest(&to_sign).into())
    }
}

/// Signature scheme discriminants. Only Ed25519 is supported.
pub const ED25519_SCHEME: u8 = 0;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionAuthenticator {
    Ed25519 {
        public_key: Vec<u8>,
        signature: Vec<u8>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub raw: RawTransaction,
    pub authenticator: TransactionAuthenticator,
}

impl SignedTransaction {
    pub fn new(raw: RawTransaction, authenticator: TransactionAuthenticator) -> Self {
        Self { raw, authenticator }
    }

    /// Hex wire encoding of the canonical BCS form, as accepted by
    /// `txpool.submit_hex_transaction`.
    pub fn to_hex(&self) -> Result<String, TypeError> {
        let bytes = bcs::to_bytes(self).map_err(|e| TypeError::ArgumentEncoding(e.to_string()))?;
        Ok(hex::encode(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s.trim_start_matches("0x"))
            .map_err(|e| TypeError::ArgumentEncoding(e.to_string()))?;
        bcs::from_bytes(&bytes).map_err(|e| TypeError::ArgumentEncoding(e.to_string()))
    }
}
