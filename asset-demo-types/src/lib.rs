// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core types for the asset demo client.
//!
//! This crate defines the account-based chain's native types: addresses,
//! Move identifiers and type tags, entry-function payloads, the canonical
//! (BCS) transaction forms, and the Ed25519 account keypair that signs
//! them. Everything here is transport-agnostic; the RPC layer lives in
//! `asset-demo-client`.

pub mod account_address;
pub mod crypto;
pub mod error;
pub mod identifier;
pub mod move_value;
pub mod transaction;
pub mod transaction_builder;
pub mod type_tag;

pub use account_address::AccountAddress;
pub use crypto::AccountKeyPair;
pub use error::TypeError;
pub use identifier::Identifier;
pub use move_value::MoveValue;
pub use transaction::{
    ChainId, EntryFunction, RawTransaction, SignedTransaction, TransactionAuthenticator,
};
pub use transaction_builder::{GasConfig, TransactionBuilder};
pub use type_tag::{FunctionId, StructTag, TypeTag};
