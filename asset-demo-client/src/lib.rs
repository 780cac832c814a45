// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

//! Transaction-submission client for an account-based chain.
//!
//! [`ChainClient`] turns a high-level intent into a built, signed and
//! submitted transaction and offers a deadline-bounded confirmation poll;
//! it is generic over a [`ChainProvider`] transport so the same client
//! logic runs against the JSON-RPC node ([`JsonRpcProvider`]) or the
//! in-memory [`MockProvider`] used in tests. [`AssetClient`] layers
//! balance reads and end-user transfers of a fungible asset on top.

pub mod asset;
pub mod chain_client;
pub mod error;
pub mod faucet;
pub mod json_rpc_provider;
pub mod managed;
pub mod mock_provider;
pub mod rpc;
pub mod views;

pub use asset::AssetClient;
pub use chain_client::{ChainClient, ChainProvider, ConfirmationPolicy, TransactionReceipt};
pub use error::{Error, FailureReason, Result};
pub use faucet::{Faucet, FaucetClient};
pub use json_rpc_provider::JsonRpcProvider;
pub use mock_provider::MockProvider;
pub use rpc::{JsonRpcClient, RpcError};
