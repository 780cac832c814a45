// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Errors raised while constructing chain-native values client-side,
/// before anything touches the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("invalid type tag: {0}")]
    InvalidTypeTag(String),

    #[error("invalid key material: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("failed to encode argument: {0}")]
    ArgumentEncoding(String),

    #[error("signature verification failed: {0}")]
    InvalidSignature(String),
}
