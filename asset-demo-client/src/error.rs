// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::rpc::RpcError;
use crate::views::TransactionStatusView;
use asset_demo_types::TypeError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Abort code raised by the fungible store when a holdings record is
/// frozen.
pub const FROZEN_STORE_ABORT_CODE: u64 = 3;
/// Abort code raised when a withdrawal exceeds the holdings balance.
pub const INSUFFICIENT_BALANCE_ABORT_CODE: u64 = 4;

/// Client errors, split by where in the transaction lifecycle they occur.
///
/// None of these are retried automatically: the bounded confirmation poll
/// inside `wait_for_confirmation` is the only built-in resilience.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad input detected client-side, before any network contact.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// The node rejected the transaction synchronously at submission.
    #[error("submission rejected by node (code {code}): {message}")]
    SubmissionRejected { code: i64, message: String },

    /// No terminal state was observed within the confirmation deadline.
    #[error("transaction {hash} not confirmed after {waited:?}")]
    ConfirmationTimeout { hash: String, waited: Duration },

    /// The transaction reached a terminal state but did not execute
    /// successfully.
    #[error("transaction {hash} failed on-chain: {reason}")]
    ExecutionFailed { hash: String, reason: FailureReason },

    #[error(transparent)]
    Rpc(#[from] RpcError),
}

impl From<TypeError> for Error {
    fn from(e: TypeError) -> Self {
        Error::MalformedRequest(e.to_string())
    }
}

impl Error {
    /// True for the one failure the demo scenario expects and tolerates:
    /// a transfer sourced from a frozen holdings record.
    pub fn is_frozen_store_violation(&self) -> bool {
        matches!(
            self,
            Error::ExecutionFailed {
                reason: FailureReason::FrozenStore,
                ..
            }
        )
    }
}

/// Why a confirmed transaction failed, classified from the receipt
/// status. The well-known fungible-store abort codes get explicit
/// variants so callers never match on revert strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureReason {
    FrozenStore,
    InsufficientBalance,
    Abort { location: String, code: u64 },
    OutOfGas,
    Discarded { status_code: u64 },
}

impl FailureReason {
    /// Classify a terminal status. Returns `None` for a successful
    /// execution.
    pub fn from_status(status: &TransactionStatusView) -> Option<Self> {
        match status {
            TransactionStatusView::Executed => None,
            TransactionStatusView::OutOfGas => Some(FailureReason::OutOfGas),
            TransactionStatusView::MoveAbort {
                location,
                abort_code,
            } => Some(match *abort_code {
                FROZEN_STORE_ABORT_CODE => FailureReason::FrozenStore,
                INSUFFICIENT_BALANCE_ABORT_CODE => FailureReason::InsufficientBalance,
                code => FailureReason::Abort {
                    location: location.clone(),
                    code,
                },
            }),
            TransactionStatusView::Discard { status_code } => Some(FailureReason::Discarded {
                status_code: *status_code,
            }),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::FrozenStore => f.write_str("holdings store is frozen"),
            FailureReason::InsufficientBalance => f.write_str("insufficient balance"),
            FailureReason::Abort { location, code } => {
                write!(f, "aborted in {location} with code {code}")
            }
            FailureReason::OutOfGas => f.write_str("out of gas"),
            FailureReason::Discarded { status_code } => {
                write!(f, "discarded with status code {status_code}")
            }
        }
    }
}
