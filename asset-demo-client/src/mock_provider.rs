// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

//! An in-memory [`ChainProvider`] for tests.
//!
//! The mock keeps a small simulated ledger (balances, frozen stores,
//! supply, sequence numbers) and executes submitted entry functions with
//! the managed-asset policy, so lifecycle and scenario tests observe real
//! abort codes without a node.

use crate::chain_client::ChainProvider;
use crate::error::{FROZEN_STORE_ABORT_CODE, INSUFFICIENT_BALANCE_ABORT_CODE};
use crate::faucet::{Faucet, FaucetError};
use crate::managed::{FUNGIBLE_STORE_MODULE, MANAGED_ASSET_MODULE};
use crate::rpc::RpcError;
use crate::views::{ChainInfoView, TransactionInfoView, TransactionStatusView};
use asset_demo_types::{AccountAddress, SignedTransaction};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Abort code for admin entry points called by a non-admin signer.
pub const UNAUTHORIZED_ABORT_CODE: u64 = 1;

const MOCK_CHAIN_ID: u8 = 254;

#[derive(Debug, Default)]
struct MockChainState {
    accounts: HashMap<AccountAddress, u64>,
    balances: HashMap<AccountAddress, u64>,
    frozen: HashSet<AccountAddress>,
    supply: u64,
    receipts: HashMap<String, TransactionInfoView>,
    // hash -> polls left before the receipt becomes visible
    pending: HashMap<String, u64>,
    confirmation_lag: u64,
    drop_submissions: bool,
    submitted: Vec<SignedTransaction>,
    txn_counter: u64,
}

#[derive(Clone, Debug)]
pub struct MockProvider {
    admin: AccountAddress,
    metadata: AccountAddress,
    state: Arc<Mutex<MockChainState>>,
}

impl MockProvider {
    pub fn new(admin: AccountAddress, metadata: AccountAddress) -> Self {
        Self {
            admin,
            metadata,
            state: Arc::new(Mutex::new(MockChainState::default())),
        }
    }

    pub fn admin(&self) -> AccountAddress {
        self.admin
    }

    pub fn metadata(&self) -> AccountAddress {
        self.metadata
    }

    /// Create the account on-chain, as faucet funding would.
    pub fn fund_account(&self, address: AccountAddress) {
        self.state.lock().unwrap().accounts.entry(address).or_insert(0);
    }

    /// Delay receipt visibility by `polls` confirmation queries.
    pub fn set_confirmation_lag(&self, polls: u64) {
        self.state.lock().unwrap().confirmation_lag = polls;
    }

    /// Accept submissions but never produce a receipt.
    pub fn set_drop_submissions(&self, drop: bool) {
        self.state.lock().unwrap().drop_submissions = drop;
    }

    pub fn set_frozen(&self, address: AccountAddress, frozen: bool) {
        let mut state = self.state.lock().unwrap();
        if frozen {
            state.frozen.insert(address);
        } else {
            state.frozen.remove(&address);
        }
    }

    pub fn set_balance(&self, address: AccountAddress, amount: u64) {
        let mut state = self.state.lock().unwrap();
        let previous = state.balances.insert(address, amount).unwrap_or(0);
        state.supply = state.supply - previous + amount;
    }

    pub fn balance_of(&self, address: AccountAddress) -> u64 {
        self.state
            .lock()
            .unwrap()
            .balances
            .get(&address)
            .copied()
            .unwrap_or(0)
    }

    pub fn supply(&self) -> u64 {
        self.state.lock().unwrap().supply
    }

    pub fn is_frozen(&self, address: AccountAddress) -> bool {
        self.state.lock().unwrap().frozen.contains(&address)
    }

    pub fn submitted_count(&self) -> usize {
        self.state.lock().unwrap().submitted.len()
    }

    fn managed_location(&self) -> String {
        format!("{}::{}", self.admin, MANAGED_ASSET_MODULE)
    }

    fn store_location() -> String {
        format!("{}::{}", AccountAddress::ONE, FUNGIBLE_STORE_MODULE)
    }

    fn execute(&self, state: &mut MockChainState, signed: &SignedTransaction) -> TransactionStatusView {
        let payload = &signed.raw.payload;
        let sender = signed.raw.sender;
        let function = &payload.function;

        let abort = |location: String, code: u64| TransactionStatusView::MoveAbort {
            location,
            abort_code: code,
        };

        if function.address == self.admin && function.module.as_str() == MANAGED_ASSET_MODULE {
            if sender != self.admin {
                return abort(self.managed_location(), UNAUTHORIZED_ABORT_CODE);
            }
            match function.function.as_str() {
                "mint" => {
                    let Some((to, amount)) = decode_address_amount(&payload.args) else {
                        return TransactionStatusView::Discard { status_code: 1 };
                    };
                    *state.balances.entry(to).or_insert(0) += amount;
                    state.supply += amount;
                    TransactionStatusView::Executed
                }
                // Admin transfers move holdings with the contract's
                // transfer capability, so a frozen store does not block
                // them.
                "transfer" => {
                    let Some((from, to, amount)) = decode_transfer_args(&payload.args) else {
                        return TransactionStatusView::Discard { status_code: 1 };
                    };
                    let available = state.balances.get(&from).copied().unwrap_or(0);
                    if available < amount {
                        return abort(Self::store_location(), INSUFFICIENT_BALANCE_ABORT_CODE);
                    }
                    *state.balances.entry(from).or_insert(0) -= amount;
                    *state.balances.entry(to).or_insert(0) += amount;
                    TransactionStatusView::Executed
                }
                "burn" => {
                    let Some((from, amount)) = decode_address_amount(&payload.args) else {
                        return TransactionStatusView::Discard { status_code: 1 };
                    };
                    let available = state.balances.get(&from).copied().unwrap_or(0);
                    if available < amount {
                        return abort(Self::store_location(), INSUFFICIENT_BALANCE_ABORT_CODE);
                    }
                    *state.balances.entry(from).or_insert(0) -= amount;
                    state.supply -= amount;
                    TransactionStatusView::Executed
                }
                "freeze_account" => {
                    let Some(target) = decode_address(&payload.args) else {
                        return TransactionStatusView::Discard { status_code: 1 };
                    };
                    state.frozen.insert(target);
                    TransactionStatusView::Executed
                }
                "unfreeze_account" => {
                    let Some(target) = decode_address(&payload.args) else {
                        return TransactionStatusView::Discard { status_code: 1 };
                    };
                    state.frozen.remove(&target);
                    TransactionStatusView::Executed
                }
                _ => TransactionStatusView::Discard { status_code: 2 },
            }
        } else if function.address == AccountAddress::ONE
            && function.module.as_str() == FUNGIBLE_STORE_MODULE
            && function.function.as_str() == "transfer"
        {
            let Some((_metadata, to, amount)) = decode_transfer_args(&payload.args) else {
                return TransactionStatusView::Discard { status_code: 1 };
            };
            if state.frozen.contains(&sender) || state.frozen.contains(&to) {
                return abort(Self::store_location(), FROZEN_STORE_ABORT_CODE);
            }
            let available = state.balances.get(&sender).copied().unwrap_or(0);
            if available < amount {
                return abort(Self::store_location(), INSUFFICIENT_BALANCE_ABORT_CODE);
            }
            *state.balances.entry(sender).or_insert(0) -= amount;
            *state.balances.entry(to).or_insert(0) += amount;
            TransactionStatusView::Executed
        } else {
            TransactionStatusView::Discard { status_code: 2 }
        }
    }
}

fn decode_address(args: &[Vec<u8>]) -> Option<AccountAddress> {
    let [a] = args else { return None };
    bcs::from_bytes(a).ok()
}

fn decode_address_amount(args: &[Vec<u8>]) -> Option<(AccountAddress, u64)> {
    let [a, b] = args else { return None };
    Some((bcs::from_bytes(a).ok()?, bcs::from_bytes(b).ok()?))
}

fn decode_transfer_args(args: &[Vec<u8>]) -> Option<(AccountAddress, AccountAddress, u64)> {
    let [a, b, c] = args else { return None };
    Some((
        bcs::from_bytes(a).ok()?,
        bcs::from_bytes(b).ok()?,
        bcs::from_bytes(c).ok()?,
    ))
}

#[async_trait]
impl ChainProvider for MockProvider {
    async fn chain_info(&self) -> Result<ChainInfoView, RpcError> {
        Ok(ChainInfoView {
            chain_id: MOCK_CHAIN_ID,
        })
    }

    async fn get_sequence_number(&self, address: AccountAddress) -> Result<u64, RpcError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .accounts
            .get(&address)
            .copied()
            .unwrap_or(0))
    }

    async fn submit_transaction(&self, signed_txn_hex: &str) -> Result<String, RpcError> {
        let signed = SignedTransaction::from_hex(signed_txn_hex).map_err(|e| RpcError::Server {
            code: -32602,
            message: format!("malformed transaction: {e}"),
        })?;
        signed.verify_signature().map_err(|e| RpcError::Server {
            code: -32000,
            message: format!("INVALID_SIGNATURE: {e}"),
        })?;

        let mut state = self.state.lock().unwrap();
        let sender = signed.raw.sender;
        let Some(expected_seq) = state.accounts.get(&sender).copied() else {
            return Err(RpcError::Server {
                code: -32000,
                message: format!("SENDER_ACCOUNT_NOT_FOUND: {sender}"),
            });
        };
        if signed.raw.sequence_number != expected_seq {
            return Err(RpcError::Server {
                code: -32000,
                message: format!(
                    "SEQUENCE_NUMBER_TOO_OLD: expected {expected_seq}, got {}",
                    signed.raw.sequence_number
                ),
            });
        }

        state.txn_counter += 1;
        let hash = format!("0x{:064x}", state.txn_counter);
        state.submitted.push(signed.clone());

        if state.drop_submissions {
            return Ok(hash);
        }

        // Execution consumes the sequence number even on abort.
        *state.accounts.get_mut(&sender).expect("sender exists") += 1;
        let status = self.execute(&mut state, &signed);
        let info = TransactionInfoView {
            txn_hash: hash.clone(),
            status,
            gas_used: Some(json!("4213")),
        };
        let lag = state.confirmation_lag;
        state.pending.insert(hash.clone(), lag);
        state.receipts.insert(hash.clone(), info);
        Ok(hash)
    }

    async fn get_transaction_info(
        &self,
        txn_hash: &str,
    ) -> Result<Option<TransactionInfoView>, RpcError> {
        let mut state = self.state.lock().unwrap();
        if let Some(remaining) = state.pending.get_mut(txn_hash) {
            if *remaining > 0 {
                *remaining -= 1;
                return Ok(None);
            }
        }
        Ok(state.receipts.get(txn_hash).cloned())
    }

    async fn call_contract(
        &self,
        function_id: &str,
        _type_args: Vec<String>,
        args: Vec<String>,
    ) -> Result<Vec<Value>, RpcError> {
        let state = self.state.lock().unwrap();
        let parse_addr = |s: &str| {
            AccountAddress::from_hex_literal(s).map_err(|e| RpcError::Server {
                code: -32602,
                message: e.to_string(),
            })
        };

        if function_id == format!("{}::{}::get_metadata", self.admin, MANAGED_ASSET_MODULE) {
            return Ok(vec![json!(self.metadata.to_hex_literal())]);
        }
        if function_id == format!("{}::{}::balance", AccountAddress::ONE, FUNGIBLE_STORE_MODULE) {
            let [holder, _metadata] = args.as_slice() else {
                return Err(RpcError::Server {
                    code: -32602,
                    message: "balance expects (holder, metadata)".to_string(),
                });
            };
            let holder = parse_addr(holder)?;
            let balance = state.balances.get(&holder).copied().unwrap_or(0);
            // Decimal-string rendering, as fullnodes produce for u64.
            return Ok(vec![json!(balance.to_string())]);
        }
        if function_id == format!("{}::{}::supply", AccountAddress::ONE, FUNGIBLE_STORE_MODULE) {
            return Ok(vec![json!(state.supply.to_string())]);
        }

        Err(RpcError::Server {
            code: -32601,
            message: format!("unknown view function: {function_id}"),
        })
    }

    async fn get_resource(
        &self,
        address: AccountAddress,
        resource_type: &str,
    ) -> Result<Option<Value>, RpcError> {
        if resource_type != "0x1::account::Account" {
            return Ok(None);
        }
        let state = self.state.lock().unwrap();
        Ok(state
            .accounts
            .get(&address)
            .map(|seq| json!({"json": {"sequence_number": seq}, "raw": "0x00"})))
    }
}

#[async_trait]
impl Faucet for MockProvider {
    async fn fund(&self, address: AccountAddress, _amount: u64) -> Result<(), FaucetError> {
        self.fund_account(address);
        Ok(())
    }
}
