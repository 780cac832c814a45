// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

//! The transaction lifecycle: build, sign, submit, confirm.
//!
//! Submission and confirmation are deliberately separate primitives so a
//! caller may pipeline several submissions before blocking on any one
//! confirmation; flows whose steps depend on prior on-chain effects (like
//! the demo scenario) serialize them with [`ChainClient::submit_and_wait`].

use crate::error::{Error, FailureReason, Result};
use crate::rpc::RpcError;
use crate::views::{ChainInfoView, TransactionInfoView};
use asset_demo_types::{
    AccountAddress, AccountKeyPair, ChainId, FunctionId, GasConfig, MoveValue, RawTransaction,
    SignedTransaction, TransactionBuilder, TypeTag,
};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Transport seam between the client and a node. Implemented by the
/// JSON-RPC HTTP provider and by the in-memory mock used in tests.
#[async_trait]
pub trait ChainProvider: Send + Sync {
    async fn chain_info(&self) -> std::result::Result<ChainInfoView, RpcError>;

    async fn get_sequence_number(
        &self,
        address: AccountAddress,
    ) -> std::result::Result<u64, RpcError>;

    /// Submit a hex-encoded signed transaction; returns its hash.
    async fn submit_transaction(&self, signed_txn_hex: &str)
        -> std::result::Result<String, RpcError>;

    /// Terminal transaction info, `None` while still pending.
    async fn get_transaction_info(
        &self,
        txn_hash: &str,
    ) -> std::result::Result<Option<TransactionInfoView>, RpcError>;

    /// Read-only contract call against current chain state.
    async fn call_contract(
        &self,
        function_id: &str,
        type_args: Vec<String>,
        args: Vec<String>,
    ) -> std::result::Result<Vec<serde_json::Value>, RpcError>;

    /// Decoded resource under an account, `None` if absent.
    async fn get_resource(
        &self,
        address: AccountAddress,
        resource_type: &str,
    ) -> std::result::Result<Option<serde_json::Value>, RpcError>;
}

/// How [`ChainClient::wait_for_confirmation`] treats the receipt.
#[derive(Clone, Debug)]
pub struct ConfirmationPolicy {
    /// Turn an on-chain execution failure into
    /// [`Error::ExecutionFailed`] instead of returning the receipt.
    pub check_success: bool,
    /// Hard deadline for observing a terminal state.
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            check_success: true,
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(500),
        }
    }
}

impl ConfirmationPolicy {
    /// Return the receipt as-is even when execution failed.
    pub fn unchecked() -> Self {
        Self {
            check_success: false,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// Terminal outcome of a submitted transaction.
#[derive(Clone, Debug)]
pub struct TransactionReceipt {
    pub hash: String,
    pub success: bool,
    pub failure: Option<FailureReason>,
    pub gas_used: Option<u64>,
}

impl TransactionReceipt {
    fn from_info(info: TransactionInfoView) -> Self {
        let gas_used = info.gas_used();
        let failure = FailureReason::from_status(&info.status);
        Self {
            hash: info.txn_hash,
            success: failure.is_none(),
            failure,
            gas_used,
        }
    }
}

/// Builds, signs and submits transactions against a node reached through
/// `P`, and polls receipts until terminal. Stateless between calls apart
/// from the lazily-fetched chain id and the gas configuration.
pub struct ChainClient<P> {
    provider: P,
    chain_id: OnceCell<ChainId>,
    gas_config: GasConfig,
}

impl<P: Clone> Clone for ChainClient<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            chain_id: OnceCell::new_with(self.chain_id.get().copied()),
            gas_config: self.gas_config,
        }
    }
}

impl<P> ChainClient<P>
where
    P: ChainProvider,
{
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            chain_id: OnceCell::new(),
            gas_config: GasConfig::default(),
        }
    }

    pub fn with_gas_config(mut self, gas_config: GasConfig) -> Self {
        self.gas_config = gas_config;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    async fn chain_id(&self) -> Result<ChainId> {
        let id = self
            .chain_id
            .get_or_try_init(|| async {
                let info = self.provider.chain_info().await?;
                Ok::<_, RpcError>(ChainId::new(info.chain_id))
            })
            .await?;
        Ok(*id)
    }

    /// Build an entry-function transaction for `sender`, stamped with the
    /// account's next sequence number and the node's chain id.
    ///
    /// Client-side detectable problems (invalid identifiers, unencodable
    /// arguments) surface as [`Error::MalformedRequest`] before any
    /// submission.
    pub async fn build_entry_function(
        &self,
        sender: AccountAddress,
        function: FunctionId,
        ty_args: Vec<TypeTag>,
        args: Vec<MoveValue>,
    ) -> Result<RawTransaction> {
        let sequence_number = self.provider.get_sequence_number(sender).await?;
        let chain_id = self.chain_id().await?;
        let raw = TransactionBuilder::new(sender, sequence_number, chain_id)
            .with_gas(self.gas_config.max_gas_amount, self.gas_config.gas_unit_price)
            .build_entry_function(function, ty_args, args)?;
        Ok(raw)
    }

    /// Sign a raw transaction. Pure: no network contact, deterministic
    /// for fixed sequence number and expiration.
    pub fn sign(
        &self,
        account: &AccountKeyPair,
        raw: RawTransaction,
    ) -> Result<SignedTransaction> {
        Ok(account.sign_transaction(raw)?)
    }

    /// Submit a signed transaction to the node's pending pool.
    pub async fn submit(&self, signed: &SignedTransaction) -> Result<String> {
        let wire = signed.to_hex()?;
        match self.provider.submit_transaction(&wire).await {
            Ok(hash) => {
                debug!(%hash, sender = %signed.raw.sender, "transaction submitted");
                Ok(hash)
            }
            Err(RpcError::Server { code, message }) => {
                Err(Error::SubmissionRejected { code, message })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Poll until the transaction reaches a terminal state or the policy
    /// deadline elapses. Never blocks past `policy.timeout`.
    pub async fn wait_for_confirmation(
        &self,
        hash: &str,
        policy: &ConfirmationPolicy,
    ) -> Result<TransactionReceipt> {
        let start = Instant::now();
        loop {
            match self.provider.get_transaction_info(hash).await {
                Ok(Some(info)) => {
                    let receipt = TransactionReceipt::from_info(info);
                    if policy.check_success && !receipt.success {
                        let reason = receipt
                            .failure
                            .expect("unsuccessful receipt carries a failure reason");
                        return Err(Error::ExecutionFailed {
                            hash: receipt.hash,
                            reason,
                        });
                    }
                    return Ok(receipt);
                }
                Ok(None) => {}
                // Transient poll failures do not abort the wait; the
                // deadline still bounds it.
                Err(e) => warn!(%hash, error = %e, "transaction info poll failed"),
            }

            let waited = start.elapsed();
            if waited >= policy.timeout {
                return Err(Error::ConfirmationTimeout {
                    hash: hash.to_string(),
                    waited,
                });
            }
            let remaining = policy.timeout - waited;
            tokio::time::sleep(policy.poll_interval.min(remaining)).await;
        }
    }

    /// Sign, submit and block until confirmed under `policy`.
    pub async fn submit_and_wait(
        &self,
        account: &AccountKeyPair,
        raw: RawTransaction,
        policy: &ConfirmationPolicy,
    ) -> Result<TransactionReceipt> {
        let signed = self.sign(account, raw)?;
        let hash = self.submit(&signed).await?;
        self.wait_for_confirmation(&hash, policy).await
    }

    /// Execute a view function against current chain state. Read-only:
    /// no transaction is created.
    pub async fn call_view(
        &self,
        function: &FunctionId,
        ty_args: &[TypeTag],
        args: &[MoveValue],
    ) -> Result<Vec<serde_json::Value>> {
        let type_args = ty_args.iter().map(|t| t.to_string()).collect();
        let call_args = args.iter().map(MoveValue::to_rpc_string).collect();
        let values = self
            .provider
            .call_contract(&function.to_string(), type_args, call_args)
            .await?;
        Ok(values)
    }

    /// Whether the account has been created on-chain (faucet funding is
    /// only observable through this).
    pub async fn account_exists(&self, address: AccountAddress) -> Result<bool> {
        let resource = self
            .provider
            .get_resource(address, "0x1::account::Account")
            .await?;
        Ok(resource.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureReason;
    use crate::managed;
    use crate::mock_provider::MockProvider;

    fn admin_keypair() -> AccountKeyPair {
        AccountKeyPair::from_seed_bytes(&[1u8; 32]).unwrap()
    }

    fn bob_keypair() -> AccountKeyPair {
        AccountKeyPair::from_seed_bytes(&[2u8; 32]).unwrap()
    }

    fn metadata_address() -> AccountAddress {
        AccountAddress::from_hex_literal("0xfa").unwrap()
    }

    fn test_client() -> (ChainClient<MockProvider>, AccountKeyPair) {
        let admin = admin_keypair();
        let provider = MockProvider::new(admin.address(), metadata_address());
        provider.fund_account(admin.address());
        (ChainClient::new(provider), admin)
    }

    fn fast_policy() -> ConfirmationPolicy {
        ConfirmationPolicy::default()
            .with_timeout(Duration::from_millis(200))
            .with_poll_interval(Duration::from_millis(5))
    }

    #[tokio::test]
    async fn mint_lifecycle_build_sign_submit_confirm() {
        let (client, admin) = test_client();
        let bob = bob_keypair().address();

        let (function, args) = managed::mint_call(admin.address(), bob, 100);
        let raw = client
            .build_entry_function(admin.address(), function, vec![], args)
            .await
            .unwrap();
        assert_eq!(raw.sequence_number, 0);

        let receipt = client
            .submit_and_wait(&admin, raw, &fast_policy())
            .await
            .unwrap();
        assert!(receipt.success);
        assert_eq!(client.provider().balance_of(bob), 100);
        // The next build sees the bumped sequence number.
        let (function, args) = managed::mint_call(admin.address(), bob, 1);
        let raw = client
            .build_entry_function(admin.address(), function, vec![], args)
            .await
            .unwrap();
        assert_eq!(raw.sequence_number, 1);
    }

    #[tokio::test]
    async fn confirmation_wait_is_deadline_bounded() {
        let (client, admin) = test_client();
        client.provider().set_drop_submissions(true);

        let (function, args) = managed::mint_call(admin.address(), bob_keypair().address(), 5);
        let raw = client
            .build_entry_function(admin.address(), function, vec![], args)
            .await
            .unwrap();
        let signed = client.sign(&admin, raw).unwrap();
        let hash = client.submit(&signed).await.unwrap();

        let started = Instant::now();
        let err = client
            .wait_for_confirmation(&hash, &fast_policy())
            .await
            .expect_err("dropped transaction must time out");
        assert!(matches!(err, Error::ConfirmationTimeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn confirmation_survives_pending_polls() {
        let (client, admin) = test_client();
        client.provider().set_confirmation_lag(3);

        let (function, args) = managed::mint_call(admin.address(), bob_keypair().address(), 7);
        let raw = client
            .build_entry_function(admin.address(), function, vec![], args)
            .await
            .unwrap();
        let receipt = client
            .submit_and_wait(&admin, raw, &fast_policy())
            .await
            .unwrap();
        assert!(receipt.success);
    }

    #[tokio::test]
    async fn stale_sequence_number_is_rejected_at_submission() {
        let (client, admin) = test_client();

        let (function, args) = managed::mint_call(admin.address(), bob_keypair().address(), 1);
        let raw = client
            .build_entry_function(admin.address(), function, vec![], args)
            .await
            .unwrap();
        let signed = client.sign(&admin, raw).unwrap();
        let hash = client.submit(&signed).await.unwrap();
        client
            .wait_for_confirmation(&hash, &fast_policy())
            .await
            .unwrap();

        // Same signed transaction again: the sequence number is now stale.
        let err = client.submit(&signed).await.expect_err("stale sequence");
        assert!(matches!(err, Error::SubmissionRejected { .. }));
    }

    #[tokio::test]
    async fn unchecked_policy_returns_failed_receipt() {
        let (client, admin) = test_client();
        let bob = bob_keypair();
        client.provider().fund_account(bob.address());
        client.provider().set_frozen(bob.address(), true);

        // Bob's store is frozen, so his self-authorized transfer aborts.
        let (function, args) =
            managed::store_transfer_call(metadata_address(), admin.address(), 1);
        let raw = client
            .build_entry_function(bob.address(), function, vec![], args)
            .await
            .unwrap();
        let receipt = client
            .submit_and_wait(
                &bob,
                raw,
                &ConfirmationPolicy::unchecked()
                    .with_timeout(Duration::from_millis(200))
                    .with_poll_interval(Duration::from_millis(5)),
            )
            .await
            .unwrap();
        assert!(!receipt.success);
        assert_eq!(receipt.failure, Some(FailureReason::FrozenStore));
    }

    #[tokio::test]
    async fn checked_policy_raises_execution_failed() {
        let (client, admin) = test_client();
        let bob = bob_keypair();
        client.provider().fund_account(bob.address());
        client.provider().set_frozen(bob.address(), true);

        let (function, args) =
            managed::store_transfer_call(metadata_address(), admin.address(), 1);
        let raw = client
            .build_entry_function(bob.address(), function, vec![], args)
            .await
            .unwrap();
        let err = client
            .submit_and_wait(&bob, raw, &fast_policy())
            .await
            .expect_err("frozen store must fail");
        assert!(err.is_frozen_store_violation());
    }

    #[tokio::test]
    async fn burn_beyond_balance_fails_without_underflow() {
        let (client, admin) = test_client();
        let bob = bob_keypair().address();
        client.provider().set_balance(bob, 30);

        let (function, args) = managed::burn_call(admin.address(), bob, 31);
        let raw = client
            .build_entry_function(admin.address(), function, vec![], args)
            .await
            .unwrap();
        let err = client
            .submit_and_wait(&admin, raw, &fast_policy())
            .await
            .expect_err("overdrawn burn must fail");
        assert!(matches!(
            err,
            Error::ExecutionFailed {
                reason: FailureReason::InsufficientBalance,
                ..
            }
        ));
        assert_eq!(client.provider().balance_of(bob), 30);
        assert_eq!(client.provider().supply(), 30);
    }

    #[tokio::test]
    async fn account_exists_reflects_funding() {
        let (client, _admin) = test_client();
        let bob = bob_keypair().address();
        assert!(!client.account_exists(bob).await.unwrap());
        client.provider().fund_account(bob);
        assert!(client.account_exists(bob).await.unwrap());
    }

    #[tokio::test]
    async fn view_call_returns_metadata() {
        let (client, admin) = test_client();
        let (function, args) = managed::get_metadata_call(admin.address());
        let values = client.call_view(&function, &[], &args).await.unwrap();
        assert_eq!(values[0], serde_json::json!(metadata_address().to_hex_literal()));
    }
}
