// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

//! The fixed demo scenario.
//!
//! Every step is gated on confirmation of the previous one: later steps
//! reference balances the earlier steps created, so the flow is strictly
//! sequential by design. The only failure the scenario tolerates is the
//! frozen-store rejection it provokes on purpose.

use anyhow::{bail, Context, Result};
use asset_demo_client::chain_client::{ChainClient, ChainProvider, ConfirmationPolicy};
use asset_demo_client::faucet::Faucet;
use asset_demo_client::managed;
use asset_demo_client::AssetClient;
use asset_demo_types::{AccountKeyPair, FunctionId, MoveValue};
use std::time::Duration;
use tracing::info;

/// Base-coin amount requested from the faucet per actor, enough to cover
/// the scenario's gas.
pub const FUND_AMOUNT: u64 = 100_000_000;

const MINT_AMOUNT: u64 = 100;
const BURN_AMOUNT: u64 = 50;
const SEND_AMOUNT: u64 = 40;

pub struct DemoFlow<P, F> {
    chain: ChainClient<P>,
    faucet: F,
    owner: AccountKeyPair,
    bob: AccountKeyPair,
    charlie: AccountKeyPair,
    policy: ConfirmationPolicy,
}

impl<P, F> DemoFlow<P, F>
where
    P: ChainProvider + Clone,
    F: Faucet,
{
    /// Demo flow with freshly generated recipient accounts, as a run
    /// against a real test network uses.
    pub fn new(chain: ChainClient<P>, faucet: F, owner: AccountKeyPair) -> Self {
        let bob = AccountKeyPair::generate(&mut rand::rngs::OsRng);
        let charlie = AccountKeyPair::generate(&mut rand::rngs::OsRng);
        Self::with_actors(chain, faucet, owner, bob, charlie)
    }

    pub fn with_actors(
        chain: ChainClient<P>,
        faucet: F,
        owner: AccountKeyPair,
        bob: AccountKeyPair,
        charlie: AccountKeyPair,
    ) -> Self {
        Self {
            chain,
            faucet,
            owner,
            bob,
            charlie,
            policy: ConfirmationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ConfirmationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn owner(&self) -> &AccountKeyPair {
        &self.owner
    }

    pub fn bob(&self) -> &AccountKeyPair {
        &self.bob
    }

    pub fn charlie(&self) -> &AccountKeyPair {
        &self.charlie
    }

    /// Submit an owner-signed entry function and block until confirmed.
    async fn admin_call(&self, call: (FunctionId, Vec<MoveValue>)) -> Result<()> {
        let (function, args) = call;
        let label = function.to_string();
        let raw = self
            .chain
            .build_entry_function(self.owner.address(), function, vec![], args)
            .await?;
        let receipt = self
            .chain
            .submit_and_wait(&self.owner, raw, &self.policy)
            .await?;
        info!(hash = %receipt.hash, %label, "confirmed");
        Ok(())
    }

    /// Fund an account and wait until it is visible on-chain. Funding is
    /// only observable through chain state, so this polls the account
    /// resource under the same deadline as a confirmation wait.
    async fn fund_and_wait(&self, actor: &str, account: &AccountKeyPair) -> Result<()> {
        let address = account.address();
        self.faucet
            .fund(address, FUND_AMOUNT)
            .await
            .with_context(|| format!("funding {actor} ({address})"))?;

        let deadline = tokio::time::Instant::now() + self.policy.timeout;
        while !self.chain.account_exists(address).await? {
            if tokio::time::Instant::now() >= deadline {
                bail!("account {address} for {actor} not visible after funding");
            }
            tokio::time::sleep(self.policy.poll_interval.min(Duration::from_secs(1))).await;
        }
        info!(%actor, %address, "account funded");
        Ok(())
    }

    async fn print_balances(&self, asset: &AssetClient<P>, step: &str) -> Result<()> {
        let owner = asset.balance(self.owner.address()).await?;
        let bob = asset.balance(self.bob.address()).await?;
        let charlie = asset.balance(self.charlie.address()).await?;
        let supply = asset.supply().await?;
        println!(
            "[{step}] owner={owner} bob={bob} charlie={charlie} supply={supply}"
        );
        Ok(())
    }

    /// Run the whole scenario: fund, mint, transfer, burn, freeze, the
    /// expected frozen-store rejection, unfreeze, transfer.
    pub async fn run(&self) -> Result<()> {
        let owner_addr = self.owner.address();
        let bob_addr = self.bob.address();
        let charlie_addr = self.charlie.address();
        info!(owner = %owner_addr, bob = %bob_addr, charlie = %charlie_addr, "demo actors");

        self.fund_and_wait("owner", &self.owner).await?;
        self.fund_and_wait("bob", &self.bob).await?;
        self.fund_and_wait("charlie", &self.charlie).await?;

        let asset = AssetClient::discover(self.chain.clone(), owner_addr)
            .await
            .context("resolving asset metadata")?;
        info!(metadata = %asset.metadata(), "asset resolved");

        self.admin_call(managed::mint_call(owner_addr, bob_addr, MINT_AMOUNT))
            .await
            .context("minting to bob")?;
        self.admin_call(managed::mint_call(owner_addr, owner_addr, MINT_AMOUNT))
            .await
            .context("minting to owner")?;
        self.print_balances(&asset, "after mint").await?;

        self.admin_call(managed::admin_transfer_call(
            owner_addr,
            bob_addr,
            charlie_addr,
            MINT_AMOUNT,
        ))
        .await
        .context("owner-initiated transfer bob -> charlie")?;
        self.print_balances(&asset, "after transfer").await?;

        self.admin_call(managed::burn_call(owner_addr, charlie_addr, BURN_AMOUNT))
            .await
            .context("burning from charlie")?;
        self.print_balances(&asset, "after burn").await?;

        self.admin_call(managed::freeze_call(owner_addr, charlie_addr))
            .await
            .context("freezing charlie")?;

        // The one failure the scenario expects: charlie's store is
        // frozen, so his own transfer must be rejected with the frozen
        // reason. Anything else is fatal.
        match asset
            .transfer(&self.charlie, bob_addr, SEND_AMOUNT, &self.policy)
            .await
        {
            Err(e) if e.is_frozen_store_violation() => {
                info!("transfer from frozen account rejected as expected: {e}");
            }
            Ok(hash) => bail!("transfer from frozen account unexpectedly succeeded: {hash}"),
            Err(other) => {
                return Err(anyhow::Error::new(other).context("transfer attempt while frozen"))
            }
        }
        self.print_balances(&asset, "frozen transfer rejected").await?;

        self.admin_call(managed::unfreeze_call(owner_addr, charlie_addr))
            .await
            .context("unfreezing charlie")?;

        asset
            .transfer(&self.charlie, bob_addr, SEND_AMOUNT, &self.policy)
            .await
            .context("transfer charlie -> bob after unfreeze")?;
        self.print_balances(&asset, "final").await?;

        info!("scenario completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset_demo_client::MockProvider;
    use asset_demo_types::AccountAddress;

    fn keypair(seed: u8) -> AccountKeyPair {
        AccountKeyPair::from_seed_bytes(&[seed; 32]).unwrap()
    }

    fn fast_policy() -> ConfirmationPolicy {
        ConfirmationPolicy::default()
            .with_timeout(Duration::from_millis(500))
            .with_poll_interval(Duration::from_millis(5))
    }

    fn demo_flow() -> (DemoFlow<MockProvider, MockProvider>, MockProvider) {
        let owner = keypair(1);
        let metadata = AccountAddress::from_hex_literal("0xfa").unwrap();
        let provider = MockProvider::new(owner.address(), metadata);
        let flow = DemoFlow::with_actors(
            ChainClient::new(provider.clone()),
            provider.clone(),
            owner,
            keypair(2),
            keypair(3),
        )
        .with_policy(fast_policy());
        (flow, provider)
    }

    #[tokio::test]
    async fn full_scenario_reaches_expected_final_balances() {
        let (flow, provider) = demo_flow();
        flow.run().await.unwrap();

        // mint 100 + 100, burn 50, charlie sent 40 to bob after unfreeze
        assert_eq!(provider.balance_of(flow.owner().address()), 100);
        assert_eq!(provider.balance_of(flow.bob().address()), 40);
        assert_eq!(provider.balance_of(flow.charlie().address()), 10);
        assert_eq!(provider.supply(), 150);
        assert!(!provider.is_frozen(flow.charlie().address()));
    }

    #[tokio::test]
    async fn scenario_fails_when_confirmations_never_arrive() {
        let (flow, provider) = demo_flow();
        provider.set_drop_submissions(true);
        assert!(flow.run().await.is_err());
    }
}
