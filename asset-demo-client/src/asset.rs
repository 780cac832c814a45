// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

//! Read-side and end-user operations on one fungible asset.
//!
//! Everything here is self-authorized or read-only; the admin surface
//! (mint, burn, freeze) goes through [`crate::managed`] with the issuing
//! account's signature.

use crate::chain_client::{ChainClient, ChainProvider, ConfirmationPolicy};
use crate::error::{Error, Result};
use crate::managed;
use crate::rpc::RpcError;
use crate::views::JsonValueExt;
use asset_demo_types::{AccountAddress, AccountKeyPair};

/// Balance lookups and holder-initiated transfers for the asset at
/// `metadata`. Thin layer over [`ChainClient`]; holds no state of its
/// own.
#[derive(Clone)]
pub struct AssetClient<P> {
    chain: ChainClient<P>,
    metadata: AccountAddress,
}

impl<P> AssetClient<P>
where
    P: ChainProvider + Clone,
{
    pub fn new(chain: ChainClient<P>, metadata: AccountAddress) -> Self {
        Self { chain, metadata }
    }

    /// Resolve the asset's metadata address from the issuing account's
    /// `get_metadata` view and bind a client to it.
    pub async fn discover(chain: ChainClient<P>, admin: AccountAddress) -> Result<Self> {
        let (function, args) = managed::get_metadata_call(admin);
        let values = chain.call_view(&function, &[], &args).await?;
        let literal = values
            .first()
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                Error::Rpc(RpcError::InvalidResponse(format!(
                    "get_metadata returned {values:?}"
                )))
            })?;
        let metadata = AccountAddress::from_hex_literal(literal)
            .map_err(|e| Error::Rpc(RpcError::InvalidResponse(e.to_string())))?;
        Ok(Self::new(chain, metadata))
    }

    pub fn metadata(&self) -> AccountAddress {
        self.metadata
    }

    pub fn chain(&self) -> &ChainClient<P> {
        &self.chain
    }

    /// Current holdings of `holder`. An account with no holdings record
    /// yet reads as 0; this never errors for a valid holder.
    pub async fn balance(&self, holder: AccountAddress) -> Result<u64> {
        let (function, args) = managed::balance_call(holder, self.metadata);
        let values = self.chain.call_view(&function, &[], &args).await?;
        values
            .first()
            .and_then(|v| v.as_u64_flex())
            .ok_or_else(|| {
                Error::Rpc(RpcError::InvalidResponse(format!(
                    "balance returned {values:?}"
                )))
            })
    }

    /// Total minted supply of the asset.
    pub async fn supply(&self) -> Result<u64> {
        let (function, args) = managed::supply_call(self.metadata);
        let values = self.chain.call_view(&function, &[], &args).await?;
        values
            .first()
            .and_then(|v| v.as_u64_flex())
            .ok_or_else(|| {
                Error::Rpc(RpcError::InvalidResponse(format!(
                    "supply returned {values:?}"
                )))
            })
    }

    /// Holder-initiated transfer out of the holder's own store. Requires
    /// sufficient balance and an unfrozen store; policy violations
    /// surface from the confirmed receipt as
    /// [`Error::ExecutionFailed`].
    pub async fn transfer(
        &self,
        holder: &AccountKeyPair,
        to: AccountAddress,
        amount: u64,
        policy: &ConfirmationPolicy,
    ) -> Result<String> {
        let (function, args) = managed::store_transfer_call(self.metadata, to, amount);
        let raw = self
            .chain
            .build_entry_function(holder.address(), function, vec![], args)
            .await?;
        let receipt = self.chain.submit_and_wait(holder, raw, policy).await?;
        Ok(receipt.hash)
    }
}
