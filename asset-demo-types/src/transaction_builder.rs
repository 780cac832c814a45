// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::account_address::AccountAddress;
use crate::error::TypeError;
use crate::move_value::MoveValue;
use crate::transaction::{ChainId, EntryFunction, RawTransaction};
use crate::type_tag::{FunctionId, TypeTag};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default gas configuration for demo transactions.
#[derive(Clone, Copy, Debug)]
pub struct GasConfig {
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            max_gas_amount: 10_000_000,
            gas_unit_price: 1,
        }
    }
}

/// Builder for entry-function transactions.
///
/// Each call to [`build_entry_function`](Self::build_entry_function)
/// produces a fresh, immutable [`RawTransaction`] stamped with the
/// builder's sequence number and an expiration window from the current
/// wall clock.
pub struct TransactionBuilder {
    sender: AccountAddress,
    sequence_number: u64,
    chain_id: ChainId,
    gas_config: GasConfig,
    expiration_secs: u64,
}

impl TransactionBuilder {
    pub fn new(sender: AccountAddress, sequence_number: u64, chain_id: ChainId) -> Self {
        Self {
            sender,
            sequence_number,
            chain_id,
            gas_config: GasConfig::default(),
            // 1 hour default
            expiration_secs: 3600,
        }
    }

    pub fn with_gas(mut self, max_gas_amount: u64, gas_unit_price: u64) -> Self {
        self.gas_config = GasConfig {
            max_gas_amount,
            gas_unit_price,
        };
        self
    }

    pub fn with_expiration(mut self, expiration_secs: u64) -> Self {
        self.expiration_secs = expiration_secs;
        self
    }

    pub fn build_entry_function(
        &self,
        function: FunctionId,
        ty_args: Vec<TypeTag>,
        args: Vec<MoveValue>,
    ) -> Result<RawTransaction, TypeError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| TypeError::ArgumentEncoding(e.to_string()))?
            .as_secs();

        let encoded_args = args
            .iter()
            .map(MoveValue::to_bcs_bytes)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RawTransaction::new(
            self.sender,
            self.sequence_number,
            EntryFunction::new(function, ty_args, encoded_args),
            self.gas_config.max_gas_amount,
            self.gas_config.gas_unit_price,
            now + self.expiration_secs,
            self.chain_id,
        ))
    }
}
