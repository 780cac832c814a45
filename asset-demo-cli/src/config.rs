// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use asset_demo_types::AccountAddress;
use std::path::PathBuf;

pub const NODE_URL_ENV: &str = "NODE_URL";
pub const FAUCET_URL_ENV: &str = "FAUCET_URL";
pub const OWNER_ADDRESS_ENV: &str = "OWNER_ADDRESS";
pub const OWNER_KEY_FILE_ENV: &str = "OWNER_KEY_FILE";

pub const DEFAULT_NODE_URL: &str = "http://127.0.0.1:9850";
pub const DEFAULT_FAUCET_URL: &str = "http://127.0.0.1:9851";
pub const DEFAULT_OWNER_KEY_FILE: &str = "owner.key";

/// Demo configuration. Environment variables are the only configuration
/// surface: `NODE_URL`, `FAUCET_URL`, `OWNER_ADDRESS`, `OWNER_KEY_FILE`.
#[derive(Clone, Debug)]
pub struct DemoConfig {
    pub node_url: String,
    pub faucet_url: String,
    /// Expected owner address; checked against the key file when set.
    pub owner_address: Option<AccountAddress>,
    pub owner_key_file: PathBuf,
}

impl DemoConfig {
    pub fn from_env() -> Result<Self> {
        let node_url =
            std::env::var(NODE_URL_ENV).unwrap_or_else(|_| DEFAULT_NODE_URL.to_string());
        let faucet_url =
            std::env::var(FAUCET_URL_ENV).unwrap_or_else(|_| DEFAULT_FAUCET_URL.to_string());
        let owner_address = match std::env::var(OWNER_ADDRESS_ENV) {
            Ok(literal) => Some(
                AccountAddress::from_hex_literal(literal.trim())
                    .with_context(|| format!("invalid {OWNER_ADDRESS_ENV}: {literal:?}"))?,
            ),
            Err(_) => None,
        };
        let owner_key_file = std::env::var(OWNER_KEY_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OWNER_KEY_FILE));

        Ok(Self {
            node_url,
            faucet_url,
            owner_address,
            owner_key_file,
        })
    }
}
