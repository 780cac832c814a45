// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::{ensure, Context, Result};
use asset_demo_cli::{Args, DemoCommand, DemoConfig, DemoFlow};
use asset_demo_client::{ChainClient, FaucetClient, JsonRpcProvider};
use asset_demo_keys::keygen::generate_account_key_and_write_to_file;
use asset_demo_keys::keypair_file::read_account_keypair;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match args.command {
        Some(DemoCommand::GenerateKey { path }) => {
            generate_account_key_and_write_to_file(&path)?;
        }
        None => {
            let config = DemoConfig::from_env()?;
            let owner = read_account_keypair(&config.owner_key_file).with_context(|| {
                format!(
                    "reading owner key from {:?}; run `asset-demo generate-key --path {:?}` first",
                    config.owner_key_file, config.owner_key_file
                )
            })?;
            if let Some(expected) = config.owner_address {
                ensure!(
                    expected == owner.address(),
                    "OWNER_ADDRESS {} does not match the key file's address {}",
                    expected,
                    owner.address()
                );
            }

            let chain = ChainClient::new(JsonRpcProvider::new(&config.node_url));
            let faucet = FaucetClient::new(&config.faucet_url);
            tracing::info!(node_url = %config.node_url, faucet_url = %config.faucet_url, "starting demo");
            DemoFlow::new(chain, faucet, owner).run().await?;
        }
    }
    Ok(())
}
