// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

//! The demo binary's command surface and the scenario orchestrator.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod config;
pub mod scenario;

pub use config::DemoConfig;
pub use scenario::DemoFlow;

#[derive(Parser)]
#[command(
    name = "asset-demo",
    about = "Exercise a managed fungible asset on a test network: \
             fund, mint, transfer, burn, freeze, unfreeze",
    version
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<DemoCommand>,
}

#[derive(Subcommand)]
pub enum DemoCommand {
    /// Generate an owner key file for the demo.
    GenerateKey {
        /// Where to write the hex-encoded key.
        #[arg(long)]
        path: PathBuf,
    },
}
