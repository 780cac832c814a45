// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

use asset_demo_types::AccountAddress;
use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum FaucetError {
    #[error("faucet transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("faucet rejected request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// The funding service, consumed through its HTTP contract only. The
/// mock provider implements this too so scenario tests run without one.
#[async_trait]
pub trait Faucet: Send + Sync {
    async fn fund(&self, address: AccountAddress, amount: u64) -> Result<(), FaucetError>;
}

/// HTTP client for the test-network faucet.
#[derive(Clone, Debug)]
pub struct FaucetClient {
    http_client: reqwest::Client,
    faucet_url: String,
}

impl FaucetClient {
    pub fn new(faucet_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            faucet_url: faucet_url.into(),
        }
    }
}

#[async_trait]
impl Faucet for FaucetClient {
    async fn fund(&self, address: AccountAddress, amount: u64) -> Result<(), FaucetError> {
        let url = format!("{}/fund", self.faucet_url.trim_end_matches('/'));
        let response = self
            .http_client
            .post(&url)
            .json(&json!({
                "address": address.to_hex_literal(),
                "amount": amount,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FaucetError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        debug!(%address, amount, "faucet funding accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn posts_address_and_amount() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/fund"))
            .and(body_json(json!({"address": "0xb0b", "amount": 1000})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = FaucetClient::new(server.uri());
        client
            .fund(AccountAddress::from_hex_literal("0xb0b").unwrap(), 1000)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = FaucetClient::new(server.uri());
        let err = client
            .fund(AccountAddress::ONE, 1000)
            .await
            .expect_err("rate limited");
        match err {
            FaucetError::Rejected { status, message } => {
                assert_eq!(status, 429);
                assert!(message.contains("rate limited"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
