use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::app::ports::BenefitsSource;
use crate::config::SourceConfig;
use crate::error::{BenefitsError, Result};

/// Live HMRC source over reqwest
pub struct ReqwestSource {
    client: reqwest::Client,
    url: String,
}

impl ReqwestSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            url: config.api_url.clone(),
        })
    }
}

#[async_trait]
impl BenefitsSource for ReqwestSource {
    fn endpoint(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_payload(&self) -> Result<Value> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BenefitsError::Api {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "Received benefits payload");

        Ok(serde_json::from_slice(&bytes)?)
    }
}
