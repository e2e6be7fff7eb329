use std::time::Duration;

use async_trait::async_trait;
use chat_core::WidgetConfig;
use reqwest::Client;

use crate::error::{AnswerError, Result};
use crate::models::AnswerPayload;

#[async_trait]
pub trait AnswerClient: Send + Sync {
    /// Ask a single question and return the answer text.
    async fn ask(&self, question: &str) -> Result<String>;
}

pub struct HttpAnswerClient {
    client: Client,
    endpoint: String,
}

impl HttpAnswerClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &WidgetConfig) -> Result<Self> {
        Self::new(config.endpoint.clone(), config.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnswerClient for HttpAnswerClient {
    async fn ask(&self, question: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("question", question)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AnswerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: AnswerPayload = serde_json::from_str(&body)?;
        if let Some(timing) = payload.timing {
            log::debug!(
                "answer timing: preprocess={}s generation={}s total={}s",
                timing.preprocess,
                timing.generation,
                timing.total
            );
        }

        Ok(payload.answer)
    }
}
