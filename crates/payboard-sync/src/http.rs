//! HTTP transport over reqwest.

use async_trait::async_trait;
use payboard_core::{PaymentRecord, User};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::error::{Result, SyncError};
use crate::messages::{DataEnvelope, OneOrMany};
use crate::transport::Transport;

/// Transport that talks JSON to the payment and user endpoints.
pub struct HttpTransport {
    http_client: HttpClient,
    payment_url: String,
    user_url: String,
}

impl HttpTransport {
    /// Create a transport for the given endpoints.
    pub fn new(payment_url: impl Into<String>, user_url: impl Into<String>) -> Self {
        Self::with_client(HttpClient::new(), payment_url, user_url)
    }

    /// Create a transport that reuses an existing client.
    pub fn with_client(
        http_client: HttpClient,
        payment_url: impl Into<String>,
        user_url: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            payment_url: payment_url.into(),
            user_url: user_url.into(),
        }
    }

    pub fn payment_url(&self) -> &str {
        &self.payment_url
    }

    pub fn user_url(&self) -> &str {
        &self.user_url
    }

    /// GET `url` and unwrap its `data` envelope.
    async fn get_data<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| SyncError::Transport(format!("GET {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let envelope: DataEnvelope<T> = response
            .json()
            .await
            .map_err(|e| SyncError::Decode(format!("GET {}: {}", url, e)))?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_payments(&self) -> Result<Vec<PaymentRecord>> {
        let data: OneOrMany<PaymentRecord> = self.get_data(&self.payment_url).await?;
        Ok(data.into_vec())
    }

    async fn fetch_users(&self) -> Result<Vec<User>> {
        self.get_data(&self.user_url).await
    }

    async fn create_payment(&self, record: &PaymentRecord) -> Result<u16> {
        let response = self
            .http_client
            .post(&self.payment_url)
            .json(record)
            .send()
            .await
            .map_err(|e| SyncError::Transport(format!("POST {}: {}", self.payment_url, e)))?;

        Ok(response.status().as_u16())
    }
}
