use crate::domain::model::{Credential, DispatchReceipt, DispatchRequest};
use crate::domain::ports::Notifier;
use crate::utils::error::{LocatorError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// 以 HTTP POST 通知調度端點
pub struct HttpDispatchClient {
    client: Client,
    endpoint: String,
}

impl HttpDispatchClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_DISPATCH_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Notifier for HttpDispatchClient {
    async fn notify(
        &self,
        credential: &Credential,
        request: &DispatchRequest,
    ) -> Result<DispatchReceipt> {
        tracing::debug!("POST {} for {}", self.endpoint, request.phone_number);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(credential.token())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("Dispatch response status: {}", status);

        if status.is_success() {
            Ok(DispatchReceipt {
                status: status.as_u16(),
                body,
            })
        } else if status == StatusCode::UNAUTHORIZED {
            Err(LocatorError::TokenExpired)
        } else {
            Err(LocatorError::DispatchFailed {
                status: status.as_u16(),
                message: body,
            })
        }
    }
}
