use reqwest::{Client, Url};
use tracing::{debug, instrument};

use super::{SignupTransport, TransportReceipt};
use crate::config::SignupConfig;
use crate::domain::SignupPayload;
use crate::error::{SignupError, TransportError};

/// `POST`s the payload as JSON with reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(config: &SignupConfig) -> Result<Self, SignupError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| SignupError::Config(format!("endpoint {:?}: {}", config.endpoint, e)))?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SignupError::Config(e.to_string()))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl SignupTransport for HttpTransport {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn submit(&self, payload: SignupPayload) -> Result<TransportReceipt, TransportError> {
        debug!("Sending signup request");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let body = response.text().await.map_err(classify)?;

        if status.is_success() {
            Ok(TransportReceipt { status: status.as_u16(), body })
        } else {
            Err(TransportError::Status { status: status.as_u16(), body })
        }
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err.to_string())
    }
}
