use std::time::Duration;

use form_logging::{form_debug, form_info};
use reqwest::header::CONTENT_TYPE;

use crate::{TransportError, TransportFailureKind};

/// Apps Script web app that appends each submission to the sign-up sheet.
pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbw7Ur-x1-LpVgGF1YoXHYokfHlO35PPBGu6eGw69ypBoUtsyjFZvJx1IrgcNqPC_voK/exec";

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// Upper bound for one submission, converted into a `Timeout` failure.
    pub submit_timeout: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            submit_timeout: Duration::from_secs(30),
        }
    }
}

/// Delivers one JSON body to the submission endpoint.
///
/// `Ok(())` is a dispatch acknowledgement only: the response is opaque and
/// never tells whether the row was actually stored.
#[async_trait::async_trait]
pub trait SubmitGateway: Send + Sync {
    async fn submit(&self, body: &serde_json::Value) -> Result<(), TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    settings: GatewaySettings,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, TransportError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.submit_timeout)
            .build()
            .map_err(|err| TransportError::new(TransportFailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl SubmitGateway for ReqwestGateway {
    async fn submit(&self, body: &serde_json::Value) -> Result<(), TransportError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint).map_err(|err| {
            TransportError::new(TransportFailureKind::InvalidEndpoint, err.to_string())
        })?;
        let bytes = serde_json::to_vec(body).map_err(|err| {
            TransportError::new(TransportFailureKind::Serialization, err.to_string())
        })?;
        let client = self.build_client()?;

        form_info!("POST {} ({} bytes)", endpoint, bytes.len());
        let response = client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(bytes)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // Opaque response: status and body never change the outcome.
        form_debug!("submission answered with {}", response.status());
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(TransportFailureKind::Timeout, err.to_string());
    }
    TransportError::new(TransportFailureKind::Network, err.to_string())
}
