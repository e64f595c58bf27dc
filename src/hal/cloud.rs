//! HTTP transport for the Particle device cloud.
//!
//! Sends each [`DeviceRequest`] as JSON to
//! `<api_base>/<device_id>/<path>`, for example:
//!
//! ```text
//! POST https://api.particle.io/v1/devices/0123abcd/analogwrite?access_token=...
//! Content-Type: application/json
//!
//! {"params":"A2,128"}
//! ```
//!
//! Non-2xx statuses become [`TransportError::Status`] with the response body
//! attached, and bodies that are not a function-response envelope become
//! [`TransportError::Decode`].
//!
//! # Example
//!
//! ```rust,no_run
//! use tinker_io::hal::CloudTransport;
//! use tinker_io::{BoardIo, Config, DeviceConfig, TinkerBoard};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::default().with_device(DeviceConfig::new("0123abcd", "token"));
//! let transport = CloudTransport::new(&config)?;
//! let mut board = TinkerBoard::new(config.device, transport)?;
//!
//! board.digital_write("D7", "HIGH")?.await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use tracing::debug;

use crate::config::Config;
use crate::error::TransportError;
use crate::messages::FunctionResponse;
use crate::traits::{DeviceRequest, DeviceResponse, DeviceTransport};

/// [`DeviceTransport`] backed by a shared `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct CloudTransport {
    client: reqwest::Client,
    base_url: String,
}

impl CloudTransport {
    /// Builds a transport for the device and API base in `config`.
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if config.transport.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.transport.timeout_ms.into()));
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Network(format!("HTTP client init failed: {e}")))?;
        Ok(Self::with_client(client, config))
    }

    /// Uses an existing client, e.g. one shared with other components.
    pub fn with_client(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.device_base_url(),
        }
    }

    /// Per-device base URL (with trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl DeviceTransport for CloudTransport {
    async fn send(&self, request: DeviceRequest) -> Result<DeviceResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(function = %request.function, params = request.params(), "sending");

        let response = self
            .client
            .post(&url)
            .json(&request.entity)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(DeviceResponse {
            status: status.as_u16(),
            entity: FunctionResponse::from_slice(&body)?,
        })
    }
}
