//! Transport abstraction for reaching the device cloud.
//!
//! The board never talks HTTP itself. It builds a [`DeviceRequest`] and hands
//! it to a [`DeviceTransport`], which is responsible for the base URL, the
//! JSON encoding and mapping failures to [`TransportError`].
//!
//! # Endpoints
//!
//! All calls are POSTs relative to the per-device base path:
//!
//! ```text
//! POST digitalwrite?access_token=<token>  {"params": "D7,HIGH"}
//! POST analogwrite?access_token=<token>   {"params": "A2,128"}
//! POST analogread?access_token=<token>    {"params": "A5"}
//! POST digitalread?access_token=<token>   {"params": "D2"}
//! ```

use core::fmt;
use core::future::Future;

use crate::error::TransportError;
use crate::messages::{FunctionCall, FunctionResponse};

// ============================================================================
// Request Types
// ============================================================================

/// Firmware functions exposed by Tinker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TinkerFunction {
    /// Set a digital pin high or low.
    DigitalWrite,
    /// Write a PWM/servo value.
    AnalogWrite,
    /// Read an ADC value.
    AnalogRead,
    /// Read a digital level.
    DigitalRead,
}

impl TinkerFunction {
    /// Endpoint name relative to the device base path.
    pub const fn endpoint(&self) -> &'static str {
        match self {
            TinkerFunction::DigitalWrite => "digitalwrite",
            TinkerFunction::AnalogWrite => "analogwrite",
            TinkerFunction::AnalogRead => "analogread",
            TinkerFunction::DigitalRead => "digitalread",
        }
    }
}

impl fmt::Display for TinkerFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// An outbound request to the device, before transport-specific encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceRequest {
    /// Which firmware function is called.
    pub function: TinkerFunction,
    /// Path relative to the device base, including the token query.
    pub path: String,
    /// JSON body.
    pub entity: FunctionCall,
}

impl DeviceRequest {
    /// Builds a POST for `function` authenticated with `token`.
    pub fn function_call(function: TinkerFunction, token: &str, params: impl Into<String>) -> Self {
        Self {
            function,
            path: format!("{}?access_token={}", function.endpoint(), token),
            entity: FunctionCall::new(params),
        }
    }

    /// The `params` string carried in the body.
    pub fn params(&self) -> &str {
        &self.entity.params
    }
}

/// A successful response from the device cloud.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceResponse {
    /// HTTP status code (2xx).
    pub status: u16,
    /// Decoded response envelope.
    pub entity: FunctionResponse,
}

impl DeviceResponse {
    /// Creates a 200 response with the given envelope.
    pub fn ok(entity: FunctionResponse) -> Self {
        Self {
            status: 200,
            entity,
        }
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Sends device requests and returns the decoded response.
///
/// Implementations must turn non-2xx statuses and undecodable bodies into
/// errors so the board only ever sees successful responses as `Ok`. The
/// board shares one transport between dispatch tasks, hence the
/// `Send + Sync + 'static` bound.
///
/// # Example
///
/// ```rust
/// use tinker_io::hal::MockTransport;
/// use tinker_io::traits::{DeviceRequest, DeviceTransport, TinkerFunction};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let transport = MockTransport::new();
/// let request = DeviceRequest::function_call(TinkerFunction::AnalogRead, "token", "A0");
/// let response = transport.send(request).await.unwrap();
/// assert_eq!(response.status, 200);
/// # });
/// ```
pub trait DeviceTransport: Send + Sync + 'static {
    /// Sends one request.
    fn send(
        &self,
        request: DeviceRequest,
    ) -> impl Future<Output = Result<DeviceResponse, TransportError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_call_path_carries_token() {
        let req = DeviceRequest::function_call(TinkerFunction::DigitalWrite, "abc123", "D3,HIGH");
        assert_eq!(req.path, "digitalwrite?access_token=abc123");
        assert_eq!(req.params(), "D3,HIGH");
    }

    #[test]
    fn endpoints() {
        assert_eq!(TinkerFunction::DigitalWrite.endpoint(), "digitalwrite");
        assert_eq!(TinkerFunction::AnalogWrite.endpoint(), "analogwrite");
        assert_eq!(TinkerFunction::AnalogRead.endpoint(), "analogread");
        assert_eq!(TinkerFunction::DigitalRead.to_string(), "digitalread");
    }
}
