//! Wire bodies exchanged with the device cloud.
//!
//! Every Tinker function is called with a single `params` string and
//! answers with a small JSON envelope:
//!
//! ```json
//! // request
//! {"params": "D7,HIGH"}
//!
//! // response
//! {"id": "0123456789abcdef", "last_app": "", "connected": true, "return_value": 1}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// Request body for a Tinker function call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Comma-separated argument string, e.g. `"A2,128"`.
    pub params: String,
}

impl FunctionCall {
    /// Creates a call with the given params string.
    pub fn new(params: impl Into<String>) -> Self {
        Self {
            params: params.into(),
        }
    }
}

/// Response envelope returned by the cloud for a function call.
///
/// Only `return_value` is used; the rest is kept for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionResponse {
    /// Device id.
    #[serde(default)]
    pub id: Option<String>,
    /// Device name.
    #[serde(default)]
    pub name: Option<String>,
    /// Firmware reported by the device.
    #[serde(default)]
    pub last_app: Option<String>,
    /// Whether the cloud considers the device online.
    #[serde(default)]
    pub connected: Option<bool>,
    /// Integer returned by the firmware function.
    #[serde(default)]
    pub return_value: Option<i32>,
}

impl FunctionResponse {
    /// Creates a response carrying only a return value.
    pub fn with_return_value(value: i32) -> Self {
        Self {
            return_value: Some(value),
            ..Self::default()
        }
    }

    /// Returns the function's return value or [`TransportError::MissingReturnValue`].
    pub fn return_value(&self) -> Result<i32, TransportError> {
        self.return_value.ok_or(TransportError::MissingReturnValue)
    }

    /// Decodes a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, TransportError> {
        serde_json::from_slice(body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}
