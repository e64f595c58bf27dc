//! Error types for pin validation and device requests.
//!
//! Validation errors ([`TinkerError::InvalidPin`], [`TinkerError::UnsupportedMode`],
//! [`TinkerError::InvalidMode`], [`TinkerError::InvalidValue`]) are raised
//! synchronously, before any state is touched or any request is sent.
//! Transport errors happen later, inside the dispatch task, and are always
//! logged; they only reach callers that await the returned handle.

use thiserror::Error;

use crate::pins::PinMode;

/// Errors raised by board operations.
#[derive(Error, Debug)]
pub enum TinkerError {
    /// Pin reference does not resolve to an addressable slot.
    #[error("invalid pin reference: {0}")]
    InvalidPin(String),

    /// The pin exists but cannot operate in the requested mode.
    #[error("unsupported pin mode: {mode} for {pin}")]
    UnsupportedMode {
        /// Pin name, e.g. `"D4"`.
        pin: String,
        /// Requested mode.
        mode: PinMode,
    },

    /// A mode value outside `0..=4` or an unknown mode name.
    #[error("unknown pin mode: {0}")]
    InvalidMode(String),

    /// Analog write value that does not start with a base-10 integer.
    #[error("analog value is not an integer: {0:?}")]
    InvalidValue(String),

    /// The device request failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The dispatch task ended without producing a result.
    #[error("request task did not complete: {0}")]
    Dispatch(String),
}

/// Failures reported by a [`DeviceTransport`](crate::traits::DeviceTransport).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection, DNS, TLS or timeout failure.
    #[error("network error: {0}")]
    Network(String),

    /// The cloud answered with a non-2xx status.
    #[error("device API returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, useful for the cloud's error description.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("malformed response: {0}")]
    Decode(String),

    /// A read succeeded but carried no `return_value`.
    #[error("response has no return_value")]
    MissingReturnValue,
}
