//! Device and transport configuration.
//!
//! Uses `heapless::String` for bounded, allocation-free storage of the
//! device id, access token and API base. Over-long values are truncated on a
//! UTF-8 boundary rather than rejected; the device id and token are not
//! validated locally, a bad value only shows up as a transport failure.
//!
//! # Example
//!
//! ```rust
//! use tinker_io::config::{Config, DeviceConfig, TransportConfig};
//!
//! let config = Config::default()
//!     .with_device(DeviceConfig::new("0123456789abcdef", "secret"))
//!     .with_transport(TransportConfig::default().with_timeout_ms(5_000));
//!
//! assert_eq!(
//!     config.device_base_url(),
//!     "https://api.particle.io/v1/devices/0123456789abcdef/"
//! );
//! ```

use heapless::String as HString;
use serde::{Deserialize, Serialize};

/// Maximum length for short config strings (device ids)
pub const MAX_SHORT_STRING: usize = 64;

/// Maximum length for longer config strings (tokens, URLs)
pub const MAX_LONG_STRING: usize = 128;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Type alias for longer config strings
pub type LongString = HString<MAX_LONG_STRING>;

/// Default Particle cloud device API.
pub const DEFAULT_API_BASE: &str = "https://api.particle.io/v1/devices";

// ============================================================================
// Helper for creating heapless strings
// ============================================================================

fn bounded<const N: usize>(s: &str) -> HString<N> {
    let mut hs = HString::new();
    let valid_end = s
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|end| *end <= N)
        .last()
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    bounded(s)
}

/// Create a LongString from a &str, truncating if too long
pub fn long_string(s: &str) -> LongString {
    bounded(s)
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete configuration: which device, and how to reach it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Device identification and credentials
    pub device: DeviceConfig,
    /// HTTP transport settings
    #[serde(default)]
    pub transport: TransportConfig,
}

impl Config {
    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }

    /// Set transport configuration
    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Base URL for the configured device, with trailing slash.
    pub fn device_base_url(&self) -> String {
        format!(
            "{}/{}/",
            self.transport.api_base.trim_end_matches('/'),
            self.device.device_id
        )
    }

    /// Parse a configuration from JSON.
    ///
    /// ```
    /// use tinker_io::Config;
    ///
    /// let config = Config::from_json(r#"{"device": {"device_id": "abc", "access_token": "tok"}}"#).unwrap();
    /// assert_eq!(config.device.device_id.as_str(), "abc");
    /// assert_eq!(config.transport.timeout_ms, 10_000);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Which device to drive and the token authorizing it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Cloud device id
    pub device_id: ShortString,
    /// Access token sent as the `access_token` query parameter
    pub access_token: LongString,
}

impl DeviceConfig {
    /// Create a device config from id and token
    pub fn new(device_id: &str, access_token: &str) -> Self {
        Self {
            device_id: short_string(device_id),
            access_token: long_string(access_token),
        }
    }

    /// Set the device id
    pub fn with_device_id(mut self, id: &str) -> Self {
        self.device_id = short_string(id);
        self
    }

    /// Set the access token
    pub fn with_access_token(mut self, token: &str) -> Self {
        self.access_token = long_string(token);
        self
    }
}

// ============================================================================
// Transport Config
// ============================================================================

/// HTTP transport settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Device API base, without the device id
    pub api_base: LongString,
    /// Whole-request timeout in milliseconds (0 = no timeout)
    pub timeout_ms: u32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            api_base: long_string(DEFAULT_API_BASE),
            timeout_ms: 10_000,
        }
    }
}

impl TransportConfig {
    /// Set the API base (useful for proxies and test servers)
    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = long_string(base);
        self
    }

    /// Set the request timeout
    pub fn with_timeout_ms(mut self, ms: u32) -> Self {
        self.timeout_ms = ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transport() {
        let config = TransportConfig::default();
        assert_eq!(config.api_base.as_str(), DEFAULT_API_BASE);
        assert_eq!(config.timeout_ms, 10_000);
    }

    #[test]
    fn builders() {
        let config = Config::default()
            .with_device(DeviceConfig::default().with_device_id("dev").with_access_token("tok"))
            .with_transport(
                TransportConfig::default()
                    .with_api_base("http://127.0.0.1:9000/v1/devices/")
                    .with_timeout_ms(0),
            );
        assert_eq!(config.device.access_token.as_str(), "tok");
        assert_eq!(config.transport.timeout_ms, 0);
        // Trailing slash on the base is not doubled
        assert_eq!(config.device_base_url(), "http://127.0.0.1:9000/v1/devices/dev/");
    }

    #[test]
    fn short_string_truncates() {
        let long = "x".repeat(100);
        assert_eq!(short_string(&long).len(), MAX_SHORT_STRING);
    }

    #[test]
    fn truncation_respects_utf8_boundary() {
        // 63 ASCII bytes + a 2-byte char would be 65 bytes
        let s = format!("{}é", "a".repeat(63));
        let hs = short_string(&s);
        assert_eq!(hs.len(), 63);
    }

    #[test]
    fn json_round_trip_keeps_fields() {
        let config = Config::default().with_device(DeviceConfig::new("abc", "tok"));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(Config::from_json(&json).unwrap(), config);
    }

    #[test]
    fn json_missing_device_fails() {
        assert!(Config::from_json("{}").is_err());
    }
}
