//! Coercion of caller-supplied write values.
//!
//! Digital writes accept loose "truthy" input: `1`, `"1"`, `"HIGH"` and
//! `"ON"` mean high, everything else is low. Analog writes take an integer,
//! either directly or as text whose leading characters form a base-10
//! integer (`"128"`, `" 42px"`). Text with no leading integer is rejected.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TinkerError;

// ============================================================================
// Digital Level
// ============================================================================

/// Logic level of a digital pin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// Logic low (0).
    #[default]
    Low = 0,
    /// Logic high (1).
    High = 1,
}

impl Level {
    /// Wire keyword (`"HIGH"` / `"LOW"`).
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "LOW",
            Level::High => "HIGH",
        }
    }

    /// Numeric shadow value (0 or 1).
    #[inline]
    pub const fn as_value(&self) -> i32 {
        *self as i32
    }

    /// Interprets a textual level. Only `"1"`, `"HIGH"` and `"ON"` are high.
    ///
    /// ```
    /// use tinker_io::Level;
    ///
    /// assert_eq!(Level::from_text("HIGH"), Level::High);
    /// assert_eq!(Level::from_text("ON"), Level::High);
    /// assert_eq!(Level::from_text("high"), Level::Low);
    /// assert_eq!(Level::from_text("0"), Level::Low);
    /// ```
    pub fn from_text(s: &str) -> Self {
        match s {
            "1" | "HIGH" | "ON" => Level::High,
            _ => Level::Low,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<u8> for Level {
    fn from(n: u8) -> Self {
        (n == 1).into()
    }
}

impl From<i32> for Level {
    fn from(n: i32) -> Self {
        (n == 1).into()
    }
}

impl From<&str> for Level {
    fn from(s: &str) -> Self {
        Level::from_text(s)
    }
}

impl From<String> for Level {
    fn from(s: String) -> Self {
        Level::from_text(&s)
    }
}

// ============================================================================
// Analog Value
// ============================================================================

/// Raw analog/servo write value before integer coercion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnalogValue {
    /// Already an integer.
    Int(i64),
    /// Text to be parsed as a leading base-10 integer.
    Text(String),
}

impl AnalogValue {
    /// Coerces the value to the integer sent on the wire.
    ///
    /// ```
    /// use tinker_io::AnalogValue;
    ///
    /// assert_eq!(AnalogValue::from("128").to_int().unwrap(), 128);
    /// assert_eq!(AnalogValue::from("12.7").to_int().unwrap(), 12);
    /// assert!(AnalogValue::from("bright").to_int().is_err());
    /// ```
    pub fn to_int(&self) -> Result<i32, TinkerError> {
        let wide = match self {
            AnalogValue::Int(n) => Some(*n),
            AnalogValue::Text(s) => parse_leading_int(s),
        };
        wide.and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| TinkerError::InvalidValue(self.to_string()))
    }
}

impl fmt::Display for AnalogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalogValue::Int(n) => write!(f, "{n}"),
            AnalogValue::Text(s) => f.write_str(s),
        }
    }
}

macro_rules! analog_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AnalogValue {
                fn from(n: $t) -> Self {
                    AnalogValue::Int(n.into())
                }
            }
        )*
    };
}

analog_from_int!(u8, u16, u32, i8, i16, i32, i64);

impl From<&str> for AnalogValue {
    fn from(s: &str) -> Self {
        AnalogValue::Text(s.to_string())
    }
}

impl From<String> for AnalogValue {
    fn from(s: String) -> Self {
        AnalogValue::Text(s)
    }
}

/// Parses the longest leading base-10 integer of `s`.
///
/// Leading whitespace and one sign character are accepted; parsing stops at
/// the first non-digit. Returns `None` if no digit follows.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
