//! Static pin capability table and per-pin shadow state.
//!
//! The Tinker pinout exposes 18 logical slots addressed by a flat index:
//!
//! | Flat index | Pins | Notes |
//! |------------|------|-------|
//! | 0..=7 | `D0`..`D7` | Digital |
//! | 8..=9 | - | Reserved, never addressable |
//! | 10..=17 | `A0`..`A7` | Analog (offset by 10) |
//!
//! Each slot declares the [`PinMode`]s it supports. The table is fixed at
//! the hardware level and is never mutated at runtime; the mutable part of
//! a pin lives in [`PinState`].
//!
//! # Example
//!
//! ```rust
//! use tinker_io::pins::{PinMode, PIN_TABLE};
//!
//! let d4 = &PIN_TABLE[4];
//! assert_eq!(d4.name, "D4");
//! assert!(d4.supports(PinMode::Output));
//! assert!(!d4.supports(PinMode::Pwm));
//! ```

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TinkerError;

/// Number of logical pin slots, including the two reserved ones.
pub const PIN_COUNT: usize = 18;

/// Flat-index offset applied to analog pins (`A0` lives at slot 10).
pub const ANALOG_OFFSET: usize = 10;

// ============================================================================
// Pin Modes
// ============================================================================

/// Operating mode of a pin.
///
/// Discriminants match the numeric mode values used by Johnny-Five style
/// IO plugins, so a mode can be round-tripped through its integer form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PinMode {
    /// Digital input.
    Input = 0,
    /// Digital output.
    Output = 1,
    /// Analog input (ADC).
    Analog = 2,
    /// PWM output, written through `analogwrite`.
    Pwm = 3,
    /// Servo output, written through `analogwrite`.
    Servo = 4,
}

impl PinMode {
    /// All modes in discriminant order.
    pub const ALL: [PinMode; 5] = [
        PinMode::Input,
        PinMode::Output,
        PinMode::Analog,
        PinMode::Pwm,
        PinMode::Servo,
    ];

    /// Returns the upper-case mode name used in error messages.
    ///
    /// ```
    /// use tinker_io::PinMode;
    ///
    /// assert_eq!(PinMode::Pwm.as_str(), "PWM");
    /// assert_eq!(PinMode::Servo.as_str(), "SERVO");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            PinMode::Input => "INPUT",
            PinMode::Output => "OUTPUT",
            PinMode::Analog => "ANALOG",
            PinMode::Pwm => "PWM",
            PinMode::Servo => "SERVO",
        }
    }

    /// Mode used on the wire when writing to a pin in this mode.
    ///
    /// PWM is presented to callers as its own mode but the device drives it
    /// as an output, so writes treat it as [`PinMode::Output`].
    #[inline]
    pub const fn transport_mode(&self) -> PinMode {
        match self {
            PinMode::Pwm => PinMode::Output,
            other => *other,
        }
    }

    /// Returns the numeric mode value.
    #[inline]
    pub const fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for PinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for PinMode {
    type Error = TinkerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PinMode::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| TinkerError::InvalidMode(value.to_string()))
    }
}

impl TryFrom<i64> for PinMode {
    type Error = TinkerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| TinkerError::InvalidMode(value.to_string()))
            .and_then(PinMode::try_from)
    }
}

impl FromStr for PinMode {
    type Err = TinkerError;

    /// Parses a mode from its name (`"pwm"`, `"SERVO"`) or numeric form (`"3"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return PinMode::try_from(n);
        }
        PinMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TinkerError::InvalidMode(s.to_string()))
    }
}

// ============================================================================
// Pin Table
// ============================================================================

/// Static description of one pin slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinSpec {
    /// Pin name as sent on the wire (`"D3"`, `"A2"`); empty for reserved slots.
    pub name: &'static str,
    /// Modes the physical pin supports.
    pub supported_modes: &'static [PinMode],
}

impl PinSpec {
    const fn new(name: &'static str, supported_modes: &'static [PinMode]) -> Self {
        Self {
            name,
            supported_modes,
        }
    }

    /// Returns `true` if the pin supports `mode`.
    #[inline]
    pub fn supports(&self, mode: PinMode) -> bool {
        self.supported_modes.contains(&mode)
    }

    /// Reserved slots have no name and no capabilities.
    #[inline]
    pub fn is_reserved(&self) -> bool {
        self.name.is_empty() || self.supported_modes.is_empty()
    }
}

use PinMode::{Analog, Input, Output, Pwm, Servo};

const DIGITAL_PWM: &[PinMode] = &[Input, Output, Pwm, Servo];
const DIGITAL_ONLY: &[PinMode] = &[Input, Output];
const ANALOG_FULL: &[PinMode] = &[Input, Output, Analog, Pwm, Servo];
const ANALOG_ONLY: &[PinMode] = &[Input, Output, Analog];
const RESERVED: &[PinMode] = &[];

/// Capability table for every slot, indexed by flat index.
///
/// Hardware PWM is available on D0-D3, A0, A1 and A4-A7.
pub static PIN_TABLE: [PinSpec; PIN_COUNT] = [
    PinSpec::new("D0", DIGITAL_PWM),
    PinSpec::new("D1", DIGITAL_PWM),
    PinSpec::new("D2", DIGITAL_PWM),
    PinSpec::new("D3", DIGITAL_PWM),
    PinSpec::new("D4", DIGITAL_ONLY),
    PinSpec::new("D5", DIGITAL_ONLY),
    PinSpec::new("D6", DIGITAL_ONLY),
    PinSpec::new("D7", DIGITAL_ONLY),
    PinSpec::new("", RESERVED),
    PinSpec::new("", RESERVED),
    PinSpec::new("A0", ANALOG_FULL),
    PinSpec::new("A1", ANALOG_FULL),
    PinSpec::new("A2", ANALOG_ONLY),
    PinSpec::new("A3", ANALOG_ONLY),
    PinSpec::new("A4", ANALOG_FULL),
    PinSpec::new("A5", ANALOG_FULL),
    PinSpec::new("A6", ANALOG_FULL),
    PinSpec::new("A7", ANALOG_FULL),
];

/// Looks up a capability-bearing slot by flat index.
///
/// Fails with [`TinkerError::InvalidPin`] for indices past the table or for
/// the reserved slots.
pub fn slot(index: usize) -> Result<&'static PinSpec, TinkerError> {
    PIN_TABLE
        .get(index)
        .filter(|spec| !spec.is_reserved())
        .ok_or_else(|| TinkerError::InvalidPin(format!("slot {index}")))
}

/// Flat indices of the analog pins (`A0`..`A7`).
pub fn analog_pin_indices() -> Vec<usize> {
    (ANALOG_OFFSET..PIN_COUNT).collect()
}

// ============================================================================
// Pin State
// ============================================================================

/// Mutable shadow state for one slot.
///
/// `mode` is always one of `supported_modes`; [`PinState::set_mode`] is the
/// only way to change it and rejects anything else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PinState {
    /// Pin name (`"D3"`), empty for reserved slots.
    pub name: &'static str,
    /// Modes the pin supports.
    pub supported_modes: &'static [PinMode],
    mode: Option<PinMode>,
    /// Last value written (optimistic, not confirmed by the device).
    pub value: i32,
}

impl PinState {
    /// Creates the initial state for a slot: first supported mode, value 0.
    pub fn from_spec(spec: &PinSpec) -> Self {
        Self {
            name: spec.name,
            supported_modes: spec.supported_modes,
            mode: spec.supported_modes.first().copied(),
            value: 0,
        }
    }

    /// Current mode, `None` only for reserved slots.
    #[inline]
    pub fn mode(&self) -> Option<PinMode> {
        self.mode
    }

    /// Returns `true` if the pin supports `mode`.
    #[inline]
    pub fn supports(&self, mode: PinMode) -> bool {
        self.supported_modes.contains(&mode)
    }

    /// Records a new mode, leaving the state untouched if it is unsupported.
    pub fn set_mode(&mut self, mode: PinMode) -> Result<(), TinkerError> {
        if !self.supports(mode) {
            return Err(TinkerError::UnsupportedMode {
                pin: self.name.to_string(),
                mode,
            });
        }
        self.mode = Some(mode);
        Ok(())
    }
}

/// Builds the full shadow-state array from [`PIN_TABLE`].
pub fn initial_states() -> Vec<PinState> {
    PIN_TABLE.iter().map(PinState::from_spec).collect()
}
