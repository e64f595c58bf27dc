//! Translation between external pin references and flat slot indices.
//!
//! Callers may name a pin as `"D3"`, `"A2"` or a bare number. The flat index
//! is the numeric suffix plus [`ANALOG_OFFSET`] when the prefix is `A`:
//!
//! ```text
//! "D3" -> 3     "A2" -> 12     3 -> 3     "12" -> 12
//! ```
//!
//! Bare references are digital unless the calling operation supplies a
//! default prefix (see [`normalize_with_default_prefix`]).
//!
//! # Example
//!
//! ```rust
//! use tinker_io::addressing::{locate, normalize_with_default_prefix, resolve, PinRef};
//!
//! assert_eq!(resolve(&PinRef::from("A2")).unwrap(), 12);
//!
//! let pin = normalize_with_default_prefix(PinRef::from(5u8), 'A');
//! assert_eq!(pin, PinRef::from("A5"));
//!
//! let (index, spec) = locate(&pin).unwrap();
//! assert_eq!((index, spec.name), (15, "A5"));
//! ```

use core::fmt;

use crate::error::TinkerError;
use crate::pins::{self, PinMode, PinSpec, ANALOG_OFFSET};

/// Digital pin prefix.
pub const DIGITAL_PREFIX: char = 'D';

/// Analog pin prefix.
pub const ANALOG_PREFIX: char = 'A';

/// A pin reference as supplied by a caller.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PinRef {
    /// Bare number, e.g. `3`.
    Number(u32),
    /// Textual name, e.g. `"D3"`, `"A2"` or `"3"`.
    Name(String),
}

impl PinRef {
    /// Rewrites a bare number to its analog name when the requested mode is
    /// [`PinMode::Analog`], so `0` means `A0` rather than `D0`.
    pub fn for_mode(self, mode: PinMode) -> PinRef {
        match self {
            PinRef::Number(n) if mode == PinMode::Analog => {
                PinRef::Name(format!("{ANALOG_PREFIX}{n}"))
            }
            other => other,
        }
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinRef::Number(n) => write!(f, "{n}"),
            PinRef::Name(name) => f.write_str(name),
        }
    }
}

impl From<u8> for PinRef {
    fn from(n: u8) -> Self {
        PinRef::Number(n.into())
    }
}

impl From<u16> for PinRef {
    fn from(n: u16) -> Self {
        PinRef::Number(n.into())
    }
}

impl From<u32> for PinRef {
    fn from(n: u32) -> Self {
        PinRef::Number(n)
    }
}

impl From<&str> for PinRef {
    fn from(name: &str) -> Self {
        PinRef::Name(name.to_string())
    }
}

impl From<String> for PinRef {
    fn from(name: String) -> Self {
        PinRef::Name(name)
    }
}

impl From<&String> for PinRef {
    fn from(name: &String) -> Self {
        PinRef::Name(name.clone())
    }
}

impl From<&PinRef> for PinRef {
    fn from(pin: &PinRef) -> Self {
        pin.clone()
    }
}

/// Converts a pin reference to its flat index.
///
/// Strips an `A`/`D` prefix (either case), parses the remaining decimal
/// digits and adds [`ANALOG_OFFSET`] for analog pins. The result is not
/// bounds-checked; pass it through [`pins::slot`] or use [`locate`].
pub fn resolve(pin: &PinRef) -> Result<usize, TinkerError> {
    let name = match pin {
        PinRef::Number(n) => return Ok(*n as usize),
        PinRef::Name(name) => name.trim(),
    };

    let (offset, digits) = match name.chars().next() {
        Some('A' | 'a') => (ANALOG_OFFSET, &name[1..]),
        Some('D' | 'd') => (0, &name[1..]),
        _ => (0, name),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TinkerError::InvalidPin(pin.to_string()));
    }

    digits
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_add(offset))
        .ok_or_else(|| TinkerError::InvalidPin(pin.to_string()))
}

/// Prefixes a single-digit bare reference with `prefix`.
///
/// `3` and `"3"` become `"<prefix>3"`; anything longer or already prefixed
/// is returned unchanged, so `"12"` still resolves as flat index 12.
pub fn normalize_with_default_prefix(pin: PinRef, prefix: char) -> PinRef {
    match pin {
        PinRef::Number(n) if n < 10 => PinRef::Name(format!("{prefix}{n}")),
        PinRef::Name(name) if name.len() == 1 && name.as_bytes()[0].is_ascii_digit() => {
            PinRef::Name(format!("{prefix}{name}"))
        }
        other => other,
    }
}

/// Resolves a reference and checks that it lands on an addressable slot.
pub fn locate(pin: &PinRef) -> Result<(usize, &'static PinSpec), TinkerError> {
    let index = resolve(pin)?;
    let spec = pins::slot(index).map_err(|_| TinkerError::InvalidPin(pin.to_string()))?;
    Ok((index, spec))
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // resolve tests
    // =========================================================================

    #[test]
    fn resolve_digital_names() {
        for n in 0..8 {
            assert_eq!(resolve(&PinRef::from(format!("D{n}"))).unwrap(), n);
        }
    }

    #[test]
    fn resolve_analog_names() {
        for n in 0..8 {
            assert_eq!(resolve(&PinRef::from(format!("A{n}"))).unwrap(), n + 10);
        }
    }

    #[test]
    fn resolve_is_case_insensitive() {
        assert_eq!(resolve(&PinRef::from("a3")).unwrap(), 13);
        assert_eq!(resolve(&PinRef::from("d6")).unwrap(), 6);
    }

    #[test]
    fn resolve_bare_references() {
        assert_eq!(resolve(&PinRef::from(4u8)).unwrap(), 4);
        assert_eq!(resolve(&PinRef::from("7")).unwrap(), 7);
        assert_eq!(resolve(&PinRef::from("12")).unwrap(), 12);
    }

    #[test]
    fn resolve_does_not_bounds_check() {
        assert_eq!(resolve(&PinRef::from("A9")).unwrap(), 19);
        assert_eq!(resolve(&PinRef::from(40u8)).unwrap(), 40);
    }

    #[test]
    fn resolve_rejects_garbage() {
        for bad in ["", "D", "A", "X1", "D3x", "A-1", "D 3", "HIGH"] {
            assert!(
                matches!(resolve(&PinRef::from(bad)), Err(TinkerError::InvalidPin(_))),
                "{bad:?} should not resolve"
            );
        }
    }

    // =========================================================================
    // normalize tests
    // =========================================================================

    #[test]
    fn normalize_prefixes_single_digits() {
        assert_eq!(
            normalize_with_default_prefix(PinRef::from(3u8), 'D'),
            PinRef::from("D3")
        );
        assert_eq!(
            normalize_with_default_prefix(PinRef::from("3"), 'A'),
            PinRef::from("A3")
        );
    }

    #[test]
    fn normalize_leaves_named_and_long_refs() {
        assert_eq!(
            normalize_with_default_prefix(PinRef::from("D3"), 'A'),
            PinRef::from("D3")
        );
        assert_eq!(
            normalize_with_default_prefix(PinRef::from(12u8), 'D'),
            PinRef::from(12u8)
        );
        assert_eq!(
            normalize_with_default_prefix(PinRef::from("12"), 'A'),
            PinRef::from("12")
        );
    }

    // =========================================================================
    // for_mode / locate tests
    // =========================================================================

    #[test]
    fn analog_mode_rewrites_bare_numbers() {
        assert_eq!(PinRef::from(0u8).for_mode(PinMode::Analog), PinRef::from("A0"));
        assert_eq!(PinRef::from(0u8).for_mode(PinMode::Output), PinRef::from(0u8));
        // Only numbers are rewritten, textual refs keep their meaning
        assert_eq!(PinRef::from("0").for_mode(PinMode::Analog), PinRef::from("0"));
    }

    #[test]
    fn locate_rejects_reserved_slots() {
        assert!(matches!(locate(&PinRef::from("D8")), Err(TinkerError::InvalidPin(_))));
        assert!(matches!(locate(&PinRef::from(9u8)), Err(TinkerError::InvalidPin(_))));
        assert!(matches!(locate(&PinRef::from("A8")), Err(TinkerError::InvalidPin(_))));
    }

    #[test]
    fn locate_error_names_original_reference() {
        let err = locate(&PinRef::from("A12")).unwrap_err();
        assert_eq!(err.to_string(), "invalid pin reference: A12");
    }
}
