//! The IO-plugin surface a board exposes.
//!
//! [`BoardIo`] is the capability set consumers program against: pin
//! addressing, mode control, the four I/O operations and lifecycle
//! subscription. [`TinkerBoard`](crate::TinkerBoard) implements it over any
//! [`DeviceTransport`](super::DeviceTransport).
//!
//! # Result Delivery
//!
//! | Operation | Validation errors | Transport errors |
//! |-----------|-------------------|------------------|
//! | writes | `Err` immediately | logged; visible only by awaiting the handle |
//! | `*_read` (callback) | `Err` immediately | logged; callback never runs |
//! | `*_read_async` | `Err` immediately | logged; returned by the handle |

use crate::addressing::PinRef;
use crate::board::RequestHandle;
use crate::error::TinkerError;
use crate::events::EventReceiver;
use crate::pins::PinMode;
use crate::values::{AnalogValue, Level};

/// Pin-level operations of a remotely driven board.
pub trait BoardIo {
    /// Converts a pin reference to its flat slot index, rejecting references
    /// that do not name an addressable pin.
    fn resolve(&self, pin: impl Into<PinRef>) -> Result<usize, TinkerError>;

    /// Validates and records the mode of a pin.
    ///
    /// A bare number combined with [`PinMode::Analog`] names the analog pin
    /// (`0` means `A0`). Fails with [`TinkerError::UnsupportedMode`] without
    /// touching state when the pin lacks the capability.
    fn pin_mode(&mut self, pin: impl Into<PinRef>, mode: PinMode) -> Result<&mut Self, TinkerError>;

    /// Drives a digital pin. Bare single digits default to `D`.
    ///
    /// Shadow state is updated before the request is sent. The returned
    /// handle may be dropped for fire-and-forget use.
    fn digital_write(
        &mut self,
        pin: impl Into<PinRef>,
        value: impl Into<Level>,
    ) -> Result<RequestHandle<()>, TinkerError>;

    /// Writes a PWM value. Bare single digits default to `A`.
    ///
    /// Non-numeric values fail with [`TinkerError::InvalidValue`] before any
    /// state change or request.
    fn analog_write(
        &mut self,
        pin: impl Into<PinRef>,
        value: impl Into<AnalogValue>,
    ) -> Result<RequestHandle<()>, TinkerError>;

    /// Writes a servo position; the device handles it like [`analog_write`](Self::analog_write).
    fn servo_write(
        &mut self,
        pin: impl Into<PinRef>,
        value: impl Into<AnalogValue>,
    ) -> Result<RequestHandle<()>, TinkerError> {
        self.analog_write(pin, value)
    }

    /// Reads an analog pin, calling `callback` once with the value on success.
    fn analog_read<F>(&self, pin: impl Into<PinRef>, callback: F) -> Result<(), TinkerError>
    where
        F: FnOnce(i32) + Send + 'static;

    /// Reads a digital pin, calling `callback` once with the value on success.
    fn digital_read<F>(&self, pin: impl Into<PinRef>, callback: F) -> Result<(), TinkerError>
    where
        F: FnOnce(i32) + Send + 'static;

    /// Reads an analog pin, returning a handle that yields the value.
    fn analog_read_async(&self, pin: impl Into<PinRef>) -> Result<RequestHandle<i32>, TinkerError>;

    /// Reads a digital pin, returning a handle that yields the value.
    fn digital_read_async(&self, pin: impl Into<PinRef>)
        -> Result<RequestHandle<i32>, TinkerError>;

    /// Subscribes to lifecycle events, replaying those already fired.
    fn subscribe(&self) -> EventReceiver;
}
