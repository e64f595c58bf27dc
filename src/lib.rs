//! # tinker-io
//!
//! Pin abstraction for a microcontroller running the Tinker firmware,
//! driven remotely through the Particle device cloud.
//!
//! ## Features
//!
//! - **Fixed pinout model**: 18 slots (`D0`-`D7`, two reserved, `A0`-`A7`)
//!   with per-pin mode capabilities
//! - **Addressing**: `"D3"`, `"A2"` or bare numbers map to a flat index
//! - **Mode control**: unsupported mode/pin combinations are rejected before
//!   any state changes
//! - **I/O**: digital/analog/servo writes and digital/analog reads, each one
//!   HTTP call to the device
//! - **Lifecycle**: `connected` and `ready` signals fired once each
//!
//! ## Architecture
//!
//! - `pins` - Capability table and per-pin shadow state
//! - `addressing` - Pin reference parsing and normalization
//! - `values` - Write value coercion
//! - `board` - The device handle tying it together
//! - `traits` - Board and transport abstractions
//! - `hal` - Transports (mock for testing, cloud for real devices)
//!
//! ## Example
//!
//! ```rust
//! use tinker_io::{hal::MockTransport, BoardIo, DeviceConfig, PinMode, TinkerBoard};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let transport = MockTransport::new();
//! transport.queue_return_value(1);
//! transport.queue_return_value(2048);
//!
//! let mut board = TinkerBoard::new(DeviceConfig::new("dev", "tok"), transport.clone())?;
//! board.ready().await;
//!
//! // Fire-and-forget write: the handle can simply be dropped
//! board.pin_mode("A0", PinMode::Pwm)?.analog_write("A0", 128u8)?;
//!
//! // Awaitable read
//! let level = board.analog_read_async("A5")?.await?;
//! assert_eq!(level, 2048);
//! # Ok::<(), tinker_io::TinkerError>(())
//! # }).unwrap();
//! ```

#![warn(missing_docs)]

/// Pin reference parsing and flat-index resolution.
pub mod addressing;
/// The device handle and request dispatch.
pub mod board;
/// Device and transport configuration.
pub mod config;
/// Error types.
pub mod error;
/// One-shot lifecycle signals.
pub mod events;
/// Transport implementations.
pub mod hal;
/// Wire bodies for Tinker function calls.
pub mod messages;
/// Pin capability table and shadow state.
pub mod pins;
/// Board and transport traits.
pub mod traits;
/// Write value coercion.
pub mod values;

// Re-exports for convenience
pub use addressing::PinRef;
pub use board::{RequestHandle, TinkerBoard};
pub use config::{Config, DeviceConfig, TransportConfig};
pub use error::{TinkerError, TransportError};
pub use events::BoardEvent;
pub use pins::{PinMode, PinSpec, PinState, PIN_TABLE};
pub use traits::{BoardIo, DeviceRequest, DeviceResponse, DeviceTransport, TinkerFunction};
pub use values::{AnalogValue, Level};
