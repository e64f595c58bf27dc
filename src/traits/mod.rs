//! Trait definitions for the board surface and the device transport.
//!
//! - `board_io`: [`BoardIo`], the operations consumers program against
//! - `transport`: [`DeviceTransport`] and the request/response types it
//!   carries
//!
//! The board is generic over its transport, so tests drive it with
//! [`MockTransport`](crate::hal::MockTransport) and production code with
//! `CloudTransport` (feature `cloud`).

pub mod board_io;
pub mod transport;

pub use board_io::*;
pub use transport::*;
