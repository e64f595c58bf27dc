//! Transport implementations.
//!
//! This module contains concrete implementations of
//! [`DeviceTransport`](crate::traits::DeviceTransport).
//!
//! # Available Implementations
//!
//! - `mock`: Recording transport for tests and offline development
//! - `cloud`: Particle cloud over HTTPS (requires `cloud` feature)

pub mod mock;

#[cfg(feature = "cloud")]
pub mod cloud;

pub use mock::*;

#[cfg(feature = "cloud")]
pub use cloud::*;
