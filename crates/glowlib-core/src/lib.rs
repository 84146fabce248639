//! glowlib-core: Core traits, types, and error definitions for glowlib.
//!
//! This crate defines the vendor-agnostic abstractions that glowlib
//! protocol drivers build on. Applications depend on these types without
//! pulling in any specific LED driver.
//!
//! # Key types
//!
//! - [`Transport`] / [`Connection`] -- the byte-level link to a device
//! - [`LightState`] -- cached snapshot of a device's reported state
//! - [`LightEvent`] -- asynchronous state change notifications
//! - [`Error`] / [`Result`] -- error handling

pub mod error;
pub mod events;
pub mod state;
pub mod transport;

// Re-export key types at crate root for ergonomic `use glowlib_core::*`.
pub use error::{Error, Result};
pub use events::LightEvent;
pub use state::{LightState, Rgb};
pub use transport::{Connection, Transport};
