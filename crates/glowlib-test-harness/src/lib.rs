//! glowlib-test-harness: Mock transports for deterministic testing of
//! glowlib protocol engines.
//!
//! This crate provides [`MockTransport`] for unit testing frame encoding,
//! transmit buffering, and notification reconciliation without real LED
//! hardware.

pub mod mock;

pub use mock::MockTransport;
