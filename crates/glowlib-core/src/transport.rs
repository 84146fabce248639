//! Transport traits for device communication.
//!
//! The [`Transport`] trait abstracts over the wireless adapter that can
//! reach a device by address, and [`Connection`] over one established
//! link. Implementations exist for BLE adapters and for mock transports
//! used in testing.
//!
//! Protocol engines (e.g. the Govee driver in `glowlib-govee`) operate
//! on these traits rather than on a concrete BLE stack, enabling both
//! real hardware control and deterministic unit testing with
//! `MockTransport` from the `glowlib-test-harness` crate.
//!
//! Transport-level concerns (connection timeouts, adapter retries,
//! pairing) belong to the implementation; the protocol engine only
//! consumes the three primitives below: connect, write, subscribe.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::Result;

/// An adapter capable of connecting to devices by address.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Establish a connection to the device at `address`.
    ///
    /// Returns the live connection handle. Implementations own any
    /// transport-level retry or timeout policy; the protocol engine
    /// treats a returned error as a failed attempt and will try again
    /// only on the caller's next flush.
    async fn connect(&self, address: &str) -> Result<Box<dyn Connection>>;
}

/// One established, half-duplex link to a device.
///
/// Writes carry fixed-size protocol frames; inbound traffic arrives
/// asynchronously as notifications pushed by the device.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Write one encoded frame to the device.
    async fn write(&mut self, frame: &[u8]) -> Result<()>;

    /// Subscribe to device notifications.
    ///
    /// Every inbound notification is delivered as one raw frame on
    /// `notifications`. Implementations should drop notifications rather
    /// than block if the receiver falls behind.
    async fn subscribe(&mut self, notifications: mpsc::Sender<Vec<u8>>) -> Result<()>;

    /// Check whether the link is still up.
    fn is_connected(&self) -> bool;
}
