//! # glowlib -- Async Control for Smart LED Strips
//!
//! `glowlib` is an asynchronous Rust library for controlling smart LED
//! light strips over short-range wireless links. It is designed for
//! home-automation bridges and ambient-lighting tools where the link is
//! lossy, half-duplex, and notification-based, and where no state update
//! may be lost or stale.
//!
//! ## Quick Start
//!
//! Add `glowlib` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! glowlib = { version = "0.1", features = ["govee"] }
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! Connect to a strip and turn it red (the transport is whatever BLE
//! adapter implements [`Transport`] on your platform):
//!
//! ```no_run
//! use glowlib::{Rgb, Transport};
//! use glowlib::govee::{DeviceProfile, GoveeLightBuilder};
//!
//! # async fn example(adapter: Box<dyn Transport>) -> glowlib::Result<()> {
//! let light = GoveeLightBuilder::new(DeviceProfile::Segmented)
//!     .address("AA:BB:CC:DD:EE:FF")
//!     .build_with_transport(adapter)
//!     .await?;
//!
//! light.set_color(Rgb::new(255, 0, 0), false).await;
//! light.flush().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized as a workspace of focused crates:
//!
//! | Crate                  | Purpose                                      |
//! |------------------------|----------------------------------------------|
//! | `glowlib-core`         | Transport traits, state, events, errors      |
//! | `glowlib-govee`        | Govee BLE binary protocol driver             |
//! | `glowlib-test-harness` | Mock transport for deterministic tests       |
//! | **`glowlib`**          | This facade crate -- re-exports everything   |
//!
//! ## Buffered writes
//!
//! Setters never touch the transport; they queue frames (three copies
//! each by default, for delivery probability on the lossy link) and
//! [`flush`](govee::GoveeLight::flush) drains the queue as one batch. A
//! failed flush restores the whole batch, so commands are delayed but
//! never dropped.
//!
//! ## Event Subscription
//!
//! Controllers emit [`LightEvent`]s through a broadcast channel as
//! device responses arrive. Subscribe to track state without polling:
//!
//! ```no_run
//! use glowlib::LightEvent;
//! # async fn example(light: &glowlib::govee::GoveeLight) {
//! let mut events = light.subscribe();
//! while let Ok(event) = events.recv().await {
//!     match event {
//!         LightEvent::PowerUpdated { on } => println!("power: {on}"),
//!         LightEvent::BrightnessUpdated { brightness } => println!("level: {brightness}"),
//!         LightEvent::ColorUpdated { color } => println!("color: {color:?}"),
//!     }
//! }
//! # }
//! ```

pub use glowlib_core::*;

/// Govee BLE protocol backend.
///
/// Provides [`GoveeLight`](govee::GoveeLight) and
/// [`GoveeLightBuilder`](govee::GoveeLightBuilder) for controlling Govee
/// LED strips over the 20-byte framed binary protocol, covering both the
/// legacy and segmented device generations.
#[cfg(feature = "govee")]
pub mod govee {
    pub use glowlib_govee::*;
}

#[cfg(all(test, feature = "govee"))]
mod tests {
    use super::govee::{DeviceProfile, GoveeLightBuilder};
    use super::{LightEvent, Rgb};
    use glowlib_test_harness::MockTransport;
    use std::time::Duration;
    use tokio::time::timeout;

    /// End-to-end: queue a color change, flush it through a mock
    /// transport, and reconcile the device's response notification.
    #[tokio::test]
    async fn set_flush_and_reconcile_round_trip() {
        let mock = MockTransport::new();
        let light = GoveeLightBuilder::new(DeviceProfile::Legacy)
            .address("AA:BB:CC:DD:EE:FF")
            .repeat(1)
            .build_with_transport(Box::new(mock.clone()))
            .await
            .unwrap();
        let mut events = light.subscribe();

        light.set_color(Rgb::new(0, 128, 255), false).await;
        light.flush().await.unwrap();
        assert_eq!(mock.write_count(), 3);

        // The device answers the color request.
        let mut response = vec![0u8; 20];
        response[0] = 0xAA; // request head
        response[1] = 0x05; // color
        response[2] = 0x0D;
        response[3] = 0;
        response[4] = 128;
        response[5] = 255;
        response[19] = response[..19].iter().fold(0, |acc, b| acc ^ b);
        mock.notify(&response).await.unwrap();

        let event = timeout(Duration::from_secs(1), events.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            event,
            LightEvent::ColorUpdated {
                color: Rgb::new(0, 128, 255)
            }
        );
        assert_eq!(light.state().await.color, Some(Rgb::new(0, 128, 255)));
    }
}
