//! GoveeLightBuilder -- fluent builder for constructing [`GoveeLight`]
//! instances.
//!
//! Separates configuration from construction so that callers can set the
//! device address, generation profile, and reliability parameters before
//! handing over a transport. No connection is made at build time; the
//! controller connects lazily on its first flush.
//!
//! # Example
//!
//! ```no_run
//! use glowlib_govee::builder::GoveeLightBuilder;
//! use glowlib_govee::models::DeviceProfile;
//!
//! # async fn example(transport: Box<dyn glowlib_core::Transport>) -> glowlib_core::Result<()> {
//! let light = GoveeLightBuilder::new(DeviceProfile::Segmented)
//!     .address("AA:BB:CC:DD:EE:FF")
//!     .repeat(3)
//!     .build_with_transport(transport)
//!     .await?;
//! # Ok(())
//! # }
//! ```

use glowlib_core::error::{Error, Result};
use glowlib_core::transport::Transport;

use crate::light::GoveeLight;
use crate::models::DeviceProfile;

/// Default number of copies queued per frame.
///
/// Three sends per frame is the reliability/latency trade-off observed
/// to work on the lossy link; tune it via [`GoveeLightBuilder::repeat`].
pub const DEFAULT_REPEAT: usize = 3;

/// Default capacity of the state-update event channel.
const DEFAULT_EVENT_CAPACITY: usize = 16;

/// Fluent builder for [`GoveeLight`].
pub struct GoveeLightBuilder {
    profile: DeviceProfile,
    address: Option<String>,
    repeat: usize,
    event_capacity: usize,
}

impl GoveeLightBuilder {
    /// Create a new builder for a device of the given generation.
    pub fn new(profile: DeviceProfile) -> Self {
        GoveeLightBuilder {
            profile,
            address: None,
            repeat: DEFAULT_REPEAT,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }

    /// Set the device address (e.g. a BLE MAC like `AA:BB:CC:DD:EE:FF`).
    pub fn address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    /// Set how many copies of each frame are queued (default: 3).
    ///
    /// Higher values raise delivery probability on the lossy link at
    /// the cost of longer flushes.
    pub fn repeat(mut self, repeat: usize) -> Self {
        self.repeat = repeat;
        self
    }

    /// Set the capacity of the state-update broadcast channel
    /// (default: 16).
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Build a [`GoveeLight`] with a caller-provided transport.
    ///
    /// This is the single entry point for both production (a BLE
    /// adapter implementing [`Transport`]) and testing (a
    /// `MockTransport` from `glowlib-test-harness`). Spawns the
    /// controller's reconciler task, so it must run inside a tokio
    /// runtime.
    pub async fn build_with_transport(self, transport: Box<dyn Transport>) -> Result<GoveeLight> {
        let address = self
            .address
            .filter(|address| !address.is_empty())
            .ok_or_else(|| Error::InvalidParameter("address is required".into()))?;
        if self.repeat == 0 {
            return Err(Error::InvalidParameter(
                "repeat must be at least 1".into(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(Error::InvalidParameter(
                "event_capacity must be at least 1".into(),
            ));
        }

        Ok(GoveeLight::new(
            transport,
            address,
            self.profile,
            self.repeat,
            self.event_capacity,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowlib_test_harness::MockTransport;

    #[tokio::test]
    async fn builder_defaults() {
        let light = GoveeLightBuilder::new(DeviceProfile::Legacy)
            .address("AA:BB:CC:DD:EE:FF")
            .build_with_transport(Box::new(MockTransport::new()))
            .await
            .unwrap();

        assert_eq!(light.address(), "AA:BB:CC:DD:EE:FF");
        assert_eq!(light.profile(), DeviceProfile::Legacy);
        assert_eq!(light.state().await, Default::default());
    }

    #[tokio::test]
    async fn builder_requires_address() {
        let result = GoveeLightBuilder::new(DeviceProfile::Legacy)
            .build_with_transport(Box::new(MockTransport::new()))
            .await;
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn builder_rejects_empty_address() {
        let result = GoveeLightBuilder::new(DeviceProfile::Legacy)
            .address("")
            .build_with_transport(Box::new(MockTransport::new()))
            .await;
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn builder_rejects_zero_repeat() {
        let result = GoveeLightBuilder::new(DeviceProfile::Segmented)
            .address("AA:BB:CC:DD:EE:FF")
            .repeat(0)
            .build_with_transport(Box::new(MockTransport::new()))
            .await;
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn builder_fluent_chain() {
        let light = GoveeLightBuilder::new(DeviceProfile::Segmented)
            .address("AA:BB:CC:DD:EE:FF")
            .repeat(5)
            .event_capacity(64)
            .build_with_transport(Box::new(MockTransport::new()))
            .await
            .unwrap();

        assert!(light.profile().is_segmented());
    }
}
