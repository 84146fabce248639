//! Asynchronous light event types.
//!
//! Events are emitted by light controllers through a
//! [`tokio::sync::broadcast`] channel whenever a decoded device response
//! is reconciled into the cached state. Consumers subscribe to these
//! events for UI updates without polling the state snapshot.

use crate::state::Rgb;

/// An event emitted when a device response updates the cached state.
///
/// Exactly one event is emitted per reconciled inbound frame, never
/// batched, so subscribers see every discrete report from the device.
/// Delivery is best-effort through a bounded broadcast channel; slow
/// consumers may miss events under load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightEvent {
    /// The device reported its power state.
    PowerUpdated {
        /// `true` if the strip is on.
        on: bool,
    },

    /// The device reported its brightness.
    BrightnessUpdated {
        /// Brightness in the host 0-255 range.
        brightness: u8,
    },

    /// The device reported its color.
    ColorUpdated {
        /// The reported color.
        color: Rgb,
    },
}
