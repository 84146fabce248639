//! Govee BLE LED strip protocol backend for glowlib.
//!
//! This crate implements the proprietary binary command/response
//! protocol used by Govee LED strips over BLE. It provides:
//!
//! - **Frame codec** ([`frame`]) -- encode and decode the fixed 20-byte
//!   frames with XOR checksum validation.
//! - **Command builders** ([`command`]) -- construct correctly-shaped
//!   frames for power, brightness, and color, including the host/device
//!   brightness rescaling and per-generation color payload shapes.
//! - **Device profiles** ([`models`]) -- the legacy vs. segmented
//!   generation split that governs value ranges and payload shaping.
//! - **Transmit buffer** ([`buffer`]) -- FIFO of pending frames with
//!   repeated-send reliability and all-or-nothing rollback.
//! - **GoveeLight** ([`light`]) -- the protocol engine facade tying the
//!   codec and buffer to a [`Transport`](glowlib_core::Transport), with
//!   lazy single-flight connection management and a notification
//!   reconciler that keeps a cached state snapshot fresh.
//! - **GoveeLightBuilder** ([`builder`]) -- fluent builder for
//!   constructing `GoveeLight` instances.
//!
//! # Example
//!
//! ```
//! use glowlib_govee::frame::{decode, encode, Cmd, Frame, Head};
//!
//! // Build a "power on" command frame.
//! let bytes = encode(&Frame::command(Cmd::Power, vec![0x01])).unwrap();
//! assert_eq!(bytes[0], 0x33);
//! assert_eq!(bytes.len(), 20);
//!
//! // Simulate decoding a power state response from the device.
//! let response = encode(&Frame::request(Cmd::Power, vec![0x01])).unwrap();
//! let frame = decode(&response).unwrap();
//! assert_eq!(frame.head, Head::Request);
//! ```

pub mod buffer;
pub mod builder;
pub mod command;
pub mod frame;
pub mod light;
pub mod models;

pub use builder::GoveeLightBuilder;
pub use light::GoveeLight;
pub use models::DeviceProfile;
