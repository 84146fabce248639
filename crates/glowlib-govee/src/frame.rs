//! Govee frame encoder/decoder.
//!
//! The Govee BLE protocol exchanges fixed-size 20-byte frames over a
//! half-duplex, notification-based link. This module handles the pure
//! byte-level encoding and decoding of frames and XOR checksum
//! validation.
//!
//! # Frame format
//!
//! ```text
//! <head> <cmd> <payload: 17 bytes, zero-padded> <checksum>
//! ```
//!
//! - `head`: `0x33` for commands, `0xAA` for state requests
//! - `cmd`: command byte selecting the payload interpretation
//! - `payload`: command-specific data, zero-padded to 17 bytes
//! - `checksum`: XOR fold of the 19 preceding bytes

use bytes::{BufMut, BytesMut};
use glowlib_core::{Error, Result};

/// Total size of every frame on the wire.
pub const FRAME_LEN: usize = 20;

/// Size of the zero-padded payload field.
pub const PAYLOAD_LEN: usize = 17;

/// Frame head byte: request data or perform a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Head {
    /// A state-changing command (`0x33`). Devices do not respond to these.
    Command = 0x33,
    /// A state request (`0xAA`). Devices answer with a notification
    /// carrying the same head and cmd bytes.
    Request = 0xAA,
}

impl Head {
    /// Parse a head byte.
    pub fn from_byte(byte: u8) -> Result<Head> {
        match byte {
            0x33 => Ok(Head::Command),
            0xAA => Ok(Head::Request),
            other => Err(Error::Protocol(format!(
                "unknown frame head byte: {other:#04x}"
            ))),
        }
    }
}

/// Command byte: which device property a frame addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Cmd {
    /// Power on/off (`0x01`). Payload byte 0: `0x01` on, `0x00` off.
    Power = 0x01,
    /// Brightness (`0x04`). Payload byte 0: device-native level.
    Brightness = 0x04,
    /// Color (`0x05`). Payload byte 0 selects the addressing mode.
    Color = 0x05,
    /// Per-segment color (`0xA5`), segmented devices only.
    Segment = 0xA5,
}

impl Cmd {
    /// Parse a command byte.
    pub fn from_byte(byte: u8) -> Result<Cmd> {
        match byte {
            0x01 => Ok(Cmd::Power),
            0x04 => Ok(Cmd::Brightness),
            0x05 => Ok(Cmd::Color),
            0xA5 => Ok(Cmd::Segment),
            other => Err(Error::Protocol(format!(
                "unknown command byte: {other:#04x}"
            ))),
        }
    }
}

/// A logical protocol frame, before encoding or after decoding.
///
/// The payload may be shorter than [`PAYLOAD_LEN`] when building a frame;
/// [`encode`] zero-pads it. Decoded frames always carry the full
/// 17 padded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Request data or perform a change.
    pub head: Head,
    /// Which device property this frame addresses.
    pub cmd: Cmd,
    /// Command-specific data.
    pub payload: Vec<u8>,
}

impl Frame {
    /// Build a COMMAND-head frame.
    pub fn command(cmd: Cmd, payload: Vec<u8>) -> Frame {
        Frame {
            head: Head::Command,
            cmd,
            payload,
        }
    }

    /// Build a REQUEST-head frame.
    pub fn request(cmd: Cmd, payload: Vec<u8>) -> Frame {
        Frame {
            head: Head::Request,
            cmd,
            payload,
        }
    }
}

/// XOR-fold a byte sequence into a single checksum byte.
///
/// The fold is associative and commutative, so verification is cheap
/// and order-independent.
pub fn xor_checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, b| acc ^ b)
}

/// Encode a frame into its 20-byte wire form.
///
/// Zero-pads the payload to 17 bytes and appends the XOR checksum of
/// the 19 preceding bytes. Fails with [`Error::PayloadTooLong`] if the
/// payload exceeds the payload field.
///
/// # Example
///
/// ```
/// use glowlib_govee::frame::{encode, Cmd, Frame};
///
/// let frame = Frame::command(Cmd::Power, vec![0x01]);
/// let bytes = encode(&frame).unwrap();
/// assert_eq!(bytes.len(), 20);
/// assert_eq!(&bytes[..3], &[0x33, 0x01, 0x01]);
/// assert_eq!(bytes[19], 0x33 ^ 0x01 ^ 0x01);
/// ```
pub fn encode(frame: &Frame) -> Result<Vec<u8>> {
    if frame.payload.len() > PAYLOAD_LEN {
        return Err(Error::PayloadTooLong {
            len: frame.payload.len(),
            max: PAYLOAD_LEN,
        });
    }

    let mut buf = BytesMut::with_capacity(FRAME_LEN);
    buf.put_u8(frame.head as u8);
    buf.put_u8(frame.cmd as u8);
    buf.put_slice(&frame.payload);
    buf.put_bytes(0, PAYLOAD_LEN - frame.payload.len());
    let checksum = xor_checksum(&buf);
    buf.put_u8(checksum);
    Ok(buf.to_vec())
}

/// Decode and validate one 20-byte frame.
///
/// Recomputes the XOR checksum over all bytes except the last and
/// compares it to the trailing byte; returns
/// [`Error::ChecksumMismatch`] on disagreement. The decoded payload is
/// the full zero-padded 17 bytes.
///
/// # Example
///
/// ```
/// use glowlib_govee::frame::{decode, encode, Cmd, Frame, Head};
///
/// let bytes = encode(&Frame::request(Cmd::Power, vec![])).unwrap();
/// let frame = decode(&bytes).unwrap();
/// assert_eq!(frame.head, Head::Request);
/// assert_eq!(frame.cmd, Cmd::Power);
/// assert_eq!(frame.payload, vec![0; 17]);
/// ```
pub fn decode(bytes: &[u8]) -> Result<Frame> {
    if bytes.len() != FRAME_LEN {
        return Err(Error::Protocol(format!(
            "invalid frame length: {} bytes (expected {FRAME_LEN})",
            bytes.len()
        )));
    }

    let expected = xor_checksum(&bytes[..FRAME_LEN - 1]);
    let received = bytes[FRAME_LEN - 1];
    if expected != received {
        return Err(Error::ChecksumMismatch { expected, received });
    }

    Ok(Frame {
        head: Head::from_byte(bytes[0])?,
        cmd: Cmd::from_byte(bytes[1])?,
        payload: bytes[2..FRAME_LEN - 1].to_vec(),
    })
}
