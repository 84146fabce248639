//! Error types for glowlib.
//!
//! All fallible operations across the library return [`Result<T>`], which
//! uses [`Error`] as the error type. Transport-layer, protocol-layer, and
//! configuration errors are all captured here.

/// The error type for all glowlib operations.
///
/// Variants cover the failure modes encountered when talking to LED
/// devices over a lossy, notification-based wireless link: transport
/// faults, malformed frames, and invalid caller input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transport-level error (BLE write failure, adapter fault).
    #[error("transport error: {0}")]
    Transport(String),

    /// A protocol-level error (malformed frame, unknown command byte).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A frame payload exceeded the fixed 17-byte payload field.
    ///
    /// This is a local programming or configuration error. It is never
    /// retried; the offending frame cannot be represented on the wire.
    #[error("payload too long: {len} bytes (max {max})")]
    PayloadTooLong {
        /// Length of the rejected payload.
        len: usize,
        /// Maximum payload length the frame format allows.
        max: usize,
    },

    /// A received frame failed XOR checksum validation.
    ///
    /// The offending notification is discarded by the reconciler; the
    /// sender's repeat policy (not the receiver) drives retransmission,
    /// so this is not fatal to the connection.
    #[error("checksum mismatch: expected {expected:#04x}, received {received:#04x}")]
    ChecksumMismatch {
        /// Checksum recomputed over the frame body.
        expected: u8,
        /// Trailing checksum byte actually received.
        received: u8,
    },

    /// An invalid parameter was passed to a builder or command.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No connection to the device has been established.
    #[error("not connected")]
    NotConnected,

    /// The connection to the device was lost unexpectedly.
    #[error("connection lost")]
    ConnectionLost,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_transport() {
        let e = Error::Transport("write failed".into());
        assert_eq!(e.to_string(), "transport error: write failed");
    }

    #[test]
    fn error_display_payload_too_long() {
        let e = Error::PayloadTooLong { len: 20, max: 17 };
        assert_eq!(e.to_string(), "payload too long: 20 bytes (max 17)");
    }

    #[test]
    fn error_display_checksum_mismatch() {
        let e = Error::ChecksumMismatch {
            expected: 0x33,
            received: 0x34,
        };
        assert_eq!(
            e.to_string(),
            "checksum mismatch: expected 0x33, received 0x34"
        );
    }

    #[test]
    fn error_display_not_connected() {
        assert_eq!(Error::NotConnected.to_string(), "not connected");
    }

    #[test]
    fn error_display_connection_lost() {
        assert_eq!(Error::ConnectionLost.to_string(), "connection lost");
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe broken");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
        assert!(e.to_string().contains("pipe broken"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<Error>();
    }
}
