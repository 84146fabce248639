//! Mock transport for deterministic testing of protocol engines.
//!
//! [`MockTransport`] implements both [`Transport`] and [`Connection`]
//! against in-memory state. Tests keep a clone of the transport as a
//! handle to inspect written frames, inject device notifications, and
//! script connect/write failures.
//!
//! # Example
//!
//! ```
//! use glowlib_test_harness::MockTransport;
//!
//! let mock = MockTransport::new();
//! // Pass `Box::new(mock.clone())` to the controller under test and
//! // keep `mock` to inspect what the engine wrote.
//! assert_eq!(mock.write_count(), 0);
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;

use glowlib_core::error::{Error, Result};
use glowlib_core::transport::{Connection, Transport};

/// Shared state behind every handle and connection of one mock device.
#[derive(Debug, Default)]
struct MockState {
    /// Log of all frames written through this transport.
    written: Vec<Vec<u8>>,
    /// Whether the mock link is currently up.
    connected: bool,
    /// Total number of `connect()` calls observed.
    connect_attempts: usize,
    /// When set, the next `connect()` call fails and clears the flag.
    fail_next_connect: bool,
    /// When set, writes fail once this many frames have been accepted.
    fail_writes_after: Option<usize>,
    /// Artificial delay inside `connect()`, for single-flight tests.
    connect_delay: Option<Duration>,
    /// Notification channel registered by the engine via `subscribe()`.
    notify_tx: Option<mpsc::Sender<Vec<u8>>>,
}

/// A mock [`Transport`] and [`Connection`] for testing without hardware.
///
/// Cloning produces another handle onto the same device; the protocol
/// engine takes one clone while the test keeps another for inspection
/// and notification injection.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Create a new, disconnected mock device.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return copies of all frames written so far, in write order.
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.state().written.clone()
    }

    /// Number of frames written so far.
    pub fn write_count(&self) -> usize {
        self.state().written.len()
    }

    /// Number of `connect()` calls observed so far.
    pub fn connect_attempts(&self) -> usize {
        self.state().connect_attempts
    }

    /// Make the next `connect()` call fail with a transport error.
    pub fn fail_next_connect(&self) {
        self.state().fail_next_connect = true;
    }

    /// Make writes fail once `n` frames have been accepted.
    pub fn fail_writes_after(&self, n: usize) {
        self.state().fail_writes_after = Some(n);
    }

    /// Allow writes again after a scripted failure.
    pub fn clear_write_failure(&self) {
        self.state().fail_writes_after = None;
    }

    /// Add an artificial delay to every `connect()` call.
    pub fn set_connect_delay(&self, delay: Duration) {
        self.state().connect_delay = Some(delay);
    }

    /// Drop the link, as if the device went out of range.
    ///
    /// Subsequent writes fail with [`Error::ConnectionLost`] until the
    /// engine reconnects.
    pub fn disconnect(&self) {
        self.state().connected = false;
    }

    /// Push one raw notification frame to the subscribed engine.
    ///
    /// Fails with [`Error::NotConnected`] if the engine has not yet
    /// connected and subscribed.
    pub async fn notify(&self, frame: &[u8]) -> Result<()> {
        let tx = self
            .state()
            .notify_tx
            .clone()
            .ok_or(Error::NotConnected)?;
        tx.send(frame.to_vec())
            .await
            .map_err(|_| Error::Transport("notification receiver dropped".into()))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn connect(&self, _address: &str) -> Result<Box<dyn Connection>> {
        let delay = {
            let mut state = self.state();
            state.connect_attempts += 1;
            if state.fail_next_connect {
                state.fail_next_connect = false;
                return Err(Error::Transport("mock connect failure".into()));
            }
            state.connect_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.state().connected = true;
        Ok(Box::new(self.clone()))
    }
}

#[async_trait]
impl Connection for MockTransport {
    async fn write(&mut self, frame: &[u8]) -> Result<()> {
        let mut state = self.state();
        if !state.connected {
            return Err(Error::ConnectionLost);
        }
        if let Some(limit) = state.fail_writes_after {
            if state.written.len() >= limit {
                return Err(Error::Transport("mock write failure".into()));
            }
        }
        state.written.push(frame.to_vec());
        Ok(())
    }

    async fn subscribe(&mut self, notifications: mpsc::Sender<Vec<u8>>) -> Result<()> {
        self.state().notify_tx = Some(notifications);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.state().connected
    }
}
