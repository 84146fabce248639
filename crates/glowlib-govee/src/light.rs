//! The Govee light controller: protocol engine facade.
//!
//! [`GoveeLight`] composes the frame codec, command builders, transmit
//! buffer, and connection lifecycle into the public operations: request
//! state, set power/brightness/color, and flush.
//!
//! # Concurrency
//!
//! Three independent serialization domains are preserved under
//! concurrent callers:
//!
//! 1. **Connect**: at most one in-flight connection attempt; concurrent
//!    callers await its outcome instead of racing (double-checked
//!    `connect_lock`).
//! 2. **Buffer mutation**: enqueue and the drain snapshot of a flush
//!    never interleave inconsistently (`buffer` mutex).
//! 3. **Send**: at most one flush is in progress at a time, so frames
//!    from two logically-concurrent flushes are never interleaved on
//!    the wire (`send_lock`).
//!
//! Inbound notifications are decoded and reconciled into the cached
//! [`LightState`] by a spawned task; one [`LightEvent`] is broadcast per
//! reconciled frame.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use glowlib_core::error::{Error, Result};
use glowlib_core::events::LightEvent;
use glowlib_core::state::{LightState, Rgb};
use glowlib_core::transport::{Connection, Transport};

use crate::buffer::TransmitBuffer;
use crate::command;
use crate::frame::{self, Cmd, Frame, Head};
use crate::models::DeviceProfile;

/// Capacity of the raw notification channel between the transport and
/// the reconciler task.
const NOTIFY_CHANNEL_CAPACITY: usize = 32;

/// Asynchronous controller for one Govee LED strip.
///
/// One instance owns one device: the single connection handle and the
/// single cached state snapshot. Constructed via
/// [`GoveeLightBuilder`](crate::builder::GoveeLightBuilder).
///
/// Setters only queue frames; nothing touches the transport until
/// [`flush`](Self::flush) is called. Connection establishment is lazy
/// and happens inside the first flush that has frames to send.
pub struct GoveeLight {
    address: String,
    profile: DeviceProfile,
    repeat: usize,
    transport: Box<dyn Transport>,
    connection: Mutex<Option<Box<dyn Connection>>>,
    connect_lock: Mutex<()>,
    buffer: Mutex<TransmitBuffer>,
    send_lock: Mutex<()>,
    state: Arc<Mutex<LightState>>,
    event_tx: broadcast::Sender<LightEvent>,
    notify_tx: mpsc::Sender<Vec<u8>>,
    cancel: CancellationToken,
    reconciler: Option<JoinHandle<()>>,
}

impl GoveeLight {
    pub(crate) fn new(
        transport: Box<dyn Transport>,
        address: String,
        profile: DeviceProfile,
        repeat: usize,
        event_capacity: usize,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(event_capacity);
        let (notify_tx, notify_rx) = mpsc::channel(NOTIFY_CHANNEL_CAPACITY);
        let state = Arc::new(Mutex::new(LightState::default()));
        let cancel = CancellationToken::new();

        let reconciler = tokio::spawn(reconciler_loop(
            notify_rx,
            profile,
            Arc::clone(&state),
            event_tx.clone(),
            cancel.clone(),
        ));

        GoveeLight {
            address,
            profile,
            repeat,
            transport,
            connection: Mutex::new(None),
            connect_lock: Mutex::new(()),
            buffer: Mutex::new(TransmitBuffer::new()),
            send_lock: Mutex::new(()),
            state,
            event_tx,
            notify_tx,
            cancel,
            reconciler: Some(reconciler),
        }
    }

    /// The device address this controller talks to.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The device generation profile, fixed at construction.
    pub fn profile(&self) -> DeviceProfile {
        self.profile
    }

    /// Snapshot of the last state reported by the device.
    ///
    /// Every field is `None` until the first matching response arrives;
    /// see [`request_state`](Self::request_state).
    pub async fn state(&self) -> LightState {
        *self.state.lock().await
    }

    /// Subscribe to state-update events.
    ///
    /// One event is emitted per reconciled inbound frame.
    pub fn subscribe(&self) -> broadcast::Receiver<LightEvent> {
        self.event_tx.subscribe()
    }

    /// Number of frames currently queued for transmission.
    pub async fn pending_frames(&self) -> usize {
        self.buffer.lock().await.len()
    }

    /// Whether a live connection to the device is currently held.
    pub async fn is_connected(&self) -> bool {
        self.connection
            .lock()
            .await
            .as_ref()
            .is_some_and(|conn| conn.is_connected())
    }

    // -----------------------------------------------------------------
    // State requests
    // -----------------------------------------------------------------

    /// Queue a request for the current power state.
    pub async fn request_power(&self) {
        self.enqueue([command::request_power()]).await;
    }

    /// Queue a request for the current brightness.
    pub async fn request_brightness(&self) {
        self.enqueue([command::request_brightness()]).await;
    }

    /// Queue a request for the current color.
    pub async fn request_color(&self) {
        self.enqueue([command::request_color(self.profile)]).await;
    }

    /// Queue requests for power, brightness, and color in one call.
    ///
    /// This is the periodic-poll entry point: flush afterwards and the
    /// cached state refreshes as the responses arrive.
    pub async fn request_state(&self) {
        self.enqueue([
            command::request_power(),
            command::request_brightness(),
            command::request_color(self.profile),
        ])
        .await;
    }

    // -----------------------------------------------------------------
    // Setters
    // -----------------------------------------------------------------

    /// Queue a power change, followed by a power state request so the
    /// cache refreshes from the device's own echo.
    ///
    /// No-op if the cached state already matches `on`.
    pub async fn set_power(&self, on: bool) {
        if self.state.lock().await.power == Some(on) {
            return;
        }
        self.enqueue([command::set_power(on), command::request_power()])
            .await;
    }

    /// Queue a brightness change (host 0-255 range), followed by a
    /// brightness request.
    ///
    /// No-op if the cached brightness already matches, unless `force` is
    /// set. Pass `force = true` right after powering on so the strip
    /// re-asserts a brightness and actually lights.
    pub async fn set_brightness(&self, brightness: u8, force: bool) {
        if !force && self.state.lock().await.brightness == Some(brightness) {
            return;
        }
        self.enqueue([
            command::set_brightness(brightness, self.profile),
            command::request_brightness(),
        ])
        .await;
    }

    /// Queue a color change, followed by a color request.
    ///
    /// Emits two frames on legacy devices and three on segmented ones
    /// (see [`command::set_color`]). No-op if the cached color already
    /// matches, unless `force` is set.
    pub async fn set_color(&self, color: Rgb, force: bool) {
        if !force && self.state.lock().await.color == Some(color) {
            return;
        }
        let mut frames = command::set_color(color, self.profile);
        frames.push(command::request_color(self.profile));
        self.enqueue(frames).await;
    }

    // -----------------------------------------------------------------
    // Convenience orchestration
    // -----------------------------------------------------------------

    /// Power the strip on, assert a brightness, optionally apply a
    /// color, and flush.
    ///
    /// Brightness is forced when the strip was off or when no explicit
    /// level is given, falling back to the last known non-zero level or
    /// full brightness; otherwise a power-on without a visible level can
    /// leave the strip dark. A requested color is always force-applied.
    pub async fn turn_on(&self, brightness: Option<u8>, color: Option<Rgb>) -> Result<()> {
        let was_off = self.state.lock().await.power != Some(true);
        self.set_power(true).await;

        let force_brightness = brightness.is_none() || was_off;
        let level = match brightness {
            Some(level) => level,
            None => match self.state.lock().await.brightness {
                Some(level) if level > 0 => level,
                _ => 255,
            },
        };
        self.set_brightness(level, force_brightness).await;

        if let Some(color) = color {
            self.set_color(color, true).await;
        }
        self.flush().await
    }

    /// Power the strip off and flush.
    pub async fn turn_off(&self) -> Result<()> {
        self.set_power(false).await;
        self.flush().await
    }

    // -----------------------------------------------------------------
    // Connection lifecycle and flushing
    // -----------------------------------------------------------------

    /// Connect to the device if not already connected.
    ///
    /// Idempotent and single-flight: concurrent callers await the one
    /// in-progress attempt rather than racing into parallel connects.
    /// On success the connection's notification stream is bound to the
    /// reconciler. Failures propagate; there is no reconnect loop here,
    /// the caller's next [`flush`](Self::flush) retries.
    pub async fn ensure_connected(&self) -> Result<()> {
        if self.is_connected().await {
            return Ok(());
        }
        let _connecting = self.connect_lock.lock().await;
        if self.is_connected().await {
            return Ok(());
        }

        debug!(address = %self.address, "connecting");
        let mut connection = self.transport.connect(&self.address).await?;
        connection.subscribe(self.notify_tx.clone()).await?;
        *self.connection.lock().await = Some(connection);
        debug!(address = %self.address, "connected");
        Ok(())
    }

    /// Transmit every queued frame.
    ///
    /// Holds the send domain for the whole batch, connects lazily, and
    /// writes frames in enqueue order. If connecting or any write fails,
    /// the entire drained batch is restored ahead of anything enqueued
    /// concurrently and the error propagates. A failed flush delays
    /// frames, it never drops them.
    ///
    /// The connection is left open afterwards for the next batch.
    pub async fn flush(&self) -> Result<()> {
        let _sending = self.send_lock.lock().await;

        let batch = self.buffer.lock().await.take();
        if batch.is_empty() {
            return Ok(());
        }

        debug!(frames = batch.len(), "flushing transmit buffer");
        if let Err(err) = self.send_batch(&batch).await {
            warn!(error = %err, frames = batch.len(), "flush failed, restoring batch");
            self.buffer.lock().await.restore(batch);
            return Err(err);
        }
        Ok(())
    }

    /// Gracefully stop the reconciler task.
    ///
    /// Dropping the controller also cancels the task, but `shutdown`
    /// additionally waits for it to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.reconciler.take() {
            let _ = task.await;
        }
    }

    async fn enqueue<I>(&self, frames: I)
    where
        I: IntoIterator<Item = Frame>,
    {
        let mut buffer = self.buffer.lock().await;
        for frame in frames {
            buffer.enqueue(frame, self.repeat);
        }
    }

    async fn send_batch(&self, batch: &[Frame]) -> Result<()> {
        self.ensure_connected().await?;
        let mut guard = self.connection.lock().await;
        let connection = guard.as_mut().ok_or(Error::NotConnected)?;
        for frame in batch {
            let bytes = frame::encode(frame)?;
            connection.write(&bytes).await?;
        }
        Ok(())
    }
}

impl Drop for GoveeLight {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ---------------------------------------------------------------------
// Reconciler task
// ---------------------------------------------------------------------

/// Consume raw notifications until cancelled or the channel closes.
async fn reconciler_loop(
    mut notify_rx: mpsc::Receiver<Vec<u8>>,
    profile: DeviceProfile,
    state: Arc<Mutex<LightState>>,
    event_tx: broadcast::Sender<LightEvent>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("reconciler task cancelled");
                break;
            }
            notification = notify_rx.recv() => match notification {
                Some(bytes) => handle_notification(&bytes, profile, &state, &event_tx).await,
                None => {
                    debug!("notification channel closed, exiting reconciler");
                    break;
                }
            },
        }
    }
}

/// Decode one notification and apply it to the cached state.
///
/// Frames with bad checksums are dropped with a warning; the next poll
/// cycle refreshes the field. COMMAND-head frames carry no state and
/// are ignored, only requests are answered by the device.
async fn handle_notification(
    bytes: &[u8],
    profile: DeviceProfile,
    state: &Mutex<LightState>,
    event_tx: &broadcast::Sender<LightEvent>,
) {
    let frame = match frame::decode(bytes) {
        Ok(frame) => frame,
        Err(err) => {
            warn!(error = %err, "dropping malformed notification");
            return;
        }
    };
    if frame.head != Head::Request {
        debug!(cmd = ?frame.cmd, "ignoring command-head notification");
        return;
    }

    let event = reconcile(&frame, profile, state).await;
    // One event per inbound frame, never batched. No subscribers is fine.
    let _ = event_tx.send(event);
}

/// Apply one decoded response to the cached state, replacing the
/// matching field as a whole.
///
/// The payload is always the full 17 zero-padded bytes from
/// [`frame::decode`], so fixed offsets are in bounds.
async fn reconcile(frame: &Frame, profile: DeviceProfile, state: &Mutex<LightState>) -> LightEvent {
    let mut state = state.lock().await;
    match frame.cmd {
        Cmd::Power => {
            let on = frame.payload[0] == 0x01;
            state.power = Some(on);
            LightEvent::PowerUpdated { on }
        }
        Cmd::Brightness => {
            let brightness = command::device_to_brightness(frame.payload[0], profile);
            state.brightness = Some(brightness);
            LightEvent::BrightnessUpdated { brightness }
        }
        Cmd::Color => {
            // Byte 0 is the color-kind selector, ignored for state.
            let color = Rgb::new(frame.payload[1], frame.payload[2], frame.payload[3]);
            state.color = Some(color);
            LightEvent::ColorUpdated { color }
        }
        Cmd::Segment => {
            // Bytes 0-1 are head/segment-index selectors.
            let color = Rgb::new(frame.payload[2], frame.payload[3], frame.payload[4]);
            state.color = Some(color);
            LightEvent::ColorUpdated { color }
        }
    }
}
