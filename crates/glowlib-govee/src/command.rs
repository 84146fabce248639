//! Command builders and value-range scaling.
//!
//! This module provides functions to construct protocol frames for the
//! supported operations (power, brightness, color, state requests) and
//! to rescale brightness between the host's 0-255 range and the
//! device's native encoding.
//!
//! All functions are pure; they produce frames without performing any
//! I/O. The transmit buffer and controller are responsible for queueing
//! and sending them.

use glowlib_core::Rgb;

use crate::frame::{Cmd, Frame};
use crate::models::DeviceProfile;

/// Color payload kind: sub-selector inside COLOR payloads
/// distinguishing the addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorKind {
    /// Per-segment addressing (`0x15`), segmented devices only.
    Segments = 0x15,
    /// Single global color (`0x02`), current firmware.
    Single = 0x02,
    /// Single global color (`0x0D`), older firmware.
    Legacy = 0x0D,
}

/// First addressable segment index on segmented devices.
const FIRST_SEGMENT: u8 = 0x01;

/// Linear rescale of `value` from one range to another, clamping to the
/// input bounds first.
///
/// The degenerate case `in_max == in_min` returns `out_min`. This single
/// function underlies both scaling directions; only the range tuple
/// differs.
pub fn scale_value(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    if in_max == in_min {
        return out_min;
    }
    let value = value.clamp(in_min, in_max);
    let ratio = (value - in_min) / (in_max - in_min);
    out_min + ratio * (out_max - out_min)
}

/// Rescale a host brightness (0-255) to the device's native range.
///
/// # Example
///
/// ```
/// use glowlib_govee::command::brightness_to_device;
/// use glowlib_govee::models::DeviceProfile;
///
/// assert_eq!(brightness_to_device(255, DeviceProfile::Segmented), 100);
/// assert_eq!(brightness_to_device(255, DeviceProfile::Legacy), 254);
/// assert_eq!(brightness_to_device(0, DeviceProfile::Legacy), 0);
/// ```
pub fn brightness_to_device(brightness: u8, profile: DeviceProfile) -> u8 {
    let max = profile.brightness_max() as f64;
    let native = scale_value(brightness as f64, 0.0, 255.0, 0.0, max).round();
    native.clamp(0.0, max) as u8
}

/// Rescale a device-native brightness to the host 0-255 range.
///
/// The inverse of [`brightness_to_device`]. Legacy devices report
/// 0-254, so the result is still clamped into 0-255 after rescaling.
pub fn device_to_brightness(native: u8, profile: DeviceProfile) -> u8 {
    let max = profile.brightness_max() as f64;
    let host = scale_value(native as f64, 0.0, max, 0.0, 255.0).round();
    host.clamp(0.0, 255.0) as u8
}

/// Build a power on/off command frame.
pub fn set_power(on: bool) -> Frame {
    Frame::command(Cmd::Power, vec![if on { 0x01 } else { 0x00 }])
}

/// Build a brightness command frame carrying the device-native level.
pub fn set_brightness(brightness: u8, profile: DeviceProfile) -> Frame {
    Frame::command(
        Cmd::Brightness,
        vec![brightness_to_device(brightness, profile)],
    )
}

/// Build the color command frames for one color change.
///
/// Legacy devices receive two frames, a [`ColorKind::Single`] and a
/// [`ColorKind::Legacy`] payload, for broad firmware compatibility.
/// Segmented devices receive a [`ColorKind::Segments`] frame addressing
/// segment 1 first (the seven trailing `0xFF` bytes keep the other
/// segments lit), followed by the same two fallback frames.
pub fn set_color(color: Rgb, profile: DeviceProfile) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(3);
    if profile.is_segmented() {
        frames.push(Frame::command(
            Cmd::Color,
            vec![
                ColorKind::Segments as u8,
                FIRST_SEGMENT,
                color.red,
                color.green,
                color.blue,
                0xFF,
                0xFF,
                0xFF,
                0xFF,
                0xFF,
                0xFF,
                0xFF,
            ],
        ));
    }
    frames.push(Frame::command(
        Cmd::Color,
        vec![ColorKind::Single as u8, color.red, color.green, color.blue],
    ));
    frames.push(Frame::command(
        Cmd::Color,
        vec![ColorKind::Legacy as u8, color.red, color.green, color.blue],
    ));
    frames
}

/// Build a power state request frame.
pub fn request_power() -> Frame {
    Frame::request(Cmd::Power, vec![])
}

/// Build a brightness state request frame.
pub fn request_brightness() -> Frame {
    Frame::request(Cmd::Brightness, vec![])
}

/// Build a color state request frame.
///
/// Segmented devices are asked for segment 1; legacy devices answer a
/// plain COLOR request.
pub fn request_color(profile: DeviceProfile) -> Frame {
    if profile.is_segmented() {
        Frame::request(Cmd::Segment, vec![FIRST_SEGMENT])
    } else {
        Frame::request(Cmd::Color, vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Head;

    // ---------------------------------------------------------------
    // Scaling
    // ---------------------------------------------------------------

    #[test]
    fn scale_value_endpoints() {
        assert_eq!(scale_value(0.0, 0.0, 255.0, 0.0, 100.0), 0.0);
        assert_eq!(scale_value(255.0, 0.0, 255.0, 0.0, 100.0), 100.0);
    }

    #[test]
    fn scale_value_clamps_input() {
        assert_eq!(scale_value(300.0, 0.0, 255.0, 0.0, 100.0), 100.0);
        assert_eq!(scale_value(-5.0, 0.0, 255.0, 0.0, 100.0), 0.0);
    }

    #[test]
    fn scale_value_degenerate_range() {
        assert_eq!(scale_value(42.0, 7.0, 7.0, 0.0, 100.0), 0.0);
    }

    #[test]
    fn brightness_to_device_extremes() {
        assert_eq!(brightness_to_device(0, DeviceProfile::Legacy), 0);
        assert_eq!(brightness_to_device(255, DeviceProfile::Legacy), 254);
        assert_eq!(brightness_to_device(0, DeviceProfile::Segmented), 0);
        assert_eq!(brightness_to_device(255, DeviceProfile::Segmented), 100);
    }

    #[test]
    fn brightness_128_legacy_native_value() {
        // round(128 * 254 / 255) = round(127.498) = 127
        assert_eq!(brightness_to_device(128, DeviceProfile::Legacy), 127);
    }

    #[test]
    fn device_to_brightness_extremes() {
        assert_eq!(device_to_brightness(254, DeviceProfile::Legacy), 255);
        assert_eq!(device_to_brightness(100, DeviceProfile::Segmented), 255);
        assert_eq!(device_to_brightness(0, DeviceProfile::Legacy), 0);
    }

    #[test]
    fn device_to_brightness_clamps_out_of_range_reports() {
        // A segmented device reporting above its 0-100 range.
        assert_eq!(device_to_brightness(120, DeviceProfile::Segmented), 255);
        // A legacy report of 255 is clamped to the 254 input ceiling.
        assert_eq!(device_to_brightness(255, DeviceProfile::Legacy), 255);
    }

    #[test]
    fn brightness_round_trip_within_one_step() {
        for profile in [DeviceProfile::Legacy, DeviceProfile::Segmented] {
            for value in 0..=255u8 {
                let native = brightness_to_device(value, profile);
                let back = device_to_brightness(native, profile);
                let diff = (back as i16 - value as i16).abs();
                assert!(
                    diff <= 1,
                    "{profile:?}: {value} -> {native} -> {back} (diff {diff})"
                );
            }
        }
    }

    // ---------------------------------------------------------------
    // Command builders
    // ---------------------------------------------------------------

    #[test]
    fn set_power_payloads() {
        assert_eq!(set_power(true).payload, vec![0x01]);
        assert_eq!(set_power(false).payload, vec![0x00]);
        assert_eq!(set_power(true).head, Head::Command);
        assert_eq!(set_power(true).cmd, Cmd::Power);
    }

    #[test]
    fn set_brightness_carries_native_value() {
        let frame = set_brightness(255, DeviceProfile::Segmented);
        assert_eq!(frame.cmd, Cmd::Brightness);
        assert_eq!(frame.payload, vec![100]);
    }

    #[test]
    fn set_color_legacy_two_frames() {
        let frames = set_color(Rgb::new(255, 0, 0), DeviceProfile::Legacy);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].payload, vec![0x02, 255, 0, 0]);
        assert_eq!(frames[1].payload, vec![0x0D, 255, 0, 0]);
        assert!(frames.iter().all(|f| f.cmd == Cmd::Color));
        assert!(frames.iter().all(|f| f.head == Head::Command));
    }

    #[test]
    fn set_color_segmented_three_frames() {
        let frames = set_color(Rgb::new(255, 0, 0), DeviceProfile::Segmented);
        assert_eq!(frames.len(), 3);
        assert_eq!(
            frames[0].payload,
            vec![0x15, 0x01, 255, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(frames[1].payload, vec![0x02, 255, 0, 0]);
        assert_eq!(frames[2].payload, vec![0x0D, 255, 0, 0]);
    }

    #[test]
    fn request_frames() {
        assert_eq!(request_power().head, Head::Request);
        assert_eq!(request_power().cmd, Cmd::Power);
        assert!(request_power().payload.is_empty());

        assert_eq!(request_brightness().cmd, Cmd::Brightness);

        let legacy = request_color(DeviceProfile::Legacy);
        assert_eq!(legacy.cmd, Cmd::Color);
        assert!(legacy.payload.is_empty());

        let segmented = request_color(DeviceProfile::Segmented);
        assert_eq!(segmented.cmd, Cmd::Segment);
        assert_eq!(segmented.payload, vec![0x01]);
    }
}
