//! Device generation profiles.
//!
//! Govee strips come in two incompatible protocol generations. The
//! profile is fixed per device instance at construction and governs the
//! brightness native range and which color payload shapes are emitted:
//!
//! | Profile     | Brightness native range | Color addressing              |
//! |-------------|-------------------------|-------------------------------|
//! | `Legacy`    | 0-254                   | single global color           |
//! | `Segmented` | 0-100                   | per-segment, plus global fallback |

/// Protocol generation of a device, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceProfile {
    /// Older firmware: brightness 0-254 native, global color only.
    ///
    /// The native range tops out at 254, not 255; the write-side scaling
    /// targets the same ceiling, so the asymmetry matches observed
    /// device firmware behavior.
    Legacy,
    /// Segment-addressable firmware: brightness 0-100 native,
    /// per-segment color.
    Segmented,
}

impl DeviceProfile {
    /// Maximum brightness value in the device's native encoding.
    pub fn brightness_max(self) -> u8 {
        match self {
            DeviceProfile::Legacy => 254,
            DeviceProfile::Segmented => 100,
        }
    }

    /// Whether this profile supports per-segment color addressing.
    pub fn is_segmented(self) -> bool {
        matches!(self, DeviceProfile::Segmented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_ranges() {
        assert_eq!(DeviceProfile::Legacy.brightness_max(), 254);
        assert_eq!(DeviceProfile::Segmented.brightness_max(), 100);
    }

    #[test]
    fn segmented_flag() {
        assert!(DeviceProfile::Segmented.is_segmented());
        assert!(!DeviceProfile::Legacy.is_segmented());
    }
}
