//! Cached device state types.
//!
//! LED strips report their state asynchronously through notifications,
//! so every field starts out unknown and is filled in as responses to
//! state requests arrive. Fields are replaced atomically as a whole;
//! a partially-decoded response never leaves a field half-updated.

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel, 0-255.
    pub red: u8,
    /// Green channel, 0-255.
    pub green: u8,
    /// Blue channel, 0-255.
    pub blue: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Rgb { red, green, blue }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Rgb { red, green, blue }
    }
}

/// Snapshot of a device's last reported state.
///
/// Each field is `None` until the first successfully decoded response
/// naming that field arrives, and is overwritten by every subsequent
/// matching response (last writer wins). Brightness is expressed in the
/// host's 0-255 range regardless of the device's native encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightState {
    /// Whether the strip is powered on. `None` if not yet reported.
    pub power: Option<bool>,
    /// Brightness in the host 0-255 range. `None` if not yet reported.
    pub brightness: Option<u8>,
    /// Current color. `None` if not yet reported.
    pub color: Option<Rgb>,
}

impl LightState {
    /// Returns `true` once every field has been reported at least once.
    pub fn is_complete(&self) -> bool {
        self.power.is_some() && self.brightness.is_some() && self.color.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_starts_unknown() {
        let state = LightState::default();
        assert_eq!(state.power, None);
        assert_eq!(state.brightness, None);
        assert_eq!(state.color, None);
        assert!(!state.is_complete());
    }

    #[test]
    fn state_complete_when_all_fields_known() {
        let state = LightState {
            power: Some(true),
            brightness: Some(128),
            color: Some(Rgb::new(255, 0, 0)),
        };
        assert!(state.is_complete());
    }

    #[test]
    fn rgb_from_tuple() {
        let color: Rgb = (10, 20, 30).into();
        assert_eq!(color, Rgb::new(10, 20, 30));
    }
}
