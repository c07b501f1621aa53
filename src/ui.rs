//! User Interface
//!
//! Frequency text formatting and the two user-facing collaborators of the
//! driver: where text goes ([`DisplaySink`]) and where keys come from
//! ([`KeySource`]).

use core::fmt::Write;

use heapless::String;

use crate::types::Key;

/// Formatted frequency text
pub type FrequencyText = String<24>;

/// Render a frequency as `"<MHz>.<hundredths> MHz"`
///
/// Both parts are truncated, never rounded: 103.249 shows as `103.24 MHz`.
/// The hundredths are always two digits. Negative values keep their sign
/// in front of the magnitude.
#[must_use]
pub fn format_frequency(mhz: f32) -> FrequencyText {
    let sign = if mhz < 0.0 { "-" } else { "" };
    let magnitude = if mhz < 0.0 { -mhz } else { mhz };

    let integral = magnitude as u32;
    let hundredths = ((magnitude - integral as f32) * 100.0) as u32;

    let mut s = FrequencyText::new();
    // Longest output ("-4294967295.99 MHz") fits the buffer
    let _ = write!(s, "{sign}{integral}.{hundredths:02} MHz");
    s
}

/// Write-only text display
///
/// The first line carries a banner, the second the tuned frequency.
pub trait DisplaySink {
    /// Show static banner text
    fn show_banner(&mut self, text: &str);

    /// Show a formatted frequency
    fn show_frequency(&mut self, text: &str);
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn show_banner(&mut self, text: &str) {
        (**self).show_banner(text);
    }

    fn show_frequency(&mut self, text: &str) {
        (**self).show_frequency(text);
    }
}

/// Display sink that drops everything (headless operation)
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn show_banner(&mut self, _text: &str) {}

    fn show_frequency(&mut self, _text: &str) {}
}

/// Source of key presses
pub trait KeySource {
    /// Next key press, or None if no key was pressed since the last poll
    fn poll_key(&mut self) -> Option<Key>;
}

impl<T: KeySource + ?Sized> KeySource for &mut T {
    fn poll_key(&mut self) -> Option<Key> {
        (**self).poll_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_hundredths() {
        assert_eq!(format_frequency(88.05).as_str(), "88.05 MHz");
    }

    #[test]
    fn zero() {
        assert_eq!(format_frequency(0.0).as_str(), "0.00 MHz");
    }
}
