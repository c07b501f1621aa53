//! Frequency / PLL conversion
//!
//! The TEA5767 runs high side injection with a 32.768 kHz reference, so
//!
//! ```text
//! PLL  = 4 × (f_RF + f_IF) / f_ref      f_IF = 225 kHz, f_ref = 32768 Hz
//! f_RF = PLL × f_ref / 4 − f_IF
//! ```
//!
//! One PLL step is 8192 Hz. Both directions truncate; nothing is rounded.
//! No range checking happens here: a frequency outside 87-108 MHz simply
//! yields a PLL word outside the usable band.

use crate::types::Pll;

/// Intermediate frequency added on the high side, in Hz
pub const IF_HZ: u32 = 225_000;

/// Reference clock in Hz
pub const REF_CLOCK_HZ: u32 = 32_768;

/// Frequency covered by one PLL step, in Hz
pub const PLL_STEP_HZ: u32 = REF_CLOCK_HZ / 4;

/// Convert a tuning frequency to the PLL word
///
/// Negative results clamp to zero and anything beyond 14 bits saturates at
/// [`Pll::MAX`].
#[must_use]
pub fn frequency_to_pll(mhz: f32) -> Pll {
    let hz = f64::from(mhz) * 1_000_000.0 + f64::from(IF_HZ);
    let steps = 4.0 * hz / f64::from(REF_CLOCK_HZ);
    // `as` truncates and clamps negatives and NaN to 0
    Pll::saturating(steps as u32)
}

/// Convert a PLL word back to the tuned frequency in MHz
///
/// PLL words below 28 map to (small) negative frequencies.
#[must_use]
pub fn pll_to_frequency(pll: Pll) -> f32 {
    let hz = i64::from(pll.value()) * i64::from(PLL_STEP_HZ) - i64::from(IF_HZ);
    (hz as f64 / 1_000_000.0) as f32
}

/// Frequency the chip actually tunes when asked for `mhz`
#[must_use]
pub fn quantize(mhz: f32) -> f32 {
    pll_to_frequency(frequency_to_pll(mhz))
}
