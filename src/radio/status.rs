//! Status decoding
//!
//! Derives the ready flag, band-limit flag and PLL readback from a status
//! snapshot. Decoding is total: every 5-byte snapshot is valid.

use super::codec::pll_to_frequency;
use super::registers::ReadRegisters;
use crate::types::Pll;

/// Decoded chip status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TunerStatus {
    /// Ready flag (RF)
    pub ready: bool,
    /// Band limit flag (BLF)
    pub band_limit: bool,
    /// PLL word the chip reports
    pub pll: Pll,
}

impl TunerStatus {
    /// Decode a status snapshot
    #[must_use]
    pub const fn decode(read: &ReadRegisters) -> Self {
        Self {
            ready: read.ready(),
            band_limit: read.band_limit(),
            pll: read.pll(),
        }
    }

    /// Tuned frequency implied by the PLL readback, in MHz
    #[must_use]
    pub fn frequency(&self) -> f32 {
        pll_to_frequency(self.pll)
    }
}

impl From<ReadRegisters> for TunerStatus {
    fn from(read: ReadRegisters) -> Self {
        Self::decode(&read)
    }
}
