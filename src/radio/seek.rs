//! Seek Controller
//!
//! Three-state machine around the chip's autonomous station search:
//!
//! ```text
//!  Idle ──begin(dir)──▶ Searching ──settle(status)──▶ SettledOrLimited
//!   ▲                                                     │
//!   └──────────────── reset (any tune / seek) ◀───────────┘
//! ```
//!
//! Settling never fails on flag state: whether the chip found a station or
//! ran into the band edge is reported, not judged.

use super::codec::pll_to_frequency;
use super::registers::WriteRegisters;
use super::status::TunerStatus;
use crate::types::{Pll, SeekDirection, SettleWait};

/// Outcome of a settled seek
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SeekReport {
    /// Direction that was searched
    pub direction: SeekDirection,
    /// Ready flag after the settle wait
    pub ready: bool,
    /// Band limit flag after the settle wait
    pub band_limit: bool,
    /// PLL the chip stopped on
    pub pll: Pll,
    /// Frequency the chip stopped on, in MHz
    pub frequency: f32,
}

impl SeekReport {
    /// A station was locked without hitting the band edge
    #[must_use]
    pub const fn found_station(&self) -> bool {
        self.ready && !self.band_limit
    }
}

/// Seek state
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SeekState {
    /// No seek outstanding
    #[default]
    Idle,
    /// Search mode written, waiting for the chip to settle
    Searching(SeekDirection),
    /// Status read back after the settle wait
    SettledOrLimited(SeekReport),
}

/// Seek state machine
#[derive(Clone, Copy, Debug)]
pub struct SeekController {
    state: SeekState,
    settle_ms: u32,
}

impl SeekController {
    /// Create an idle controller with the given settle wait
    #[must_use]
    pub const fn new(settle_ms: u32) -> Self {
        Self {
            state: SeekState::Idle,
            settle_ms,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> SeekState {
        self.state
    }

    /// Direction of the outstanding seek, if any
    #[must_use]
    pub const fn searching(&self) -> Option<SeekDirection> {
        match self.state {
            SeekState::Searching(direction) => Some(direction),
            _ => None,
        }
    }

    /// Prepare a seek from any state
    ///
    /// Returns the image to push (search mode on, SUD per direction) and the
    /// wait to honor before calling [`settle`](Self::settle). The state only
    /// moves to `Searching` through [`mark_searching`](Self::mark_searching),
    /// once the image actually reached the chip.
    #[must_use]
    pub const fn begin(
        &self,
        image: WriteRegisters,
        direction: SeekDirection,
    ) -> (WriteRegisters, SettleWait) {
        let image = image.with_search_mode(true).with_search_direction(direction);
        (image, SettleWait::from_millis(self.settle_ms))
    }

    /// Record that the seek image was delivered
    pub fn mark_searching(&mut self, direction: SeekDirection) {
        self.state = SeekState::Searching(direction);
    }

    /// Finish an outstanding seek with the status read after the wait
    ///
    /// Returns None if no seek is outstanding.
    pub fn settle(&mut self, status: TunerStatus) -> Option<SeekReport> {
        let direction = self.searching()?;
        let report = SeekReport {
            direction,
            ready: status.ready,
            band_limit: status.band_limit,
            pll: status.pll,
            frequency: pll_to_frequency(status.pll),
        };
        self.state = SeekState::SettledOrLimited(report);
        Some(report)
    }

    /// Back to idle (a new tune or seek overrides the search)
    pub fn reset(&mut self) {
        self.state = SeekState::Idle;
    }
}
