//! Keypad Frequency Entry
//!
//! Accumulates up to five digits as hundreds, tens, units, tenths and
//! hundredths of a MHz: `1 0 3 2 5 #` enters 103.25 MHz. Letter keys and
//! `*` are passed through as immediate commands without touching the entry.
//!
//! Nothing is ever rejected. `#` commits whatever has been accumulated,
//! 0.0 if no digit was typed.

use crate::config::DigitOverflow;
use crate::types::{Digit, Key, PresetSlot};

/// Number of digit positions
pub const ENTRY_DIGITS: u8 = 5;

/// Cursor of the hundredths digit
const HUNDREDTHS: u8 = ENTRY_DIGITS - 1;

/// What a key press asks the driver to do
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryAction {
    /// Digit stored; cursor now at the given position
    Digit {
        /// Cursor after the digit
        cursor: u8,
        /// Accumulated value so far
        pending: f32,
    },
    /// Digit after the hundredths position was dropped
    DigitIgnored,
    /// Tune to a channel preset
    Preset(PresetSlot),
    /// Start a seek
    Seek,
    /// Tune to the committed value (entry is back to idle)
    Commit(f32),
}

/// Digit accumulation state machine
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrequencyEntry {
    accumulator: f32,
    cursor: u8,
    // Accumulator value before the hundredths digit was applied
    before_hundredths: f32,
    hundredths_entered: bool,
    overflow: DigitOverflow,
}

impl FrequencyEntry {
    /// Create an idle entry
    #[must_use]
    pub const fn new(overflow: DigitOverflow) -> Self {
        Self {
            accumulator: 0.0,
            cursor: 0,
            before_hundredths: 0.0,
            hundredths_entered: false,
            overflow,
        }
    }

    /// Value accumulated so far, in MHz
    #[must_use]
    pub const fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Position the next digit goes to (0-4)
    #[must_use]
    pub const fn cursor(&self) -> u8 {
        self.cursor
    }

    /// True if no digit has been typed since the last commit
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.cursor == 0
    }

    /// Feed one key
    pub fn press(&mut self, key: Key) -> EntryAction {
        match key {
            Key::Digit(d) => self.push_digit(d),
            Key::Preset(slot) => EntryAction::Preset(slot),
            Key::Seek => EntryAction::Seek,
            Key::Enter => {
                let value = self.accumulator;
                self.clear();
                EntryAction::Commit(value)
            }
        }
    }

    /// Drop the pending entry
    pub fn clear(&mut self) {
        *self = Self::new(self.overflow);
    }

    fn push_digit(&mut self, digit: Digit) -> EntryAction {
        let v = f32::from(digit.value());

        match self.cursor {
            0 => self.accumulator = 100.0 * v,
            1 => self.accumulator += 10.0 * v,
            2 => self.accumulator += v,
            3 => self.accumulator += 0.1 * v,
            _ => {
                if !self.hundredths_entered {
                    self.before_hundredths = self.accumulator;
                    self.hundredths_entered = true;
                    self.accumulator += 0.01 * v;
                } else {
                    match self.overflow {
                        DigitOverflow::Overwrite => {
                            self.accumulator = self.before_hundredths + 0.01 * v;
                        }
                        DigitOverflow::Accumulate => self.accumulator += 0.01 * v,
                        DigitOverflow::Ignore => return EntryAction::DigitIgnored,
                    }
                }
            }
        }

        if self.cursor < HUNDREDTHS {
            self.cursor += 1;
        }

        EntryAction::Digit {
            cursor: self.cursor,
            pending: self.accumulator,
        }
    }
}

impl Default for FrequencyEntry {
    fn default() -> Self {
        Self::new(DigitOverflow::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(v: u8) -> Key {
        Key::Digit(Digit::new(v).unwrap())
    }

    #[test]
    fn cursor_stops_at_hundredths() {
        let mut entry = FrequencyEntry::default();
        for v in [1, 0, 3, 2, 5, 7, 8] {
            entry.press(digit(v));
        }
        assert_eq!(entry.cursor(), HUNDREDTHS);
    }

    #[test]
    fn clear_keeps_overflow_mode() {
        let mut entry = FrequencyEntry::new(DigitOverflow::Ignore);
        entry.press(digit(9));
        entry.clear();
        assert_eq!(entry, FrequencyEntry::new(DigitOverflow::Ignore));
    }
}
