//! Matrix Keypad Driver
//!
//! Scans a 4x4 key matrix: each row is driven low in turn and the pulled-up
//! columns are sampled. A key is reported once per press; holding it does
//! not repeat and it must be released before it is reported again.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::KEYPAD_LAYOUT;
use crate::types::Key;
use crate::ui::KeySource;

/// Number of driven rows
pub const ROWS: usize = 4;

/// Number of sensed columns
pub const COLS: usize = 4;

/// Press edge detector
///
/// Fed with the key seen on each scan, reports it only on the scan where it
/// first appears.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PressDetector {
    held: Option<Key>,
}

impl PressDetector {
    /// Create a detector with nothing held
    #[must_use]
    pub const fn new() -> Self {
        Self { held: None }
    }

    /// Update with the key seen on this scan, returns a newly pressed key
    pub fn update(&mut self, seen: Option<Key>) -> Option<Key> {
        let pressed = match (self.held, seen) {
            (None, Some(key)) => Some(key),
            (Some(held), Some(key)) if held != key => Some(key),
            _ => None,
        };
        self.held = seen;
        pressed
    }

    /// Key currently held down
    #[must_use]
    pub const fn held(&self) -> Option<Key> {
        self.held
    }
}

/// 4x4 matrix keypad
pub struct MatrixKeypad<R, C> {
    rows: [R; ROWS],
    cols: [C; COLS],
    layout: [[char; COLS]; ROWS],
    detector: PressDetector,
}

impl<R: OutputPin, C: InputPin> MatrixKeypad<R, C> {
    /// Create a keypad with the standard layout
    pub fn new(rows: [R; ROWS], cols: [C; COLS]) -> Self {
        Self::with_layout(rows, cols, KEYPAD_LAYOUT)
    }

    /// Create a keypad with a custom key cap layout, indexed `[row][column]`
    pub fn with_layout(
        mut rows: [R; ROWS],
        cols: [C; COLS],
        layout: [[char; COLS]; ROWS],
    ) -> Self {
        // Idle rows high so no column is pulled down
        for row in &mut rows {
            let _ = row.set_high();
        }
        Self {
            rows,
            cols,
            layout,
            detector: PressDetector::new(),
        }
    }

    /// Scan the whole matrix once, returns the first key found down
    ///
    /// A pin error reads as "not pressed".
    pub fn scan(&mut self) -> Option<Key> {
        let mut found = None;

        for (r, row) in self.rows.iter_mut().enumerate() {
            if row.set_low().is_err() {
                continue;
            }

            if found.is_none() {
                found = self
                    .cols
                    .iter_mut()
                    .position(|col| col.is_low().unwrap_or(false))
                    .and_then(|c| Key::from_char(self.layout[r][c]));
            }

            let _ = row.set_high();
        }

        found
    }

    /// Give the pins back
    pub fn release(self) -> ([R; ROWS], [C; COLS]) {
        (self.rows, self.cols)
    }
}

impl<R: OutputPin, C: InputPin> KeySource for MatrixKeypad<R, C> {
    fn poll_key(&mut self) -> Option<Key> {
        let seen = self.scan();
        let pressed = self.detector.update(seen);
        if let Some(key) = pressed {
            trace!("keypad {}", key);
        }
        pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_key_reported_once() {
        let mut d = PressDetector::new();
        assert_eq!(d.update(Some(Key::Seek)), Some(Key::Seek));
        assert_eq!(d.update(Some(Key::Seek)), None);
        assert_eq!(d.update(None), None);
        assert_eq!(d.update(Some(Key::Seek)), Some(Key::Seek));
    }

    #[test]
    fn rolling_to_another_key_reports_it() {
        let mut d = PressDetector::new();
        d.update(Some(Key::Enter));
        assert_eq!(d.update(Some(Key::Seek)), Some(Key::Seek));
    }
}
