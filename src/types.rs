//! Shared types used across the tuner firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;
use core::time::Duration;

/// 14-bit PLL word of the tuner
///
/// The chip counts tuned frequency in 8192 Hz steps. The value can never
/// exceed 14 bits, so it always fits WR0[5:0] / WR1 without touching the
/// control bits above it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pll(u16);

impl Pll {
    /// Largest representable PLL word
    pub const MAX: Self = Self(0x3FFF);

    /// Create from a raw value, returns None if it does not fit 14 bits
    #[must_use]
    pub const fn new(raw: u16) -> Option<Self> {
        if raw <= Self::MAX.0 {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// Create from a wide value, saturating at [`Pll::MAX`]
    #[must_use]
    pub const fn saturating(raw: u32) -> Self {
        if raw > Self::MAX.0 as u32 {
            Self::MAX
        } else {
            Self(raw as u16)
        }
    }

    /// Assemble from the register halves (high byte is masked to 6 bits)
    #[must_use]
    pub const fn from_parts(high: u8, low: u8) -> Self {
        Self((((high & 0x3F) as u16) << 8) | low as u16)
    }

    /// Raw 14-bit value
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Bits 13:8, as stored in WR0
    #[must_use]
    pub const fn high(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Bits 7:0, as stored in WR1
    #[must_use]
    pub const fn low(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

impl fmt::Debug for Pll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pll(0x{:04X})", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Pll {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PLL {=u16:#x}", self.0);
    }
}

/// Seek scan direction (SUD bit)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SeekDirection {
    /// Scan towards higher frequencies
    #[default]
    Up,
    /// Scan towards lower frequencies
    Down,
}

/// Single decimal digit from the keypad
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digit(u8);

impl Digit {
    /// Create a digit, returns None above 9
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Numeric value (0-9)
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Channel preset slot, one per letter key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PresetSlot {
    /// Key `A`
    A,
    /// Key `B`
    B,
    /// Key `C`
    C,
    /// Key `D`
    D,
}

impl PresetSlot {
    /// All slots in preset order
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Index into the preset table
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }
}

/// Key symbol from the 4x4 keypad
///
/// "No key" is represented as `Option::None` by key sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// `0`-`9`
    Digit(Digit),
    /// `A`-`D`
    Preset(PresetSlot),
    /// `*`
    Seek,
    /// `#`
    Enter,
}

impl Key {
    /// Map a keypad character to a key
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => match Digit::new(c as u8 - b'0') {
                Some(d) => Some(Self::Digit(d)),
                None => None,
            },
            'A' => Some(Self::Preset(PresetSlot::A)),
            'B' => Some(Self::Preset(PresetSlot::B)),
            'C' => Some(Self::Preset(PresetSlot::C)),
            'D' => Some(Self::Preset(PresetSlot::D)),
            '*' => Some(Self::Seek),
            '#' => Some(Self::Enter),
            _ => None,
        }
    }

    /// Character printed on the key cap
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Digit(d) => (b'0' + d.value()) as char,
            Self::Preset(PresetSlot::A) => 'A',
            Self::Preset(PresetSlot::B) => 'B',
            Self::Preset(PresetSlot::C) => 'C',
            Self::Preset(PresetSlot::D) => 'D',
            Self::Seek => '*',
            Self::Enter => '#',
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Key {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Key({})", self.as_char());
    }
}

/// Wait the caller must honor before the chip's readback is valid
///
/// Returned instead of sleeping inside the driver, so an async executor can
/// yield while the tuner settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use = "the chip is not settled until this wait has elapsed"]
pub struct SettleWait {
    millis: u32,
}

impl SettleWait {
    /// Create a wait of `millis` milliseconds
    pub const fn from_millis(millis: u32) -> Self {
        Self { millis }
    }

    /// Wait length in milliseconds
    #[must_use]
    pub const fn as_millis(self) -> u32 {
        self.millis
    }

    /// Wait length as a `Duration`
    #[must_use]
    pub const fn duration(self) -> Duration {
        Duration::from_millis(self.millis as u64)
    }
}
