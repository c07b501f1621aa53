//! System configuration and hardware constants
//!
//! Compile-time constants for the tuner hardware plus the runtime
//! [`TunerConfig`] handed to the driver at construction.

use crate::types::{PresetSlot, SeekDirection};

/// I2C bus frequency for the tuner and display
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// TEA5767 I2C address (fixed by the chip)
pub const TEA5767_I2C_ADDR: u8 = 0x60;

/// SSD1306 OLED I2C address
pub const DISPLAY_I2C_ADDR: u8 = 0x3C;

/// Number of bytes in each register image (write and read)
pub const REGISTER_COUNT: usize = 5;

/// Lowest legal tuning frequency in MHz
pub const FREQ_LOW_MHZ: f32 = 87.0;

/// Highest legal tuning frequency in MHz
pub const FREQ_HIGH_MHZ: f32 = 108.0;

/// Wait after a seek command before status is read back
pub const SEEK_SETTLE_MS: u32 = 100;

/// Wait after the power-on register write
pub const INIT_SETTLE_MS: u32 = 10;

/// Keypad scan period
pub const KEYPAD_POLL_MS: u32 = 10;

/// Text shown on the first display line at startup
pub const BANNER: &str = ">TEA5767 FMRadio<";

/// Startup frequency in MHz
pub const DEFAULT_FREQUENCY_MHZ: f32 = 88.6;

/// Factory channel presets (keys A-D)
pub const DEFAULT_PRESETS_MHZ: [f32; 4] = [
    88.6,  // Radio Maria
    94.86, // Radio Uno
    97.2,  // Radio 2
    90.7,  // Radio Freccia
];

/// Key caps of the 4x4 matrix keypad, indexed `[row][column]`
pub const KEYPAD_LAYOUT: [[char; 4]; 4] = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

/// Frequency validation applied where user input enters the driver
///
/// The codec never validates; this switch only guards keypad commits and
/// preset selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangePolicy {
    /// Accept anything
    #[default]
    Permissive,
    /// Reject frequencies outside [`FREQ_LOW_MHZ`, `FREQ_HIGH_MHZ`]
    Strict,
}

impl RangePolicy {
    /// Check whether a frequency may be tuned under this policy
    #[must_use]
    pub fn permits(self, mhz: f32) -> bool {
        match self {
            Self::Permissive => true,
            Self::Strict => (FREQ_LOW_MHZ..=FREQ_HIGH_MHZ).contains(&mhz),
        }
    }
}

/// What to do when the bus returns fewer than [`REGISTER_COUNT`] bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadPolicy {
    /// Fail the command and leave tuner state untouched
    #[default]
    Strict,
    /// Keep the last known value for every byte not received
    MergeStale,
}

/// Handling of digits typed after the hundredths position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitOverflow {
    /// Each extra digit replaces the hundredths digit
    #[default]
    Overwrite,
    /// Each extra digit adds another hundredths contribution
    Accumulate,
    /// Extra digits are dropped
    Ignore,
}

/// Four fixed channel presets, read-only after construction
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelPresets([f32; 4]);

impl ChannelPresets {
    /// Create from four frequencies in MHz (A-D order)
    #[must_use]
    pub const fn new(mhz: [f32; 4]) -> Self {
        Self(mhz)
    }

    /// Frequency stored in a slot
    #[must_use]
    pub const fn get(&self, slot: PresetSlot) -> f32 {
        self.0[slot.index()]
    }

    /// All presets in slot order
    #[must_use]
    pub const fn as_array(&self) -> [f32; 4] {
        self.0
    }
}

impl Default for ChannelPresets {
    fn default() -> Self {
        Self::new(DEFAULT_PRESETS_MHZ)
    }
}

/// Runtime driver configuration
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TunerConfig {
    /// Channel presets for keys A-D
    pub presets: ChannelPresets,
    /// Direction used by the `*` key
    pub seek_direction: SeekDirection,
    /// Validation at keypad commit and preset selection
    pub range_policy: RangePolicy,
    /// Short-read handling
    pub read_policy: ReadPolicy,
    /// Handling of a sixth or later digit
    pub digit_overflow: DigitOverflow,
    /// Settle wait after a seek command
    pub seek_settle_ms: u32,
    /// Settle wait after initialization
    pub init_settle_ms: u32,
}

impl TunerConfig {
    /// Factory configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            presets: ChannelPresets::new(DEFAULT_PRESETS_MHZ),
            seek_direction: SeekDirection::Up,
            range_policy: RangePolicy::Permissive,
            read_policy: ReadPolicy::Strict,
            digit_overflow: DigitOverflow::Overwrite,
            seek_settle_ms: SEEK_SETTLE_MS,
            init_settle_ms: INIT_SETTLE_MS,
        }
    }

    /// Replace the channel presets
    #[must_use]
    pub const fn with_presets(self, presets: ChannelPresets) -> Self {
        Self { presets, ..self }
    }

    /// Set the `*` key seek direction
    #[must_use]
    pub const fn with_seek_direction(self, seek_direction: SeekDirection) -> Self {
        Self {
            seek_direction,
            ..self
        }
    }

    /// Set the range validation policy
    #[must_use]
    pub const fn with_range_policy(self, range_policy: RangePolicy) -> Self {
        Self {
            range_policy,
            ..self
        }
    }

    /// Set the short-read policy
    #[must_use]
    pub const fn with_read_policy(self, read_policy: ReadPolicy) -> Self {
        Self {
            read_policy,
            ..self
        }
    }

    /// Set the digit overflow behavior
    #[must_use]
    pub const fn with_digit_overflow(self, digit_overflow: DigitOverflow) -> Self {
        Self {
            digit_overflow,
            ..self
        }
    }

    /// Set the seek settle wait
    #[must_use]
    pub const fn with_seek_settle_ms(self, seek_settle_ms: u32) -> Self {
        Self {
            seek_settle_ms,
            ..self
        }
    }
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self::new()
    }
}
