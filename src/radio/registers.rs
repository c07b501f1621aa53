//! TEA5767 register images
//!
//! The chip has no register addresses: every write sends all five control
//! bytes and every read returns all five status bytes. The driver keeps the
//! two directions in separate value types so a status byte can never be
//! mistaken for a control byte.
//!
//! ```text
//! write  WR0  MUTE SM   PLL13 .. PLL8
//!        WR1  PLL7 .. PLL0
//!        WR2  SUD  SSL1 SSL0 HLSI MS   MR   ML   SWP1
//!        WR3  SWP2 STBY BL   XTAL SMUT HCC  SNC  SI
//!        WR4  reserved (0)
//!
//! read   RD0  RF   BLF  PLL13 .. PLL8
//!        RD1  PLL7 .. PLL0
//!        RD2  STEREO IF6 .. IF0
//!        RD3  LEV3 .. LEV0 CI3 CI2 CI1 0
//!        RD4  reserved
//! ```

use crate::config::REGISTER_COUNT;
use crate::types::{Pll, SeekDirection};

/// Register bit masks
mod bits {
    // WR0
    pub const MUTE: u8 = 0x80;
    pub const SEARCH_MODE: u8 = 0x40;
    pub const PLL_HIGH: u8 = 0x3F;

    // WR2
    pub const SEARCH_UP: u8 = 0x80;
    pub const STOP_LEVEL_SHIFT: u8 = 5;
    pub const STOP_LEVEL: u8 = 0x60;
    pub const HIGH_SIDE_INJECTION: u8 = 0x10;
    pub const FORCE_MONO: u8 = 0x08;
    pub const MUTE_RIGHT: u8 = 0x04;
    pub const MUTE_LEFT: u8 = 0x02;

    // WR3
    pub const JAPAN_BAND: u8 = 0x20;
    pub const XTAL_32768: u8 = 0x10;
    pub const SOFT_MUTE: u8 = 0x08;
    pub const HIGH_CUT: u8 = 0x04;
    pub const STEREO_NOISE_CANCEL: u8 = 0x02;
    pub const SEARCH_INDICATOR: u8 = 0x01;

    // RD0
    pub const READY: u8 = 0x80;
    pub const BAND_LIMIT: u8 = 0x40;

    // RD2
    pub const STEREO: u8 = 0x80;
    pub const IF_COUNTER: u8 = 0x7F;
}

/// Signal level at which a seek stops
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SearchStopLevel {
    /// ADC level 5
    Low,
    /// ADC level 7
    #[default]
    Mid,
    /// ADC level 10
    High,
}

impl SearchStopLevel {
    const fn as_bits(self) -> u8 {
        match self {
            Self::Low => 0b01,
            Self::Mid => 0b10,
            Self::High => 0b11,
        }
    }

    // 0b00 is "not allowed in search mode"; treat it as the lowest level
    const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b10 => Self::Mid,
            0b11 => Self::High,
            _ => Self::Low,
        }
    }
}

/// Search and audio settings packed into WR2
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SearchConfig {
    /// Seek direction (SUD)
    pub direction: SeekDirection,
    /// Seek stop level (SSL)
    pub stop_level: SearchStopLevel,
    /// High side LO injection (HLSI)
    pub high_side_injection: bool,
    /// Stereo decoding enabled (MS clear)
    pub stereo: bool,
    /// Both audio channels muted (MR, ML)
    pub muted: bool,
}

impl SearchConfig {
    /// Power-on settings: search up, mid level, high side, stereo, unmuted
    pub const DEFAULT: Self = Self {
        direction: SeekDirection::Up,
        stop_level: SearchStopLevel::Mid,
        high_side_injection: true,
        stereo: true,
        muted: false,
    };

    const fn to_byte(self) -> u8 {
        let mut b = self.stop_level.as_bits() << bits::STOP_LEVEL_SHIFT;
        if matches!(self.direction, SeekDirection::Up) {
            b |= bits::SEARCH_UP;
        }
        if self.high_side_injection {
            b |= bits::HIGH_SIDE_INJECTION;
        }
        if !self.stereo {
            b |= bits::FORCE_MONO;
        }
        if self.muted {
            b |= bits::MUTE_RIGHT | bits::MUTE_LEFT;
        }
        b
    }

    const fn from_byte(b: u8) -> Self {
        Self {
            direction: if b & bits::SEARCH_UP != 0 {
                SeekDirection::Up
            } else {
                SeekDirection::Down
            },
            stop_level: SearchStopLevel::from_bits((b & bits::STOP_LEVEL) >> bits::STOP_LEVEL_SHIFT),
            high_side_injection: b & bits::HIGH_SIDE_INJECTION != 0,
            stereo: b & bits::FORCE_MONO == 0,
            muted: b & (bits::MUTE_RIGHT | bits::MUTE_LEFT) == (bits::MUTE_RIGHT | bits::MUTE_LEFT),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// FM band limits (BL)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BandLimits {
    /// 87.5 - 108 MHz
    #[default]
    UsEurope,
    /// 76 - 91 MHz
    Japan,
}

/// Reference clock source (XTAL)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReferenceClock {
    /// 32.768 kHz watch crystal
    #[default]
    Xtal32768,
    /// 13 MHz crystal
    Xtal13M,
}

/// Band and signal-processing settings packed into WR3
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BandConfig {
    /// Band limits
    pub band: BandLimits,
    /// Reference clock
    pub clock: ReferenceClock,
    /// Soft mute
    pub soft_mute: bool,
    /// High cut control
    pub high_cut_control: bool,
    /// Stereo noise cancelling
    pub stereo_noise_cancelling: bool,
    /// Ready flag routed to SWPORT1 (SI)
    pub ready_on_port1: bool,
}

impl BandConfig {
    /// Power-on settings: Europe band, 32.768 kHz, SNC on, ready flag on SWPORT1
    pub const DEFAULT: Self = Self {
        band: BandLimits::UsEurope,
        clock: ReferenceClock::Xtal32768,
        soft_mute: false,
        high_cut_control: false,
        stereo_noise_cancelling: true,
        ready_on_port1: true,
    };

    const fn to_byte(self) -> u8 {
        let mut b = 0;
        if matches!(self.band, BandLimits::Japan) {
            b |= bits::JAPAN_BAND;
        }
        if matches!(self.clock, ReferenceClock::Xtal32768) {
            b |= bits::XTAL_32768;
        }
        if self.soft_mute {
            b |= bits::SOFT_MUTE;
        }
        if self.high_cut_control {
            b |= bits::HIGH_CUT;
        }
        if self.stereo_noise_cancelling {
            b |= bits::STEREO_NOISE_CANCEL;
        }
        if self.ready_on_port1 {
            b |= bits::SEARCH_INDICATOR;
        }
        b
    }

    const fn from_byte(b: u8) -> Self {
        Self {
            band: if b & bits::JAPAN_BAND != 0 {
                BandLimits::Japan
            } else {
                BandLimits::UsEurope
            },
            clock: if b & bits::XTAL_32768 != 0 {
                ReferenceClock::Xtal32768
            } else {
                ReferenceClock::Xtal13M
            },
            soft_mute: b & bits::SOFT_MUTE != 0,
            high_cut_control: b & bits::HIGH_CUT != 0,
            stereo_noise_cancelling: b & bits::STEREO_NOISE_CANCEL != 0,
            ready_on_port1: b & bits::SEARCH_INDICATOR != 0,
        }
    }
}

impl Default for BandConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Control bytes sent to the chip (immutable)
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WriteRegisters([u8; REGISTER_COUNT]);

impl WriteRegisters {
    /// All-zero image
    #[must_use]
    pub const fn new() -> Self {
        Self([0; REGISTER_COUNT])
    }

    /// Power-on image: default WR2/WR3, zero PLL, WR4 cleared
    #[must_use]
    pub const fn power_on() -> Self {
        Self::new()
            .with_search_config(SearchConfig::DEFAULT)
            .with_band_config(BandConfig::DEFAULT)
    }

    /// Raw bytes in transmit order
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; REGISTER_COUNT] {
        self.0
    }

    /// Pack a PLL word into WR0[5:0] and WR1 (returns new image)
    ///
    /// Mute and search mode in WR0 are left as they are.
    #[must_use]
    pub const fn with_pll(self, pll: Pll) -> Self {
        let mut regs = self.0;
        regs[0] = (regs[0] & !bits::PLL_HIGH) | (pll.high() & bits::PLL_HIGH);
        regs[1] = pll.low();
        Self(regs)
    }

    /// Set or clear search mode (SM) (returns new image)
    #[must_use]
    pub const fn with_search_mode(self, on: bool) -> Self {
        self.with_wr0_bit(bits::SEARCH_MODE, on)
    }

    /// Set or clear the mute bit (returns new image)
    #[must_use]
    pub const fn with_mute(self, on: bool) -> Self {
        self.with_wr0_bit(bits::MUTE, on)
    }

    /// Set only the search direction in WR2 (returns new image)
    #[must_use]
    pub const fn with_search_direction(self, direction: SeekDirection) -> Self {
        let mut regs = self.0;
        regs[2] = match direction {
            SeekDirection::Up => regs[2] | bits::SEARCH_UP,
            SeekDirection::Down => regs[2] & !bits::SEARCH_UP,
        };
        Self(regs)
    }

    /// Replace WR2 (returns new image)
    ///
    /// SWPORT1 is always driven low.
    #[must_use]
    pub const fn with_search_config(self, config: SearchConfig) -> Self {
        let mut regs = self.0;
        regs[2] = config.to_byte();
        Self(regs)
    }

    /// Replace WR3 (returns new image)
    ///
    /// Standby and SWPORT2 are always cleared.
    #[must_use]
    pub const fn with_band_config(self, config: BandConfig) -> Self {
        let mut regs = self.0;
        regs[3] = config.to_byte();
        Self(regs)
    }

    const fn with_wr0_bit(self, mask: u8, on: bool) -> Self {
        let mut regs = self.0;
        regs[0] = if on { regs[0] | mask } else { regs[0] & !mask };
        Self(regs)
    }

    /// PLL word held in WR0/WR1
    #[must_use]
    pub const fn pll(&self) -> Pll {
        Pll::from_parts(self.0[0], self.0[1])
    }

    /// Search mode bit
    #[must_use]
    pub const fn search_mode(&self) -> bool {
        self.0[0] & bits::SEARCH_MODE != 0
    }

    /// Mute bit
    #[must_use]
    pub const fn muted(&self) -> bool {
        self.0[0] & bits::MUTE != 0
    }

    /// Decoded WR2
    #[must_use]
    pub const fn search_config(&self) -> SearchConfig {
        SearchConfig::from_byte(self.0[2])
    }

    /// Decoded WR3
    #[must_use]
    pub const fn band_config(&self) -> BandConfig {
        BandConfig::from_byte(self.0[3])
    }
}

impl Default for WriteRegisters {
    fn default() -> Self {
        Self::power_on()
    }
}

impl core::fmt::Debug for WriteRegisters {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "WriteRegisters({:02X?})", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for WriteRegisters {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "WR {:x}", self.0);
    }
}

/// Status bytes last received from the chip (immutable)
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadRegisters([u8; REGISTER_COUNT]);

impl ReadRegisters {
    /// Wrap a complete read
    #[must_use]
    pub const fn from_bytes(bytes: [u8; REGISTER_COUNT]) -> Self {
        Self(bytes)
    }

    /// Raw bytes in receive order
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; REGISTER_COUNT] {
        self.0
    }

    /// Overlay a short read (returns new image)
    ///
    /// `received[i]` replaces byte `i`; bytes past the end of `received`
    /// keep their previous value. Extra bytes are ignored.
    #[must_use]
    pub fn merge_partial(self, received: &[u8]) -> Self {
        let mut regs = self.0;
        for (slot, &byte) in regs.iter_mut().zip(received) {
            *slot = byte;
        }
        Self(regs)
    }

    /// Ready flag (RF): a station was found or the band limit was hit
    #[must_use]
    pub const fn ready(&self) -> bool {
        self.0[0] & bits::READY != 0
    }

    /// Band limit flag (BLF)
    #[must_use]
    pub const fn band_limit(&self) -> bool {
        self.0[0] & bits::BAND_LIMIT != 0
    }

    /// PLL word the chip is currently tuned to
    #[must_use]
    pub const fn pll(&self) -> Pll {
        Pll::from_parts(self.0[0], self.0[1])
    }

    /// Stereo pilot detected
    #[must_use]
    pub const fn stereo(&self) -> bool {
        self.0[2] & bits::STEREO != 0
    }

    /// IF counter result
    #[must_use]
    pub const fn if_counter(&self) -> u8 {
        self.0[2] & bits::IF_COUNTER
    }

    /// ADC signal level (0-15)
    #[must_use]
    pub const fn signal_level(&self) -> u8 {
        self.0[3] >> 4
    }

    /// Chip identification bits
    #[must_use]
    pub const fn chip_id(&self) -> u8 {
        (self.0[3] >> 1) & 0x07
    }
}

impl core::fmt::Debug for ReadRegisters {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ReadRegisters({:02X?})", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ReadRegisters {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RD {:x}", self.0);
    }
}

/// Both register images of one tuner
///
/// The write side is what the driver last sent, the read side what the chip
/// last reported. They never share storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterImage {
    write: WriteRegisters,
    read: ReadRegisters,
}

impl RegisterImage {
    /// Image with the power-on write settings and an all-zero readback
    #[must_use]
    pub const fn new() -> Self {
        Self {
            write: WriteRegisters::power_on(),
            read: ReadRegisters::from_bytes([0; REGISTER_COUNT]),
        }
    }

    /// Last committed control bytes
    #[must_use]
    pub const fn write(&self) -> WriteRegisters {
        self.write
    }

    /// Capture of the last status bytes
    #[must_use]
    pub const fn read_snapshot(&self) -> ReadRegisters {
        self.read
    }

    /// Commit a write image after it reached the chip
    pub fn commit_write(&mut self, write: WriteRegisters) {
        self.write = write;
    }

    /// Commit a status image after it was received
    pub fn commit_read(&mut self, read: ReadRegisters) {
        self.read = read;
    }
}
