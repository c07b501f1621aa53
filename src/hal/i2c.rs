//! I2C Bus Abstractions
//!
//! Carries the tuner's register images over any `embedded-hal` 1.0 I2C bus.

use embedded_hal::i2c::{Error as _, I2c};

use super::link::{ChipLink, TransportError, TransportResult};
use crate::config::{DISPLAY_I2C_ADDR, REGISTER_COUNT, TEA5767_I2C_ADDR};

/// I2C device address wrapper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// TEA5767 FM tuner address
    pub const TEA5767: Self = Self(TEA5767_I2C_ADDR);

    /// SSD1306 OLED display address
    pub const SSD1306: Self = Self(DISPLAY_I2C_ADDR);

    /// Create from 7-bit address
    #[must_use]
    pub const fn new(addr: u8) -> Self {
        Self(addr & 0x7F)
    }

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=u8:#x}", self.0);
    }
}

/// Tuner link over an I2C bus
pub struct I2cLink<I> {
    i2c: I,
    addr: I2cAddress,
}

impl<I: I2c> I2cLink<I> {
    /// Create a link to the tuner at its fixed address
    #[must_use]
    pub const fn new(i2c: I) -> Self {
        Self::with_address(i2c, I2cAddress::TEA5767)
    }

    /// Create a link to a tuner at a non-default address
    #[must_use]
    pub const fn with_address(i2c: I, addr: I2cAddress) -> Self {
        Self { i2c, addr }
    }

    /// Device address in use
    #[must_use]
    pub const fn address(&self) -> I2cAddress {
        self.addr
    }

    /// Give the bus back
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> ChipLink for I2cLink<I> {
    fn write_image(&mut self, image: &[u8; REGISTER_COUNT]) -> TransportResult<()> {
        trace!("tuner write {=[u8]:x}", &image[..]);
        self.i2c
            .write(self.addr.addr(), image)
            .map_err(|e| TransportError::Bus(e.kind()))
    }

    fn read_image(&mut self) -> TransportResult<[u8; REGISTER_COUNT]> {
        let mut buf = [0u8; REGISTER_COUNT];
        self.i2c
            .read(self.addr.addr(), &mut buf)
            .map_err(|e| TransportError::Bus(e.kind()))?;
        trace!("tuner read {=[u8]:x}", &buf[..]);
        Ok(buf)
    }
}
