//! Chip Link
//!
//! The byte exchange between driver and tuner. The chip is written and read
//! as a whole: five control bytes out, five status bytes in.

use core::fmt;

use embedded_hal::i2c::ErrorKind;

use crate::config::REGISTER_COUNT;

/// Transport result
pub type TransportResult<T> = Result<T, TransportError>;

/// Bytes that did arrive before a read was cut short
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PartialRead {
    bytes: [u8; REGISTER_COUNT],
    len: usize,
}

impl PartialRead {
    /// Record `received` (at most [`REGISTER_COUNT`] bytes are kept)
    #[must_use]
    pub fn new(received: &[u8]) -> Self {
        let len = received.len().min(REGISTER_COUNT);
        let mut bytes = [0; REGISTER_COUNT];
        bytes[..len].copy_from_slice(&received[..len]);
        Self { bytes, len }
    }

    /// The bytes actually received
    #[must_use]
    pub fn received(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Number of bytes received
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True if nothing arrived
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Bus exchange failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// The bus reported an error
    Bus(ErrorKind),
    /// Fewer than five bytes were accepted by the chip
    ShortWrite {
        /// Bytes accepted
        written: usize,
    },
    /// Fewer than five bytes were returned by the chip
    ShortRead(PartialRead),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(kind) => write!(f, "bus error: {kind}"),
            Self::ShortWrite { written } => {
                write!(f, "short write: {written} of {REGISTER_COUNT} bytes")
            }
            Self::ShortRead(partial) => {
                write!(f, "short read: {} of {REGISTER_COUNT} bytes", partial.len())
            }
        }
    }
}

/// Register exchange with the tuner chip
///
/// Implemented by [`I2cLink`](super::i2c::I2cLink) for real hardware; tests
/// supply their own.
pub trait ChipLink {
    /// Send the full write image
    fn write_image(&mut self, image: &[u8; REGISTER_COUNT]) -> TransportResult<()>;

    /// Fetch the full read image
    fn read_image(&mut self) -> TransportResult<[u8; REGISTER_COUNT]>;
}

impl<T: ChipLink + ?Sized> ChipLink for &mut T {
    fn write_image(&mut self, image: &[u8; REGISTER_COUNT]) -> TransportResult<()> {
        (**self).write_image(image)
    }

    fn read_image(&mut self) -> TransportResult<[u8; REGISTER_COUNT]> {
        (**self).read_image()
    }
}
