//! Radio Control Logic
//!
//! Pure tuner logic (codec, register images, status decoding, seek and
//! keypad state machines) and the driver that runs it against the chip.

pub mod codec;
pub mod entry;
pub mod registers;
pub mod seek;
pub mod status;
pub mod tuner;

pub use tuner::{KeyResponse, Tuner, TunerError, TunerResult, TunerState};
