//! FM Tuner Firmware Library
//!
//! Driver for TEA5767-class single-chip FM tuners controlled over I2C,
//! plus the keypad front end of a small standalone radio: direct frequency
//! entry, four channel presets and hardware seek, with the tuned frequency
//! shown on a two-line display.
//!
//! # Architecture
//!
//! The library is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      DRIVER LAYER                            │
//! │        Tuner (init / tune / seek / status / keys)            │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    PURE RADIO LOGIC                          │
//! │  Codec  │  Register images  │  Status  │  Seek  │  Entry     │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    COLLABORATORS                             │
//! │  ChipLink (I2C)  │  DisplaySink (OLED)  │  KeySource (matrix) │
//! ├─────────────────────────────────────────────────────────────┤
//! │                 RTOS / SCHEDULER (binary only)               │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Immutable-by-default**: Register images are values; edits return new instances
//! - **Type-driven design**: Custom types enforce invariants at compile time
//! - **No sleeping in the driver**: Settle times are returned as [`types::SettleWait`]
//! - **Functional core, imperative shell**: Pure logic separated from I/O
//! - **Explicit error handling**: All fallible operations return `Result`

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

#[macro_use]
mod fmt;

/// System configuration and constants
pub mod config;

/// Shared types used across modules
pub mod types;

/// Hardware Abstraction Layer
///
/// Register transport to the tuner chip.
pub mod hal;

/// Radio Control Logic
///
/// Frequency codec, register images, seek and keypad state machines,
/// and the tuner driver.
pub mod radio;

/// User Interface
///
/// Frequency formatting, display and key source traits.
pub mod ui;

/// Peripheral Drivers
///
/// OLED display and matrix keypad.
pub mod drivers;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::hal::i2c::I2cLink;
    pub use crate::hal::link::{ChipLink, TransportError};
    pub use crate::radio::codec::{frequency_to_pll, pll_to_frequency};
    pub use crate::radio::seek::{SeekReport, SeekState};
    pub use crate::radio::status::TunerStatus;
    pub use crate::radio::{KeyResponse, Tuner, TunerError, TunerResult, TunerState};
    pub use crate::ui::{format_frequency, DisplaySink, KeySource, NullDisplay};

    // Common traits
    pub use embedded_hal::delay::DelayNs;
    pub use embedded_hal::i2c::I2c;
}
