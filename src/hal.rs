//! Hardware Abstraction Layer
//!
//! The tuner's transport boundary: the [`ChipLink`](link::ChipLink) trait
//! and its I2C implementation.

pub mod i2c;
pub mod link;
