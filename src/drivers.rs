//! Peripheral Drivers
//!
//! Concrete collaborators for the tuner: the OLED panel behind
//! [`DisplaySink`](crate::ui::DisplaySink) and the matrix keypad behind
//! [`KeySource`](crate::ui::KeySource).

pub mod display;
pub mod keypad;
