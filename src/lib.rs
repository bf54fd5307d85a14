//! Platform-agnostic Rust driver for the NXP LM75BD digital temperature
//! sensor, using the [`embedded-hal`](https://docs.rs/embedded-hal) I2C
//! traits.
//!
//! The driver configures the sensor's operating mode through the
//! configuration register and converts the 11-bit two's-complement
//! temperature readout to degrees Celsius.

#![cfg_attr(not(test), no_std)]

pub mod lm75bd;

pub use lm75bd::{Config, Error, Lm75bd, OperationMode, OsMode, OsPolarity, TEMP_RESOLUTION};
