//! Five-switch macro pad with a bongo cat on a 128x64 OLED.
//!
//! The library holds everything that does not touch RP2040 registers: switch
//! debouncing, the macro table, the render gate and the cat itself. The
//! firmware binary in `main.rs` wires it to real pins, USB and I2C.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod macros;

pub mod activity;
pub mod bongo;
pub mod channel;
pub mod config;
mod error;
pub mod hid;
pub mod layout;
pub mod pad;
pub mod render;

pub use error::Error;

#[cfg(test)]
mod test_stub;
