//! Compile-time settings. There is no runtime configuration; everything here is
//! baked into the image and reset on every power cycle.

use fugit::{HertzU32, MillisDurationU32};

/// Number of physical switches on the pad.
pub const CHANNELS: usize = 5;

/// How long a changed switch level must hold before it is trusted.
pub const SETTLE: MillisDurationU32 = MillisDurationU32::millis(5);

/// Pause at the end of every polling cycle.
pub const CYCLE: MillisDurationU32 = MillisDurationU32::millis(10);

pub const DISPLAY_WIDTH: u32 = 128;
pub const DISPLAY_HEIGHT: u32 = 64;
pub const DISPLAY_ADDRESS: u8 = 0x3C;
pub const DISPLAY_BUS_RATE: HertzU32 = HertzU32::kHz(400);

// pid.codes test VID/PID
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;
pub const USB_MANUFACTURER: &str = "Pops";
pub const USB_PRODUCT: &str = "Pops Macro Board";
pub const USB_SERIAL: &str = "POPS-0001";

/// Only backs `smallvec` spills; the held key set never outgrows its inline
/// capacity in practice.
pub const HEAP_SIZE: usize = 1024;

/// Channels that, all held at power-up, reboot into the ROM USB bootloader.
pub const BOOTLOADER_CHORD: [usize; 2] = [0, 4];
