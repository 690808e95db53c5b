extern crate std;

use core::convert::Infallible;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use embedded_hal::{blocking::delay::DelayMs, digital::v2::InputPin};
use usbd_human_interface_device::page::Keyboard;

use crate::{
    config::{DISPLAY_HEIGHT, DISPLAY_WIDTH},
    hid::KeyboardOutput,
    render::Frame,
};

/// Simulated millisecond clock shared by pins and delays.
#[derive(Clone, Default)]
pub struct Clock {
    now: Rc<Cell<u32>>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u32 {
        self.now.get()
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get() + ms);
    }

    pub fn delay(&self) -> SimDelay {
        SimDelay {
            clock: self.clone(),
            waits: Vec::new(),
        }
    }

    pub fn pin(&self) -> Pin {
        Pin {
            clock: self.clone(),
            timeline: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

/// Delay that moves the simulated clock forward instead of sleeping.
pub struct SimDelay {
    clock: Clock,
    pub waits: Vec<u32>,
}

impl DelayMs<u32> for SimDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.waits.push(ms);
        self.clock.advance(ms);
    }
}

/// Pulled-up switch input whose level follows a timeline of
/// `(from_ms, pressed)` steps. Released before the first step.
#[derive(Clone)]
pub struct Pin {
    clock: Clock,
    timeline: Rc<RefCell<Vec<(u32, bool)>>>,
}

impl Pin {
    /// Level changes to `pressed` at `at_ms` and stays there until the next step.
    pub fn set_at(&self, at_ms: u32, pressed: bool) {
        let mut timeline = self.timeline.borrow_mut();
        timeline.push((at_ms, pressed));
        timeline.sort_by_key(|&(t, _)| t);
    }

    /// Level changes from the current simulated time on.
    pub fn set(&self, pressed: bool) {
        self.set_at(self.clock.now(), pressed);
    }

    fn pressed(&self) -> bool {
        let now = self.clock.now();
        self.timeline
            .borrow()
            .iter()
            .filter(|&&(t, _)| t <= now)
            .last()
            .map(|&(_, p)| p)
            .unwrap_or(false)
    }
}

impl InputPin for Pin {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(!self.pressed())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(self.pressed())
    }
}

/// Input pin whose every read fails.
pub struct BrokenPin;

impl InputPin for BrokenPin {
    type Error = &'static str;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Err("bus glitch")
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Err("bus glitch")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HidCall {
    Press(Keyboard),
    Release(Keyboard),
    ReleaseAll,
}

#[derive(Debug, Default)]
pub struct RecordingKeyboard {
    pub calls: Vec<HidCall>,
}

impl RecordingKeyboard {
    pub fn presses(&self) -> Vec<Keyboard> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HidCall::Press(k) => Some(*k),
                _ => None,
            })
            .collect()
    }

    pub fn release_alls(&self) -> usize {
        self.calls
            .iter()
            .filter(|&&c| c == HidCall::ReleaseAll)
            .count()
    }
}

impl KeyboardOutput for RecordingKeyboard {
    fn press(&mut self, key: Keyboard) {
        self.calls.push(HidCall::Press(key));
    }

    fn release(&mut self, key: Keyboard) {
        self.calls.push(HidCall::Release(key));
    }

    fn release_all(&mut self) {
        self.calls.push(HidCall::ReleaseAll);
    }
}

const W: usize = DISPLAY_WIDTH as usize;
const H: usize = DISPLAY_HEIGHT as usize;

/// 128x64 buffer that clips like the panel and keeps every committed frame.
pub struct RecordingFrame {
    buffer: [[bool; W]; H],
    pub commits: Vec<[[bool; W]; H]>,
    pub fail_commit: Rc<Cell<bool>>,
}

impl Default for RecordingFrame {
    fn default() -> Self {
        RecordingFrame {
            buffer: [[false; W]; H],
            commits: Vec::new(),
            fail_commit: Rc::new(Cell::new(false)),
        }
    }
}

impl RecordingFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.buffer[y][x]
    }

    pub fn lit(&self) -> usize {
        self.buffer.iter().flatten().filter(|&&p| p).count()
    }

    pub fn last_commit(&self) -> Option<&[[bool; W]; H]> {
        self.commits.last()
    }
}

impl OriginDimensions for RecordingFrame {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

impl DrawTarget for RecordingFrame {
    type Color = BinaryColor;
    type Error = &'static str;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if p.x >= 0 && p.y >= 0 && (p.x as usize) < W && (p.y as usize) < H {
                self.buffer[p.y as usize][p.x as usize] = color.is_on();
            }
        }
        Ok(())
    }
}

impl Frame for RecordingFrame {
    fn commit(&mut self) -> Result<(), Self::Error> {
        if self.fail_commit.get() {
            return Err("i2c nack");
        }
        self.commits.push(self.buffer);
        Ok(())
    }
}
