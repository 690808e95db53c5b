use display_interface::{DisplayError, WriteOnlyDataCommand};
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use ssd1306::{mode::BufferedGraphicsMode, size::DisplaySize, Ssd1306};

use crate::bongo::{self, Pose};

/// A buffered monochrome surface: draw into the buffer, then `commit` it to
/// the panel in one go.
pub trait Frame: DrawTarget<Color = BinaryColor> {
    fn commit(&mut self) -> Result<(), Self::Error>;
}

impl<DI, SIZE> Frame for Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>>
where
    DI: WriteOnlyDataCommand,
    SIZE: DisplaySize,
{
    fn commit(&mut self) -> Result<(), DisplayError> {
        self.flush()
    }
}

/// Redraws the cat only when the activity signal flips.
///
/// Holds the signal the panel currently shows; after every redraw it equals
/// the signal that caused it.
#[derive(Debug)]
pub struct RenderGate {
    shown: bool,
}

impl Default for RenderGate {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderGate {
    pub fn new() -> Self {
        RenderGate { shown: false }
    }

    pub fn shown(&self) -> bool {
        self.shown
    }

    /// Unconditional first draw of the idle cat.
    pub fn start<F: Frame>(&mut self, frame: &mut F) -> Result<(), F::Error> {
        self.redraw(frame, false)
    }

    /// Redraws when `active` differs from what is on screen. Returns whether
    /// a redraw happened.
    pub fn refresh<F: Frame>(&mut self, frame: &mut F, active: bool) -> Result<bool, F::Error> {
        if active == self.shown {
            return Ok(false);
        }
        self.redraw(frame, active)?;
        Ok(true)
    }

    fn redraw<F: Frame>(&mut self, frame: &mut F, active: bool) -> Result<(), F::Error> {
        let pose = Pose::from(active);
        debug!("redraw, paws {}", if active { "down" } else { "up" });

        frame.clear(BinaryColor::Off)?;
        bongo::draw(frame, pose)?;
        frame.commit()?;
        self.shown = active;
        Ok(())
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod test;
