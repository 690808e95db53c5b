use embedded_hal::{blocking::delay::DelayMs, digital::v2::InputPin};

use crate::{
    activity,
    channel::{Channel, SwitchState},
    config::{self, CHANNELS},
    hid::KeyboardOutput,
    layout::{self, MacroAction, LAYOUT},
    render::{Frame, RenderGate},
    Error,
};

/// The whole pad: switches, the keyboard they drive and the cat that watches.
pub struct MacroPad<P, K, F>
where
    P: InputPin,
    K: KeyboardOutput,
    F: Frame,
{
    channels: [Channel<P>; CHANNELS],
    layout: &'static [MacroAction; CHANNELS],
    keyboard: K,
    frame: F,
    gate: RenderGate,
}

impl<P, K, F> MacroPad<P, K, F>
where
    P: InputPin,
    K: KeyboardOutput,
    F: Frame,
{
    /// `pins[i]` fires `LAYOUT[i]`.
    pub fn new(pins: [P; CHANNELS], keyboard: K, frame: F) -> Self {
        MacroPad {
            channels: pins.map(Channel::new),
            layout: &LAYOUT,
            keyboard,
            frame,
            gate: RenderGate::new(),
        }
    }

    pub fn keyboard(&self) -> &K {
        &self.keyboard
    }

    pub fn frame(&self) -> &F {
        &self.frame
    }

    pub fn gate(&self) -> &RenderGate {
        &self.gate
    }

    /// Raw level of every switch, in channel order.
    pub fn sample(&self) -> Result<[SwitchState; CHANNELS], P::Error> {
        let mut raw = [SwitchState::Released; CHANNELS];
        for (slot, channel) in raw.iter_mut().zip(self.channels.iter()) {
            *slot = channel.sample()?;
        }
        Ok(raw)
    }

    /// Draws the idle cat. Call once before the first [`MacroPad::cycle`].
    pub fn start(&mut self) -> Result<(), F::Error> {
        info!("pad started with {} channels", CHANNELS);
        self.gate.start(&mut self.frame)
    }

    /// One polling pass: debounce and dispatch every channel, refresh the
    /// display if the activity signal flipped, then wait out the cycle delay.
    /// The cycle delay runs even when a pin read or the display fails.
    pub fn cycle(&mut self, delay: &mut impl DelayMs<u32>) -> Result<(), Error<P::Error, F::Error>> {
        let result = self.scan(delay).and_then(|raw| {
            self.gate
                .refresh(&mut self.frame, activity::any_pressed(&raw))
                .map(|_| ())
                .map_err(Error::Display)
        });

        delay.delay_ms(config::CYCLE.to_millis());
        result
    }

    /// Reads, debounces and dispatches each channel in order. Returns the
    /// first raw read of every channel.
    fn scan(
        &mut self,
        delay: &mut impl DelayMs<u32>,
    ) -> Result<[SwitchState; CHANNELS], Error<P::Error, F::Error>> {
        let mut raw = [SwitchState::Released; CHANNELS];

        let channels = self.channels.iter_mut().zip(self.layout.iter());
        for (slot, (channel, action)) in raw.iter_mut().zip(channels) {
            let level = channel.sample().map_err(Error::Pin)?;
            if let Some(state) = channel.debounce(level, delay).map_err(Error::Pin)? {
                layout::dispatch(action, state, &mut self.keyboard);
            }
            *slot = level;
        }

        Ok(raw)
    }
}

#[cfg(test)]
#[path = "pad_test.rs"]
mod test;
