use embedded_hal::{blocking::delay::DelayMs, digital::v2::InputPin};

use crate::config;

/// Logical level of a switch. The inputs are pulled up, so a pressed switch
/// reads electrically low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchState {
    Pressed,
    Released,
}

impl SwitchState {
    pub fn is_pressed(self) -> bool {
        self == SwitchState::Pressed
    }
}

/// One physical switch and its debounced state.
///
/// The stable state only moves after a changed level survives the settling
/// delay, and it moves at most once per [`Channel::debounce`] call.
pub struct Channel<P>
where
    P: InputPin,
{
    pin: P,
    stable: SwitchState,
}

impl<P> Channel<P>
where
    P: InputPin,
{
    /// Switches start released; that is the idle level of a pulled-up input.
    pub fn new(pin: P) -> Self {
        Channel {
            pin,
            stable: SwitchState::Released,
        }
    }

    pub fn stable(&self) -> SwitchState {
        self.stable
    }

    /// Instantaneous, undebounced level of the pin.
    pub fn sample(&self) -> Result<SwitchState, P::Error> {
        if self.pin.is_low()? {
            Ok(SwitchState::Pressed)
        } else {
            Ok(SwitchState::Released)
        }
    }

    /// Confirms `raw` against the stable state. When they differ the pin is
    /// read once more after [`config::SETTLE`]; if it still disagrees with the
    /// stable state the new level is adopted and returned.
    ///
    /// Blocks for the settling delay whenever a change is suspected.
    pub fn debounce(
        &mut self,
        raw: SwitchState,
        delay: &mut impl DelayMs<u32>,
    ) -> Result<Option<SwitchState>, P::Error> {
        if raw == self.stable {
            return Ok(None);
        }

        delay.delay_ms(config::SETTLE.to_millis());

        let settled = self.sample()?;
        if settled == self.stable {
            return Ok(None);
        }
        self.stable = settled;
        Ok(Some(settled))
    }
}

#[cfg(test)]
#[path = "channel_test.rs"]
mod test;
