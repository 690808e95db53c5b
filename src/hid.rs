use smallvec::SmallVec;
use usbd_human_interface_device::{page::Keyboard, UsbHidError};

/// Key commands understood by the host-facing keyboard. Nothing is reported
/// back; a command that cannot be delivered is lost.
pub trait KeyboardOutput {
    fn press(&mut self, key: Keyboard);
    fn release(&mut self, key: Keyboard);
    fn release_all(&mut self);
}

/// Keys currently held down, in the order they were pressed.
#[derive(Debug, Default)]
pub struct HeldKeys {
    keys: SmallVec<[Keyboard; 8]>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the key was already down.
    pub fn press(&mut self, key: Keyboard) -> bool {
        if self.keys.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Returns false when the key was not down.
    pub fn release(&mut self, key: Keyboard) -> bool {
        match self.keys.iter().position(|&k| k == key) {
            Some(i) => {
                self.keys.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn keys(&self) -> &[Keyboard] {
        &self.keys
    }
}

/// [`KeyboardOutput`] that keeps the held key set and hands the full set to
/// `write` after every change, one report per change.
///
/// `release_all` always reports, even with nothing held, so the host sees an
/// empty report on every switch release.
pub struct ReportSink<F>
where
    F: FnMut(&[Keyboard]),
{
    held: HeldKeys,
    write: F,
}

impl<F> ReportSink<F>
where
    F: FnMut(&[Keyboard]),
{
    pub fn new(write: F) -> Self {
        ReportSink {
            held: HeldKeys::new(),
            write,
        }
    }

    pub fn held(&self) -> &[Keyboard] {
        self.held.keys()
    }
}

impl<F> KeyboardOutput for ReportSink<F>
where
    F: FnMut(&[Keyboard]),
{
    fn press(&mut self, key: Keyboard) {
        if self.held.press(key) {
            (self.write)(self.held.keys());
        }
    }

    fn release(&mut self, key: Keyboard) {
        if self.held.release(key) {
            (self.write)(self.held.keys());
        }
    }

    fn release_all(&mut self) {
        self.held.clear();
        (self.write)(self.held.keys());
    }
}

/// The newest key set still waiting for the keyboard's IN endpoint.
///
/// The endpoint only takes a report once per polling interval, so a report
/// written right after another is usually refused with `WouldBlock`. The set
/// stays here until a later [`PendingReport::deliver`] gets it out. A newer set
/// replaces an undelivered one; each set is the full held state, so the host
/// still ends up with the right keys down.
#[derive(Debug, Default)]
pub struct PendingReport {
    keys: SmallVec<[Keyboard; 8]>,
    waiting: bool,
}

impl PendingReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waiting(&self) -> bool {
        self.waiting
    }

    pub fn keys(&self) -> &[Keyboard] {
        &self.keys
    }

    pub fn replace(&mut self, keys: &[Keyboard]) {
        self.keys.clear();
        self.keys.extend_from_slice(keys);
        self.waiting = true;
    }

    /// Offers the waiting set to `write`. A busy endpoint keeps it waiting;
    /// any other error drops it and is returned.
    pub fn deliver<W>(&mut self, write: W) -> Result<(), UsbHidError>
    where
        W: FnOnce(&[Keyboard]) -> Result<(), UsbHidError>,
    {
        if !self.waiting {
            return Ok(());
        }

        match write(&self.keys) {
            Ok(()) | Err(UsbHidError::Duplicate) => {
                self.waiting = false;
                Ok(())
            }
            Err(UsbHidError::WouldBlock) => Ok(()),
            Err(e) => {
                warn!("dropped report of {} held keys", self.keys.len());
                self.waiting = false;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "hid_test.rs"]
mod test;
