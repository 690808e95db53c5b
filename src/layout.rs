use usbd_human_interface_device::page::Keyboard;

use crate::{channel::SwitchState, config::CHANNELS, hid::KeyboardOutput};

/// Keys pressed, in order, when a switch goes down. Every key stays held until
/// the next release anywhere on the pad.
#[derive(Debug, PartialEq, Eq)]
pub struct MacroAction {
    pub name: &'static str,
    pub keys: &'static [Keyboard],
}

mod actions {
    use super::MacroAction;
    use usbd_human_interface_device::page::Keyboard::*;

    pub const UNDO: MacroAction = MacroAction {
        name: "UNDO",
        keys: &[LeftControl, Z],
    };
    pub const COPY: MacroAction = MacroAction {
        name: "COPY",
        keys: &[LeftControl, C],
    };
    pub const PASTE: MacroAction = MacroAction {
        name: "PASTE",
        keys: &[LeftControl, V],
    };
    pub const ENTER: MacroAction = MacroAction {
        name: "ENTER",
        keys: &[ReturnEnter],
    };
    pub const REFRESH: MacroAction = MacroAction {
        name: "REFRESH",
        keys: &[F5],
    };
}

/// Macro for each switch, indexed by channel.
pub static LAYOUT: [MacroAction; CHANNELS] = [
    actions::UNDO,
    actions::COPY,
    actions::PASTE,
    actions::ENTER,
    actions::REFRESH,
];

/// Turns a confirmed switch transition into keyboard commands.
///
/// A press emits the action's key-downs. Any release drops every held key, so
/// a modifier can never be left stuck when presses overlap.
pub fn dispatch(action: &MacroAction, state: SwitchState, keyboard: &mut impl KeyboardOutput) {
    match state {
        SwitchState::Pressed => {
            info!("{} pressed", action.name);
            action.keys.iter().for_each(|&key| keyboard.press(key));
        }
        SwitchState::Released => {
            info!("{} released", action.name);
            keyboard.release_all();
        }
    }
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod test;
