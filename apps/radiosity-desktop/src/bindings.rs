use anyhow::{Result, bail};
use radiosity_common::ControlsConfig;
use radiosity_input::Control;
use std::collections::HashMap;
use winit::keyboard::KeyCode;

macro_rules! key_names {
    ($name:expr; $($key:ident),* $(,)?) => {
        match $name {
            $(stringify!($key) => Some(KeyCode::$key),)*
            _ => None,
        }
    };
}

/// Resolve a winit `KeyCode` variant name such as `KeyW` or `ControlLeft`.
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    key_names!(name.trim();
        KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM,
        KeyN, KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
        Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9,
        F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
        ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
        Space, Escape, Tab, Enter, Backspace, Delete,
        ShiftLeft, ShiftRight, ControlLeft, ControlRight, AltLeft, AltRight,
    )
}

/// Physical key bound to each control.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    keys: HashMap<Control, KeyCode>,
}

impl KeyBindings {
    pub fn from_config(controls: &ControlsConfig) -> Result<Self> {
        let mut keys = HashMap::new();
        for (name, key_name) in controls.bindings() {
            let Some(control) = control_for(name) else {
                bail!("unknown control `{name}`");
            };
            let Some(key) = parse_key_code(key_name) else {
                bail!("unknown key `{key_name}` bound to `{name}`");
            };
            keys.insert(control, key);
        }
        Ok(Self { keys })
    }

    pub fn key(&self, control: Control) -> Option<KeyCode> {
        self.keys.get(&control).copied()
    }
}

fn control_for(name: &str) -> Option<Control> {
    Some(match name {
        "forward" => Control::Forward,
        "backward" => Control::Backward,
        "left" => Control::Left,
        "right" => Control::Right,
        "up" => Control::Up,
        "down" => Control::Down,
        "quit" => Control::Quit,
        "toggle_cursor" => Control::ToggleCursor,
        "toggle_wireframe" => Control::ToggleWireframe,
        _ => return None,
    })
}
