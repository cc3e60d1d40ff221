//! Headless input scripts.
//!
//! A script is a YAML list of events replayed against an [`Input`] without a
//! window:
//! ```yaml
//! - event: cursor_moved
//!   x: 400.0
//!   y: 300.0
//! - event: frame
//!   dt: 0.5
//!   pressed: [forward]
//! - event: scroll
//!   y: 2.0
//! ```

use crate::control::{Control, CursorMode, InputHost};
use crate::input::Input;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Errors from loading an input script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// One recorded host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    /// A frame boundary: the listed controls are held for `dt` seconds.
    Frame {
        dt: f32,
        #[serde(default)]
        pressed: Vec<Control>,
    },
    CursorMoved { x: f64, y: f64 },
    Scroll {
        #[serde(default)]
        x: f64,
        y: f64,
    },
}

/// An [`InputHost`] backed by plain state instead of a window.
#[derive(Debug, Clone, Default)]
pub struct ScriptedHost {
    pressed: HashSet<Control>,
    close_requested: bool,
    cursor_modes: Vec<CursorMode>,
}

impl ScriptedHost {
    pub fn press(&mut self, control: Control) {
        self.pressed.insert(control);
    }

    pub fn release(&mut self, control: Control) {
        self.pressed.remove(&control);
    }

    /// Replace the held set with exactly `controls`.
    pub fn set_pressed(&mut self, controls: &[Control]) {
        self.pressed = controls.iter().copied().collect();
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Every cursor mode applied so far, in order.
    pub fn cursor_modes(&self) -> &[CursorMode] {
        &self.cursor_modes
    }
}

impl InputHost for ScriptedHost {
    fn is_pressed(&self, control: Control) -> bool {
        self.pressed.contains(&control)
    }

    fn request_close(&mut self) {
        self.close_requested = true;
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.cursor_modes.push(mode);
    }
}

/// Outcome of replaying a script.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReplayReport {
    /// Events consumed before the script ended or a quit stopped it.
    pub events: usize,
    pub frames: usize,
    pub close_requested: bool,
    pub cursor_modes: Vec<CursorMode>,
}

/// Drive `input` through `events` the way a host loop would.
///
/// Replay stops after the frame in which a quit is requested.
pub fn replay(input: &mut Input, events: &[InputEvent]) -> ReplayReport {
    let mut host = ScriptedHost::default();
    let mut report = ReplayReport::default();

    for event in events {
        report.events += 1;
        match event {
            InputEvent::Frame { dt, pressed } => {
                host.set_pressed(pressed);
                input.process_input(&mut host, *dt);
                report.frames += 1;
            }
            InputEvent::CursorMoved { x, y } => input.mouse_callback(*x, *y),
            InputEvent::Scroll { x, y } => input.scroll_callback(*x, *y),
        }
        if !input.is_alive() {
            tracing::debug!(after = report.events, "replay stopped by quit");
            break;
        }
    }

    report.close_requested = host.close_requested();
    report.cursor_modes = host.cursor_modes().to_vec();
    report
}

pub fn parse_script(data: &str) -> Result<Vec<InputEvent>, ScriptError> {
    Ok(serde_yaml::from_str(data)?)
}

pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<InputEvent>, ScriptError> {
    let data = std::fs::read_to_string(path.as_ref())?;
    let events = parse_script(&data)?;
    tracing::debug!(
        "loaded {} input events from {}",
        events.len(),
        path.as_ref().display()
    );
    Ok(events)
}
