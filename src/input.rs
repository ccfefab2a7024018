//! Input events, the commands they map to, and input sources.
//!
//! The platform event loop is outside this crate. Whatever produces events
//! implements [`InputSource`]; [`Controls`] turns each event into at most one
//! [`Command`] that the [`Session`](crate::Session) applies to its view.
//!
//! | input             | command                       |
//! |-------------------|-------------------------------|
//! | `=` / `+`         | zoom in by `zoom_ratio`       |
//! | `-`               | zoom out by `1 / zoom_ratio`  |
//! | arrows            | pan one step                  |
//! | space             | reset view                    |
//! | escape, close     | quit                          |
//! | wheel, n notches  | zoom by `zoom_ratio^n`        |

use std::collections::VecDeque;
use std::io::BufRead;

use tracing::warn;

/// Keys the map reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Equals,
    Plus,
    Minus,
    Up,
    Down,
    Left,
    Right,
    Space,
    Other,
}

/// One discrete input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    /// Mouse wheel; positive notches scroll up (zoom in).
    Wheel { notches: i32 },
    /// Window closed.
    Close,
}

/// A state change requested by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Multiply the scale by this factor, anchored at the viewport center.
    Zoom(f64),
    /// Pan by this many steps along each axis.
    Pan { dx: f64, dy: f64 },
    Reset,
    Quit,
}

/// Event → command mapping parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    /// Zoom ratio per key press or wheel notch. Default 1.1.
    pub zoom_ratio: f64,
    /// Pan steps per arrow key press. Default 1.
    pub pan_step: f64,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            zoom_ratio: 1.1,
            pan_step: 1.0,
        }
    }
}

/// Largest wheel notch count honored in one event; bigger deltas are clamped.
pub const MAX_WHEEL_NOTCHES: i32 = 50;

/// Largest repeat count accepted on a text command line.
pub const MAX_REPEAT: usize = 1000;

impl Controls {
    pub fn command_for(&self, event: &InputEvent) -> Option<Command> {
        let step = self.pan_step;
        match *event {
            InputEvent::Close => Some(Command::Quit),
            InputEvent::Wheel { notches: 0 } => None,
            InputEvent::Wheel { notches } => {
                let notches = notches.clamp(-MAX_WHEEL_NOTCHES, MAX_WHEEL_NOTCHES);
                Some(Command::Zoom(self.zoom_ratio.powi(notches)))
            }
            InputEvent::KeyDown(key) => match key {
                Key::Escape => Some(Command::Quit),
                Key::Equals | Key::Plus => Some(Command::Zoom(self.zoom_ratio)),
                Key::Minus => Some(Command::Zoom(1.0 / self.zoom_ratio)),
                Key::Up => Some(Command::Pan { dx: 0.0, dy: -step }),
                Key::Down => Some(Command::Pan { dx: 0.0, dy: step }),
                Key::Left => Some(Command::Pan { dx: -step, dy: 0.0 }),
                Key::Right => Some(Command::Pan { dx: step, dy: 0.0 }),
                Key::Space => Some(Command::Reset),
                Key::Other => None,
            },
        }
    }
}

/// Anything that yields input events, one batch per loop iteration.
pub trait InputSource {
    /// Return the events that arrived since the last call. An empty batch
    /// means nothing happened; the source signals the end of input with
    /// [`InputEvent::Close`].
    fn poll(&mut self) -> anyhow::Result<Vec<InputEvent>>;
}

/// Fixed sequence of event batches, then `Close`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    batches: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<InputEvent>>,
    {
        Self {
            batches: batches.into_iter().collect(),
        }
    }

    /// One event per batch.
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = InputEvent>,
    {
        Self::new(events.into_iter().map(|e| vec![e]))
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> anyhow::Result<Vec<InputEvent>> {
        Ok(self
            .batches
            .pop_front()
            .unwrap_or_else(|| vec![InputEvent::Close]))
    }
}

/// Text commands, one per line, from any buffered reader.
///
/// Each line is `NAME [N]`. `N` repeats the command (at most
/// [`MAX_REPEAT`] times), except for `wheel` where it is the signed notch
/// count. Names:
///
/// - `+`, `=`, `in`: zoom in
/// - `-`, `out`: zoom out
/// - `up`/`w`, `down`/`s`, `left`/`a`, `right`/`d`: pan
/// - `reset`, `space`: reset view
/// - `q`, `quit`, `esc`: quit
/// - `wheel N`: wheel scroll
///
/// Blank lines are ignored; unknown lines are logged and skipped. End of
/// input is reported as `Close`.
pub struct LineInput<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn poll(&mut self) -> anyhow::Result<Vec<InputEvent>> {
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Ok(vec![InputEvent::Close]);
        }
        match parse_line(&self.line) {
            Some(events) => Ok(events),
            None => {
                warn!("Ignoring unrecognized command {:?}", self.line.trim());
                Ok(Vec::new())
            }
        }
    }
}

/// Parse one text command into events; `None` if it is not recognized.
pub fn parse_line(line: &str) -> Option<Vec<InputEvent>> {
    let mut parts = line.split_whitespace();
    let Some(name) = parts.next() else {
        return Some(Vec::new());
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return None;
    }

    if name.eq_ignore_ascii_case("wheel") {
        let notches = arg.map_or(Some(1), |a| a.parse().ok())?;
        return Some(vec![InputEvent::Wheel { notches }]);
    }

    let key = match name.to_ascii_lowercase().as_str() {
        "+" | "in" => Key::Plus,
        "=" => Key::Equals,
        "-" | "out" => Key::Minus,
        "up" | "w" => Key::Up,
        "down" | "s" => Key::Down,
        "left" | "a" => Key::Left,
        "right" | "d" => Key::Right,
        "reset" | "space" => Key::Space,
        "q" | "quit" | "esc" | "escape" => Key::Escape,
        _ => return None,
    };
    let repeat: usize = arg.map_or(Some(1), |a| a.parse().ok())?;
    if repeat > MAX_REPEAT {
        return None;
    }
    Some(vec![InputEvent::KeyDown(key); repeat])
}
