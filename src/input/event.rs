//! Canonical input events handed to the host library

use super::keycodes::KeyCode;

/// Control signals that are not tied to a device record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCode {
    /// The poll timeout expired with no input ready
    Timeout,
}

/// One translated input event. Exactly one variant per successful poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Event {
    #[default]
    None,
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    Control(ControlCode),
}

impl Event {
    /// Key carried by a key-down/key-up event
    pub fn key(&self) -> Option<KeyCode> {
        match *self {
            Event::KeyDown(k) | Event::KeyUp(k) => Some(k),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Event::Control(ControlCode::Timeout))
    }
}
