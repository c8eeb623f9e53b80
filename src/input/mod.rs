//! Input handling
//!
//! Keyboard input straight from evdev.
//! - Raw record decoding (`struct input_event`)
//! - Linux key code to canonical key code table
//! - Poll with timeout and batch translation

pub mod event;
pub mod evdev;
pub mod keycodes;
pub mod record;

pub use event::{ControlCode, Event};
pub use evdev::{translate_batch, wait_readable, InputDevice};
pub use keycodes::{map_linux_key, KeyCode, LINUX_KEYMAP, LINUX_KEYMAP_LEN};
pub use record::{RawInputRecord, RECORD_SIZE};
