//! evdev keyboard input
//!
//! Reads raw `struct input_event` records from /dev/input/eventN and turns
//! them into canonical [`Event`]s, one event per poll.
//!
//! Poll semantics:
//! - `timeout_ms > 0`: wait up to `timeout_ms` for the device to become readable
//! - `timeout_ms == 0`: check readiness without blocking
//! - `timeout_ms < 0`: skip the wait and read directly
//!
//! An expired wait yields `Event::Control(ControlCode::Timeout)`.

use log::{debug, trace};
use std::fs::File;
use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

use super::event::{ControlCode, Event};
use super::keycodes::map_linux_key;
use super::record::{records, RECORD_SIZE};
use crate::constants::{INPUT_BATCH_RECORDS, KEY_VALUE_PRESS, KEY_VALUE_RELEASE};
use crate::error::{Result, SurfaceError};

/// Open keyboard device handle
pub struct InputDevice {
    file: File,
}

impl InputDevice {
    /// Wrap an already opened (read-only, non-blocking) device
    pub fn new(file: File) -> Self {
        Self { file }
    }

    /// Raw fd (for external poll integration)
    pub fn fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }

    /// Wait for input according to `timeout_ms` and translate one batch.
    pub fn poll_event(&mut self, timeout_ms: i32) -> Result<Event> {
        if timeout_ms >= 0 && !wait_readable(self.fd(), timeout_ms)? {
            return Ok(Event::Control(ControlCode::Timeout));
        }

        let mut buf = [0u8; RECORD_SIZE * INPUT_BATCH_RECORDS];
        let n = match nix::unistd::read(self.fd(), &mut buf) {
            Ok(n) => n,
            Err(e) => return Err(SurfaceError::Read(io::Error::from_raw_os_error(e as i32))),
        };
        if n < RECORD_SIZE {
            return Err(SurfaceError::ShortRead(n));
        }

        debug!("evdev: read {} records", n / RECORD_SIZE);
        translate_batch(&buf[..n])
    }
}

/// Wait until `fd` is readable.
///
/// Returns Ok(false) when the timeout expired with nothing to read.
pub fn wait_readable(fd: RawFd, timeout_ms: i32) -> Result<bool> {
    let mut pfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let ret = unsafe { libc::poll(&mut pfd, 1, timeout_ms) };
    if ret < 0 {
        return Err(SurfaceError::Wait(io::Error::last_os_error()));
    }
    Ok(ret > 0)
}

/// Translate a batch of raw records.
///
/// The first key record decides the result; everything after it is
/// discarded. Non-key records are skipped. Values other than press and
/// release (autorepeat) are not translated.
pub fn translate_batch(buf: &[u8]) -> Result<Event> {
    let key = records(buf)
        .find(|rec| rec.is_key())
        .ok_or(SurfaceError::NoKeyEvent)?;

    let keycode = map_linux_key(key.code);
    let event = match key.value {
        KEY_VALUE_RELEASE => Event::KeyUp(keycode),
        KEY_VALUE_PRESS => Event::KeyDown(keycode),
        value => {
            return Err(SurfaceError::UntranslatedKey {
                code: key.code,
                value,
            })
        }
    };

    trace!("evdev: code {} -> {:?}", key.code, event);
    Ok(event)
}
