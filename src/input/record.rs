//! Raw evdev record layout
//!
//! Records are read from /dev/input/eventN as `struct input_event` in the
//! host's native layout:
//!
//! ```text
//! offset 0              struct timeval time   (tv_sec, tv_usec; each TIME_FIELD_SIZE bytes)
//! offset TIMEVAL_SIZE   __u16 type
//! offset TIMEVAL_SIZE+2 __u16 code
//! offset TIMEVAL_SIZE+4 __s32 value
//! ```
//!
//! On 64-bit Linux that is 24 bytes per record, 16 bytes on 32-bit.

use std::mem::size_of;

use crate::constants::EV_KEY;

/// Size of `struct timeval` on this target
pub const TIMEVAL_SIZE: usize = size_of::<libc::timeval>();

/// Width of tv_sec / tv_usec
const TIME_FIELD_SIZE: usize = TIMEVAL_SIZE / 2;

const TYPE_OFFSET: usize = TIMEVAL_SIZE;
const CODE_OFFSET: usize = TIMEVAL_SIZE + 2;
const VALUE_OFFSET: usize = TIMEVAL_SIZE + 4;

/// Size of one `struct input_event`
pub const RECORD_SIZE: usize = TIMEVAL_SIZE + 8;

/// One decoded `struct input_event`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawInputRecord {
    pub sec: i64,
    pub usec: i64,
    pub type_: u16,
    pub code: u16,
    pub value: i32,
}

impl RawInputRecord {
    /// Key record with a zero timestamp
    pub fn key(code: u16, value: i32) -> Self {
        Self {
            type_: EV_KEY,
            code,
            value,
            ..Default::default()
        }
    }

    /// Decode the first record of `buf`. Returns None if `buf` is shorter than a record.
    pub fn parse(buf: &[u8]) -> Option<Self> {
        if buf.len() < RECORD_SIZE {
            return None;
        }
        Some(Self {
            sec: read_time_field(&buf[0..TIME_FIELD_SIZE]),
            usec: read_time_field(&buf[TIME_FIELD_SIZE..TIMEVAL_SIZE]),
            type_: u16::from_ne_bytes([buf[TYPE_OFFSET], buf[TYPE_OFFSET + 1]]),
            code: u16::from_ne_bytes([buf[CODE_OFFSET], buf[CODE_OFFSET + 1]]),
            value: i32::from_ne_bytes([
                buf[VALUE_OFFSET],
                buf[VALUE_OFFSET + 1],
                buf[VALUE_OFFSET + 2],
                buf[VALUE_OFFSET + 3],
            ]),
        })
    }

    /// Encode in the native record layout
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut out = [0u8; RECORD_SIZE];
        write_time_field(&mut out[0..TIME_FIELD_SIZE], self.sec);
        write_time_field(&mut out[TIME_FIELD_SIZE..TIMEVAL_SIZE], self.usec);
        out[TYPE_OFFSET..TYPE_OFFSET + 2].copy_from_slice(&self.type_.to_ne_bytes());
        out[CODE_OFFSET..CODE_OFFSET + 2].copy_from_slice(&self.code.to_ne_bytes());
        out[VALUE_OFFSET..VALUE_OFFSET + 4].copy_from_slice(&self.value.to_ne_bytes());
        out
    }

    pub fn is_key(&self) -> bool {
        self.type_ == EV_KEY
    }
}

/// Iterate over the complete records in `buf`; a trailing partial record is ignored.
pub fn records(buf: &[u8]) -> impl Iterator<Item = RawInputRecord> + '_ {
    buf.chunks_exact(RECORD_SIZE).filter_map(RawInputRecord::parse)
}

fn read_time_field(bytes: &[u8]) -> i64 {
    match *bytes {
        [a, b, c, d, e, f, g, h] => i64::from_ne_bytes([a, b, c, d, e, f, g, h]),
        [a, b, c, d] => i32::from_ne_bytes([a, b, c, d]) as i64,
        _ => 0,
    }
}

fn write_time_field(out: &mut [u8], v: i64) {
    match out.len() {
        8 => out.copy_from_slice(&v.to_ne_bytes()),
        4 => out.copy_from_slice(&(v as i32).to_ne_bytes()),
        _ => {}
    }
}
