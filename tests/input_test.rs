//! Input polling through a ready surface

mod common;

use std::time::{Duration, Instant};

use common::{fake_devices, FakeScreen, Keyboard};
use fbsurface::input::{RawInputRecord, RECORD_SIZE};
use fbsurface::surface::{LinuxSurface, SurfaceBackend};
use fbsurface::{ControlCode, Event, KeyCode, SurfaceError};

const EV_SYN: u16 = 0x00;
const EV_MSC: u16 = 0x04;

fn ready_surface() -> (LinuxSurface, Keyboard, common::TempPath) {
    let (devices, kbd, tmp) = fake_devices(FakeScreen::new(8, 8, 32, 0), true);
    let mut surface = LinuxSurface::new(Box::new(devices));
    surface.initialise().unwrap();
    (surface, kbd.unwrap(), tmp)
}

fn record(type_: u16, code: u16, value: i32) -> RawInputRecord {
    RawInputRecord {
        type_,
        code,
        value,
        ..Default::default()
    }
}

#[test]
fn zero_timeout_without_data_is_timeout() {
    let (mut surface, _kbd, _tmp) = ready_surface();
    let start = Instant::now();
    let event = surface.input(0).unwrap();
    assert_eq!(event, Event::Control(ControlCode::Timeout));
    assert!(start.elapsed() < Duration::from_millis(500));
}

#[test]
fn positive_timeout_waits_full_duration() {
    let (mut surface, _kbd, _tmp) = ready_surface();
    let start = Instant::now();
    let event = surface.input(50).unwrap();
    assert!(event.is_timeout());
    assert!(start.elapsed() >= Duration::from_millis(50));
}

#[test]
fn key_press_q() {
    let (mut surface, mut kbd, _tmp) = ready_surface();
    kbd.send(&[
        record(EV_MSC, 4, 0x70014),
        RawInputRecord::key(16, 1),
        record(EV_SYN, 0, 0),
    ]);
    assert_eq!(surface.input(100).unwrap(), Event::KeyDown(KeyCode::Q));
}

#[test]
fn key_release() {
    let (mut surface, mut kbd, _tmp) = ready_surface();
    kbd.send(&[RawInputRecord::key(57, 0), record(EV_SYN, 0, 0)]);
    assert_eq!(surface.input(100).unwrap(), Event::KeyUp(KeyCode::Space));
}

#[test]
fn autorepeat_is_not_translated() {
    let (mut surface, mut kbd, _tmp) = ready_surface();
    kbd.send(&[RawInputRecord::key(16, 2), record(EV_SYN, 0, 0)]);
    assert!(matches!(
        surface.input(100),
        Err(SurfaceError::UntranslatedKey { code: 16, value: 2 })
    ));
}

#[test]
fn batch_without_key_fails() {
    let (mut surface, mut kbd, _tmp) = ready_surface();
    kbd.send(&[record(EV_MSC, 4, 1), record(EV_SYN, 0, 0)]);
    assert!(matches!(surface.input(100), Err(SurfaceError::NoKeyEvent)));
}

#[test]
fn first_key_in_batch_wins_and_rest_is_discarded() {
    let (mut surface, mut kbd, _tmp) = ready_surface();
    kbd.send(&[
        RawInputRecord::key(30, 1),
        record(EV_SYN, 0, 0),
        RawInputRecord::key(30, 0),
        record(EV_SYN, 0, 0),
    ]);
    assert_eq!(surface.input(100).unwrap(), Event::KeyDown(KeyCode::A));
    // The release in the same batch was dropped
    assert!(surface.input(0).unwrap().is_timeout());
}

#[test]
fn short_read_fails() {
    let (mut surface, mut kbd, _tmp) = ready_surface();
    kbd.send_raw(&RawInputRecord::key(16, 1).to_bytes()[..RECORD_SIZE / 2]);
    assert!(matches!(surface.input(100), Err(SurfaceError::ShortRead(_))));
}

#[test]
fn negative_timeout_reads_directly() {
    let (mut surface, mut kbd, _tmp) = ready_surface();
    kbd.send(&[RawInputRecord::key(1, 1)]);
    assert_eq!(surface.input(-1).unwrap(), Event::KeyDown(KeyCode::Escape));

    // Nothing pending: the non-blocking read fails instead of waiting
    assert!(matches!(surface.input(-1), Err(SurfaceError::Read(_))));
}

#[test]
fn unmapped_code_is_unknown() {
    let (mut surface, mut kbd, _tmp) = ready_surface();
    kbd.send(&[RawInputRecord::key(600, 1)]);
    assert_eq!(surface.input(100).unwrap(), Event::KeyDown(KeyCode::Unknown));
}

#[test]
fn no_input_after_finalise() {
    let (mut surface, mut kbd, _tmp) = ready_surface();
    surface.finalise();
    kbd.send(&[RawInputRecord::key(16, 1)]);
    assert!(matches!(
        surface.input(0),
        Err(SurfaceError::InputUnavailable)
    ));
}
