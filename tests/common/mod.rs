//! File-backed fake devices for integration tests
//!
//! The display is a regular temp file sized `stride * height` and mapped
//! like display memory. The keyboard is one end of a Unix socket pair; the
//! test writes raw records into the other end.

#![allow(dead_code)]

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use fbsurface::error::{Result, SurfaceError};
use fbsurface::fb::{
    map_shared, DeviceProvider, DisplayDevice, FbBitfield, FixScreenInfo, VarScreenInfo,
};
use fbsurface::input::RawInputRecord;
use memmap2::MmapMut;

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Unique path under the temp dir, removed on drop
pub struct TempPath(pub PathBuf);

impl TempPath {
    pub fn new(tag: &str) -> Self {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(std::env::temp_dir().join(format!(
            "fbsurface-{}-{}-{}",
            tag,
            std::process::id(),
            n
        )))
    }
}

impl Drop for TempPath {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

/// Screen description handed out by the fake display
#[derive(Debug, Clone, Copy)]
pub struct FakeScreen {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u32,
    pub transp_length: u32,
    /// Bytes per line; 0 means `width * bytes per pixel`
    pub stride: u32,
}

impl FakeScreen {
    pub fn new(width: u32, height: u32, bits_per_pixel: u32, transp_length: u32) -> Self {
        Self {
            width,
            height,
            bits_per_pixel,
            transp_length,
            stride: 0,
        }
    }

    pub fn line_length(&self) -> u32 {
        if self.stride != 0 {
            self.stride
        } else {
            (self.width * self.bits_per_pixel).div_ceil(8)
        }
    }

    pub fn map_len(&self) -> usize {
        self.line_length() as usize * self.height as usize
    }
}

struct FakeDisplay {
    file: File,
    screen: FakeScreen,
}

impl DisplayDevice for FakeDisplay {
    fn fixed_info(&self) -> Result<FixScreenInfo> {
        Ok(FixScreenInfo {
            line_length: self.screen.line_length(),
            smem_len: self.screen.map_len() as u32,
            ..Default::default()
        })
    }

    fn variable_info(&self) -> Result<VarScreenInfo> {
        Ok(VarScreenInfo {
            xres: self.screen.width,
            yres: self.screen.height,
            xres_virtual: self.screen.width,
            yres_virtual: self.screen.height,
            bits_per_pixel: self.screen.bits_per_pixel,
            transp: FbBitfield {
                offset: 24,
                length: self.screen.transp_length,
                msb_right: 0,
            },
            ..Default::default()
        })
    }

    fn map(&self, len: usize) -> Result<MmapMut> {
        map_shared(&self.file, len)
    }
}

/// Fake device set. Keep it alive for as long as the test inspects the display file.
pub struct FakeDevices {
    pub display_path: PathBuf,
    pub screen: FakeScreen,
    input: Option<UnixStream>,
}

impl DeviceProvider for FakeDevices {
    fn open_display(&self) -> Result<Box<dyn DisplayDevice>> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.display_path)
            .map_err(|source| SurfaceError::DeviceOpen {
                path: self.display_path.clone(),
                source,
            })?;
        Ok(Box::new(FakeDisplay {
            file,
            screen: self.screen,
        }))
    }

    fn open_input(&self) -> Result<File> {
        let missing = || SurfaceError::DeviceOpen {
            path: PathBuf::from("fake-input"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let stream = self.input.as_ref().ok_or_else(missing)?;
        let stream = stream.try_clone().map_err(|_| missing())?;
        Ok(File::from(std::os::fd::OwnedFd::from(stream)))
    }
}

/// Test side of the fake keyboard
pub struct Keyboard {
    peer: UnixStream,
}

impl Keyboard {
    pub fn send(&mut self, records: &[RawInputRecord]) {
        let bytes: Vec<u8> = records.iter().flat_map(|r| r.to_bytes()).collect();
        self.peer.write_all(&bytes).unwrap();
    }

    pub fn send_raw(&mut self, bytes: &[u8]) {
        self.peer.write_all(bytes).unwrap();
    }
}

/// Create a display file for `screen`, filled with zeroes.
///
/// With `with_input` set, also returns the keyboard end of a socket pair.
pub fn fake_devices(
    screen: FakeScreen,
    with_input: bool,
) -> (FakeDevices, Option<Keyboard>, TempPath) {
    let tmp = TempPath::new("display");
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tmp.0)
        .unwrap();
    file.set_len(screen.map_len() as u64).unwrap();

    let (input, keyboard) = if with_input {
        let (ours, theirs) = UnixStream::pair().unwrap();
        ours.set_nonblocking(true).unwrap();
        (Some(ours), Some(Keyboard { peer: theirs }))
    } else {
        (None, None)
    };

    let devices = FakeDevices {
        display_path: tmp.0.clone(),
        screen,
        input,
    };
    (devices, keyboard, tmp)
}

/// Current contents of the display file
pub fn display_bytes(path: &PathBuf) -> Vec<u8> {
    std::fs::read(path).unwrap()
}

/// Overwrite the display file with pseudo-random bytes derived from `seed`
pub fn fill_noise(path: &PathBuf, seed: u32) -> Vec<u8> {
    let len = display_bytes(path).len();
    let mut state = seed;
    let bytes: Vec<u8> = (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) as u8
        })
        .collect();
    std::fs::write(path, &bytes).unwrap();
    bytes
}
