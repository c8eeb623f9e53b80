//! Framebuffer and input device access
//!
//! Opens the framebuffer device (/dev/fbN), queries its geometry and maps
//! its memory. The keyboard device (/dev/input/eventN) is opened read-only
//! and non-blocking. Both are reached through [`DeviceProvider`] so the
//! surface lifecycle does not depend on real device nodes.

use log::{debug, info};
use memmap2::{MmapMut, MmapOptions};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use super::ioctl_helpers::ioctl_read_into;
use super::screeninfo::{FixScreenInfo, VarScreenInfo};
use crate::constants::{FBIOGET_FSCREENINFO, FBIOGET_VSCREENINFO};
use crate::error::{Result, SurfaceError};

/// An opened display device
pub trait DisplayDevice {
    /// Fixed screen info (line stride etc.)
    fn fixed_info(&self) -> Result<FixScreenInfo>;

    /// Variable screen info (resolution, depth, channel layout)
    fn variable_info(&self) -> Result<VarScreenInfo>;

    /// Map `len` bytes of display memory read-write, shared
    fn map(&self, len: usize) -> Result<MmapMut>;
}

/// Opens the devices a surface needs
pub trait DeviceProvider {
    /// Open the display device read-write
    fn open_display(&self) -> Result<Box<dyn DisplayDevice>>;

    /// Open the input device read-only, non-blocking
    fn open_input(&self) -> Result<File>;
}

/// Map a file-like display device. Shared by every [`DisplayDevice`] backed by a `File`.
pub fn map_shared(file: &File, len: usize) -> Result<MmapMut> {
    if len == 0 {
        return Err(SurfaceError::Mapping {
            len,
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty display region"),
        });
    }
    // Safety: the mapping is owned by the surface together with the file and
    // dropped before it; concurrent writers to display memory are expected.
    unsafe { MmapOptions::new().len(len).map_mut(file) }
        .map_err(|source| SurfaceError::Mapping { len, source })
}

/// Linux fbdev device (/dev/fbN)
pub struct FbDevice {
    file: File,
}

impl FbDevice {
    /// Open framebuffer device
    ///
    /// # Arguments
    /// * `path` - Device path (e.g., "/dev/fb0")
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening framebuffer device: {}", path.display());

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| SurfaceError::DeviceOpen {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self { file })
    }
}

impl DisplayDevice for FbDevice {
    fn fixed_info(&self) -> Result<FixScreenInfo> {
        let mut fix = FixScreenInfo::default();
        ioctl_read_into(self.file.as_raw_fd(), FBIOGET_FSCREENINFO, &mut fix).map_err(
            |source| SurfaceError::GeometryQuery {
                query: "FBIOGET_FSCREENINFO",
                source,
            },
        )?;
        debug!(
            "fb fixed info: id={}, line_length={}, smem_len={}",
            fix.id_str(),
            fix.line_length,
            fix.smem_len
        );
        Ok(fix)
    }

    fn variable_info(&self) -> Result<VarScreenInfo> {
        let mut var = VarScreenInfo::default();
        ioctl_read_into(self.file.as_raw_fd(), FBIOGET_VSCREENINFO, &mut var).map_err(
            |source| SurfaceError::GeometryQuery {
                query: "FBIOGET_VSCREENINFO",
                source,
            },
        )?;
        debug!(
            "fb variable info: {}x{} ({}x{} virtual), {}bpp, transp length {}",
            var.xres,
            var.yres,
            var.xres_virtual,
            var.yres_virtual,
            var.bits_per_pixel,
            var.transp.length
        );
        Ok(var)
    }

    fn map(&self, len: usize) -> Result<MmapMut> {
        map_shared(&self.file, len)
    }
}

/// Open an evdev device read-only and non-blocking
pub fn open_input_device<P: AsRef<Path>>(path: P) -> Result<File> {
    let path = path.as_ref();
    OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_NONBLOCK)
        .open(path)
        .map_err(|source| SurfaceError::DeviceOpen {
            path: path.to_path_buf(),
            source,
        })
}

/// Real device nodes
#[derive(Debug, Clone)]
pub struct LinuxDevices {
    pub framebuffer: PathBuf,
    pub input: PathBuf,
}

impl LinuxDevices {
    pub fn new(framebuffer: impl Into<PathBuf>, input: impl Into<PathBuf>) -> Self {
        Self {
            framebuffer: framebuffer.into(),
            input: input.into(),
        }
    }
}

impl DeviceProvider for LinuxDevices {
    fn open_display(&self) -> Result<Box<dyn DisplayDevice>> {
        Ok(Box::new(FbDevice::open(&self.framebuffer)?))
    }

    fn open_input(&self) -> Result<File> {
        open_input_device(&self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_framebuffer() {
        let result = FbDevice::open("/nonexistent/fb9");
        assert!(matches!(result, Err(SurfaceError::DeviceOpen { .. })));
    }

    #[test]
    fn test_open_missing_input() {
        let devices = LinuxDevices::new("/nonexistent/fb9", "/nonexistent/event99");
        assert!(matches!(
            devices.open_input(),
            Err(SurfaceError::DeviceOpen { .. })
        ));
    }

    #[test]
    fn test_fixed_info_on_regular_file_fails() {
        let path = std::env::temp_dir().join(format!("fbsurface-ioctl-{}", std::process::id()));
        std::fs::write(&path, [0u8; 16]).unwrap();
        let dev = FbDevice::open(&path).unwrap();
        assert!(matches!(
            dev.fixed_info(),
            Err(SurfaceError::GeometryQuery { query: "FBIOGET_FSCREENINFO", .. })
        ));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_map_rejects_empty_region() {
        let path = std::env::temp_dir().join(format!("fbsurface-map-{}", std::process::id()));
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .unwrap();
        assert!(matches!(
            map_shared(&file, 0),
            Err(SurfaceError::Mapping { len: 0, .. })
        ));
        let _ = std::fs::remove_file(&path);
    }
}
