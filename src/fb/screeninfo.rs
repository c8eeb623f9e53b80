//! Framebuffer geometry
//!
//! `#[repr(C)]` mirrors of `fb_fix_screeninfo` / `fb_var_screeninfo` from
//! <linux/fb.h>, and the [`Geometry`] derived from them.

use crate::error::{Result, SurfaceError};
use crate::format::PixelFormat;

/// fb_bitfield: position of one colour channel inside a pixel
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FbBitfield {
    pub offset: u32,
    pub length: u32,
    pub msb_right: u32,
}

/// fb_fix_screeninfo (FBIOGET_FSCREENINFO)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct FixScreenInfo {
    pub id: [u8; 16],
    pub smem_start: libc::c_ulong,
    pub smem_len: u32,
    pub type_: u32,
    pub type_aux: u32,
    pub visual: u32,
    pub xpanstep: u16,
    pub ypanstep: u16,
    pub ywrapstep: u16,
    /// Bytes per scanline
    pub line_length: u32,
    pub mmio_start: libc::c_ulong,
    pub mmio_len: u32,
    pub accel: u32,
    pub capabilities: u16,
    pub reserved: [u16; 2],
}

/// fb_var_screeninfo (FBIOGET_VSCREENINFO)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct VarScreenInfo {
    pub xres: u32,
    pub yres: u32,
    pub xres_virtual: u32,
    pub yres_virtual: u32,
    pub xoffset: u32,
    pub yoffset: u32,
    pub bits_per_pixel: u32,
    pub grayscale: u32,
    pub red: FbBitfield,
    pub green: FbBitfield,
    pub blue: FbBitfield,
    pub transp: FbBitfield,
    pub nonstd: u32,
    pub activate: u32,
    pub height: u32,
    pub width: u32,
    pub accel_flags: u32,
    pub pixclock: u32,
    pub left_margin: u32,
    pub right_margin: u32,
    pub upper_margin: u32,
    pub lower_margin: u32,
    pub hsync_len: u32,
    pub vsync_len: u32,
    pub sync: u32,
    pub vmode: u32,
    pub rotate: u32,
    pub colorspace: u32,
    pub reserved: [u32; 4],
}

impl FixScreenInfo {
    /// Driver identification string
    pub fn id_str(&self) -> String {
        let end = self.id.iter().position(|&b| b == 0).unwrap_or(self.id.len());
        String::from_utf8_lossy(&self.id[..end]).into_owned()
    }
}

/// Live display geometry resolved from the two screen info queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Bytes per scanline
    pub stride: usize,
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u32,
    pub transp_length: u32,
}

impl Geometry {
    pub fn from_screen_info(fix: &FixScreenInfo, var: &VarScreenInfo) -> Self {
        Self {
            stride: fix.line_length as usize,
            width: var.xres,
            height: var.yres,
            bits_per_pixel: var.bits_per_pixel,
            transp_length: var.transp.length,
        }
    }

    /// Size of the region to map: stride × height
    pub fn map_len(&self) -> Option<usize> {
        self.stride.checked_mul(self.height as usize)
    }

    /// Canonical format for this depth, if any
    pub fn pixel_format(&self) -> Option<PixelFormat> {
        PixelFormat::from_depth(self.bits_per_pixel, self.transp_length)
    }

    /// Like [`pixel_format`](Self::pixel_format), reporting unresolved depths as an error
    pub fn resolve_format(&self) -> Result<PixelFormat> {
        self.pixel_format()
            .ok_or(SurfaceError::FormatSelection {
                bits_per_pixel: self.bits_per_pixel,
            })
    }
}
