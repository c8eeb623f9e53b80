//! Pixel format tags and bit-depth negotiation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical pixel layout of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// 32bpp with alpha, channel order A,B,G,R
    Abgr8888,
    /// 32bpp without alpha, channel order B,G,R,X
    Xbgr8888,
    /// 24bpp packed RGB
    Rgb888,
    /// 16bpp RGB565
    Rgb565,
    /// 8bpp indexed
    I8,
}

impl PixelFormat {
    /// Derive the format from the device's bit depth and transparency length.
    ///
    /// 1bpp devices fall back to RGB565. Any other depth is unresolved.
    pub const fn from_depth(bits_per_pixel: u32, transp_length: u32) -> Option<Self> {
        match bits_per_pixel {
            32 if transp_length == 0 => Some(Self::Xbgr8888),
            32 => Some(Self::Abgr8888),
            24 => Some(Self::Rgb888),
            16 => Some(Self::Rgb565),
            8 => Some(Self::I8),
            1 => Some(Self::Rgb565),
            _ => None,
        }
    }

    /// Bytes occupied by one stored pixel
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Abgr8888 | Self::Xbgr8888 => 4,
            Self::Rgb888 => 3,
            Self::Rgb565 => 2,
            Self::I8 => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Abgr8888 => "abgr8888",
            Self::Xbgr8888 => "xbgr8888",
            Self::Rgb888 => "rgb888",
            Self::Rgb565 => "rgb565",
            Self::I8 => "i8",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
