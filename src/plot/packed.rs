//! Packed pixel plotters
//!
//! One [`PackedPlotter`] per [`PixelFormat`]. Each converts between the
//! `0xAABBGGRR` [`Colour`] value and the bytes stored in display memory.

use super::{channels, from_channels, Colour, Plotter};
use crate::format::PixelFormat;

/// Plotter for a packed (non-planar) pixel layout
#[derive(Debug, Clone, Copy)]
pub struct PackedPlotter {
    format: PixelFormat,
}

impl PackedPlotter {
    pub const fn new(format: PixelFormat) -> Self {
        Self { format }
    }
}

impl Plotter for PackedPlotter {
    fn format(&self) -> PixelFormat {
        self.format
    }

    fn encode(&self, colour: Colour, out: &mut [u8]) {
        let (r, g, b, _) = channels(colour);
        match self.format {
            PixelFormat::Abgr8888 => out[..4].copy_from_slice(&colour.to_le_bytes()),
            PixelFormat::Xbgr8888 => {
                let v = (r as u32) << 16 | (g as u32) << 8 | b as u32;
                out[..4].copy_from_slice(&v.to_le_bytes());
            }
            PixelFormat::Rgb888 => {
                out[0] = b;
                out[1] = g;
                out[2] = r;
            }
            PixelFormat::Rgb565 => {
                let v = ((r as u16) >> 3) << 11 | ((g as u16) >> 2) << 5 | (b as u16) >> 3;
                out[..2].copy_from_slice(&v.to_le_bytes());
            }
            PixelFormat::I8 => out[0] = (r & 0xE0) | ((g & 0xE0) >> 3) | (b >> 6),
        }
    }

    fn decode(&self, px: &[u8]) -> Colour {
        match self.format {
            PixelFormat::Abgr8888 => u32::from_le_bytes([px[0], px[1], px[2], px[3]]),
            PixelFormat::Xbgr8888 => {
                let v = u32::from_le_bytes([px[0], px[1], px[2], px[3]]);
                from_channels((v >> 16) as u8, (v >> 8) as u8, v as u8, 0xFF)
            }
            PixelFormat::Rgb888 => from_channels(px[2], px[1], px[0], 0xFF),
            PixelFormat::Rgb565 => {
                let v = u16::from_le_bytes([px[0], px[1]]);
                let r5 = ((v >> 11) & 0x1F) as u8;
                let g6 = ((v >> 5) & 0x3F) as u8;
                let b5 = (v & 0x1F) as u8;
                from_channels(r5 << 3 | r5 >> 2, g6 << 2 | g6 >> 4, b5 << 3 | b5 >> 2, 0xFF)
            }
            PixelFormat::I8 => {
                let idx = px[0];
                let r3 = (idx >> 5) as u32;
                let g3 = ((idx >> 2) & 0x07) as u32;
                let b2 = (idx & 0x03) as u32;
                from_channels(
                    (r3 * 255 / 7) as u8,
                    (g3 * 255 / 7) as u8,
                    (b2 * 255 / 3) as u8,
                    0xFF,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(format: PixelFormat, colour: Colour) -> Vec<u8> {
        let mut out = vec![0u8; format.bytes_per_pixel()];
        PackedPlotter::new(format).encode(colour, &mut out);
        out
    }

    #[test]
    fn test_byte_layouts() {
        // Colour is 0xAABBGGRR: r=0x11 g=0x22 b=0x33 a=0x80
        let c = 0x8033_2211;
        assert_eq!(store(PixelFormat::Abgr8888, c), [0x11, 0x22, 0x33, 0x80]);
        assert_eq!(store(PixelFormat::Xbgr8888, c), [0x33, 0x22, 0x11, 0x00]);
        assert_eq!(store(PixelFormat::Rgb888, c), [0x33, 0x22, 0x11]);
    }

    #[test]
    fn test_rgb565() {
        assert_eq!(store(PixelFormat::Rgb565, 0xFF00_00FF), 0xF800u16.to_le_bytes());
        assert_eq!(store(PixelFormat::Rgb565, 0xFF00_FF00), 0x07E0u16.to_le_bytes());
        assert_eq!(store(PixelFormat::Rgb565, 0xFFFF_0000), 0x001Fu16.to_le_bytes());
        let p = PackedPlotter::new(PixelFormat::Rgb565);
        assert_eq!(p.decode(&0xFFFFu16.to_le_bytes()), 0xFFFF_FFFF);
    }

    #[test]
    fn test_i8_extremes() {
        assert_eq!(store(PixelFormat::I8, 0xFFFF_FFFF), [0xFF]);
        assert_eq!(store(PixelFormat::I8, 0xFF00_0000), [0x00]);
        let p = PackedPlotter::new(PixelFormat::I8);
        assert_eq!(p.decode(&[0xFF]), 0xFFFF_FFFF);
        assert_eq!(p.decode(&[0xE0]), 0xFF00_00FF);
    }

    #[test]
    fn test_reencode_is_stable() {
        // Restoring a read-back pixel must reproduce the stored bytes.
        for format in [
            PixelFormat::Abgr8888,
            PixelFormat::Xbgr8888,
            PixelFormat::Rgb888,
            PixelFormat::Rgb565,
            PixelFormat::I8,
        ] {
            let p = PackedPlotter::new(format);
            for c in [0xFF12_3456u32, 0xFF80_80C0, 0xFF00_0000, 0xFFFF_FFFF] {
                let first = store(format, c);
                let again = store(format, p.decode(&first));
                assert_eq!(first, again, "{} {:08x}", format, c);
            }
        }
    }
}
