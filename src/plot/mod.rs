//! Software plotting onto mapped display memory
//!
//! A minimal drawing layer under the surface:
//! - [`BBox`] clip and damage rectangles
//! - [`Plotter`]: format-dependent pixel encode/decode, picked by [`select_plotter`]
//! - [`Canvas`]: clipped fill, bitmap blit and rectangle read-back over a byte buffer

pub mod bbox;
pub mod packed;

pub use bbox::BBox;
pub use packed::PackedPlotter;

use crate::format::PixelFormat;

/// Colour value, `0xAABBGGRR`
pub type Colour = u32;

/// Split a colour into (r, g, b, a)
#[inline]
pub const fn channels(c: Colour) -> (u8, u8, u8, u8) {
    (c as u8, (c >> 8) as u8, (c >> 16) as u8, (c >> 24) as u8)
}

#[inline]
pub const fn from_channels(r: u8, g: u8, b: u8, a: u8) -> Colour {
    (a as u32) << 24 | (b as u32) << 16 | (g as u32) << 8 | r as u32
}

/// Composite `src` over `dst` using the source alpha. The result keeps `dst`'s alpha.
pub fn blend(src: Colour, dst: Colour) -> Colour {
    let (sr, sg, sb, sa) = channels(src);
    let (dr, dg, db, da) = channels(dst);
    let a = sa as u32;
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * (255 - a)) / 255) as u8;
    from_channels(mix(sr, dr), mix(sg, dg), mix(sb, db), da)
}

/// Pixel conversion for one stored format
pub trait Plotter {
    fn format(&self) -> PixelFormat;

    /// Store `colour` into `out` (at least `bytes_per_pixel` long)
    fn encode(&self, colour: Colour, out: &mut [u8]);

    /// Read the colour stored in `px`
    fn decode(&self, px: &[u8]) -> Colour;
}

static PLOTTERS: [PackedPlotter; 5] = [
    PackedPlotter::new(PixelFormat::Abgr8888),
    PackedPlotter::new(PixelFormat::Xbgr8888),
    PackedPlotter::new(PixelFormat::Rgb888),
    PackedPlotter::new(PixelFormat::Rgb565),
    PackedPlotter::new(PixelFormat::I8),
];

/// Find the plotter for `format`
pub fn select_plotter(format: PixelFormat) -> Option<&'static dyn Plotter> {
    PLOTTERS
        .iter()
        .find(|p| p.format() == format)
        .map(|p| p as &'static dyn Plotter)
}

/// Drawable view over a pixel buffer
pub struct Canvas<'a> {
    pixels: &'a mut [u8],
    stride: usize,
    width: u32,
    height: u32,
    clip: BBox,
    plotter: &'a dyn Plotter,
}

impl<'a> Canvas<'a> {
    /// `stride` is the byte length of one scanline. The clip starts as the full canvas.
    pub fn new(
        pixels: &'a mut [u8],
        stride: usize,
        width: u32,
        height: u32,
        plotter: &'a dyn Plotter,
    ) -> Self {
        Self {
            pixels,
            stride,
            width,
            height,
            clip: BBox::from_size(0, 0, width, height),
            plotter,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.plotter.format()
    }

    /// Whole canvas
    pub fn bounds(&self) -> BBox {
        BBox::from_size(0, 0, self.width, self.height)
    }

    pub fn clip(&self) -> BBox {
        self.clip
    }

    /// Restrict drawing to `clip` (kept inside the canvas). `None` clips to the whole canvas.
    pub fn set_clip(&mut self, clip: Option<BBox>) {
        let bounds = self.bounds();
        self.clip = match clip {
            Some(c) => c.intersection(&bounds).unwrap_or_default(),
            None => bounds,
        };
    }

    fn offset(&self, x: i32, y: i32) -> Option<std::ops::Range<usize>> {
        if !self.bounds().contains(x, y) {
            return None;
        }
        let bpp = self.plotter.format().bytes_per_pixel();
        let start = y as usize * self.stride + x as usize * bpp;
        let end = start + bpp;
        (end <= self.pixels.len()).then_some(start..end)
    }

    /// Colour at (x, y), ignoring the clip
    pub fn pixel(&self, x: i32, y: i32) -> Option<Colour> {
        let range = self.offset(x, y)?;
        Some(self.plotter.decode(&self.pixels[range]))
    }

    fn store(&mut self, x: i32, y: i32, colour: Colour) {
        if let Some(range) = self.offset(x, y) {
            self.plotter.encode(colour, &mut self.pixels[range]);
        }
    }

    /// Fill `rect` with a solid colour, clipped
    pub fn fill(&mut self, rect: &BBox, colour: Colour) {
        let Some(area) = rect.intersection(&self.clip) else {
            return;
        };
        for y in area.y0..area.y1 {
            for x in area.x0..area.x1 {
                self.store(x, y, colour);
            }
        }
    }

    /// Blit a `bmp_width` wide bitmap with its top-left corner at `loc`'s, clipped.
    ///
    /// With `alpha` set, source pixels are composited over the existing
    /// content: transparent pixels are skipped and opaque ones overwrite.
    pub fn bitmap(&mut self, loc: &BBox, bitmap: &[Colour], bmp_width: u32, alpha: bool) {
        let Some(area) = loc.intersection(&self.clip) else {
            return;
        };
        for y in area.y0..area.y1 {
            let row = (y - loc.y0) as usize * bmp_width as usize;
            for x in area.x0..area.x1 {
                let col = (x - loc.x0) as usize;
                if col >= bmp_width as usize {
                    break;
                }
                let Some(&src) = bitmap.get(row + col) else {
                    return;
                };
                let colour = if alpha {
                    match src >> 24 {
                        0 => continue,
                        0xFF => src,
                        _ => match self.pixel(x, y) {
                            Some(dst) => blend(src, dst),
                            None => continue,
                        },
                    }
                } else {
                    src
                };
                self.store(x, y, colour);
            }
        }
    }

    /// Read the pixels of `rect` (limited to the canvas) into `out`, row-major.
    ///
    /// Returns the area actually read, None if `rect` lies outside the canvas.
    pub fn read_rect(&self, rect: &BBox, out: &mut Vec<Colour>) -> Option<BBox> {
        out.clear();
        let area = rect.intersection(&self.bounds())?;
        out.reserve(area.width() as usize * area.height() as usize);
        for y in area.y0..area.y1 {
            for x in area.x0..area.x1 {
                out.push(self.pixel(x, y).unwrap_or_default());
            }
        }
        Some(area)
    }

    /// Copy the stored bytes of `rect` (limited to the canvas) into `out`, row-major.
    ///
    /// Unlike [`read_rect`](Self::read_rect) nothing is decoded, so padding
    /// and low-order bits survive a later [`write_rect_raw`](Self::write_rect_raw).
    pub fn read_rect_raw(&self, rect: &BBox, out: &mut Vec<u8>) -> Option<BBox> {
        out.clear();
        let area = rect.intersection(&self.bounds())?;
        let bpp = self.plotter.format().bytes_per_pixel();
        out.reserve(area.width() as usize * area.height() as usize * bpp);
        for y in area.y0..area.y1 {
            for x in area.x0..area.x1 {
                match self.offset(x, y) {
                    Some(range) => out.extend_from_slice(&self.pixels[range]),
                    None => out.extend(std::iter::repeat(0).take(bpp)),
                }
            }
        }
        Some(area)
    }

    /// Write bytes produced by [`read_rect_raw`](Self::read_rect_raw) for
    /// `rect` back, clipped.
    pub fn write_rect_raw(&mut self, rect: &BBox, bytes: &[u8]) {
        let Some(area) = rect.intersection(&self.clip) else {
            return;
        };
        let bpp = self.plotter.format().bytes_per_pixel();
        let row_len = rect.width() as usize * bpp;
        for y in area.y0..area.y1 {
            for x in area.x0..area.x1 {
                let start = (y - rect.y0) as usize * row_len + (x - rect.x0) as usize * bpp;
                let (Some(src), Some(dst)) = (bytes.get(start..start + bpp), self.offset(x, y))
                else {
                    continue;
                };
                self.pixels[dst].copy_from_slice(src);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(buf: &mut [u8], width: u32, height: u32) -> Canvas<'_> {
        let plotter = select_plotter(PixelFormat::Abgr8888).unwrap();
        Canvas::new(buf, width as usize * 4, width, height, plotter)
    }

    #[test]
    fn test_select_plotter_covers_all_formats() {
        for format in [
            PixelFormat::Abgr8888,
            PixelFormat::Xbgr8888,
            PixelFormat::Rgb888,
            PixelFormat::Rgb565,
            PixelFormat::I8,
        ] {
            assert_eq!(select_plotter(format).map(|p| p.format()), Some(format));
        }
    }

    #[test]
    fn test_blend() {
        assert_eq!(blend(0xFFFF_FFFF, 0xFF00_0000), 0xFFFF_FFFF);
        assert_eq!(blend(0x00FF_FFFF, 0xFF00_0000), 0xFF00_0000);
        let (r, _, _, a) = channels(blend(0x8000_00FF, 0xFF00_0000));
        assert_eq!(r, 0x80);
        assert_eq!(a, 0xFF);
    }

    #[test]
    fn test_fill_respects_clip() {
        let mut buf = vec![0u8; 8 * 8 * 4];
        let mut c = canvas(&mut buf, 8, 8);
        c.set_clip(Some(BBox::new(2, 2, 4, 4)));
        c.fill(&c.bounds(), 0xFF00_00FF);
        assert_eq!(c.pixel(2, 2), Some(0xFF00_00FF));
        assert_eq!(c.pixel(3, 3), Some(0xFF00_00FF));
        assert_eq!(c.pixel(4, 4), Some(0));
        assert_eq!(c.pixel(1, 2), Some(0));
    }

    #[test]
    fn test_set_clip_limited_to_canvas() {
        let mut buf = vec![0u8; 4 * 4 * 4];
        let mut c = canvas(&mut buf, 4, 4);
        c.set_clip(Some(BBox::new(-10, -10, 2, 100)));
        assert_eq!(c.clip(), BBox::new(0, 0, 2, 4));
        c.set_clip(None);
        assert_eq!(c.clip(), c.bounds());
    }

    #[test]
    fn test_bitmap_partially_offscreen() {
        let mut buf = vec![0u8; 4 * 4 * 4];
        let mut c = canvas(&mut buf, 4, 4);
        let bmp: Vec<Colour> = (0..9).map(|i| 0xFF00_0000 | i).collect();
        c.bitmap(&BBox::from_size(-1, -1, 3, 3), &bmp, 3, false);
        // Bitmap (1, 1) lands on canvas (0, 0)
        assert_eq!(c.pixel(0, 0), Some(0xFF00_0004));
        assert_eq!(c.pixel(1, 1), Some(0xFF00_0008));
        assert_eq!(c.pixel(2, 2), Some(0));
    }

    #[test]
    fn test_bitmap_alpha_skips_transparent() {
        let mut buf = vec![0u8; 2 * 1 * 4];
        let mut c = canvas(&mut buf, 2, 1);
        c.fill(&c.bounds(), 0xFF11_1111);
        c.bitmap(&BBox::new(0, 0, 2, 1), &[0x0000_00FF, 0xFF00_FF00], 2, true);
        assert_eq!(c.pixel(0, 0), Some(0xFF11_1111));
        assert_eq!(c.pixel(1, 0), Some(0xFF00_FF00));
    }

    #[test]
    fn test_read_rect() {
        let mut buf = vec![0u8; 4 * 4 * 4];
        let mut c = canvas(&mut buf, 4, 4);
        c.fill(&BBox::new(2, 2, 4, 4), 0xFFAB_CDEF);
        let mut out = Vec::new();
        let area = c.read_rect(&BBox::new(2, 2, 6, 6), &mut out);
        assert_eq!(area, Some(BBox::new(2, 2, 4, 4)));
        assert_eq!(out, vec![0xFFAB_CDEF; 4]);
        assert_eq!(c.read_rect(&BBox::new(5, 5, 9, 9), &mut out), None);
        assert!(out.is_empty());
    }

    #[test]
    fn test_raw_rect_keeps_padding_byte() {
        let mut buf = vec![0xA5u8; 4 * 4 * 4];
        let before = buf.clone();
        let plotter = select_plotter(PixelFormat::Xbgr8888).unwrap();
        let mut c = Canvas::new(&mut buf, 16, 4, 4, plotter);

        let rect = BBox::new(1, 1, 6, 3);
        let mut saved = Vec::new();
        let area = c.read_rect_raw(&rect, &mut saved).unwrap();
        assert_eq!(area, BBox::new(1, 1, 4, 3));
        assert_eq!(saved.len(), 3 * 2 * 4);

        c.fill(&c.bounds(), 0xFF00_0000);
        c.write_rect_raw(&area, &saved);
        assert_eq!(c.pixel(0, 0), Some(0xFF00_0000));
        drop(c);
        assert_eq!(&buf[20..32], &before[20..32]);
        assert_eq!(&buf[36..48], &before[36..48]);
    }

    #[test]
    fn test_write_rect_raw_respects_clip() {
        let mut buf = vec![0u8; 8];
        let plotter = select_plotter(PixelFormat::Rgb565).unwrap();
        let mut c = Canvas::new(&mut buf, 8, 4, 1, plotter);
        c.set_clip(Some(BBox::new(0, 0, 2, 1)));
        c.write_rect_raw(&BBox::new(0, 0, 4, 1), &[0xFF; 8]);
        drop(c);
        assert_eq!(buf, [0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0]);
    }
}
