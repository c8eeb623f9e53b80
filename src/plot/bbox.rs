//! Axis-aligned bounding boxes

/// Rectangle with inclusive top-left (`x0`, `y0`) and exclusive
/// bottom-right (`x1`, `y1`) corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BBox {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box of `width` × `height` with its top-left corner at (x, y)
    pub const fn from_size(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x.saturating_add(width as i32),
            y1: y.saturating_add(height as i32),
        }
    }

    pub const fn width(&self) -> u32 {
        if self.x1 > self.x0 {
            (self.x1 - self.x0) as u32
        } else {
            0
        }
    }

    pub const fn height(&self) -> u32 {
        if self.y1 > self.y0 {
            (self.y1 - self.y0) as u32
        } else {
            0
        }
    }

    /// No pixel covered
    pub const fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// True when the two boxes share at least one pixel
    pub fn intersects(&self, other: &BBox) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }

    /// Overlap of the two boxes, None if they do not intersect
    pub fn intersection(&self, other: &BBox) -> Option<BBox> {
        let r = BBox {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        if r.is_empty() {
            None
        } else {
            Some(r)
        }
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}
