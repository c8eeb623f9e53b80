//! Cursor overlay compositing
//!
//! The cursor is drawn straight into display memory on top of whatever is
//! there. Before drawing, the stored bytes it will cover are saved
//! undecoded; they are put back verbatim before the cursor moves or before
//! anyone draws into a region the cursor overlaps.
//!
//! ```text
//!   not plotted ──update()/plot──▶ plotted
//!        ▲                             │
//!        └──── claim(region) / erase ──┘
//! ```
//!
//! Cursor pixels are never read back: a move always restores the saved
//! background first and saves again at the new location.

use log::trace;

use crate::plot::{BBox, Canvas, Colour};

/// Largest arrow [`CursorSprite::arrow`] builds
pub const MAX_ARROW_SIZE: u32 = 256;

/// Cursor image with its hotspot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorSprite {
    pub width: u32,
    pub height: u32,
    /// Row-major `0xAABBGGRR` pixels, `width * height` long
    pub pixels: Vec<Colour>,
    pub hotspot_x: i32,
    pub hotspot_y: i32,
}

impl CursorSprite {
    /// Returns None when `pixels` does not hold exactly `width * height` entries.
    pub fn new(width: u32, height: u32, pixels: Vec<Colour>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
            hotspot_x: 0,
            hotspot_y: 0,
        })
    }

    pub fn with_hotspot(mut self, x: i32, y: i32) -> Self {
        self.hotspot_x = x;
        self.hotspot_y = y;
        self
    }

    /// Arrow pointer, `size` pixels tall, black outline with white fill
    pub fn arrow(size: u32) -> Self {
        let size = size.clamp(2, MAX_ARROW_SIZE);
        let width = size / 2 + 1;
        let (w, h) = (width as usize, size as usize);
        let mut pixels = vec![0u32; w * h];
        for y in 0..h {
            let span = (y / 2 + 1).min(w);
            for x in 0..span {
                let edge = x == 0 || x + 1 == span || y + 1 == h;
                pixels[y * w + x] = if edge { 0xFF00_0000 } else { 0xFFFF_FFFF };
            }
        }
        Self {
            width,
            height: size,
            pixels,
            hotspot_x: 0,
            hotspot_y: 0,
        }
    }
}

/// Change applied through [`Compositor::cursor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorRequest {
    /// Install or replace the sprite, keeping the position
    Show(CursorSprite),
    /// Move the hotspot to (x, y)
    MoveTo { x: i32, y: i32 },
    /// Remove the cursor
    Hide,
}

#[derive(Debug)]
struct Cursor {
    sprite: CursorSprite,
    /// Pointer (hotspot) position
    x: i32,
    y: i32,
    /// Area the saved bytes were read from
    savloc: BBox,
    /// Stored bytes under `savloc`, exactly as the device held them
    saved: Vec<u8>,
    plotted: bool,
}

impl Cursor {
    fn loc(&self) -> BBox {
        BBox::from_size(
            self.x - self.sprite.hotspot_x,
            self.y - self.sprite.hotspot_y,
            self.sprite.width,
            self.sprite.height,
        )
    }

    fn plot(&mut self, canvas: &mut Canvas<'_>) {
        let clip = canvas.clip();
        canvas.set_clip(None);

        let loc = self.loc();
        self.savloc = canvas
            .read_rect_raw(&loc, &mut self.saved)
            .unwrap_or_default();
        canvas.bitmap(&loc, &self.sprite.pixels, self.sprite.width, true);

        canvas.set_clip(Some(clip));
        self.plotted = true;
        trace!("cursor: plotted at {:?}", loc);
    }

    fn erase(&mut self, canvas: &mut Canvas<'_>) {
        let clip = canvas.clip();
        canvas.set_clip(None);
        canvas.write_rect_raw(&self.savloc, &self.saved);
        canvas.set_clip(Some(clip));
        self.plotted = false;
        trace!("cursor: restored {:?}", self.savloc);
    }
}

/// Owns the cursor state of one surface
#[derive(Debug, Default)]
pub struct Compositor {
    cursor: Option<Cursor>,
    /// Position kept while no sprite is installed
    x: i32,
    y: i32,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_cursor(&self) -> bool {
        self.cursor.is_some()
    }

    /// True while the overlay is composited onto the surface
    pub fn is_plotted(&self) -> bool {
        self.cursor.as_ref().is_some_and(|c| c.plotted)
    }

    /// Hotspot position
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Area the sprite covers at its current position
    pub fn location(&self) -> Option<BBox> {
        self.cursor.as_ref().map(Cursor::loc)
    }

    /// Erase the overlay if it is plotted and overlaps `region`.
    ///
    /// Call before drawing into `region`. The saved pixels are restored with
    /// the clip disabled.
    pub fn claim(&mut self, canvas: &mut Canvas<'_>, region: &BBox) {
        if let Some(cursor) = self.cursor.as_mut() {
            if cursor.plotted && cursor.loc().intersects(region) {
                cursor.erase(canvas);
            }
        }
    }

    /// Apply `request`. A plotted overlay is erased at its old location and
    /// drawn again in its new state; otherwise only the state changes and
    /// the next [`update`](Self::update) draws it.
    pub fn cursor(&mut self, canvas: &mut Canvas<'_>, request: CursorRequest) {
        let was_plotted = self.is_plotted();
        if let Some(cursor) = self.cursor.as_mut().filter(|c| c.plotted) {
            cursor.erase(canvas);
        }
        self.apply(request);
        if was_plotted {
            if let Some(cursor) = self.cursor.as_mut() {
                cursor.plot(canvas);
            }
        }
    }

    /// Draw the overlay if it exists and is not currently plotted.
    pub fn update(&mut self, canvas: &mut Canvas<'_>, _region: &BBox) {
        if let Some(cursor) = self.cursor.as_mut().filter(|c| !c.plotted) {
            cursor.plot(canvas);
        }
    }

    /// Change cursor state without touching any pixels.
    ///
    /// Used while no display memory is mapped.
    pub fn apply(&mut self, request: CursorRequest) {
        match request {
            CursorRequest::Show(sprite) => match self.cursor.as_mut() {
                Some(cursor) => cursor.sprite = sprite,
                None => {
                    self.cursor = Some(Cursor {
                        sprite,
                        x: self.x,
                        y: self.y,
                        savloc: BBox::default(),
                        saved: Vec::new(),
                        plotted: false,
                    })
                }
            },
            CursorRequest::MoveTo { x, y } => {
                self.x = x;
                self.y = y;
                if let Some(cursor) = self.cursor.as_mut() {
                    cursor.x = x;
                    cursor.y = y;
                }
            }
            CursorRequest::Hide => self.cursor = None,
        }
    }

    /// Forget that the overlay is on screen. Used when display memory goes away.
    pub fn reset(&mut self) {
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.plotted = false;
            cursor.saved.clear();
            cursor.savloc = BBox::default();
        }
    }
}
