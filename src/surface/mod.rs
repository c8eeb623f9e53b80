//! Surface backends
//!
//! A backend owns one display surface and its input device. The host
//! library talks to it only through [`SurfaceBackend`]; backends are found
//! in a small static registry by [`SurfaceType`] or by name.

pub mod linux;

pub use linux::LinuxSurface;

use std::fmt;

use crate::config::Config;
use crate::cursor::CursorRequest;
use crate::error::Result;
use crate::format::PixelFormat;
use crate::input::Event;
use crate::plot::{BBox, Canvas};

/// Operations every surface backend provides
pub trait SurfaceBackend {
    /// Record the requested size and format. Fails once initialised.
    ///
    /// `format: None` keeps the currently selected format.
    fn set_geometry(&mut self, width: u32, height: u32, format: Option<PixelFormat>) -> Result<()>;

    /// Open and map the display, open the input device
    fn initialise(&mut self) -> Result<()>;

    /// Release everything `initialise` acquired. No-op when not initialised.
    fn finalise(&mut self);

    /// Poll for one input event
    fn input(&mut self, timeout_ms: i32) -> Result<Event>;

    /// Prepare `region` for drawing (takes the cursor overlay off it)
    fn claim(&mut self, region: &BBox);

    /// `region` was drawn (puts the cursor overlay back)
    fn update(&mut self, region: &BBox);

    /// Change the cursor
    fn cursor(&mut self, request: CursorRequest);

    /// Draw into `region`: claim, run `f` on the canvas, update
    fn draw(&mut self, region: &BBox, f: &mut dyn FnMut(&mut Canvas<'_>)) -> Result<()>;

    /// Current geometry, None before initialise
    fn info(&self) -> Option<SurfaceInfo>;

    fn is_initialised(&self) -> bool {
        self.info().is_some()
    }
}

/// Negotiated geometry of a ready surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceInfo {
    pub width: u32,
    pub height: u32,
    /// Bytes per scanline
    pub stride: usize,
    pub format: PixelFormat,
}

/// Backend identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceType {
    /// Linux framebuffer + evdev
    Linux,
}

impl SurfaceType {
    pub fn name(self) -> &'static str {
        backend_entry(self).map_or("unknown", |e| e.name)
    }

    /// Look a backend up by its registered name
    pub fn from_name(name: &str) -> Option<Self> {
        BACKENDS
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .map(|e| e.kind)
    }
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Constructor = fn(&Config) -> Result<Box<dyn SurfaceBackend>>;

struct BackendEntry {
    kind: SurfaceType,
    name: &'static str,
    create: Constructor,
}

static BACKENDS: &[BackendEntry] = &[BackendEntry {
    kind: SurfaceType::Linux,
    name: "linux",
    create: linux::create,
}];

fn backend_entry(kind: SurfaceType) -> Option<&'static BackendEntry> {
    BACKENDS.iter().find(|e| e.kind == kind)
}

/// Registered backends
pub fn backends() -> impl Iterator<Item = (SurfaceType, &'static str)> {
    BACKENDS.iter().map(|e| (e.kind, e.name))
}

/// Construct the backend registered for `kind`, configured but not initialised.
///
/// Returns None if no backend is registered for `kind`.
pub fn create_surface(
    kind: SurfaceType,
    config: &Config,
) -> Option<Result<Box<dyn SurfaceBackend>>> {
    backend_entry(kind).map(|e| (e.create)(config))
}
