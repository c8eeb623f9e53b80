//! Linux framebuffer surface
//!
//! Lifecycle: `Uninitialised ──initialise──▶ Ready ──finalise──▶ Uninitialised`
//!
//! `Ready` owns the display handle, its memory mapping and the (optional)
//! keyboard handle together, so the surface is either fully mapped or fully
//! torn down. A failed initialise drops whatever it acquired so far.

use log::{debug, info, warn};
use memmap2::MmapMut;
use std::io;
use std::os::unix::io::RawFd;

use super::{SurfaceBackend, SurfaceInfo};
use crate::config::Config;
use crate::cursor::{Compositor, CursorRequest};
use crate::error::{Result, SurfaceError};
use crate::fb::{DeviceProvider, DisplayDevice, Geometry, LinuxDevices};
use crate::format::PixelFormat;
use crate::input::{Event, InputDevice};
use crate::plot::{select_plotter, BBox, Canvas, PackedPlotter, Plotter};

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;
static DEFAULT_PLOTTER: PackedPlotter = PackedPlotter::new(PixelFormat::Xbgr8888);

/// Resources held while the surface is ready
struct Mapped {
    buffer: MmapMut,
    _display: Box<dyn DisplayDevice>,
    stride: usize,
    input: Option<InputDevice>,
}

enum SurfaceState {
    Uninitialised,
    Ready(Mapped),
}

/// Framebuffer + evdev surface backend
pub struct LinuxSurface {
    devices: Box<dyn DeviceProvider>,
    width: u32,
    height: u32,
    plotter: &'static dyn Plotter,
    clip: Option<BBox>,
    state: SurfaceState,
    compositor: Compositor,
}

/// Registry constructor
pub(super) fn create(config: &Config) -> Result<Box<dyn SurfaceBackend>> {
    Ok(Box::new(LinuxSurface::from_config(config)?))
}

impl LinuxSurface {
    /// Uninitialised surface using `devices`, 800x600 xbgr8888 requested
    pub fn new(devices: Box<dyn DeviceProvider>) -> Self {
        Self {
            devices,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            plotter: &DEFAULT_PLOTTER,
            clip: None,
            state: SurfaceState::Uninitialised,
            compositor: Compositor::new(),
        }
    }

    /// Surface on the configured device nodes with the configured geometry requested
    pub fn from_config(config: &Config) -> Result<Self> {
        let devices = LinuxDevices::new(&config.device.framebuffer, &config.device.input);
        let mut surface = Self::new(Box::new(devices));
        let geometry = &config.geometry;
        surface.set_geometry(geometry.width, geometry.height, Some(geometry.format))?;
        Ok(surface)
    }

    /// Currently selected pixel format (requested until initialised, then the device's)
    pub fn format(&self) -> PixelFormat {
        self.plotter.format()
    }

    /// Requested or negotiated size
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Drawing clip. `None` means the whole surface.
    pub fn set_clip(&mut self, clip: Option<BBox>) {
        self.clip = clip;
    }

    /// Effective clip rectangle
    pub fn clip(&self) -> BBox {
        let bounds = BBox::from_size(0, 0, self.width, self.height);
        match self.clip {
            Some(c) => c.intersection(&bounds).unwrap_or_default(),
            None => bounds,
        }
    }

    /// Whether an input device was opened by initialise
    pub fn has_input(&self) -> bool {
        matches!(&self.state, SurfaceState::Ready(m) if m.input.is_some())
    }

    /// Input device fd, for callers multiplexing several sources
    pub fn input_fd(&self) -> Option<RawFd> {
        match &self.state {
            SurfaceState::Ready(m) => m.input.as_ref().map(InputDevice::fd),
            SurfaceState::Uninitialised => None,
        }
    }

    /// Borrow display memory as a canvas together with the compositor
    fn split(&mut self) -> Option<(Canvas<'_>, &mut Compositor)> {
        let SurfaceState::Ready(mapped) = &mut self.state else {
            return None;
        };
        let mut canvas = Canvas::new(
            &mut mapped.buffer[..],
            mapped.stride,
            self.width,
            self.height,
            self.plotter,
        );
        canvas.set_clip(self.clip);
        Some((canvas, &mut self.compositor))
    }

    fn map_display(&self) -> Result<(Mapped, Geometry, &'static dyn Plotter)> {
        let display = self.devices.open_display()?;
        let fix = display.fixed_info()?;
        let var = display.variable_info()?;
        let geometry = Geometry::from_screen_info(&fix, &var);

        let len = geometry.map_len().ok_or_else(|| SurfaceError::Mapping {
            len: usize::MAX,
            source: io::Error::new(io::ErrorKind::InvalidInput, "display region too large"),
        })?;
        let buffer = display.map(len)?;
        info!(
            "Mapped {} bytes of display memory ({}x{}, stride {})",
            len, geometry.width, geometry.height, geometry.stride
        );

        // The device decides the format, whatever was requested
        let format = geometry.resolve_format()?;
        let plotter = if format == self.plotter.format() {
            self.plotter
        } else {
            debug!(
                "Device format {} differs from requested {}, reselecting plotter",
                format,
                self.plotter.format()
            );
            select_plotter(format).ok_or(SurfaceError::NoPlotter(format))?
        };

        let mapped = Mapped {
            buffer,
            _display: display,
            stride: geometry.stride,
            input: None,
        };
        Ok((mapped, geometry, plotter))
    }
}

impl SurfaceBackend for LinuxSurface {
    fn set_geometry(&mut self, width: u32, height: u32, format: Option<PixelFormat>) -> Result<()> {
        if self.is_initialised() {
            return Err(SurfaceError::AlreadyInitialised);
        }
        let plotter = match format {
            Some(f) => select_plotter(f).ok_or(SurfaceError::NoPlotter(f))?,
            None => self.plotter,
        };
        self.width = width;
        self.height = height;
        self.plotter = plotter;
        Ok(())
    }

    fn initialise(&mut self) -> Result<()> {
        if self.is_initialised() {
            return Err(SurfaceError::AlreadyInitialised);
        }

        let (mut mapped, geometry, plotter) = self.map_display().map_err(|e| {
            warn!("Surface initialisation failed: {}", e);
            e
        })?;

        mapped.input = match self.devices.open_input() {
            Ok(file) => Some(InputDevice::new(file)),
            Err(e) => {
                warn!("Continuing without keyboard input: {}", e);
                None
            }
        };

        self.width = geometry.width;
        self.height = geometry.height;
        self.plotter = plotter;
        self.compositor.reset();
        self.state = SurfaceState::Ready(mapped);
        info!(
            "Surface ready: {}x{} {}",
            self.width,
            self.height,
            plotter.format()
        );
        Ok(())
    }

    fn finalise(&mut self) {
        if let SurfaceState::Ready(mapped) =
            std::mem::replace(&mut self.state, SurfaceState::Uninitialised)
        {
            drop(mapped);
            self.compositor.reset();
            info!("Surface finalised");
        }
    }

    fn input(&mut self, timeout_ms: i32) -> Result<Event> {
        let SurfaceState::Ready(mapped) = &mut self.state else {
            return Err(SurfaceError::InputUnavailable);
        };
        let input = mapped.input.as_mut().ok_or(SurfaceError::InputUnavailable)?;
        input.poll_event(timeout_ms)
    }

    fn claim(&mut self, region: &BBox) {
        if let Some((mut canvas, compositor)) = self.split() {
            compositor.claim(&mut canvas, region);
        }
    }

    fn update(&mut self, region: &BBox) {
        if let Some((mut canvas, compositor)) = self.split() {
            compositor.update(&mut canvas, region);
        }
    }

    fn cursor(&mut self, request: CursorRequest) {
        if let SurfaceState::Uninitialised = self.state {
            self.compositor.apply(request);
            return;
        }
        if let Some((mut canvas, compositor)) = self.split() {
            compositor.cursor(&mut canvas, request);
        }
    }

    fn draw(&mut self, region: &BBox, f: &mut dyn FnMut(&mut Canvas<'_>)) -> Result<()> {
        let (mut canvas, compositor) = self.split().ok_or(SurfaceError::NotInitialised)?;
        compositor.claim(&mut canvas, region);
        f(&mut canvas);
        compositor.update(&mut canvas, region);
        Ok(())
    }

    fn info(&self) -> Option<SurfaceInfo> {
        match &self.state {
            SurfaceState::Ready(mapped) => Some(SurfaceInfo {
                width: self.width,
                height: self.height,
                stride: mapped.stride,
                format: self.plotter.format(),
            }),
            SurfaceState::Uninitialised => None,
        }
    }
}

impl Drop for LinuxSurface {
    fn drop(&mut self) {
        self.finalise();
    }
}
