//! fbsurface - Linux framebuffer surface backend
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │     Host windowing library (plotting)    │
//! ├──────────────────────────────────────────┤
//! │  SurfaceBackend registry  →  "linux"     │
//! │         ↓                     ↓          │
//! │  Lifecycle (fb + mmap)   Input (evdev)   │
//! │         ↓                                │
//! │  Cursor compositor (save / restore)      │
//! └──────────────────────────────────────────┘
//! ```
//!
//! The backend owns the memory-mapped display buffer and the keyboard
//! device handle. Plotting code draws through a [`plot::Canvas`]; the
//! backend only negotiates the pixel format, composites the cursor overlay,
//! and turns raw key records into [`Event`]s.

pub mod config;
pub mod constants;
pub mod cursor;
pub mod error;
pub mod fb;
pub mod format;
pub mod input;
pub mod plot;
pub mod surface;

pub use cursor::{Compositor, CursorRequest, CursorSprite};
pub use error::SurfaceError;
pub use format::PixelFormat;
pub use input::{ControlCode, Event, KeyCode};
pub use plot::{BBox, Colour};
pub use surface::{create_surface, LinuxSurface, SurfaceBackend, SurfaceInfo, SurfaceType};
