//! Error taxonomy for the surface backend

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::format::PixelFormat;

/// Errors reported by surface lifecycle, input polling, and format negotiation.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// initialise()/set_geometry() on a surface that is already ready
    #[error("surface is already initialised")]
    AlreadyInitialised,

    /// Drawing on a surface with no mapped display memory
    #[error("surface is not initialised")]
    NotInitialised,

    /// Display or input device could not be opened
    #[error("cannot open {}: {source}", path.display())]
    DeviceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Fixed or variable screen info query failed
    #[error("{query} failed: {source}")]
    GeometryQuery {
        query: &'static str,
        #[source]
        source: io::Error,
    },

    /// Display memory could not be mapped
    #[error("cannot map {len} bytes of display memory: {source}")]
    Mapping {
        len: usize,
        #[source]
        source: io::Error,
    },

    /// Device reports a bit depth with no canonical pixel format
    #[error("unsupported display depth: {bits_per_pixel} bits per pixel")]
    FormatSelection { bits_per_pixel: u32 },

    /// No software plotter is registered for the format
    #[error("no plotter available for {0}")]
    NoPlotter(PixelFormat),

    /// Input device failed to open during initialise (or surface not ready)
    #[error("no input device available")]
    InputUnavailable,

    /// Readiness wait on the input device failed
    #[error("input wait failed: {0}")]
    Wait(#[source] io::Error),

    /// Read from the input device failed
    #[error("input read failed: {0}")]
    Read(#[source] io::Error),

    /// Fewer bytes than one full record were read
    #[error("short read from input device: {0} bytes")]
    ShortRead(usize),

    /// Batch contained no key record
    #[error("no key event in input batch")]
    NoKeyEvent,

    /// First key record carried a value that is not translated (e.g. autorepeat)
    #[error("key code {code} with value {value} is not translated")]
    UntranslatedKey { code: u16, value: i32 },
}

pub type Result<T> = std::result::Result<T, SurfaceError>;
