//! fbsurface-probe - exercise the framebuffer backend on a real console
//!
//! Initialises the `linux` backend, reports the negotiated geometry, draws a
//! test pattern with a cursor, and echoes key events until Escape.

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};

use fbsurface::config::Config;
use fbsurface::cursor::{CursorRequest, CursorSprite};
use fbsurface::surface::{create_surface, SurfaceBackend, SurfaceType};
use fbsurface::{BBox, Event, KeyCode, SurfaceError};

/// Set by SIGTERM/SIGINT/SIGHUP
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

fn setup_signal_handlers() {
    unsafe {
        for sig in [libc::SIGTERM, libc::SIGINT, libc::SIGHUP] {
            libc::signal(sig, shutdown_signal_handler as *const () as libc::sighandler_t);
        }
    }
}

extern "C" fn shutdown_signal_handler(_signo: libc::c_int) {
    SHUTDOWN_REQUESTED.store(true, Ordering::Relaxed);
}

/// Print help message
fn print_help() {
    println!(
        r#"fbsurface-probe {} - Linux framebuffer surface probe

USAGE:
    fbsurface-probe [OPTIONS]

OPTIONS:
    -h, --help              Print this help message
    -V, --version           Print version information
    --backend=NAME          Surface backend (default: linux)
    --init-config           Write the default config file
    --no-draw               Only report geometry and echo keys

CONFIG FILE:
    ~/.config/fbsurface/config.toml  (override with FBSURFACE_CONFIG)
"#,
        env!("CARGO_PKG_VERSION")
    );
}

/// Colour bars over the whole surface
fn draw_test_pattern(surface: &mut dyn SurfaceBackend) -> Result<()> {
    const BARS: [u32; 8] = [
        0xFFFF_FFFF,
        0xFF00_FFFF,
        0xFFFF_FF00,
        0xFF00_FF00,
        0xFFFF_00FF,
        0xFF00_00FF,
        0xFFFF_0000,
        0xFF00_0000,
    ];
    let info = surface.info().ok_or(SurfaceError::NotInitialised)?;
    let full = BBox::from_size(0, 0, info.width, info.height);
    let bar_width = (info.width / BARS.len() as u32).max(1);

    surface.draw(&full, &mut |canvas| {
        for (i, colour) in BARS.iter().enumerate() {
            let x = i as i32 * bar_width as i32;
            canvas.fill(&BBox::from_size(x, 0, bar_width, info.height), *colour);
        }
    })?;
    Ok(())
}

fn run(surface: &mut dyn SurfaceBackend, config: &Config, draw: bool) -> Result<()> {
    surface
        .initialise()
        .context("Failed to initialise surface")?;

    let info = surface.info().ok_or_else(|| anyhow!("surface not ready"))?;
    println!(
        "{}x{} {} (stride {} bytes)",
        info.width, info.height, info.format, info.stride
    );

    if draw {
        draw_test_pattern(surface)?;
        surface.cursor(CursorRequest::Show(CursorSprite::arrow(16)));
        surface.cursor(CursorRequest::MoveTo {
            x: info.width as i32 / 2,
            y: info.height as i32 / 2,
        });
        surface.update(&BBox::from_size(0, 0, info.width, info.height));
    }

    let (mut x, mut y) = (info.width as i32 / 2, info.height as i32 / 2);
    let timeout = config.input.poll_timeout_ms;
    info!("Polling input (timeout {} ms), Escape to quit", timeout);

    while !SHUTDOWN_REQUESTED.load(Ordering::Relaxed) {
        let event = match surface.input(timeout) {
            Ok(event) => event,
            Err(SurfaceError::InputUnavailable) => {
                warn!("No input device, exiting");
                break;
            }
            Err(SurfaceError::Wait(e)) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e @ (SurfaceError::NoKeyEvent | SurfaceError::UntranslatedKey { .. })) => {
                debug!("{}", e);
                continue;
            }
            Err(SurfaceError::Read(e)) if e.kind() == std::io::ErrorKind::WouldBlock => continue,
            Err(e) => return Err(e).context("Input poll failed"),
        };

        match event {
            Event::KeyDown(KeyCode::Escape) => break,
            Event::KeyDown(key) => {
                match key.as_char() {
                    Some(c) => println!("down {:?} '{}'", key, c),
                    None => println!("down {:?}", key),
                }
                let step = match key {
                    KeyCode::Left => Some((-8, 0)),
                    KeyCode::Right => Some((8, 0)),
                    KeyCode::Up => Some((0, -8)),
                    KeyCode::Down => Some((0, 8)),
                    _ => None,
                };
                if let Some((dx, dy)) = step {
                    x = (x + dx).clamp(0, info.width as i32 - 1);
                    y = (y + dy).clamp(0, info.height as i32 - 1);
                    surface.cursor(CursorRequest::MoveTo { x, y });
                }
            }
            Event::KeyUp(key) => println!("up   {:?}", key),
            Event::Control(_) | Event::None => {}
        }
    }

    surface.finalise();
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    // --help
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // --version
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("fbsurface-probe {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.iter().any(|a| a == "--init-config") {
        let path = Config::write_default()?;
        println!("Config file written: {}", path.display());
        return Ok(());
    }

    let backend = args
        .iter()
        .find_map(|a| a.strip_prefix("--backend="))
        .unwrap_or("linux");
    let kind = SurfaceType::from_name(backend)
        .ok_or_else(|| anyhow!("Unknown surface backend: {}", backend))?;
    let draw = !args.iter().any(|a| a == "--no-draw");

    let config = Config::load();
    setup_signal_handlers();

    let mut surface = create_surface(kind, &config)
        .ok_or_else(|| anyhow!("Backend not registered: {}", kind))?
        .context("Failed to create surface")?;
    info!("Using {} surface backend", kind);

    let result = run(surface.as_mut(), &config, draw);
    surface.finalise();
    result
}
