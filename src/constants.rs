//! Global constants for fbsurface
//!
//! Device paths, input batching limits, and ioctl request numbers
//! shared by the framebuffer and input modules.

// ============================================================================
// Device Paths
// ============================================================================

/// Default framebuffer device
pub const DEFAULT_FB_DEVICE: &str = "/dev/fb0";

/// Default evdev keyboard device
pub const DEFAULT_INPUT_DEVICE: &str = "/dev/input/event0";

// ============================================================================
// Input
// ============================================================================

/// Maximum number of raw input records read per poll
pub const INPUT_BATCH_RECORDS: usize = 64;

/// evdev event type for key events (EV_KEY)
pub const EV_KEY: u16 = 0x01;

/// Key value: released
pub const KEY_VALUE_RELEASE: i32 = 0;

/// Key value: pressed
pub const KEY_VALUE_PRESS: i32 = 1;

/// Key value: autorepeat
pub const KEY_VALUE_REPEAT: i32 = 2;

/// Default poll timeout used by the probe loop (milliseconds)
pub const DEFAULT_POLL_TIMEOUT_MS: i32 = 100;

// ============================================================================
// Framebuffer ioctls (from linux/fb.h)
// ============================================================================

/// Get variable screen info
pub const FBIOGET_VSCREENINFO: libc::c_ulong = 0x4600;

/// Get fixed screen info
pub const FBIOGET_FSCREENINFO: libc::c_ulong = 0x4602;
