//! Safe wrappers for ioctl system calls
//!
//! Keeps the unsafe ioctl calls of the framebuffer queries in one place.

use std::io;
use std::os::unix::io::RawFd;

/// Execute an ioctl command that fills a caller-provided structure.
///
/// The caller must ensure:
/// - The fd is valid
/// - The ioctl command is appropriate for the device type
/// - `T` is the `#[repr(C)]` layout the kernel writes for `cmd`
///
/// # Arguments
/// * `fd` - File descriptor
/// * `cmd` - ioctl command number
/// * `arg` - Structure the kernel fills in
pub fn ioctl_read_into<T>(fd: RawFd, cmd: libc::c_ulong, arg: &mut T) -> io::Result<()> {
    // Cast: the request parameter is c_int on some libc targets
    let ret = unsafe { libc::ioctl(fd, cmd as _, arg as *mut T) };
    if ret < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}
