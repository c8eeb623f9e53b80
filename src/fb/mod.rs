//! Linux fbdev display management

pub mod device;
pub mod ioctl_helpers;
pub mod screeninfo;

pub use device::{
    map_shared, open_input_device, DeviceProvider, DisplayDevice, FbDevice, LinuxDevices,
};
pub use screeninfo::{FbBitfield, FixScreenInfo, Geometry, VarScreenInfo};
