//! Configuration file management
//!
//! Loads TOML configuration files and provides backend settings.
//! Default config path: ~/.config/fbsurface/config.toml

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_FB_DEVICE, DEFAULT_INPUT_DEVICE, DEFAULT_POLL_TIMEOUT_MS};
use crate::format::PixelFormat;

/// Backend settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Device node settings
    pub device: DeviceConfig,
    /// Requested surface geometry
    pub geometry: GeometryConfig,
    /// Input polling settings
    pub input: InputConfig,
}

/// Device node settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Framebuffer device
    pub framebuffer: PathBuf,
    /// evdev keyboard device
    pub input: PathBuf,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            framebuffer: PathBuf::from(DEFAULT_FB_DEVICE),
            input: PathBuf::from(DEFAULT_INPUT_DEVICE),
        }
    }
}

/// Geometry requested before initialise.
///
/// The live device overrides all three once the surface is initialised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub width: u32,
    pub height: u32,
    /// "abgr8888", "xbgr8888", "rgb888", "rgb565" or "i8"
    pub format: PixelFormat,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            format: PixelFormat::Xbgr8888,
        }
    }
}

/// Input polling settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Poll timeout in milliseconds (0 = non-blocking, negative = read without waiting)
    pub poll_timeout_ms: i32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// System-wide config path
    pub const SYSTEM_CONFIG_PATH: &'static str = "/etc/fbsurface/config.toml";

    /// Find the config file to use:
    /// 1. FBSURFACE_CONFIG environment variable
    /// 2. ~/.config/fbsurface/config.toml (user config)
    /// 3. /etc/fbsurface/config.toml (system config)
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("FBSURFACE_CONFIG") {
            let p = Path::new(&path);
            if p.exists() {
                return Some(p.to_path_buf());
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("fbsurface").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }
        }

        let system_config = Path::new(Self::SYSTEM_CONFIG_PATH);
        if system_config.exists() {
            return Some(system_config.to_path_buf());
        }

        None
    }

    /// Load configuration, falling back to built-in defaults
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config: {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config {}: {:#}", path.display(), e);
                }
            }
        }
        info!("Using built-in default config");
        Self::default()
    }

    /// Load settings from specified path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Write the default config to the user config directory
    pub fn write_default() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Config directory not found"))?;
        let dir = config_dir.join("fbsurface");
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join("config.toml");
        if path.exists() {
            anyhow::bail!("Config file already exists: {}", path.display());
        }

        let content = toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::parse(
            r#"
            [device]
            framebuffer = "/dev/fb1"

            [geometry]
            format = "rgb565"

            [input]
            poll_timeout_ms = -1
            "#,
        )
        .unwrap();
        assert_eq!(config.device.framebuffer, PathBuf::from("/dev/fb1"));
        assert_eq!(config.device.input, PathBuf::from(DEFAULT_INPUT_DEVICE));
        assert_eq!(config.geometry.format, PixelFormat::Rgb565);
        assert_eq!(config.geometry.width, 800);
        assert_eq!(config.input.poll_timeout_ms, -1);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Config::parse("[geometry]\nformat = \"rgb444\"\n").is_err());
    }

    #[test]
    fn test_default_serializes() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert_eq!(Config::parse(&text).unwrap(), Config::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load_from_file(Path::new("/nonexistent/fbsurface.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }
}
