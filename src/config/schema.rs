//! Configuration schema types for `spritegrid.toml`
//!
//! Every section and field is optional; missing values fall back to the
//! tooling defaults below.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Pixel size used when no config or flag provides one
pub const DEFAULT_PIXEL_SIZE: u32 = 16;

/// Padding between sprites when rendering a sheet
pub const DEFAULT_RENDER_PADDING: u32 = 4;

/// Marker for the `"auto"` pixel size keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoKeyword {
    Auto,
}

/// Pixel size for reverse conversion: a fixed block size, or detected per image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PixelSizeSetting {
    Fixed(u32),
    Auto(AutoKeyword),
}

impl PixelSizeSetting {
    pub const AUTO: PixelSizeSetting = PixelSizeSetting::Auto(AutoKeyword::Auto);
}

impl Default for PixelSizeSetting {
    fn default() -> Self {
        Self::Fixed(DEFAULT_PIXEL_SIZE)
    }
}

impl fmt::Display for PixelSizeSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelSizeSetting::Fixed(size) => write!(f, "{}", size),
            PixelSizeSetting::Auto(_) => write!(f, "auto"),
        }
    }
}

impl FromStr for PixelSizeSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::AUTO);
        }
        match s.parse::<u32>() {
            Ok(0) => Err("pixel size must be a positive integer".to_string()),
            Ok(size) => Ok(Self::Fixed(size)),
            Err(_) => Err(format!("expected a positive integer or 'auto', got '{}'", s)),
        }
    }
}

/// `[render]` - JSON description to PNG
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Scale factor from grid cell to pixel block
    pub pixel_size: u32,
    /// Transparent columns between sprites of a sheet
    pub padding: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixel_size: DEFAULT_PIXEL_SIZE,
            padding: DEFAULT_RENDER_PADDING,
        }
    }
}

/// `[import]` - PNG to JSON description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Block size of the source images, or `"auto"`
    pub pixel_size: PixelSizeSetting,
    /// Pretty-print output JSON
    pub pretty: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            pixel_size: PixelSizeSetting::default(),
            pretty: true,
        }
    }
}

/// `[split]` - spritesheet PNG to per-sprite JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Block size of the sheet
    pub pixel_size: u32,
    /// Transparent columns between sprites in the sheet
    pub padding: u32,
    /// Pretty-print output JSON
    pub pretty: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            pixel_size: DEFAULT_PIXEL_SIZE,
            padding: 0,
            pretty: true,
        }
    }
}

/// `[output]` - where results go and how batches run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output root directory
    pub dir: PathBuf,
    /// Worker threads for folder processing (0 = one per core)
    pub jobs: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            jobs: 0,
        }
    }
}

/// Root of `spritegrid.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpritegridConfig {
    pub render: RenderConfig,
    pub import: ImportConfig,
    pub split: SplitConfig,
    pub output: OutputConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "render.pixel_size")
    pub field: String,
    /// Error message
    pub message: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spritegrid.toml: '{}' {}", self.field, self.message)
    }
}

impl SpritegridConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        let mut require_positive = |field: &str, value: u32| {
            if value == 0 {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be a positive integer".to_string(),
                });
            }
        };

        require_positive("render.pixel_size", self.render.pixel_size);
        require_positive("split.pixel_size", self.split.pixel_size);
        if let PixelSizeSetting::Fixed(size) = self.import.pixel_size {
            require_positive("import.pixel_size", size);
        }

        errors
    }
}
