//! Data models for sprite descriptions (grid + palette) and rasters

use image::RgbaImage;
use ordermap::OrderMap;
use serde::{Deserialize, Serialize};

/// A width x height grid of RGBA8 pixels, alpha restricted to 0 or 255.
///
/// This is the only interchange type between the forward and reverse
/// directions, and the boundary to image file I/O.
pub type RasterBuffer = RgbaImage;

/// Symbol -> color value mapping, kept in insertion order.
///
/// Values are `transparent` or `#RRGGBB`; they are validated when resolved,
/// not when the palette is built.
pub type Palette = OrderMap<char, String>;

/// A sprite: one grid + palette description of a pixel image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sprite {
    #[serde(rename = "sprite_name", skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    pub grid: Vec<String>,
    pub palette: Palette,
}

impl Sprite {
    /// Build an unnamed sprite from grid rows and `(symbol, color)` pairs.
    pub fn new<R, P, V>(grid: impl IntoIterator<Item = R>, palette: P) -> Self
    where
        R: Into<String>,
        P: IntoIterator<Item = (char, V)>,
        V: Into<String>,
    {
        Self {
            name: None,
            grid: grid.into_iter().map(Into::into).collect(),
            palette: palette.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }

    /// Attach a display/file-stem label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Number of grid rows.
    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    /// Number of cells in the first row (0 for an empty grid).
    pub fn cols(&self) -> usize {
        self.grid.first().map_or(0, |row| row.chars().count())
    }
}

/// Root of a description file: a single sprite object or a sheet array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SpriteDocument {
    Sheet(Vec<Sprite>),
    Single(Sprite),
}

impl SpriteDocument {
    /// Flatten into the ordered sprites of a sheet.
    pub fn into_sprites(self) -> Vec<Sprite> {
        match self {
            SpriteDocument::Sheet(sprites) => sprites,
            SpriteDocument::Single(sprite) => vec![sprite],
        }
    }
}
