//! Raw widget attributes and their resolution.
//!
//! [`RevealStyle`] mirrors the markup-style attribute set the widget is
//! configured from: integer codes, a packed ARGB color and an image path.
//! It can be loaded from a JSON file. [`RevealStyle::resolve`] validates
//! the raw values into a typed [`RevealConfig`]; every failure is fatal,
//! since a widget without a decodable logo (or with an out-of-range code)
//! has nothing meaningful to animate.

use std::path::{Path, PathBuf};
use std::time::Duration;

use iced::Color;
use serde::{Deserialize, Serialize};

use crate::reveal::{RepeatCount, RepeatMode, RevealConfig, RevealError, StartDirection};

/// Raw attribute values, with the stock defaults.
///
/// Note the `repeat_mode` default of 2: it is outside the declared 0/1
/// range and is rejected by [`resolve`](Self::resolve). Callers must pick
/// a mode explicitly; see DESIGN.md.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealStyle {
    /// Animation cycle length in milliseconds.
    pub duration_ms: u32,
    /// Path to the logo image. Required.
    pub image: Option<PathBuf>,
    /// Background fill as packed ARGB.
    pub background: u32,
    /// 0 = bottom, 1 = top, 2 = cover.
    pub start_direction: i32,
    /// Negative = loop forever; n = run 1 + n cycles.
    pub repeat_count: i32,
    /// 0 = reverse, 1 = restart.
    pub repeat_mode: i32,
}

impl Default for RevealStyle {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            image: None,
            background: 0xFFFF_FFFF,
            start_direction: 0,
            repeat_count: -1,
            repeat_mode: 2,
        }
    }
}

impl RevealStyle {
    /// Load a style from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, RevealError> {
        let content = std::fs::read_to_string(path).map_err(|e| RevealError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| RevealError::Parse(e.to_string()))
    }

    /// Save a style to a JSON file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), RevealError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| RevealError::Io(e.to_string()))?;
        }
        let content =
            serde_json::to_string_pretty(self).map_err(|e| RevealError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| RevealError::Io(e.to_string()))
    }

    /// Validate the raw attributes and decode the logo.
    pub fn resolve(&self) -> Result<RevealConfig, RevealError> {
        let path = self.image.as_ref().ok_or(RevealError::MissingImage)?;
        let logo = image::open(path)
            .map_err(|e| RevealError::Image(e.to_string()))?
            .to_rgba8();
        if logo.width() == 0 || logo.height() == 0 {
            return Err(RevealError::EmptyImage);
        }

        let direction = StartDirection::from_code(self.start_direction)?;
        let repeat_mode = RepeatMode::from_code(self.repeat_mode)?;
        if self.duration_ms == 0 {
            return Err(RevealError::ZeroDuration);
        }

        Ok(RevealConfig::new(logo)
            .duration(Duration::from_millis(u64::from(self.duration_ms)))
            .background(color_from_argb(self.background))
            .direction(direction)
            .repeat(RepeatCount::from_code(self.repeat_count))
            .repeat_mode(repeat_mode))
    }
}

/// Unpack an ARGB color into an iced color.
fn color_from_argb(argb: u32) -> Color {
    let alpha = ((argb >> 24) & 0xFF) as u8;
    let red = ((argb >> 16) & 0xFF) as u8;
    let green = ((argb >> 8) & 0xFF) as u8;
    let blue = (argb & 0xFF) as u8;
    Color::from_rgba8(red, green, blue, f32::from(alpha) / 255.0)
}
