//! The widget's two immutable pixel buffers: the decoded logo and the
//! opaque-white mask sprite synthesized to the logo's exact dimensions.

use image::{Rgba, RgbaImage};

use super::RevealError;

/// Owned bitmaps prepared once at construction and kept for the widget's
/// lifetime.
#[derive(Clone)]
pub struct RevealBitmaps {
    pub logo: RgbaImage,
    pub mask: RgbaImage,
}

impl RevealBitmaps {
    pub fn new(logo: RgbaImage) -> Result<Self, RevealError> {
        if logo.width() == 0 || logo.height() == 0 {
            return Err(RevealError::EmptyImage);
        }
        let mask = solid_bitmap(logo.width(), logo.height(), Rgba([255, 255, 255, 255]));
        tracing::debug!(
            "prepared reveal bitmaps: logo {}x{}",
            logo.width(),
            logo.height()
        );
        Ok(Self { logo, mask })
    }
}

/// A buffer of the given dimensions filled with a single color.
fn solid_bitmap(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color)
}
