//! Destination-rectangle math for the reveal paint cycle.
//!
//! The widget is laid out square; the logo is scaled to fill the widget's
//! width while keeping its own aspect ratio, and centered vertically. All
//! coordinates here are pixels in a frame whose origin is the widget's
//! center, so the logo layer spans `±half_width` horizontally and
//! `±half_height` vertically.

use super::StartDirection;

/// Axis-aligned rectangle in centered widget coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl MaskRect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// Geometry of the logo layer for one laid-out widget side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealGeometry {
    side: f32,
    scale_rate: f32,
}

impl RevealGeometry {
    /// `side` is the widget's square side in pixels; the logo dimensions
    /// drive the aspect ratio of the layer.
    pub fn new(side: f32, logo_width: u32, logo_height: u32) -> Self {
        let scale_rate = logo_height as f32 / logo_width as f32;
        Self { side, scale_rate }
    }

    /// Height over width of the logo; the layer keeps this ratio.
    pub fn scale_rate(&self) -> f32 {
        self.scale_rate
    }

    pub fn half_width(&self) -> f32 {
        self.side / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.scale_rate * self.side / 2.0
    }

    /// Top edge of the logo layer.
    pub fn dst_top(&self) -> f32 {
        -self.half_height()
    }

    /// Bottom edge of the logo layer.
    pub fn dst_bottom(&self) -> f32 {
        self.half_height()
    }

    /// Pixel width of the layer buffer.
    pub fn layer_width(&self) -> u32 {
        self.side.round().max(1.0) as u32
    }

    /// Pixel height of the layer buffer.
    pub fn layer_height(&self) -> u32 {
        (self.scale_rate * self.side).round().max(1.0) as u32
    }

    /// Where the reveal cursor starts for a direction.
    pub fn start_edge(&self, direction: StartDirection) -> f32 {
        match direction {
            StartDirection::Bottom => self.dst_bottom(),
            StartDirection::Top | StartDirection::Cover => self.dst_top(),
        }
    }

    /// Where the animation drives the cursor toward.
    pub fn end_edge(&self, direction: StartDirection) -> f32 {
        match direction {
            StartDirection::Bottom => self.dst_top(),
            StartDirection::Top | StartDirection::Cover => self.dst_bottom(),
        }
    }

    /// The revealed band for a direction and cursor position. Always spans
    /// the full layer width; only the vertical extent moves.
    pub fn mask_rect(&self, direction: StartDirection, cursor: f32) -> MaskRect {
        match direction {
            StartDirection::Bottom | StartDirection::Cover => MaskRect {
                left: -self.half_width(),
                top: cursor,
                right: self.half_width(),
                bottom: self.dst_bottom(),
            },
            StartDirection::Top => MaskRect {
                left: -self.half_width(),
                top: self.dst_top(),
                right: self.half_width(),
                bottom: cursor,
            },
        }
    }
}
