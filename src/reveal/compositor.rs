//! CPU compositing of the logo layer.
//!
//! Each paint cycle builds the layer in two passes: the logo is scaled into
//! a buffer matching the destination rectangle, then the reveal mask is
//! applied with a source-in blend confined to the revealed band. The blend
//! never leaves [`apply_reveal_mask`]; callers only ever see the finished
//! straight-alpha RGBA buffer.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use super::StartDirection;
use super::geometry::{MaskRect, RevealGeometry};

/// Scale the logo to the layer's pixel dimensions, preserving its own
/// aspect ratio (the layer is sized from it).
pub fn scale_logo(logo: &RgbaImage, geometry: &RevealGeometry) -> RgbaImage {
    imageops::resize(
        logo,
        geometry.layer_width(),
        geometry.layer_height(),
        FilterType::Triangle,
    )
}

/// Source-in blend of the mask sprite into the layer, confined to `reveal`.
///
/// Keeps the layer's pixels where the mask source is opaque: inside the
/// revealed band each pixel's alpha is scaled by the sampled mask coverage,
/// outside it the layer is fully transparent so the background shows
/// through. Band edges get fractional coverage rather than a hard step.
pub fn apply_reveal_mask(
    layer: &RgbaImage,
    mask: &RgbaImage,
    geometry: &RevealGeometry,
    reveal: &MaskRect,
) -> RgbaImage {
    let (width, height) = layer.dimensions();
    let mut out = RgbaImage::new(width, height);
    if reveal.is_empty() {
        return out;
    }

    let (mask_width, mask_height) = mask.dimensions();
    let left_edge = -geometry.half_width();
    let top_edge = geometry.dst_top();

    for y in 0..height {
        let pixel_top = top_edge + y as f32;
        let cover_y = overlap(pixel_top, pixel_top + 1.0, reveal.top, reveal.bottom);
        if cover_y <= 0.0 {
            continue;
        }
        let v = ((pixel_top + 0.5 - reveal.top) / reveal.height()).clamp(0.0, 1.0);
        let mask_y = sample_index(v, mask_height);

        for x in 0..width {
            let pixel_left = left_edge + x as f32;
            let cover_x = overlap(pixel_left, pixel_left + 1.0, reveal.left, reveal.right);
            if cover_x <= 0.0 {
                continue;
            }
            let u = ((pixel_left + 0.5 - reveal.left) / reveal.width()).clamp(0.0, 1.0);
            let mask_x = sample_index(u, mask_width);

            let mask_alpha = mask.get_pixel(mask_x, mask_y)[3] as f32 / 255.0;
            let src = layer.get_pixel(x, y);
            let alpha = src[3] as f32 * mask_alpha * cover_x * cover_y;
            out.put_pixel(x, y, Rgba([src[0], src[1], src[2], alpha.round() as u8]));
        }
    }
    out
}

/// Scale, then mask: the full layer for one cursor position.
pub fn compose_frame(
    logo: &RgbaImage,
    mask: &RgbaImage,
    geometry: &RevealGeometry,
    direction: StartDirection,
    cursor: f32,
) -> RgbaImage {
    let layer = scale_logo(logo, geometry);
    let reveal = geometry.mask_rect(direction, cursor);
    apply_reveal_mask(&layer, mask, geometry, &reveal)
}

/// Length of the intersection of `[a0, a1]` and `[b0, b1]`, clamped to one
/// pixel.
fn overlap(a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    (a1.min(b1) - a0.max(b0)).clamp(0.0, 1.0)
}

/// Nearest sample index for a normalized coordinate.
fn sample_index(t: f32, len: u32) -> u32 {
    ((t * (len - 1) as f32).round() as u32).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::bitmaps::RevealBitmaps;

    fn setup() -> (RevealBitmaps, RevealGeometry) {
        let logo = RgbaImage::from_pixel(200, 100, Rgba([40, 80, 160, 255]));
        let bitmaps = RevealBitmaps::new(logo).unwrap();
        let geometry = RevealGeometry::new(300.0, 200, 100);
        (bitmaps, geometry)
    }

    #[test]
    fn test_zero_reveal_is_fully_transparent() {
        let (bitmaps, geometry) = setup();
        // Bottom direction at its start edge: the band is empty.
        let frame = compose_frame(
            &bitmaps.logo,
            &bitmaps.mask,
            &geometry,
            StartDirection::Bottom,
            geometry.dst_bottom(),
        );
        assert_eq!(frame.dimensions(), (300, 150));
        assert!(frame.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_full_reveal_matches_scaled_logo() {
        let (bitmaps, geometry) = setup();
        let frame = compose_frame(
            &bitmaps.logo,
            &bitmaps.mask,
            &geometry,
            StartDirection::Bottom,
            geometry.dst_top(),
        );
        let scaled = scale_logo(&bitmaps.logo, &geometry);
        assert_eq!(frame.as_raw(), scaled.as_raw());
    }

    #[test]
    fn test_partial_reveal_is_confined_to_the_band() {
        let (bitmaps, geometry) = setup();
        // Cursor at the vertical center: only the bottom half is revealed.
        let frame = compose_frame(
            &bitmaps.logo,
            &bitmaps.mask,
            &geometry,
            StartDirection::Bottom,
            0.0,
        );
        // Row 80 sits below the cursor, row 70 above it.
        assert_eq!(frame.get_pixel(150, 80)[3], 255);
        assert_eq!(frame.get_pixel(150, 70)[3], 0);
        // Revealed pixels keep the logo's color.
        let revealed = frame.get_pixel(150, 80);
        assert_eq!([revealed[0], revealed[1], revealed[2]], [40, 80, 160]);
    }

    #[test]
    fn test_top_reveal_uncovers_the_upper_half() {
        let (bitmaps, geometry) = setup();
        let frame = compose_frame(
            &bitmaps.logo,
            &bitmaps.mask,
            &geometry,
            StartDirection::Top,
            0.0,
        );
        assert_eq!(frame.get_pixel(150, 70)[3], 255);
        assert_eq!(frame.get_pixel(150, 80)[3], 0);
    }

    #[test]
    fn test_recomposition_is_pixel_identical() {
        let (bitmaps, geometry) = setup();
        let a = compose_frame(
            &bitmaps.logo,
            &bitmaps.mask,
            &geometry,
            StartDirection::Cover,
            12.5,
        );
        let b = compose_frame(
            &bitmaps.logo,
            &bitmaps.mask,
            &geometry,
            StartDirection::Cover,
            12.5,
        );
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_translucent_logo_keeps_its_alpha() {
        let logo = RgbaImage::from_pixel(10, 10, Rgba([200, 0, 0, 128]));
        let bitmaps = RevealBitmaps::new(logo).unwrap();
        let geometry = RevealGeometry::new(10.0, 10, 10);
        let frame = compose_frame(
            &bitmaps.logo,
            &bitmaps.mask,
            &geometry,
            StartDirection::Bottom,
            geometry.dst_top(),
        );
        // Full reveal through an opaque mask leaves the source alpha alone.
        assert!(frame.pixels().all(|p| p[3] == 128));
    }
}
