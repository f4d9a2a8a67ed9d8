use image::{DynamicImage, Rgba, RgbaImage};
use crate::types::EdgePoint;

/// Marker colour for raw edge points
pub const EDGE_MARKER: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Copy of `image` with every raw edge point painted opaque red
pub fn render_edge_overlay(image: &DynamicImage, points: &[EdgePoint]) -> RgbaImage {
    let mut overlay = image.to_rgba8();
    for p in points {
        if p.x < overlay.width() && p.y < overlay.height() {
            overlay.put_pixel(p.x, p.y, EDGE_MARKER);
        }
    }
    overlay
}
