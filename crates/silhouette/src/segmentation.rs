use image::{DynamicImage, GrayImage};
use crate::{error::Result, traits::SegmentationProvider};

/// Uses an image's own alpha channel as the opacity mask.
///
/// Images without alpha are converted to grayscale and binarized: pixels
/// brighter than `fallback_threshold` become fully opaque.
#[derive(Debug, Clone)]
pub struct AlphaChannelSegmenter {
    pub fallback_threshold: u8,
}

impl Default for AlphaChannelSegmenter {
    fn default() -> Self {
        Self { fallback_threshold: 1 }
    }
}

impl SegmentationProvider for AlphaChannelSegmenter {
    fn segment(&self, image: &DynamicImage) -> Result<GrayImage> {
        if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            let (width, height) = rgba.dimensions();
            return Ok(GrayImage::from_fn(width, height, |x, y| {
                image::Luma([rgba.get_pixel(x, y)[3]])
            }));
        }

        Ok(imageproc::contrast::threshold(&image.to_luma8(), self.fallback_threshold))
    }
}
