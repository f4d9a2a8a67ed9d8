use image::{DynamicImage, GrayImage};
use crate::{
    error::Result,
    mask::AlphaMask,
    types::{NormalizedContour, OutlineDocument, RawContour, ScanSide, SideScan, SimplifiedContour},
};

/// Trait for boundary scanning algorithms
pub trait EdgeScanner: Send + Sync {
    /// Find one boundary point per scan line on the given side
    fn scan(&self, mask: &AlphaMask<'_>, side: ScanSide) -> SideScan;
}

/// Trait for polygon simplification algorithms
pub trait ContourSimplifier: Send + Sync {
    /// Reduce the point count of a closed contour.
    /// The output must be an ordered subsequence of the input.
    fn simplify(&self, contour: &RawContour, tolerance: f64) -> Result<SimplifiedContour>;
}

/// Trait for vector serializers
pub trait OutlineSerializer: Send + Sync {
    /// Render a normalized contour; `width`/`height` describe the source image
    fn serialize(&self, contour: &NormalizedContour, width: u32, height: u32) -> Result<OutlineDocument>;
}

/// Trait for whatever turns decoded pixels into an opacity mask
pub trait SegmentationProvider: Send + Sync {
    /// Produce one opacity sample per pixel of `image`
    fn segment(&self, image: &DynamicImage) -> Result<GrayImage>;
}
