pub mod builder;

use image::GrayImage;
use tracing::{info, warn};
use crate::{
    algorithms::{normalize, scan_contour, tolerance_for},
    error::{OutlineError, Result},
    mask::AlphaMask,
    traits::{ContourSimplifier, EdgeScanner, OutlineSerializer},
    types::ExtractedOutline,
};

/// Mask-to-outline pipeline: scan, assemble, simplify, normalize, serialize.
///
/// Holds no per-request state, so one instance can be shared across threads.
pub struct Pipeline {
    scanner: Box<dyn EdgeScanner>,
    simplifier: Box<dyn ContourSimplifier>,
    serializer: Box<dyn OutlineSerializer>,
    epsilon_factor: f64,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        scanner: Box<dyn EdgeScanner>,
        simplifier: Box<dyn ContourSimplifier>,
        serializer: Box<dyn OutlineSerializer>,
        epsilon_factor: f64,
    ) -> Self {
        Self {
            scanner,
            simplifier,
            serializer,
            epsilon_factor,
        }
    }

    /// Run every stage over one mask.
    ///
    /// Returns [`OutlineError::InsufficientContour`] instead of any geometry
    /// when fewer than three points survive scanning or simplification.
    pub fn process(&self, mask: &AlphaMask<'_>) -> Result<ExtractedOutline> {
        let (width, height) = (mask.width(), mask.height());

        // Step 1: Scan both sides and assemble the raw contour
        let (raw, stats) = scan_contour(self.scanner.as_ref(), mask)?;
        if stats.missing_lines > 0 {
            warn!(missing_lines = stats.missing_lines, "scan lines without a solid edge were skipped");
        }

        // Step 2: Simplify
        let tolerance = tolerance_for(width, height, self.epsilon_factor);
        let simplified = self.simplifier.simplify(&raw, tolerance)?;
        if simplified.len() < 3 {
            return Err(OutlineError::InsufficientContour { points: simplified.len() });
        }

        // Step 3: Normalize into the 0-100 frame
        let points = normalize(&simplified, width, height);

        // Step 4: Serialize
        let document = self.serializer.serialize(&points, width, height)?;

        info!(
            width,
            height,
            raw_points = raw.len(),
            vertices = points.len(),
            phantoms = stats.phantoms_rejected,
            "outline extracted"
        );

        Ok(ExtractedOutline {
            image_width: width,
            image_height: height,
            raw,
            points,
            document,
            stats,
        })
    }

    /// Process a grayscale image whose luma channel holds opacity
    pub fn process_gray(&self, image: &GrayImage) -> Result<ExtractedOutline> {
        let mask = AlphaMask::from_gray(image)?;
        self.process(&mask)
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!("Pipeline: directional scan, closed Douglas-Peucker (epsilon factor {}), SVG", self.epsilon_factor)
    }
}
