use geo_types::LineString;
use crate::{
    error::{OutlineError, Result},
    traits::ContourSimplifier,
    types::{RawContour, SimplifiedContour},
};

/// Simplification tolerance in pixels: `epsilon_factor * max(width, height)`
pub fn tolerance_for(width: u32, height: u32, epsilon_factor: f64) -> f64 {
    epsilon_factor * width.max(height) as f64
}

/// Douglas-Peucker simplifier for closed contours, built on geo's
/// index-returning implementation
///
/// The ring is split at the point farthest from its first point; each half is
/// simplified as an open line and the kept indices are merged back in order.
#[derive(Debug, Clone, Default)]
pub struct DouglasPeuckerSimplifier;

impl ContourSimplifier for DouglasPeuckerSimplifier {
    fn simplify(&self, contour: &RawContour, tolerance: f64) -> Result<SimplifiedContour> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(OutlineError::InvalidConfig(format!(
                "simplification tolerance must be finite and non-negative, got {}",
                tolerance
            )));
        }

        if contour.len() <= 3 {
            return Ok(SimplifiedContour { points: contour.points.clone() });
        }

        let points = closed_ring_indices(&contour.to_line_string(), tolerance)
            .into_iter()
            .map(|i| contour.points[i])
            .collect();

        Ok(SimplifiedContour { points })
    }
}

/// Indices of the vertices kept from a ring given without its closing
/// coordinate. Always ascending and always contains `0`.
fn closed_ring_indices(ring: &LineString<f64>, tolerance: f64) -> Vec<usize> {
    use geo::SimplifyIdx;

    let coords = &ring.0;
    let n = coords.len();
    let anchor = coords[0];

    let (split, _) = coords
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, c)| (i, (c.x - anchor.x).hypot(c.y - anchor.y)))
        .fold((0, 0.0), |best, candidate| if candidate.1 > best.1 { candidate } else { best });

    // Every point coincides with the anchor.
    if split == 0 {
        return vec![0];
    }

    let first = LineString::from(coords[..=split].to_vec());
    let mut second_coords = coords[split..].to_vec();
    second_coords.push(anchor);
    let second = LineString::from(second_coords);
    let closing = n - split;

    let mut indices = first.simplify_idx(&tolerance);
    indices.extend(
        second
            .simplify_idx(&tolerance)
            .into_iter()
            .filter(|&i| i != 0 && i != closing)
            .map(|i| i + split),
    );

    indices
}
