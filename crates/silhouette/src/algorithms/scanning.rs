use tracing::debug;
use crate::{
    mask::AlphaMask,
    traits::EdgeScanner,
    types::{EdgePoint, ScanSide, SideScan},
};

/// Opacity threshold and run length that decide what counts as solid foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanParams {
    /// Minimum opacity (inclusive) for a pixel to count as foreground
    pub threshold: u8,
    /// Consecutive foreground pixels required to accept a boundary
    pub run_length: usize,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            threshold: 240,
            run_length: 3,
        }
    }
}

/// Phantom-pixel check: `run_length` pixels starting at `(x, y)` and stepping
/// by `step` along the row must all reach the threshold. Pixels outside the
/// mask never count.
pub fn is_solid_run(mask: &AlphaMask<'_>, x: i64, y: u32, step: i64, params: &ScanParams) -> bool {
    (0..params.run_length as i64).all(|i| {
        mask.get_checked(x + i * step, y as i64)
            .is_some_and(|alpha| alpha >= params.threshold)
    })
}

/// Walks each row inward from the left or right edge until a solid run starts.
///
/// The left side is traversed bottom to top and the right side top to bottom,
/// so appending the right scan to the left scan walks the silhouette once
/// around without crossing itself.
#[derive(Debug, Clone, Default)]
pub struct DirectionalScanner {
    pub params: ScanParams,
}

/// Outcome of walking a single row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineScan {
    boundary: Option<u32>,
    phantoms: usize,
}

impl DirectionalScanner {
    pub fn new(params: ScanParams) -> Self {
        Self { params }
    }

    fn scan_line(&self, mask: &AlphaMask<'_>, y: u32, side: ScanSide) -> LineScan {
        let width = mask.width() as i64;
        let (mut x, step) = match side {
            ScanSide::Left => (0, 1),
            ScanSide::Right => (width - 1, -1),
        };
        let mut phantoms = 0;

        while (0..width).contains(&x) {
            if is_solid_run(mask, x, y, step, &self.params) {
                // Report one pixel outward of the solid run, kept inside the image.
                let boundary = match side {
                    ScanSide::Left => (x - 1).max(0),
                    ScanSide::Right => (x + 1).min(width - 1),
                };
                return LineScan {
                    boundary: Some(boundary as u32),
                    phantoms,
                };
            }

            if mask.get(x as u32, y) >= self.params.threshold {
                phantoms += 1;
                debug!(%side, row = y, column = x, "phantom rejected");
            }

            x += step;
        }

        LineScan { boundary: None, phantoms }
    }
}

impl EdgeScanner for DirectionalScanner {
    fn scan(&self, mask: &AlphaMask<'_>, side: ScanSide) -> SideScan {
        let rows: Box<dyn Iterator<Item = u32>> = match side {
            ScanSide::Left => Box::new((0..mask.height()).rev()),
            ScanSide::Right => Box::new(0..mask.height()),
        };

        let mut result = SideScan::empty(side);
        for y in rows {
            let line = self.scan_line(mask, y, side);
            result.phantoms_rejected += line.phantoms;
            match line.boundary {
                Some(x) => result.points.push(EdgePoint::new(x, y)),
                None => result.missing_lines += 1,
            }
        }

        debug!(
            %side,
            points = result.points.len(),
            phantoms = result.phantoms_rejected,
            missing_lines = result.missing_lines,
            "side scan finished"
        );

        result
    }
}
