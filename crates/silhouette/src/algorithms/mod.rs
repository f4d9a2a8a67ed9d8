pub mod scanning;
pub mod assembly;
pub mod simplification;
pub mod normalization;

pub use scanning::*;
pub use assembly::*;
pub use simplification::*;
pub use normalization::*;

use crate::{
    error::Result,
    mask::AlphaMask,
    traits::EdgeScanner,
    types::{RawContour, ScanSide, ScanStats},
};

/// Scan both sides of a mask and assemble the raw contour
pub fn scan_contour<S>(scanner: &S, mask: &AlphaMask<'_>) -> Result<(RawContour, ScanStats)>
where
    S: EdgeScanner + ?Sized,
{
    let left = scanner.scan(mask, ScanSide::Left);
    let right = scanner.scan(mask, ScanSide::Right);
    let stats = ScanStats::from_scans(&left, &right);

    if stats.phantoms_rejected > 0 {
        tracing::debug!(phantoms = stats.phantoms_rejected, "skipped phantom pixels while scanning");
    }

    let contour = assemble(left, right)?;
    Ok((contour, stats))
}
