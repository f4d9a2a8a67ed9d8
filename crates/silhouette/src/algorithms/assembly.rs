use crate::{
    error::{OutlineError, Result},
    types::{RawContour, ScanSide, SideScan},
};

/// Join the two side scans into one closed contour.
///
/// The left scan (bottom to top) comes first, then the right scan (top to
/// bottom). That order alone keeps the polygon simple; no geometric sort is
/// applied. A side with no points simply contributes nothing.
pub fn assemble(left: SideScan, right: SideScan) -> Result<RawContour> {
    debug_assert_eq!(left.side, ScanSide::Left);
    debug_assert_eq!(right.side, ScanSide::Right);

    let mut points = left.points;
    points.extend(right.points);

    if points.len() < 3 {
        return Err(OutlineError::InsufficientContour { points: points.len() });
    }

    Ok(RawContour { points })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        algorithms::scanning::{DirectionalScanner, ScanParams},
        mask::AlphaMask,
        traits::EdgeScanner,
        types::EdgePoint,
    };
    use image::{GrayImage, Luma};

    fn orientation(a: EdgePoint, b: EdgePoint, c: EdgePoint) -> i64 {
        let (ax, ay) = (a.x as i64, a.y as i64);
        let (bx, by) = (b.x as i64, b.y as i64);
        let (cx, cy) = (c.x as i64, c.y as i64);
        ((bx - ax) * (cy - ay) - (by - ay) * (cx - ax)).signum()
    }

    fn on_segment(a: EdgePoint, b: EdgePoint, p: EdgePoint) -> bool {
        p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
    }

    fn segments_touch(p1: EdgePoint, p2: EdgePoint, q1: EdgePoint, q2: EdgePoint) -> bool {
        let o1 = orientation(p1, p2, q1);
        let o2 = orientation(p1, p2, q2);
        let o3 = orientation(q1, q2, p1);
        let o4 = orientation(q1, q2, p2);

        if o1 != o2 && o3 != o4 {
            return true;
        }

        (o1 == 0 && on_segment(p1, p2, q1))
            || (o2 == 0 && on_segment(p1, p2, q2))
            || (o3 == 0 && on_segment(q1, q2, p1))
            || (o4 == 0 && on_segment(q1, q2, p2))
    }

    /// True when no two non-adjacent edges of the closed polygon meet.
    pub(crate) fn is_simple_polygon(points: &[EdgePoint]) -> bool {
        let n = points.len();
        if n < 3 {
            return false;
        }

        let edge = |i: usize| (points[i], points[(i + 1) % n]);
        for i in 0..n {
            for j in (i + 1)..n {
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                if adjacent {
                    continue;
                }
                let (a, b) = edge(i);
                let (c, d) = edge(j);
                if segments_touch(a, b, c, d) {
                    return false;
                }
            }
        }
        true
    }

    fn scan_and_assemble(img: &GrayImage) -> Result<RawContour> {
        let mask = AlphaMask::from_gray(img)?;
        let scanner = DirectionalScanner::new(ScanParams::default());
        assemble(scanner.scan(&mask, ScanSide::Left), scanner.scan(&mask, ScanSide::Right))
    }

    fn disc(width: u32, height: u32, cx: f32, cy: f32, radius: f32) -> GrayImage {
        let mut img = GrayImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if dx * dx + dy * dy <= radius * radius {
                    img.put_pixel(x, y, Luma([255u8]));
                }
            }
        }
        img
    }

    #[test]
    fn test_band_contour_has_both_sides() {
        let mut img = GrayImage::new(100, 100);
        for y in 20..=80 {
            for x in 0..100 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }

        let contour = scan_and_assemble(&img).expect("contour");
        assert_eq!(contour.len(), 122);
        assert_eq!(contour.points[0], EdgePoint::new(0, 80));
        assert_eq!(contour.points[60], EdgePoint::new(0, 20));
        assert_eq!(contour.points[61], EdgePoint::new(99, 20));
        assert_eq!(contour.points[121], EdgePoint::new(99, 80));
    }

    #[test]
    fn test_disc_contour_is_simple_polygon() {
        let img = disc(120, 100, 60.0, 50.0, 35.0);
        let contour = scan_and_assemble(&img).expect("contour");
        assert!(is_simple_polygon(&contour.points));
    }

    #[test]
    fn test_ellipse_with_margin_is_simple_polygon() {
        let mut img = GrayImage::new(90, 140);
        for y in 0..140u32 {
            for x in 0..90u32 {
                let dx = (x as f32 - 45.0) / 30.0;
                let dy = (y as f32 - 70.0) / 55.0;
                if dx * dx + dy * dy <= 1.0 {
                    img.put_pixel(x, y, Luma([255u8]));
                }
            }
        }

        let contour = scan_and_assemble(&img).expect("contour");
        assert!(is_simple_polygon(&contour.points));
    }

    #[test]
    fn test_reversed_right_scan_self_intersects() {
        // Guard for the ordering rule: flipping one side breaks simplicity.
        let img = disc(80, 80, 40.0, 40.0, 25.0);
        let mask = AlphaMask::from_gray(&img).expect("valid mask");
        let scanner = DirectionalScanner::default();
        let left = scanner.scan(&mask, ScanSide::Left);
        let mut right = scanner.scan(&mask, ScanSide::Right);
        right.points.reverse();

        let contour = assemble(left, right).expect("contour");
        assert!(!is_simple_polygon(&contour.points));
    }

    #[test]
    fn test_simple_polygon_checker() {
        let square = [
            EdgePoint::new(0, 0),
            EdgePoint::new(10, 0),
            EdgePoint::new(10, 10),
            EdgePoint::new(0, 10),
        ];
        let bowtie = [
            EdgePoint::new(0, 0),
            EdgePoint::new(10, 10),
            EdgePoint::new(10, 0),
            EdgePoint::new(0, 10),
        ];
        assert!(is_simple_polygon(&square));
        assert!(!is_simple_polygon(&bowtie));
    }

    #[test]
    fn test_empty_mask_is_degenerate() {
        let img = GrayImage::new(50, 50);
        let err = scan_and_assemble(&img).unwrap_err();
        assert!(err.is_degenerate_mask());
    }

    #[test]
    fn test_one_sided_contour_degrades_gracefully() {
        let left = SideScan {
            side: ScanSide::Left,
            points: vec![EdgePoint::new(1, 3), EdgePoint::new(2, 2), EdgePoint::new(1, 1)],
            phantoms_rejected: 0,
            missing_lines: 0,
        };
        let contour = assemble(left, SideScan::empty(ScanSide::Right)).expect("contour");
        assert_eq!(contour.len(), 3);
    }

    #[test]
    fn test_two_points_are_insufficient() {
        let left = SideScan {
            side: ScanSide::Left,
            points: vec![EdgePoint::new(1, 0)],
            phantoms_rejected: 0,
            missing_lines: 0,
        };
        let right = SideScan {
            side: ScanSide::Right,
            points: vec![EdgePoint::new(5, 0)],
            phantoms_rejected: 0,
            missing_lines: 0,
        };
        let err = assemble(left, right).unwrap_err();
        assert!(matches!(err, OutlineError::InsufficientContour { points: 2 }));
    }
}
