use crate::types::{EdgePoint, NormalizedContour, NormalizedPoint, SimplifiedContour};

/// Side length of the normalized coordinate frame
pub const FRAME_SIZE: f64 = 100.0;

/// Scale arbitrary coordinates into the `[0, 100]` frame of a `width x height` image
pub fn normalize_coords(coords: &[[f64; 2]], width: f64, height: f64) -> Vec<NormalizedPoint> {
    coords
        .iter()
        .map(|&[x, y]| NormalizedPoint {
            x: FRAME_SIZE * x / width,
            y: FRAME_SIZE * y / height,
        })
        .collect()
}

/// Map a simplified pixel contour into the `[0, 100]` frame
pub fn normalize(contour: &SimplifiedContour, width: u32, height: u32) -> NormalizedContour {
    let coords: Vec<[f64; 2]> = contour.points
        .iter()
        .map(|p| [p.x as f64, p.y as f64])
        .collect();

    NormalizedContour {
        points: normalize_coords(&coords, width as f64, height as f64),
    }
}

/// Inverse of [`normalize`]: recover pixel coordinates, rounded to the nearest pixel
pub fn denormalize(contour: &NormalizedContour, width: u32, height: u32) -> Vec<EdgePoint> {
    contour.points
        .iter()
        .map(|p| EdgePoint {
            x: (p.x * width as f64 / FRAME_SIZE).round() as u32,
            y: (p.y * height as f64 / FRAME_SIZE).round() as u32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_each_axis_independently() {
        let contour = SimplifiedContour {
            points: vec![EdgePoint::new(0, 0), EdgePoint::new(150, 40), EdgePoint::new(299, 79)],
        };
        let normalized = normalize(&contour, 300, 80);

        assert_eq!(normalized.points[0], NormalizedPoint { x: 0.0, y: 0.0 });
        assert!((normalized.points[1].x - 50.0).abs() < 1e-9);
        assert!((normalized.points[1].y - 50.0).abs() < 1e-9);
        assert!(normalized.points.iter().all(|p| p.x < 100.0 && p.y < 100.0));
    }

    #[test]
    fn test_normalizing_normalized_points_is_a_no_op() {
        let coords = [[0.0, 0.0], [12.345, 67.89], [99.999, 50.0]];
        let once = normalize_coords(&coords, FRAME_SIZE, FRAME_SIZE);
        let again: Vec<[f64; 2]> = once.iter().map(|p| [p.x, p.y]).collect();
        let twice = normalize_coords(&again, FRAME_SIZE, FRAME_SIZE);

        for (a, b) in once.iter().zip(&twice) {
            assert!((a.x - b.x).abs() < 1e-12);
            assert!((a.y - b.y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_round_trip_recovers_pixels() {
        let contour = SimplifiedContour {
            points: vec![EdgePoint::new(3, 7), EdgePoint::new(640, 0), EdgePoint::new(1023, 767)],
        };
        let normalized = normalize(&contour, 1024, 768);
        assert_eq!(denormalize(&normalized, 1024, 768), contour.points);
    }
}
