use serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use geo_types::{Coord, LineString, Polygon};
use strum::{Display, EnumIter, IntoStaticStr};
use ts_rs::TS;

/// Integer pixel coordinate on the silhouette boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgePoint {
    pub x: u32,
    pub y: u32,
}

impl EdgePoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Image side a scan starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, IntoStaticStr, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum ScanSide {
    Left,
    Right,
}

/// Result of scanning one side of a mask
#[derive(Debug, Clone, PartialEq)]
pub struct SideScan {
    pub side: ScanSide,
    /// One point per accepted scan line, in traversal order
    pub points: Vec<EdgePoint>,
    /// Candidate pixels discarded by phantom validation
    pub phantoms_rejected: usize,
    /// Scan lines that yielded no boundary
    pub missing_lines: usize,
}

impl SideScan {
    pub fn empty(side: ScanSide) -> Self {
        Self {
            side,
            points: Vec::new(),
            phantoms_rejected: 0,
            missing_lines: 0,
        }
    }
}

/// Diagnostic counters collected across both scan sides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, TS)]
pub struct ScanStats {
    pub phantoms_rejected: usize,
    pub missing_lines: usize,
}

impl ScanStats {
    pub fn from_scans(left: &SideScan, right: &SideScan) -> Self {
        Self {
            phantoms_rejected: left.phantoms_rejected + right.phantoms_rejected,
            missing_lines: left.missing_lines + right.missing_lines,
        }
    }
}

/// Ordered boundary points read as a closed polygon
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawContour {
    pub points: Vec<EdgePoint>,
}

impl RawContour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Open line string through the points, without a closing coordinate
    pub fn to_line_string(&self) -> LineString<f64> {
        self.points
            .iter()
            .map(|p| Coord { x: p.x as f64, y: p.y as f64 })
            .collect::<Vec<_>>()
            .into()
    }
}

/// Ordered subsequence of a [`RawContour`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimplifiedContour {
    pub points: Vec<EdgePoint>,
}

impl SimplifiedContour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Point in the resolution-independent `[0, 100]` frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema, TS)]
#[ts(export)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct NormalizedContour {
    pub points: Vec<NormalizedPoint>,
}

impl NormalizedContour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Convert to a geo-types polygon (the exterior ring is closed by geo)
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        let coords: Vec<Coord<f64>> = self.points
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect();

        Polygon::new(LineString::new(coords), vec![])
    }

    /// Enclosed area in normalized units
    pub fn area(&self) -> f64 {
        use geo::Area;
        self.to_geo_polygon().unsigned_area()
    }

    /// Get the bounding box as `(min, max)`
    pub fn bounding_box(&self) -> ([f64; 2], [f64; 2]) {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        ([min_x, min_y], [max_x, max_y])
    }
}

/// Serialized vector form of a normalized outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineDocument {
    pub markup: String,
    pub vertex_count: usize,
}

/// Everything one extraction produces
#[derive(Debug, Clone)]
pub struct ExtractedOutline {
    pub image_width: u32,
    pub image_height: u32,
    pub raw: RawContour,
    pub points: NormalizedContour,
    pub document: OutlineDocument,
    pub stats: ScanStats,
}

impl ExtractedOutline {
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn svg(&self) -> &str {
        &self.document.markup
    }
}
