use geojson::{Feature, FeatureCollection, Geometry, Value};
use crate::{
    error::{OutlineError, Result},
    types::{ExtractedOutline, NormalizedContour, NormalizedPoint},
};

impl ExtractedOutline {
    /// Export the normalized polygon as a single-feature GeoJSON collection.
    ///
    /// GeoJSON rings are explicitly closed, so the first vertex is repeated
    /// at the end of the ring.
    pub fn to_geojson(&self) -> Result<FeatureCollection> {
        let mut ring: Vec<Vec<f64>> = self.points.points
            .iter()
            .map(|p| vec![p.x, p.y])
            .collect();
        if let Some(first) = ring.first().cloned() {
            ring.push(first);
        }

        let geometry = Geometry::new(Value::Polygon(vec![ring]));

        let mut properties = serde_json::Map::new();
        properties.insert("vertex_count".to_string(), serde_json::Value::from(self.vertex_count()));
        properties.insert("raw_point_count".to_string(), serde_json::Value::from(self.raw.len()));
        properties.insert("phantoms_rejected".to_string(), serde_json::Value::from(self.stats.phantoms_rejected));

        let feature = Feature {
            bbox: None,
            geometry: Some(geometry),
            id: Some(geojson::feature::Id::Number(serde_json::Number::from(0))),
            properties: Some(properties),
            foreign_members: None,
        };

        // Source image metadata lives in foreign members of the collection
        let mut foreign_members = serde_json::Map::new();
        foreign_members.insert("image_width".to_string(), serde_json::Value::from(self.image_width));
        foreign_members.insert("image_height".to_string(), serde_json::Value::from(self.image_height));

        Ok(FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: Some(foreign_members),
        })
    }

    /// Export to GeoJSON and serialize to JSON string
    pub fn to_geojson_string(&self) -> Result<String> {
        let geojson = self.to_geojson()?;
        Ok(serde_json::to_string_pretty(&geojson)?)
    }

    /// Save GeoJSON to file
    pub fn save_geojson(&self, path: &str) -> Result<()> {
        let geojson_string = self.to_geojson_string()?;
        std::fs::write(path, geojson_string)?;
        Ok(())
    }
}

/// Read the normalized polygon back out of a document written by
/// [`ExtractedOutline::to_geojson_string`]
pub fn normalized_from_geojson_str(geojson_str: &str) -> Result<NormalizedContour> {
    let collection: FeatureCollection = geojson_str.parse()?;

    let ring = collection.features
        .into_iter()
        .filter_map(|feature| feature.geometry)
        .find_map(|geometry| match geometry.value {
            Value::Polygon(mut rings) if !rings.is_empty() => Some(rings.swap_remove(0)),
            _ => None,
        })
        .ok_or_else(|| OutlineError::MissingOutline("no polygon feature found".to_string()))?;

    let mut points: Vec<NormalizedPoint> = ring
        .iter()
        .filter(|coord| coord.len() >= 2)
        .map(|coord| NormalizedPoint { x: coord[0], y: coord[1] })
        .collect();

    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    Ok(NormalizedContour { points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OutlineDocument, RawContour, ScanStats};

    fn sample_outline() -> ExtractedOutline {
        let points = NormalizedContour {
            points: vec![
                NormalizedPoint { x: 0.0, y: 80.0 },
                NormalizedPoint { x: 0.0, y: 20.0 },
                NormalizedPoint { x: 99.0, y: 20.0 },
                NormalizedPoint { x: 99.0, y: 80.0 },
            ],
        };
        ExtractedOutline {
            image_width: 100,
            image_height: 100,
            raw: RawContour::default(),
            points,
            document: OutlineDocument { markup: String::new(), vertex_count: 4 },
            stats: ScanStats::default(),
        }
    }

    #[test]
    fn test_geojson_ring_is_closed() {
        let collection = sample_outline().to_geojson().expect("geojson");
        assert_eq!(collection.features.len(), 1);

        let geometry = collection.features[0].geometry.as_ref().expect("geometry");
        match &geometry.value {
            Value::Polygon(rings) => {
                assert_eq!(rings[0].len(), 5);
                assert_eq!(rings[0].first(), rings[0].last());
            }
            other => panic!("unexpected geometry {:?}", other),
        }

        let meta = collection.foreign_members.expect("metadata");
        assert_eq!(meta.get("image_width").and_then(|v| v.as_u64()), Some(100));
    }

    #[test]
    fn test_geojson_string_reads_back() {
        let outline = sample_outline();
        let text = outline.to_geojson_string().expect("geojson string");
        let restored = normalized_from_geojson_str(&text).expect("parse");
        assert_eq!(restored, outline.points);
    }

    #[test]
    fn test_geojson_without_polygon_is_rejected() {
        let text = r#"{"type":"FeatureCollection","features":[]}"#;
        let err = normalized_from_geojson_str(text).unwrap_err();
        assert!(matches!(err, OutlineError::MissingOutline(_)));

        let point_only = r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":null,"geometry":{"type":"Point","coordinates":[1.0,2.0]}}]}"#;
        let err = normalized_from_geojson_str(point_only).unwrap_err();
        assert!(matches!(err, OutlineError::MissingOutline(_)));
    }
}
