use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutlineError {
    /// Fewer than three points survived scanning or simplification.
    #[error("Insufficient contour: {points} point(s), at least 3 are required for a polygon")]
    InsufficientContour { points: usize },

    #[error("Invalid mask: {0}")]
    InvalidMask(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("GeoJSON has no outline: {0}")]
    MissingOutline(String),
}

impl OutlineError {
    /// True when the mask had no foreground at all on either side.
    pub fn is_degenerate_mask(&self) -> bool {
        matches!(self, Self::InsufficientContour { points: 0 })
    }

    pub fn is_insufficient_contour(&self) -> bool {
        matches!(self, Self::InsufficientContour { .. })
    }
}

pub type Result<T> = std::result::Result<T, OutlineError>;
