pub mod geojson;
pub mod svg;

pub use self::geojson::normalized_from_geojson_str;
pub use self::svg::{OutlineStyle, SvgSerializer};
