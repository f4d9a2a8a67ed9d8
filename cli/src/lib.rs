use silhouette::{render_edge_overlay, ExtractionConfig, OutlineCommand, OutlineError, OutlineService, ScanStats};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    Outline(#[from] OutlineError),
    #[error(transparent)]
    ImageError(#[from] image::ImageError),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// Load an extraction configuration from a TOML file
pub fn config_from_toml_file<P: AsRef<Path>>(path: P) -> Result<ExtractionConfig, CliError> {
    let content = fs::read_to_string(path)?;
    config_from_toml(&content)
}

/// Load an extraction configuration from a TOML string
pub fn config_from_toml(content: &str) -> Result<ExtractionConfig, CliError> {
    Ok(toml::from_str(content)?)
}

/// Load an extraction configuration from a JSON file
pub fn config_from_json_file<P: AsRef<Path>>(path: P) -> Result<ExtractionConfig, CliError> {
    let content = fs::read_to_string(path)?;
    config_from_json(&content)
}

/// Load an extraction configuration from a JSON string
pub fn config_from_json(content: &str) -> Result<ExtractionConfig, CliError> {
    Ok(serde_json::from_str(content)?)
}

/// Auto-detect file format and load configuration
pub fn config_from_file<P: AsRef<Path>>(path: P) -> Result<ExtractionConfig, CliError> {
    let path_ref = path.as_ref();
    match path_ref.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => config_from_toml_file(path),
        Some("json") => config_from_json_file(path),
        _ => Err(CliError::UnsupportedFileFormat),
    }
}

/// Convert a configuration to a TOML string
pub fn config_to_toml(config: &ExtractionConfig) -> Result<String, CliError> {
    Ok(toml::to_string_pretty(config)?)
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub threshold: Option<u8>,
    pub run_length: Option<usize>,
    pub epsilon_factor: Option<f64>,
    pub styled: bool,
}

impl ConfigOverrides {
    /// Apply the overrides and validate the result
    pub fn apply(&self, mut config: ExtractionConfig) -> Result<ExtractionConfig, CliError> {
        if let Some(threshold) = self.threshold {
            config.alpha_threshold = threshold;
        }
        if let Some(run_length) = self.run_length {
            config.run_length = run_length;
        }
        if let Some(epsilon_factor) = self.epsilon_factor {
            config.epsilon_factor = epsilon_factor;
        }
        if self.styled {
            config.styled = true;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Resolve the configuration for one run: file (or defaults) plus overrides
pub fn resolve_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<ExtractionConfig, CliError> {
    let base = match path {
        Some(path) => config_from_file(path)?,
        None => ExtractionConfig::default(),
    };
    overrides.apply(base)
}

/// `portrait.png` -> `portrait.svg`
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("svg")
}

/// `<dir of output>/<input stem>_edges_debug.png`
pub fn debug_image_path(input: &Path, output: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("outline");
    let file_name = format!("{}_edges_debug.png", stem);
    match output.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Files written and counters collected by one `extract` run
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionReport {
    pub svg_path: PathBuf,
    pub debug_image_path: Option<PathBuf>,
    pub geojson_path: Option<PathBuf>,
    pub raw_points: usize,
    pub vertices: usize,
    pub stats: ScanStats,
}

/// Extract the outline of `input` and write the SVG to `output`, plus the
/// optional debug overlay and GeoJSON. Nothing is written when no outline
/// can be produced.
pub fn extract(
    input: &Path,
    output: &Path,
    config: &ExtractionConfig,
    debug_image: bool,
    geojson: Option<&Path>,
) -> Result<ExtractionReport, CliError> {
    info!("Extracting outline from {}", input.display());

    let image = image::open(input)?;
    let service = OutlineService::from_config(config)?;
    let outline = service.execute(&image, OutlineCommand::ExtractOutline)?;

    info!(
        "Found {} raw edge points, {} vertices after simplification",
        outline.raw.len(),
        outline.vertex_count()
    );
    if outline.stats.phantoms_rejected > 0 {
        info!("Rejected {} phantom pixels", outline.stats.phantoms_rejected);
    }
    if outline.stats.missing_lines > 0 {
        warn!("{} scan lines had no boundary", outline.stats.missing_lines);
    }

    fs::write(output, outline.svg())?;
    info!("SVG saved to {}", output.display());

    let overlay_path = if debug_image {
        let path = debug_image_path(input, output);
        render_edge_overlay(&image, &outline.raw.points).save(&path)?;
        info!("Debug image saved to {}", path.display());
        Some(path)
    } else {
        None
    };

    let geojson_path = match geojson {
        Some(path) => {
            outline.save_geojson(&path.to_string_lossy())?;
            info!("GeoJSON saved to {}", path.display());
            Some(path.to_path_buf())
        }
        None => None,
    };

    Ok(ExtractionReport {
        svg_path: output.to_path_buf(),
        debug_image_path: overlay_path,
        geojson_path,
        raw_points: outline.raw.len(),
        vertices: outline.vertex_count(),
        stats: outline.stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_portrait(dir: &Path, opaque: bool) -> PathBuf {
        let mut img = RgbaImage::new(80, 100);
        if opaque {
            for y in 30..100 {
                for x in 20..60 {
                    img.put_pixel(x, y, Rgba([10, 10, 10, 255]));
                }
            }
        }
        let path = dir.join("portrait.png");
        img.save(&path).expect("write input");
        path
    }

    #[test]
    fn test_config_from_toml() {
        let config = config_from_toml("alpha_threshold = 200\nrun_length = 5\n").expect("toml");
        assert_eq!(config.alpha_threshold, 200);
        assert_eq!(config.run_length, 5);
        assert_eq!(config.epsilon_factor, 0.004);
    }

    #[test]
    fn test_config_from_json() {
        let config = config_from_json(r#"{"styled": true, "coordinate_precision": 3}"#).expect("json");
        assert!(config.styled);
        assert_eq!(config.coordinate_precision, 3);
        assert_eq!(config.alpha_threshold, 240);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractionConfig { epsilon_factor: 0.01, ..Default::default() };
        let text = config_to_toml(&config).expect("serialize");
        assert_eq!(config_from_toml(&text).expect("parse"), config);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = config_from_file("outline.yaml").unwrap_err();
        assert!(matches!(err, CliError::UnsupportedFileFormat));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = ConfigOverrides {
            threshold: Some(128),
            epsilon_factor: Some(0.002),
            ..Default::default()
        };
        let config = resolve_config(None, &overrides).expect("config");
        assert_eq!(config.alpha_threshold, 128);
        assert_eq!(config.epsilon_factor, 0.002);
        assert_eq!(config.run_length, 3);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let overrides = ConfigOverrides { run_length: Some(0), ..Default::default() };
        let err = resolve_config(None, &overrides).unwrap_err();
        assert!(matches!(err, CliError::Outline(OutlineError::InvalidConfig(_))));
    }

    #[test]
    fn test_output_paths() {
        let input = Path::new("photos/portrait.png");
        assert_eq!(default_output_path(input), PathBuf::from("photos/portrait.svg"));
        assert_eq!(
            debug_image_path(input, Path::new("out/portrait.svg")),
            PathBuf::from("out/portrait_edges_debug.png")
        );
    }

    #[test]
    fn test_extract_writes_all_outputs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = write_portrait(dir.path(), true);
        let output = default_output_path(&input);
        let geojson = dir.path().join("portrait.geojson");

        let report = extract(&input, &output, &ExtractionConfig::default(), true, Some(&geojson))
            .expect("extract");

        assert_eq!(report.vertices, 4);
        let svg = fs::read_to_string(&output).expect("svg");
        assert!(svg.contains(r#"viewBox="0 0 100 100""#));
        assert_eq!(svg.matches("<circle").count(), 4);

        let debug = report.debug_image_path.expect("debug path");
        assert_eq!(debug, dir.path().join("portrait_edges_debug.png"));
        let overlay = image::open(&debug).expect("debug png").to_rgba8();
        assert_eq!(overlay.get_pixel(19, 50), &Rgba([255, 0, 0, 255]));

        let restored = silhouette::normalized_from_geojson_str(&fs::read_to_string(&geojson).expect("geojson"))
            .expect("parse geojson");
        assert_eq!(restored.len(), 4);
    }

    #[test]
    fn test_extract_fails_on_transparent_image_without_writing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = write_portrait(dir.path(), false);
        let output = default_output_path(&input);

        let err = extract(&input, &output, &ExtractionConfig::default(), true, None).unwrap_err();

        assert!(matches!(&err, CliError::Outline(e) if e.is_insufficient_contour()));
        assert!(!output.exists());
        assert!(!dir.path().join("portrait_edges_debug.png").exists());
    }

    #[test]
    fn test_extract_reports_unreadable_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("missing.png");
        let err = extract(&input, &dir.path().join("out.svg"), &ExtractionConfig::default(), false, None)
            .unwrap_err();
        assert!(matches!(err, CliError::ImageError(_)));
    }
}
