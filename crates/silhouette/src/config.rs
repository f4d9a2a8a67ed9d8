use serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use crate::error::{OutlineError, Result};

/// Tunable parameters of one extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExtractionConfig {
    #[schemars(description = "Minimum opacity (0-255, inclusive) that counts as solid foreground")]
    pub alpha_threshold: u8,

    #[schemars(
        description = "Consecutive solid pixels required before a boundary is accepted",
        range(min = 1)
    )]
    pub run_length: usize,

    #[schemars(
        description = "Simplification tolerance as a fraction of max(width, height)",
        range(min = 0.0, max = 0.1)
    )]
    pub epsilon_factor: f64,

    #[schemars(description = "Radius of each vertex marker in normalized units")]
    pub marker_radius: f64,

    #[schemars(description = "Decimal places written for each coordinate", range(max = 6))]
    pub coordinate_precision: usize,

    #[schemars(description = "Embed stroke and fill attributes into the SVG")]
    pub styled: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            alpha_threshold: 240,
            run_length: 3,
            epsilon_factor: 0.004,
            marker_radius: 1.5,
            coordinate_precision: 2,
            styled: false,
        }
    }
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.run_length == 0 {
            return Err(OutlineError::InvalidConfig("run_length must be at least 1".into()));
        }
        if !self.epsilon_factor.is_finite() || self.epsilon_factor < 0.0 {
            return Err(OutlineError::InvalidConfig(format!(
                "epsilon_factor must be finite and non-negative, got {}",
                self.epsilon_factor
            )));
        }
        if !self.marker_radius.is_finite() || self.marker_radius <= 0.0 {
            return Err(OutlineError::InvalidConfig(format!(
                "marker_radius must be positive, got {}",
                self.marker_radius
            )));
        }
        Ok(())
    }

    /// JSON schema of the configuration
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ExtractionConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ExtractionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.alpha_threshold, 240);
        assert_eq!(config.run_length, 3);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ExtractionConfig = serde_json::from_str(r#"{"epsilon_factor": 0.002}"#).expect("parse");
        assert_eq!(config.epsilon_factor, 0.002);
        assert_eq!(config.alpha_threshold, 240);
        assert!(!config.styled);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let zero_run = ExtractionConfig { run_length: 0, ..Default::default() };
        assert!(zero_run.validate().is_err());

        let negative = ExtractionConfig { epsilon_factor: -0.1, ..Default::default() };
        assert!(negative.validate().is_err());

        let no_marker = ExtractionConfig { marker_radius: 0.0, ..Default::default() };
        assert!(no_marker.validate().is_err());
    }

    #[test]
    fn test_schema_lists_fields() {
        let schema = serde_json::to_value(ExtractionConfig::schema()).expect("schema json");
        let properties = schema.get("properties").expect("properties");
        assert!(properties.get("alpha_threshold").is_some());
        assert!(properties.get("epsilon_factor").is_some());
    }
}
