use crate::{
    algorithms::{DirectionalScanner, DouglasPeuckerSimplifier, ScanParams},
    config::ExtractionConfig,
    error::Result,
    io::{OutlineStyle, SvgSerializer},
    pipeline::Pipeline,
    traits::{ContourSimplifier, EdgeScanner, OutlineSerializer},
};

/// Default simplification tolerance as a fraction of the larger image dimension
pub const DEFAULT_EPSILON_FACTOR: f64 = 0.004;

/// Builder for creating pipelines with a fluent API
pub struct PipelineBuilder {
    scan_params: ScanParams,
    scanner: Option<Box<dyn EdgeScanner>>,
    simplifier: Option<Box<dyn ContourSimplifier>>,
    serializer: Option<Box<dyn OutlineSerializer>>,
    epsilon_factor: f64,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            scan_params: ScanParams::default(),
            scanner: None,
            simplifier: None,
            serializer: None,
            epsilon_factor: DEFAULT_EPSILON_FACTOR,
        }
    }

    /// Builder preloaded from a validated configuration
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        config.validate()?;

        let mut serializer = SvgSerializer {
            marker_radius: config.marker_radius,
            precision: config.coordinate_precision,
            style: None,
        };
        if config.styled {
            serializer = serializer.with_style(OutlineStyle::default());
        }

        Ok(Self::new()
            .with_threshold(config.alpha_threshold)
            .with_run_length(config.run_length)
            .with_epsilon_factor(config.epsilon_factor)
            .set_serializer(serializer))
    }

    /// Opacity threshold for the default directional scanner
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.scan_params.threshold = threshold;
        self
    }

    /// Required solid run length for the default directional scanner
    pub fn with_run_length(mut self, run_length: usize) -> Self {
        self.scan_params.run_length = run_length;
        self
    }

    pub fn with_epsilon_factor(mut self, epsilon_factor: f64) -> Self {
        self.epsilon_factor = epsilon_factor;
        self
    }

    /// Set the edge scanner (replaces the directional scanner and its params)
    pub fn set_scanner<S>(mut self, scanner: S) -> Self
    where
        S: EdgeScanner + 'static,
    {
        self.scanner = Some(Box::new(scanner));
        self
    }

    /// Set the simplifier (replaces any existing one)
    pub fn set_simplifier<S>(mut self, simplifier: S) -> Self
    where
        S: ContourSimplifier + 'static,
    {
        self.simplifier = Some(Box::new(simplifier));
        self
    }

    /// Set the serializer (replaces any existing one)
    pub fn set_serializer<S>(mut self, serializer: S) -> Self
    where
        S: OutlineSerializer + 'static,
    {
        self.serializer = Some(Box::new(serializer));
        self
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> Pipeline {
        let scan_params = self.scan_params;
        let scanner = self.scanner
            .unwrap_or_else(|| Box::new(DirectionalScanner::new(scan_params)));

        let simplifier = self.simplifier
            .unwrap_or_else(|| Box::new(DouglasPeuckerSimplifier));

        let serializer = self.serializer
            .unwrap_or_else(|| Box::new(SvgSerializer::default()));

        Pipeline::new(scanner, simplifier, serializer, self.epsilon_factor)
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
