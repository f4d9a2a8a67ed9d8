use std::{io::Cursor, sync::Arc};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, GrayImage, ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use strum::{Display, EnumString, IntoStaticStr, VariantNames};
use crate::{
    config::ExtractionConfig,
    error::Result,
    pipeline::{builder::PipelineBuilder, Pipeline},
    segmentation::AlphaChannelSegmenter,
    traits::SegmentationProvider,
    types::{ExtractedOutline, NormalizedPoint},
};

#[derive(
    Debug, Clone,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, VariantNames, IntoStaticStr,
    PartialEq
)]
#[serde(tag = "type", content = "params")]
#[strum(serialize_all = "snake_case")]
pub enum OutlineCommand {
    /// Extract the outline with the service's pipeline
    #[serde(rename = "extract_outline")]
    ExtractOutline,

    /// Extract the outline with a different simplification tolerance
    #[serde(rename = "extract_outline_with_tolerance")]
    ExtractOutlineWithTolerance {
        #[schemars(range(min = 0.0, max = 0.1))]
        epsilon_factor: f64,
    },

    /// Extract the outline with a complete configuration
    #[serde(rename = "extract_outline_with_config")]
    ExtractOutlineWithConfig { config: ExtractionConfig },
}

impl OutlineCommand {
    /// Get the JSON schema for all commands
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(OutlineCommand)
    }

    /// Get a list of all available command names
    pub fn command_names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ExtractOutline => "Extract a simplified outline polygon with the default settings",
            Self::ExtractOutlineWithTolerance { .. } => "Extract an outline with a custom simplification tolerance",
            Self::ExtractOutlineWithConfig { .. } => "Extract an outline with a full extraction configuration",
        }
    }
}

/// Processed image plus its outline
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    /// PNG encoding of the source pixels with the segmentation mask as alpha
    pub png: Vec<u8>,
    pub outline: ExtractedOutline,
}

impl ProcessedImage {
    /// `data:` URL embedding the PNG
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

/// Payload returned to transport callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessResponse {
    Success {
        image: String,
        svg: String,
        points: Vec<NormalizedPoint>,
        vertices: usize,
    },
    Failure {
        error: String,
    },
}

impl From<Result<ProcessedImage>> for ProcessResponse {
    fn from(result: Result<ProcessedImage>) -> Self {
        match result {
            Ok(processed) => Self::Success {
                image: processed.data_url(),
                svg: processed.outline.document.markup.clone(),
                vertices: processed.outline.vertex_count(),
                points: processed.outline.points.points,
            },
            Err(e) => Self::Failure { error: e.to_string() },
        }
    }
}

/// Request-handling entry point.
///
/// The segmentation provider is created once and shared read-only by every
/// request; cloning the service only clones the handles.
#[derive(Clone)]
pub struct OutlineService {
    segmenter: Arc<dyn SegmentationProvider>,
    pipeline: Arc<Pipeline>,
    config: ExtractionConfig,
}

impl OutlineService {
    pub fn new() -> Self {
        Self {
            segmenter: Arc::new(AlphaChannelSegmenter::default()),
            pipeline: Arc::new(Pipeline::builder().build()),
            config: ExtractionConfig::default(),
        }
    }

    pub fn with_segmenter(segmenter: Arc<dyn SegmentationProvider>, config: ExtractionConfig) -> Result<Self> {
        let pipeline = PipelineBuilder::from_config(&config)?.build();
        Ok(Self {
            segmenter,
            pipeline: Arc::new(pipeline),
            config,
        })
    }

    /// Service using the alpha-channel segmenter and a configured pipeline
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        Self::with_segmenter(Arc::new(AlphaChannelSegmenter::default()), config.clone())
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn pipeline_info(&self) -> String {
        self.pipeline.info()
    }

    pub fn segment(&self, image: &DynamicImage) -> Result<GrayImage> {
        self.segmenter.segment(image)
    }

    /// Segment, extract, and re-encode a decoded image
    pub fn process_image(&self, image: &DynamicImage) -> Result<ProcessedImage> {
        let mask = self.segment(image)?;
        let outline = self.pipeline.process_gray(&mask)?;
        let png = encode_png(&apply_mask(image, &mask))?;
        Ok(ProcessedImage { png, outline })
    }

    /// Decode an uploaded file and process it
    pub fn process_bytes(&self, bytes: &[u8]) -> Result<ProcessedImage> {
        let image = image::load_from_memory(bytes)?;
        self.process_image(&image)
    }

    pub fn execute(&self, image: &DynamicImage, command: OutlineCommand) -> Result<ExtractedOutline> {
        let mask = self.segment(image)?;
        match command {
            OutlineCommand::ExtractOutline => self.pipeline.process_gray(&mask),
            OutlineCommand::ExtractOutlineWithTolerance { epsilon_factor } => {
                // Only the tolerance changes; scanning and styling stay as configured.
                let config = ExtractionConfig { epsilon_factor, ..self.config.clone() };
                PipelineBuilder::from_config(&config)?.build().process_gray(&mask)
            }
            OutlineCommand::ExtractOutlineWithConfig { config } => {
                PipelineBuilder::from_config(&config)?.build().process_gray(&mask)
            }
        }
    }
}

impl Default for OutlineService {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_mask(image: &DynamicImage, mask: &GrayImage) -> RgbaImage {
    let mut rgba = image.to_rgba8();
    for (pixel, alpha) in rgba.pixels_mut().zip(mask.pixels()) {
        pixel[3] = alpha[0];
    }
    rgba
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
