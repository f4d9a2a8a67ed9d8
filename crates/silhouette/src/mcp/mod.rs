use crate::{
    config::ExtractionConfig,
    service::{OutlineCommand, OutlineService},
    types::{ExtractedOutline, NormalizedPoint, ScanStats},
};
use image::DynamicImage;
use rmcp::{
    handler::server::tool::IntoCallToolResult, model::{CallToolResult, Content, ServerCapabilities, ServerInfo}, schemars, tool, Error as McpError, ServerHandler
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use std::sync::{Arc, RwLock};

/// Request for loading an image from disk
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LoadImageRequest {
    #[schemars(description = "Path to a PNG (with alpha) or any image the segmenter understands")]
    pub path: String,
}

/// Request carrying a full extraction configuration
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConfiguredExtractionRequest {
    #[schemars(description = "Extraction parameters; omitted fields use defaults")]
    pub config: ExtractionConfig,
}

/// Request for extraction with a different simplification tolerance
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ToleranceRequest {
    #[schemars(
        description = "Simplification tolerance as a fraction of max(width, height)",
        range(min = 0.0, max = 0.1)
    )]
    pub epsilon_factor: f64,
}

/// Outcome of an extraction tool call
#[derive(Debug, Serialize, schemars::JsonSchema, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum OutlineResponse {
    Success {
        #[schemars(description = "Number of polygon vertices")]
        vertex_count: usize,
        #[schemars(description = "Original image dimensions")]
        image_dimensions: ImageDimensions,
        #[schemars(description = "Polygon vertices in the 0-100 frame")]
        points: Vec<NormalizedPoint>,
        #[schemars(description = "SVG document with the polygon and vertex markers")]
        svg: String,
        stats: ScanStats,
    },
    Failure {
        #[schemars(description = "Why no outline could be produced")]
        error: String,
    },
}

#[derive(Debug, Serialize, schemars::JsonSchema, TS)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl OutlineResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self::Failure { error: message.into() }
    }
}

impl From<ExtractedOutline> for OutlineResponse {
    fn from(outline: ExtractedOutline) -> Self {
        Self::Success {
            vertex_count: outline.vertex_count(),
            image_dimensions: ImageDimensions {
                width: outline.image_width,
                height: outline.image_height,
            },
            points: outline.points.points,
            svg: outline.document.markup,
            stats: outline.stats,
        }
    }
}

impl IntoCallToolResult for OutlineResponse {
    fn into_call_tool_result(self) -> Result<CallToolResult, McpError> {
        let text = serde_json::to_string_pretty(&self).unwrap_or_else(|_| format!("{:?}", self));
        Ok(match self {
            Self::Success { .. } => CallToolResult::success(vec![Content::text(text)]),
            Self::Failure { .. } => CallToolResult::error(vec![Content::text(text)]),
        })
    }
}

/// MCP server exposing outline extraction as tools
#[derive(Clone)]
pub struct OutlineMcpServer {
    service: OutlineService,
    image: Arc<RwLock<Option<DynamicImage>>>,
}

impl OutlineMcpServer {
    pub fn new() -> Self {
        Self::with_service(OutlineService::new())
    }

    pub fn with_service(service: OutlineService) -> Self {
        Self {
            service,
            image: Arc::new(RwLock::new(None)),
        }
    }

    fn run(&self, command: OutlineCommand) -> OutlineResponse {
        let guard = match self.image.read() {
            Ok(guard) => guard,
            Err(_) => return OutlineResponse::failure("Image state is unavailable"),
        };
        let image = match guard.as_ref() {
            Some(image) => image,
            None => return OutlineResponse::failure("No image loaded. Please load an image first."),
        };

        match self.service.execute(image, command) {
            Ok(outline) => outline.into(),
            Err(e) => OutlineResponse::failure(format!("Outline extraction failed: {}", e)),
        }
    }
}

impl Default for OutlineMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool(tool_box)]
impl OutlineMcpServer {
    #[tool(description = "Load an image from file path")]
    fn load_image(&self, #[tool(aggr)] LoadImageRequest { path }: LoadImageRequest) -> String {
        let image = match image::open(&path) {
            Ok(image) => image,
            Err(e) => return format!("Failed to load image from {}: {}", path, e),
        };

        match self.image.write() {
            Ok(mut slot) => {
                let message = format!("Image loaded successfully from {} ({}x{})", path, image.width(), image.height());
                *slot = Some(image);
                message
            }
            Err(_) => "Image state is unavailable".to_string(),
        }
    }

    #[tool(description = "Extract the silhouette outline polygon from the loaded image")]
    fn extract_outline(&self) -> OutlineResponse {
        self.run(OutlineCommand::ExtractOutline)
    }

    #[tool(description = "Extract the outline with a custom simplification tolerance, keeping the other settings")]
    fn extract_outline_with_tolerance(
        &self,
        #[tool(aggr)] ToleranceRequest { epsilon_factor }: ToleranceRequest
    ) -> OutlineResponse {
        self.run(OutlineCommand::ExtractOutlineWithTolerance { epsilon_factor })
    }

    #[tool(description = "Extract the outline with custom threshold, run length, and simplification settings")]
    fn extract_outline_with_config(
        &self,
        #[tool(aggr)] ConfiguredExtractionRequest { config }: ConfiguredExtractionRequest
    ) -> OutlineResponse {
        self.run(OutlineCommand::ExtractOutlineWithConfig { config })
    }

    #[tool(description = "Get information about available commands and the active pipeline")]
    fn get_command_info(&self) -> String {
        let mut info = String::new();
        info.push_str("Available outline commands:\n\n");

        for (i, name) in OutlineCommand::command_names().iter().enumerate() {
            info.push_str(&format!("{}. {}\n", i + 1, name));
        }

        info.push_str("\nCommand Details:\n");
        let commands = [
            OutlineCommand::ExtractOutline,
            OutlineCommand::ExtractOutlineWithTolerance {
                epsilon_factor: self.service.config().epsilon_factor,
            },
            OutlineCommand::ExtractOutlineWithConfig { config: self.service.config().clone() },
        ];
        for cmd in commands {
            info.push_str(&format!("\n- {}\n", cmd));
            info.push_str(&format!("  Description: {}\n", cmd.description()));
        }

        info.push_str(&format!("\n{}\n", self.service.pipeline_info()));
        info
    }

    #[tool(description = "Get the JSON schema for OutlineCommand")]
    fn get_command_schema(&self) -> String {
        serde_json::to_string_pretty(&OutlineCommand::schema())
            .unwrap_or_else(|e| format!("Failed to serialize schema: {}", e))
    }

    #[tool(description = "Get the JSON schema for the extraction configuration")]
    fn get_config_schema(&self) -> String {
        serde_json::to_string_pretty(&ExtractionConfig::schema())
            .unwrap_or_else(|e| format!("Failed to serialize schema: {}", e))
    }
}

#[tool(tool_box)]
impl ServerHandler for OutlineMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Silhouette Outline Server - extract a normalized outline polygon from the foreground mask of a portrait image.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
