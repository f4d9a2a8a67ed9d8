//! # Silhouette Outline Extraction
//!
//! Turns the foreground mask of a portrait into a single closed outline
//! polygon, normalized to a `0..100` frame and serialized as SVG.
//!
//! ## Stages
//!
//! - **Directional scan**: every row is walked inward from the left edge
//!   (bottom to top) and from the right edge (top to bottom) until a run of
//!   solid pixels starts; isolated opaque pixels are skipped as phantoms
//! - **Assembly**: left points followed by right points form one simple polygon
//! - **Simplification**: closed Douglas-Peucker with a tolerance relative to the image size
//! - **Normalization**: pixel coordinates scaled into the `[0, 100]` frame
//! - **Serialization**: SVG polygon plus one marker per vertex (GeoJSON also available)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use silhouette::{AlphaMask, Pipeline};
//!
//! let image = image::open("portrait_no_bg.png")?.to_rgba8();
//! let alpha: Vec<u8> = image.pixels().map(|p| p[3]).collect();
//! let mask = AlphaMask::new(&alpha, image.width(), image.height())?;
//!
//! let outline = Pipeline::builder().build().process(&mask)?;
//! std::fs::write("portrait.svg", outline.svg())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use silhouette::Pipeline;
//!
//! let pipeline = Pipeline::builder()
//!     .with_threshold(200)
//!     .with_run_length(5)
//!     .with_epsilon_factor(0.002)
//!     .build();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod mask;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod io;
pub mod pipeline;
pub mod config;
pub mod segmentation;
pub mod service;
pub mod debug;
pub mod mcp;

// Re-exports for convenience
pub use error::{OutlineError, Result};
pub use mask::AlphaMask;
pub use types::*;
pub use traits::*;
pub use algorithms::*;
pub use io::*;
pub use config::ExtractionConfig;
pub use pipeline::{Pipeline, builder::PipelineBuilder};
pub use segmentation::AlphaChannelSegmenter;
pub use service::{OutlineCommand, OutlineService, ProcessResponse, ProcessedImage};
pub use debug::render_edge_overlay;
