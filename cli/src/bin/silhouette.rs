use clap::{Parser, Subcommand};
use cli::{default_output_path, extract, resolve_config, CliError, ConfigOverrides};
use color_eyre::eyre::{eyre, Result};
use silhouette::ExtractionConfig;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline polygon of a portrait and write it as SVG
    Extract {
        /// Path to the input image (PNG with transparent background)
        #[arg(short, long)]
        input: PathBuf,
        /// Path of the SVG to write (defaults to the input with a .svg extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Path to a TOML or JSON extraction configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Minimum alpha (0-255) counted as solid
        #[arg(long)]
        threshold: Option<u8>,
        /// Consecutive solid pixels required to accept a boundary
        #[arg(long)]
        run_length: Option<usize>,
        /// Simplification tolerance as a fraction of max(width, height)
        #[arg(long)]
        epsilon_factor: Option<f64>,
        /// Embed stroke and fill attributes into the SVG
        #[arg(long)]
        styled: bool,
        /// Also write <stem>_edges_debug.png with the raw edge points in red
        #[arg(long)]
        debug_image: bool,
        /// Also write the outline as a GeoJSON feature
        #[arg(long)]
        geojson: Option<PathBuf>,
    },
    /// Print the JSON schema of the extraction configuration
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            output,
            config,
            threshold,
            run_length,
            epsilon_factor,
            styled,
            debug_image,
            geojson,
        } => {
            let overrides = ConfigOverrides {
                threshold,
                run_length,
                epsilon_factor,
                styled,
            };
            let config = resolve_config(config.as_deref(), &overrides)?;
            let output = output.unwrap_or_else(|| default_output_path(&input));
            match extract(&input, &output, &config, debug_image, geojson.as_deref()) {
                Ok(_) => {}
                Err(CliError::Outline(e)) if e.is_insufficient_contour() => {
                    error!("No usable outline in {}: {}", input.display(), e);
                    return Err(eyre!("outline extraction failed for {}: {}", input.display(), e));
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&ExtractionConfig::schema())?);
        }
    }

    Ok(())
}
