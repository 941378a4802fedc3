//! Command-line interface for pixel_inspector

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use pixel_inspector::color::TableCache;
use pixel_inspector::image_loader::{load_image, pixel_or_center};
use pixel_inspector::{
    inspect_pixel, to_pretty_json, ColorTable, InspectorConfig, MatchSummary, Result, RgbTriple,
};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

static TABLE_CACHE: TableCache = TableCache::new();

#[derive(Parser)]
#[command(name = "pixel-inspector", version, about = "Name the closest reference color of an image pixel")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect one pixel of an image (defaults to the center)
    Inspect {
        image: PathBuf,
        /// Column of the pixel
        #[arg(short)]
        x: Option<u32>,
        /// Row of the pixel
        #[arg(short)]
        y: Option<u32>,
        #[command(flatten)]
        options: MatchOptions,
    },
    /// Find the closest reference color for an RGB triple
    Match {
        #[arg(allow_negative_numbers = true)]
        red: f64,
        #[arg(allow_negative_numbers = true)]
        green: f64,
        #[arg(allow_negative_numbers = true)]
        blue: f64,
        #[command(flatten)]
        options: MatchOptions,
    },
    /// Write the default configuration to a JSON file
    GenerateConfig { output: PathBuf },
}

#[derive(Args)]
struct MatchOptions {
    /// Reference color CSV (overrides the config file)
    #[arg(long)]
    colors: Option<PathBuf>,
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Distance metric: rgb or lab
    #[arg(long)]
    metric: Option<pixel_inspector::DistanceMetric>,
    /// Print JSON instead of the text summary
    #[arg(long)]
    json: bool,
}

impl MatchOptions {
    fn resolve(&self) -> Result<InspectorConfig> {
        Ok(InspectorConfig::load_or_default(self.config.as_deref())?.with_overrides(
            self.colors.clone(),
            self.metric,
            self.json,
        ))
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {}", error);
            eprintln!("Suggestion: {}", error.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Inspect {
            image,
            x,
            y,
            options,
        } => {
            let config = options.resolve()?;
            let table = load_reference_table(&config.colors_path)?;
            let image = load_image(&image)?;

            let (x, y) = pixel_or_center(&image, x, y);

            let report = inspect_pixel(&image, x, y, &table, &config.matcher())?;
            if config.json_output {
                println!("{}", to_pretty_json(&report)?);
            } else {
                println!("{}", report);
            }
        }
        Command::Match {
            red,
            green,
            blue,
            options,
        } => {
            let config = options.resolve()?;
            let table = load_reference_table(&config.colors_path)?;

            let target = RgbTriple::new(red, green, blue);
            let found = config.matcher().find_closest(target, &table)?;
            if config.json_output {
                println!("{}", to_pretty_json(&MatchSummary::from((target, found)))?);
            } else {
                println!(
                    "{} (ΔE: {:.1})",
                    found.entry.name,
                    found.rounded_distance()
                );
            }
        }
        Command::GenerateConfig { output } => {
            InspectorConfig::default().to_json_file(&output)?;
            info!(path = %output.display(), "configuration saved");
        }
    }
    Ok(())
}

/// Load the table once and reject an empty one before any lookup
fn load_reference_table(path: &Path) -> Result<Arc<ColorTable>> {
    let table = TABLE_CACHE.get_or_load(path)?;
    table.ensure_non_empty()?;
    Ok(table)
}
