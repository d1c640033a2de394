//! streak-lines CLI: detect straight streaks in one frame and write a JSON report.

use clap::Parser;
use std::path::PathBuf;
use streak_lines::{detect, DetectConfig, HoughService};

#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "streak-lines")]
#[command(about = "Detect straight streaks (airplanes, satellites) in a grayscale frame")]
#[command(version)]
struct Cli {
    /// Detection config (JSON). Flags given alongside override its values.
    #[arg(long, required_unless_present = "image")]
    config: Option<PathBuf>,

    /// Input image. Replaces `image_path` from the config.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Maximum number of lines per frame, or per tile when tiling.
    #[arg(long)]
    max_results: Option<usize>,

    /// Split the frame into square tiles of this many pixels; 0 disables tiling.
    #[arg(long)]
    tile_size: Option<usize>,

    /// Where to write the report (JSON).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Log at debug level. With the `tracing` feature, RUST_LOG takes precedence.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn to_config(&self) -> CliResult<DetectConfig> {
        let mut config = match &self.config {
            Some(path) => DetectConfig::load_json(path)
                .map_err(|e| -> CliError { format!("{}: {e}", path.display()).into() })?,
            None => DetectConfig::default(),
        };
        if let Some(image) = &self.image {
            config.image_path = image.display().to_string();
        }
        if let Some(max_results) = self.max_results {
            config.max_results = Some(max_results);
        }
        if let Some(tile_size) = self.tile_size {
            config.tile_size = tile_size;
        }
        if let Some(output) = &self.output {
            config.output_path = Some(output.display().to_string());
        }
        if config.image_path.is_empty() {
            return Err("no input image: pass --image or set image_path in the config".into());
        }
        Ok(config)
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.to_config()?;
    let service = HoughService::with_params(config.hough.clone())?;
    let report = detect::run(&config, &service.handle())?;

    let output = config.output_path();
    report.write_json(&output)?;
    println!("{} lines written to {}", report.lines.len(), output.display());
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    #[cfg(feature = "tracing")]
    {
        let _ = LogTracer::init();
        streak_lines::core::init_tracing_with_level(false, level);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = streak_lines::core::init_with_level(level);
    }
}
