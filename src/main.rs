use anyhow::Context;
use clap::Parser;
use pacal::{init_logging, Config, PaTestGenerator};
use std::path::PathBuf;
use tracing::info;

/// Generate a pressure-advance calibration print for Klipper-style
/// firmwares.
#[derive(Parser, Debug)]
#[command(name = "pacal", version, about)]
struct Cli {
    /// Settings file (.json or .toml); built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the generated G-code
    #[arg(short, long, default_value = "pa-test.gcode")]
    output: PathBuf,

    /// Write a settings file with the default values and exit
    #[arg(long, value_name = "PATH", conflicts_with = "config")]
    write_default_config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();

    if let Some(path) = cli.write_default_config {
        Config::default()
            .save_to_file(&path)
            .with_context(|| format!("failed to write default config to {}", path.display()))?;
        info!(path = %path.display(), "wrote default settings");
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    let generator = PaTestGenerator::new(config)?;
    let height = generator.final_height();
    let script = generator.generate()?;

    std::fs::write(&cli.output, &script)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    info!(
        path = %cli.output.display(),
        lines = script.lines().count(),
        height_mm = height,
        "calibration G-code written"
    );

    Ok(())
}
