use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use wavecore::download::{DirectoryHost, DEFAULT_FILENAME};
use wavecore::WaveParameters;
use workflow::config::ExportConfig;
use workflow::runner::Runner;

mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Synthesize a sine wave and download it as CSV")]
struct Args {
    /// Load wave and export settings from YAML (replaces the wave flags)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    amplitude: f64,
    /// Frequency in Hz
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    frequency: f64,
    /// Phase offset in radians
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    phase: f64,
    /// Samples per second
    #[arg(long, default_value_t = 100.0)]
    sample_rate: f64,
    /// Length of the wave in seconds
    #[arg(long, default_value_t = 1.0)]
    duration: f64,
    /// Leave the timestamp column out of the CSV
    #[arg(long, default_value_t = false)]
    no_time: bool,
    #[arg(long, default_value = DEFAULT_FILENAME)]
    filename: String,
    /// Directory that receives the download
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// Print the CSV to stdout instead of saving it
    #[arg(long, default_value_t = false)]
    stdout: bool,
    /// Print the chart points as JSON and exit
    #[arg(long, default_value_t = false)]
    points: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let export_config = if let Some(path) = args.config {
        ExportConfig::load(path)?
    } else {
        ExportConfig::from_args(
            WaveParameters::new(
                args.amplitude,
                args.frequency,
                args.phase,
                args.sample_rate,
                args.duration,
            ),
            !args.no_time,
            args.filename,
            args.out_dir,
        )
    };

    let runner = Runner::new(export_config.clone());

    if args.points {
        println!("{}", runner.points_json()?);
        return Ok(());
    }

    if args.stdout {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        runner.print_csv(&mut handle).context("printing csv")?;
        return Ok(());
    }

    let mut host = DirectoryHost::new(&export_config.out_dir);
    let result = runner.execute(&mut host)?;
    let saved = host
        .saved()
        .last()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| export_config.filename.clone());

    println!(
        "Exported {} samples -> {} ({} bytes)",
        result.sample_count, saved, result.csv_bytes
    );

    Ok(())
}
