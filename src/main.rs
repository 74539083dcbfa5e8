//! LedVI - LED forward-characteristic calculator
//!
//! Sweeps VI curves for catalog LEDs and solves the voltage needed for a
//! target current, optionally under temperature and ageing stress.
//!
//! # Usage
//!
//! ```bash
//! ledvi sweep --device Red --voltages 2,3.5 --comparison --format json
//! ledvi inverse --device Blue --current 0.02 --temperature 60 --duration 3600
//! ledvi --catalog my_leds.json devices
//! ```
//!
//! Stress is applied whenever `--temperature` or `--duration` is given.
//! Set `RUST_LOG` or pass `-v` for diagnostics on stderr.

use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use ledvi_core::{
    error::Result,
    input::{parse_target_current, parse_voltage_list},
    report::{write_devices, write_inverse, write_series, OutputFormat},
    CurveGenerator, DeviceCatalog, Stressors, SweepConfig,
};

/// LED VI characteristic calculator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON device catalog to use instead of the builtin one
    #[arg(long, value_name = "FILE", global = true)]
    catalog: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sweep current over voltage for one device
    Sweep {
        #[command(flatten)]
        common: CommonArgs,

        /// Comma-separated voltages, one series each
        #[arg(long, value_name = "V1,V2,...")]
        voltages: String,
    },

    /// Solve the voltage for a target current, then sweep at it
    Inverse {
        #[command(flatten)]
        common: CommonArgs,

        /// Target forward current in amps
        #[arg(long, value_name = "AMPS")]
        current: String,
    },

    /// List catalog devices
    Devices,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Device id, e.g. Red
    #[arg(short, long, default_value = "Red")]
    device: String,

    /// Operating temperature in °C (applies stress)
    #[arg(short, long, allow_negative_numbers = true)]
    temperature: Option<f64>,

    /// Operating duration in seconds (applies stress)
    #[arg(long)]
    duration: Option<f64>,

    /// Add baseline curves for every other catalog device
    #[arg(short, long)]
    comparison: bool,

    /// Samples per series
    #[arg(long, default_value_t = ledvi_core::curve::DEFAULT_POINTS)]
    points: usize,

    /// Output format: table or json
    #[arg(short, long, default_value = "table", value_parser = parse_format)]
    format: OutputFormat,
}

impl CommonArgs {
    fn stressors(&self) -> Option<Stressors> {
        Stressors::from_parts(self.temperature, self.duration)
    }
}

fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    OutputFormat::from_str(s).ok_or_else(|| format!("unknown format '{}' (use table or json)", s))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load the catalog once; it stays read-only afterwards
    let loaded;
    let catalog = match &cli.catalog {
        Some(path) => {
            loaded = DeviceCatalog::from_file(path)?;
            &loaded
        }
        None => DeviceCatalog::builtin(),
    };

    let mut stdout = io::stdout().lock();

    match &cli.command {
        Command::Sweep { common, voltages } => {
            let voltages = parse_voltage_list(voltages)?;
            let stress = common.stressors();
            let config = SweepConfig::new().with_points(common.points);
            let generator = CurveGenerator::with_config(catalog, config);

            let series = generator.sweep(&common.device, stress.as_ref(), &voltages, common.comparison)?;
            write_series(&mut stdout, &series, common.format)?;
        }

        Command::Inverse { common, current } => {
            let target = parse_target_current(current)?;
            let stress = common.stressors();
            let config = SweepConfig::new().with_points(common.points);
            let generator = CurveGenerator::with_config(catalog, config);

            let solution =
                generator.solve_and_sweep(&common.device, target, stress.as_ref(), common.comparison)?;
            write_inverse(&mut stdout, &common.device, target, solution.as_ref(), common.format)?;
        }

        Command::Devices => write_devices(&mut stdout, catalog)?,
    }

    Ok(())
}
