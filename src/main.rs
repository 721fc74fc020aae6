#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use latency_bars::plot_cmd::PlotOverrides;
use latency_bars::{PlotResult, normalize_cmd, plot_cmd};

#[derive(Parser, Debug)]
#[command(name = "latency-bars")]
#[command(about = "Grouped bar charts for storage write-latency benchmarks", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set LATENCY_BARS_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    /// Write the chart without opening it in the system viewer
    #[arg(long, global = true)]
    no_show: bool,

    /// Defaults to `write-delays` with its default options
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare fsync write delays across storage configurations
    WriteDelays(WriteDelaysArgs),

    /// Print a benchmark table with latencies converted to milliseconds
    Normalize {
        /// Benchmark CSV (e.g., output_ssd.csv)
        #[arg(long)]
        input: PathBuf,
        /// Write the normalized CSV here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct WriteDelaysArgs {
    /// TOML plot configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory holding the output_<name>.csv tables
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Storage configurations to compare (2 or 3, e.g. ssd,hdd,balanced)
    #[arg(long, value_delimiter = ',')]
    configurations: Vec<String>,
    /// SVG output path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Write the chart layout as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,
}

impl From<WriteDelaysArgs> for PlotOverrides {
    fn from(args: WriteDelaysArgs) -> Self {
        PlotOverrides {
            config: args.config,
            data_dir: args.data_dir,
            configurations: args.configurations,
            output: args.output,
            json: args.json,
        }
    }
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("LATENCY_BARS_LOG").unwrap_or_else(|_| {
        if verbose { "latency_bars=debug".to_string() } else { "latency_bars=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_span_events(FmtSpan::ACTIVE)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn write_delays(args: WriteDelaysArgs, show: bool) -> PlotResult<()> {
    let output = plot_cmd::run(args.into())?;
    println!("write delays: {}", output.display());
    if show {
        // The SVG is already written; a missing viewer only warns.
        if let Err(e) = plot_cmd::show_chart(&output) {
            warn!(output = %output.display(), error = %e, "could not open chart viewer");
        }
    }
    Ok(())
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let show = !cli.no_show;
    let result = match cli.command {
        None => write_delays(WriteDelaysArgs::default(), show),
        Some(Commands::WriteDelays(args)) => write_delays(args, show),
        Some(Commands::Normalize { input, output }) => normalize_cmd::run(input, output),
    };

    if let Err(e) = result {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
