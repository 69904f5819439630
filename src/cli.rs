use clap::Parser;
use std::path::PathBuf;

const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Replay a simulated profiling session through the timeline range manager
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Session start timestamp (us)
    #[arg(long = "start-us", value_name = "US", default_value_t = 0.0)]
    pub start_us: f64,

    /// Data already collected when the session opens (us)
    #[arg(long = "initial-length-us", value_name = "US", default_value_t = 5_000_000.0)]
    pub initial_length_us: f64,

    /// Number of ingestion ticks to simulate
    #[arg(short = 'n', long = "ticks", value_name = "N", default_value_t = 10)]
    pub ticks: u64,

    /// Data added per tick (us)
    #[arg(long = "tick-us", value_name = "US", default_value_t = 1_000_000.0)]
    pub tick_us: f64,

    /// Start in Live mode (overrides the settings file)
    #[arg(long = "live")]
    pub live: bool,

    /// Pause streaming before tick N (1-based)
    #[arg(long = "pause-at", value_name = "N")]
    pub pause_at: Option<u64>,

    /// Resume streaming before tick N (1-based)
    #[arg(long = "resume-at", value_name = "N")]
    pub resume_at: Option<u64>,

    /// Reset zoom to the default view length before the first tick
    #[arg(long = "reset-zoom")]
    pub reset_zoom: bool,

    /// Initial selection
    #[arg(long = "select", value_names = ["MIN", "MAX"], num_args = 2)]
    pub select: Option<Vec<f64>>,

    /// Print JSON snapshots instead of text lines
    #[arg(long = "json")]
    pub json: bool,

    /// Write the effective settings to the config directory and exit
    #[arg(long = "save-config")]
    pub save_config: bool,

    /// Log to file (default: profiler-timeline.log in the data directory)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}
