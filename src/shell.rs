//! Binary setup shared by entry points: logging and settings resolution.

use anyhow::{Context, Result};
use log::info;

use crate::cli::Args;
use crate::config::{self, PathConfig, TimelineSettings};

/// Console logging (respects RUST_LOG) or file logging when `--log` is given.
/// Verbosity: 0 = warn, 1 = info, 2 = debug, 3+ = trace.
pub fn init_logger(args: &Args, path_config: &PathConfig) -> Result<()> {
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .clone()
            .unwrap_or_else(|| config::data_file(config::LOG_FILE, path_config));
        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        let default_level = log_level.as_str().to_lowercase();
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .format_timestamp_millis()
            .init();
    }
    Ok(())
}

/// Settings file merged with CLI overrides.
pub fn load_settings(args: &Args, path_config: &PathConfig) -> Result<TimelineSettings> {
    let path = config::config_file(config::SETTINGS_FILE, path_config);
    let mut settings = TimelineSettings::load(&path)?;
    if args.live {
        settings.start_live = true;
    }
    Ok(settings)
}
