use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};

use profiler_timeline::cli::Args;
use profiler_timeline::config::{self, PathConfig};
use profiler_timeline::{shell, Session, StreamingMode, TimelineSnapshot};

fn main() -> Result<()> {
    let args = Args::parse();

    let path_config = PathConfig::from_env_and_cli(args.config_dir.clone());
    if let Err(e) = config::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {:#}", e);
    }

    shell::init_logger(&args, &path_config)?;
    info!("profiler-timeline v{} starting", env!("CARGO_PKG_VERSION"));
    debug!("Command-line args: {:?}", args);

    let settings = shell::load_settings(&args, &path_config)?;

    if args.save_config {
        let path = config::config_file(config::SETTINGS_FILE, &path_config);
        settings.save(&path)?;
        println!("Settings written to {}", path.display());
        return Ok(());
    }

    let mut session = Session::new(args.start_us, args.initial_length_us, &settings);

    if args.reset_zoom {
        session.timeline.reset_zoom();
    }
    if let Some(sel) = &args.select {
        // clap enforces num_args = 2
        session.timeline.set_selection(sel[0], sel[1]);
    }

    session.drain_events();
    print_snapshot(0, &session.timeline.snapshot(), args.json)?;

    for tick in 1..=args.ticks {
        if args.pause_at == Some(tick) {
            session.timeline.set_mode(StreamingMode::Paused);
        }
        if args.resume_at == Some(tick) {
            session.timeline.set_mode(StreamingMode::Live);
        }
        session.tick(args.tick_us);
        session.drain_events();
        print_snapshot(tick, &session.timeline.snapshot(), args.json)?;
    }

    info!(
        "Session done: {} ticks, {} events, {} mode transitions",
        session.ticks(),
        session.events_seen(),
        session.mode_transitions()
    );
    if session.ticks() < args.ticks {
        warn!("{} ticks were ignored", args.ticks - session.ticks());
    }

    Ok(())
}

fn print_snapshot(tick: u64, snap: &TimelineSnapshot, json: bool) -> Result<()> {
    if json {
        let line = serde_json::to_string(snap).context("Failed to serialize snapshot")?;
        println!("{}", line);
    } else {
        let selection = snap
            .selection
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "tick {:>4} [{:<6}] data {} view {} sel {}",
            tick, snap.mode, snap.data, snap.view, selection
        );
    }
    Ok(())
}
