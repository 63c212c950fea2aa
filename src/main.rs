use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{ArgAction, Parser};
use serde::Deserialize;

use aircanvas::config::Config;
use aircanvas::session::{Sample, Session};

#[derive(Parser, Debug)]
#[command(name = "aircanvas")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("AIRCANVAS_GIT_HASH"), ")"))]
#[command(about = "Gesture-driven drawing canvas with shape recognition and bounded undo")]
struct Cli {
    /// Replay a JSONL sample trace through a fresh session
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Export the final raster as a PNG; without a path, the configured
    /// export directory and filename template are used
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    export: Option<Option<PathBuf>>,

    /// Use an alternate configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the configured canvas width
    #[arg(long, value_name = "PIXELS")]
    width: Option<u32>,

    /// Override the configured canvas height
    #[arg(long, value_name = "PIXELS")]
    height: Option<u32>,

    /// Print the default configuration document and exit
    #[arg(long, action = ArgAction::SetTrue)]
    print_config: bool,
}

/// One line of a replay trace.
///
/// `x`/`y` may be null or absent when the tracker lost the fingertip.
#[derive(Debug, Deserialize)]
struct TraceRecord {
    t_ms: u64,
    #[serde(default)]
    x: Option<i32>,
    #[serde(default)]
    y: Option<i32>,
    fingers: u8,
    detected: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", Config::default_toml());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(width) = cli.width {
        config.canvas.width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.height = height;
    }
    config.validate_and_clamp();

    let Some(trace_path) = cli.replay.as_deref() else {
        print_usage();
        return Ok(());
    };

    let mut session = Session::new(&config).context("Failed to create drawing session")?;
    let count = replay_trace(&mut session, trace_path)?;
    let status = session.status();
    log::info!(
        "Replayed {count} samples: {} strokes, mode {}, color {}",
        status.stroke_count,
        status.mode,
        status.color
    );

    match cli.export {
        Some(Some(path)) => {
            session
                .export_png(&path)
                .with_context(|| format!("Failed to export to {}", path.display()))?;
            println!("Exported {}", path.display());
        }
        Some(None) => {
            let path = session
                .export_default()
                .context("Failed to export to the configured directory")?;
            println!("Exported {}", path.display());
        }
        None => {}
    }

    Ok(())
}

/// Feeds every trace record to the session with a synthetic timeline.
fn replay_trace(session: &mut Session, path: &Path) -> anyhow::Result<usize> {
    let file =
        File::open(path).with_context(|| format!("Failed to open trace {}", path.display()))?;
    let reader = BufReader::new(file);

    let origin = Instant::now();
    let mut count = 0usize;
    for (number, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("Failed to read trace {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: TraceRecord = serde_json::from_str(&line)
            .with_context(|| format!("Invalid trace record on line {}", number + 1))?;

        let pointer = match (record.x, record.y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        };
        let sample = Sample {
            pointer,
            finger_count: record.fingers,
            hand_detected: record.detected,
        };
        session.handle_sample(&sample, origin + Duration::from_millis(record.t_ms));
        count += 1;
    }

    Ok(count)
}

fn print_usage() {
    println!("aircanvas: gesture-driven drawing canvas");
    println!();
    println!("Usage:");
    println!("  aircanvas --replay trace.jsonl --export out.png");
    println!("  aircanvas --print-config > ~/.config/aircanvas/config.toml");
    println!();
    println!("Trace format: one JSON object per line, e.g.");
    println!("  {{\"t_ms\": 0, \"x\": 100, \"y\": 100, \"fingers\": 1, \"detected\": true}}");
    println!();
    println!("Finger counts: 0 erase, 1 draw, 2 idle, 5 pause,");
    println!("3/4 next/previous color after a held confirmation.");
}
