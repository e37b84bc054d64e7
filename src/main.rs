//! Reef Chronicle - Headless Runner
//!
//! Runs the reef for a number of frames, optionally rewinds and branches
//! the timeline, and prints a summary of the outcome.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use reef_chronicle::core::error::Result;
use reef_chronicle::core::SimulationConfig;
use reef_chronicle::timeline::{NoticeLog, TimeTravelController, TimelineMarker};
use reef_chronicle::world::{Census, Scenario};

/// Headless reef simulation with a rewindable timeline
#[derive(Parser, Debug)]
#[command(name = "reef_chronicle")]
#[command(about = "Simulate a coral reef and travel through its recorded history")]
struct Args {
    /// Animation frames to run live
    #[arg(long, default_value_t = 1500)]
    frames: usize,

    /// Random seed for deterministic runs (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting preset: reef, healthy, threatened or recovery
    #[arg(long, default_value = "reef")]
    scenario: Scenario,

    /// Rewind to this simulated time after the live run
    #[arg(long)]
    rewind: Option<f64>,

    /// Branch the timeline at the rewind point and continue live from there
    #[arg(long, requires = "rewind")]
    branch: bool,

    /// Frames to run after the rewind (review playback, or live after a branch)
    #[arg(long, default_value_t = 0)]
    after_frames: usize,

    /// Write the newest snapshot as JSON to this path
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct RunSummary {
    scenario: Scenario,
    seed: u64,
    time: f64,
    live_head: f64,
    reviewing: bool,
    snapshots: usize,
    census: Census,
    markers: Vec<TimelineMarker>,
    notices: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reef_chronicle=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let seed = config.seed;

    tracing::info!("Reef Chronicle starting (seed {})", seed);

    let log = NoticeLog::new();
    let mut controller = TimeTravelController::new(config)?.with_observer(Box::new(log.clone()));
    if args.scenario != Scenario::Reef {
        controller.reset(args.scenario)?;
    }

    run_live(&mut controller, args.frames)?;

    if let Some(t) = args.rewind {
        rewind(&mut controller, t, args.branch, args.after_frames)?;
    }

    if let Some(path) = &args.dump {
        if let Some(snapshot) = controller.history().latest() {
            fs::write(path, snapshot.to_json()?)?;
            tracing::info!("Wrote snapshot t={:.2} to {}", snapshot.time, path.display());
        }
    }

    let summary = RunSummary {
        scenario: controller.scenario(),
        seed,
        time: controller.current_time(),
        live_head: controller.live_head(),
        reviewing: controller.is_reviewing(),
        snapshots: controller.history().len(),
        census: controller.census(),
        markers: controller.markers().iter().cloned().collect(),
        notices: log.notices().iter().map(|n| format!("{:?}", n)).collect(),
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

/// Run live frames, logging the census once per recorded snapshot
fn run_live(controller: &mut TimeTravelController, frames: usize) -> Result<()> {
    for _ in 0..frames {
        let recorded = controller.history().len();
        controller.frame()?;
        if controller.history().len() > recorded {
            tracing::info!(
                "t={:>6.2} {}",
                controller.current_time(),
                controller.census().summary()
            );
        }
    }
    Ok(())
}

/// Seek to `t`, then either branch and run live or play the review forward
///
/// A rewind that lands within the review tolerance of the head stays live;
/// there is nothing to branch from, so the remaining frames just run live.
fn rewind(controller: &mut TimeTravelController, t: f64, branch: bool, frames: usize) -> Result<()> {
    controller.seek(t);
    if !controller.is_reviewing() {
        if branch {
            tracing::warn!(
                "Rewind to t={:.2} is at the live head ({:.2}); not branching",
                t,
                controller.live_head()
            );
        }
        return run_live(controller, frames);
    }

    if branch {
        controller.rewrite_history()?;
        return run_live(controller, frames);
    }

    if !controller.is_playing() {
        controller.toggle_play();
    }
    for _ in 0..frames {
        controller.frame()?;
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("\n=== REEF CHRONICLE ===");
    println!("Scenario: {} (seed {})", summary.scenario, summary.seed);
    println!(
        "Time: {:.2} / live head {:.2}{}",
        summary.time,
        summary.live_head,
        if summary.reviewing { " [REVIEW]" } else { "" }
    );
    println!("Snapshots: {}", summary.snapshots);
    println!("Population: {}", summary.census.summary());
    println!("\nMarkers:");
    for marker in &summary.markers {
        println!("  {:>7.2}  {}", marker.time, marker.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warmed_up() -> TimeTravelController {
        let mut controller = TimeTravelController::new(SimulationConfig::default()).unwrap();
        run_live(&mut controller, 40).unwrap();
        controller
    }

    #[test]
    fn test_branch_at_live_head_keeps_running() {
        let mut controller = warmed_up();
        let head = controller.live_head();

        rewind(&mut controller, head, true, 20).unwrap();

        assert!(!controller.is_reviewing());
        assert!(controller.live_head() > head);
        assert!(controller.markers().iter().all(|m| m.label != "New path"));
    }

    #[test]
    fn test_branch_in_the_past() {
        let mut controller = warmed_up();

        rewind(&mut controller, 1.5, true, 20).unwrap();

        assert!(!controller.is_reviewing());
        assert!(controller.markers().iter().any(|m| m.label == "New path"));
        assert!(controller.live_head() > 1.5);
    }

    #[test]
    fn test_rewind_without_branch_plays_review() {
        let mut controller = warmed_up();

        rewind(&mut controller, 1.0, false, 5).unwrap();

        assert!(controller.is_reviewing());
        assert!(controller.is_playing());
        assert!((controller.current_time() - 1.4).abs() < 1e-9);
    }
}
