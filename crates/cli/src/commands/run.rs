//! `run` command - resample the feeds and write the aligned outputs.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::cli::RunArgs;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the synchronization pipeline
pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    let output_dir = args.output.clone().unwrap_or_else(default_output_dir);

    info!(
        feeds = args.feeds.len(),
        output = %output_dir.display(),
        "starting synchronization run"
    );

    let config = PipelineConfig {
        feed_dirs: args.feeds.clone(),
        output_dir: output_dir.clone(),
        policy: args.policy.into(),
        writer_kind: args.writer.into(),
        ffmpeg: args.ffmpeg.clone(),
    };

    let stats = Pipeline::new(config).run().await?;

    println!("Synchronized {} feed(s) -> {}", stats.reports.len(), output_dir.display());
    println!(
        "  window: [{:.3}, {:.3})  interval: {:.4}s  fps: {:.3}",
        stats.window.start, stats.window.end, stats.window.interval, stats.fps
    );
    for report in &stats.reports {
        println!(
            "  {}: {} frames ({} source, {} blank)",
            report.feed_id, report.frames_written, report.source_frames, report.blank_frames
        );
    }
    for feed_id in &stats.dropped_feeds {
        println!("  {feed_id}: excluded (unusable at load time)");
    }
    for feed_id in &stats.failed_feeds {
        println!("  {feed_id}: failed mid-run, no output");
    }
    println!(
        "  {} frames total in {:.2}s ({:.1} frames/s)",
        stats.total_frames(),
        stats.duration.as_secs_f64(),
        stats.processing_rate()
    );

    Ok(())
}

/// Timestamped directory in the working directory, used when -o is absent
fn default_output_dir() -> PathBuf {
    PathBuf::from(format!(
        "synced_{}",
        chrono::Local::now().format("%Y-%m-%d_%H_%M_%S")
    ))
}
