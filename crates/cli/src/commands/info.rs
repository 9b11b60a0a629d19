//! `info` command - inspect feeds and the derived rate/window without
//! writing any output.

use anyhow::Result;
use serde::Serialize;
use tracing::warn;

use contracts::{AlignmentWindow, FeedId, SyncError, TimestampIndex};
use feed_loader::FeedLoader;
use sync_engine::{output_fps, output_interval, resolve_window};

use crate::cli::InfoArgs;

/// Per-feed summary for the info report
#[derive(Debug, Serialize)]
struct FeedInfo {
    feed_id: FeedId,
    entries: usize,
    start_time: f64,
    end_time: f64,
    min_gap: f64,
    native_fps: f64,
    width: u32,
    height: u32,
    channels: u8,
}

impl From<&TimestampIndex> for FeedInfo {
    fn from(index: &TimestampIndex) -> Self {
        Self {
            feed_id: index.feed_id().clone(),
            entries: index.entries().len(),
            start_time: index.start_time(),
            end_time: index.end_time(),
            min_gap: index.min_gap(),
            native_fps: 1.0 / index.min_gap(),
            width: index.width(),
            height: index.height(),
            channels: index.channels(),
        }
    }
}

/// Full info report
#[derive(Debug, Serialize)]
struct InfoReport {
    feeds: Vec<FeedInfo>,
    dropped_feeds: Vec<String>,
    tick_interval: f64,
    output_fps: f64,
    window: Option<AlignmentWindow>,
    tick_count: Option<u64>,
    overlap_error: Option<String>,
}

/// Load the feeds and print the derived synchronization parameters
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let mut indexes = Vec::new();
    let mut dropped_feeds = Vec::new();

    for dir in &args.feeds {
        match FeedLoader::load(dir) {
            Ok(feed) => indexes.push(feed.index),
            Err(e) => {
                warn!(feed = %dir.display(), error = %e, "feed unusable");
                dropped_feeds.push(dir.display().to_string());
            }
        }
    }

    let interval = output_interval(&indexes).ok_or(SyncError::NoFeedsProvided)?;
    let fps = output_fps(interval);

    // The window may legitimately be empty under INTERSECTION; info
    // reports that instead of failing.
    let (window, overlap_error) = match resolve_window(args.policy.into(), &indexes, interval) {
        Ok(window) => (Some(window), None),
        Err(e) => (None, Some(e.to_string())),
    };

    let report = InfoReport {
        feeds: indexes.iter().map(FeedInfo::from).collect(),
        dropped_feeds,
        tick_interval: interval,
        output_fps: fps,
        tick_count: window.as_ref().map(|w| w.tick_count()),
        window,
        overlap_error,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &InfoReport) {
    println!("Feeds:");
    for feed in &report.feeds {
        println!(
            "  {}: {} entries, [{:.3}, {:.3}], min gap {:.4}s (~{:.2} fps), {}x{}x{}",
            feed.feed_id,
            feed.entries,
            feed.start_time,
            feed.end_time,
            feed.min_gap,
            feed.native_fps,
            feed.width,
            feed.height,
            feed.channels
        );
    }
    for dropped in &report.dropped_feeds {
        println!("  {dropped}: unusable, excluded");
    }

    println!(
        "Output: interval {:.4}s, {:.3} fps",
        report.tick_interval, report.output_fps
    );
    match (&report.window, &report.overlap_error) {
        (Some(window), _) => println!(
            "Window: [{:.3}, {:.3}), {} tick(s)",
            window.start,
            window.end,
            report.tick_count.unwrap_or(0)
        ),
        (None, Some(error)) => println!("Window: {error}"),
        (None, None) => {}
    }
}
