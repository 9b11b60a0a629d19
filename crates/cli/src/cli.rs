//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use contracts::AlignmentPolicy;
use std::path::PathBuf;
use writer::WriterKind;

/// Feed Syncer - resample recorded video feeds onto a common time base
#[derive(Parser, Debug)]
#[command(
    name = "feed-syncer",
    author,
    version,
    about = "Multi-feed video synchronization pipeline",
    long_about = "Resamples independently recorded video-frame feeds, each with \n\
                  irregular per-frame timestamps, onto one uniform output time \n\
                  base so the feeds play back in temporal alignment.\n\n\
                  Each feed directory holds a time_mapping.json plus a frames/ \n\
                  directory of images named by frame id."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "FEED_SYNCER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "FEED_SYNCER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resample the feeds and write the aligned output videos
    Run(RunArgs),

    /// Inspect feeds and the derived rate/window without writing output
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Feed directories, comma-separated
    #[arg(
        short,
        long,
        value_delimiter = ',',
        required = true,
        env = "FEED_SYNCER_FEEDS"
    )]
    pub feeds: Vec<PathBuf>,

    /// Output directory (default: timestamped name in the working directory)
    #[arg(short, long, env = "FEED_SYNCER_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Alignment policy for the output window
    #[arg(long, value_enum, default_value = "intersection", env = "FEED_SYNCER_POLICY")]
    pub policy: PolicyArg,

    /// Output artifact per feed
    #[arg(long, value_enum, default_value = "video", env = "FEED_SYNCER_WRITER")]
    pub writer: WriterArg,

    /// Path to the ffmpeg binary (default: discovered on PATH)
    #[arg(long, env = "FEED_SYNCER_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Feed directories, comma-separated
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub feeds: Vec<PathBuf>,

    /// Alignment policy to resolve the window for
    #[arg(long, value_enum, default_value = "intersection")]
    pub policy: PolicyArg,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Alignment policy selection
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum PolicyArg {
    /// Full span covered by any feed, gaps padded with blank frames
    Union,
    /// Only the span covered by all feeds
    #[default]
    Intersection,
}

impl From<PolicyArg> for AlignmentPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Union => AlignmentPolicy::Union,
            PolicyArg::Intersection => AlignmentPolicy::Intersection,
        }
    }
}

/// Output writer selection
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum WriterArg {
    /// One mp4 container per feed (requires ffmpeg)
    #[default]
    Video,
    /// One PNG per tick per feed
    Frames,
}

impl From<WriterArg> for WriterKind {
    fn from(arg: WriterArg) -> Self {
        match arg {
            WriterArg::Video => WriterKind::Video,
            WriterArg::Frames => WriterKind::Frames,
        }
    }
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
