//! Pipeline orchestration: feed loading, rate/window derivation, per-feed
//! resampling tasks, and run statistics.

mod orchestrator;
mod stats;

pub use orchestrator::{Pipeline, PipelineConfig};
pub use stats::RunStats;
