//! # Sync Engine
//!
//! Multi-feed resampling core.
//!
//! Responsibilities:
//! - Derive the global output tick interval from per-feed minimum gaps
//! - Resolve the alignment window under UNION or INTERSECTION policy
//! - Resample each feed onto the common tick grid via nearest-timestamp
//!   selection, padding out-of-range ticks with blank frames
//!
//! ## Usage
//!
//! ```ignore
//! use sync_engine::{output_interval, resolve_window, FrameResampler};
//!
//! let interval = output_interval(&indexes).unwrap();
//! let window = resolve_window(policy, &indexes, interval)?;
//! let resampler = FrameResampler::new(window);
//!
//! for index in &indexes {
//!     let report = resampler.resample(index, &source, &mut sink).await?;
//! }
//! ```

mod rate;
mod resampler;
mod window;

pub use rate::{output_fps, output_interval};
pub use resampler::{select_frame, FeedReport, FrameResampler, Selection};
pub use window::resolve_window;

// Re-export contracts types
pub use contracts::{AlignmentPolicy, AlignmentWindow, OutputTick, SyncError, TimestampIndex};
