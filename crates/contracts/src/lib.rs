//! # Contracts
//!
//! Frozen interface contracts, defining inter-crate data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are
//! prohibited.
//!
//! ## Time Model
//! - Capture timestamps are wall-clock seconds (f64), the midpoint of the
//!   capture call's start/end times as persisted by the recorder
//! - `frame_id` addresses one persisted image per feed

mod error;
mod feed_id;
mod frame;
mod index;
mod sink;
mod window;

pub use error::*;
pub use feed_id::FeedId;
pub use frame::*;
pub use index::*;
pub use sink::{FrameSink, FrameSource, LocalFrameSink};
pub use window::*;
