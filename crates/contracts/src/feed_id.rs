//! Feed identifier.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// Identifies one feed for the duration of a run.
///
/// Derived from the feed's directory name at load time. Backed by
/// `Arc<str>` because the id is cloned into every per-feed task, report,
/// and error after construction, and never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct FeedId(Arc<str>);

impl FeedId {
    /// The feed's name as recorded on disk
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FeedId {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for FeedId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl PartialEq<str> for FeedId {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for FeedId {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeedId({:?})", self.0)
    }
}

// Serialized as a bare string; ids appear in reports and `info --json`
// output but are never deserialized back.
impl Serialize for FeedId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}
