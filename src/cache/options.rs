#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_EXPIRE_THRESHOLD: u32 = 3;

/// Configuration for [`CachedDeliver`](super::CachedDeliver).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// Number of uses after which an entry is dropped. `None` keeps entries
    /// until they are cleared explicitly.
    pub expire_threshold: Option<u32>,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            expire_threshold: Some(DEFAULT_EXPIRE_THRESHOLD),
        }
    }
}

impl CacheOptions {
    pub fn never_expire() -> Self {
        Self {
            expire_threshold: None,
        }
    }

    pub(crate) fn is_expired(&self, hit_count: u32) -> bool {
        self.expire_threshold
            .is_some_and(|threshold| hit_count >= threshold)
    }
}
