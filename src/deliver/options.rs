use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Kickbox-compatible verification endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.kickbox.com/v2/verify";

/// Configuration knobs for [`ApiDeliver`](super::ApiDeliver).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDeliverOptions {
    pub endpoint: String,
    pub api_key: String,
    pub timeout_ms: u64,
}

impl Default for ApiDeliverOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            timeout_ms: 0,
        }
    }
}

impl ApiDeliverOptions {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Return the timeout as a [`Duration`]. A zero timeout leaves the
    /// request unbounded.
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.timeout_ms))
        }
    }
}
