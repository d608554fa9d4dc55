use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Connection settings for [`Directory::open`](super::Directory::open).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub busy_timeout_ms: u64,
    pub create_schema: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
            create_schema: true,
        }
    }
}

impl StoreOptions {
    /// Return the busy timeout as a [`Duration`]. Zero disables waiting on
    /// locks held by other connections.
    pub fn timeout(&self) -> Option<Duration> {
        if self.busy_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.busy_timeout_ms))
        }
    }
}
