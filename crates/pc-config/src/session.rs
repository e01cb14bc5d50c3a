//! Session watchdog and token storage settings.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_check_interval_ms() -> u64 {
    1_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// How often the watchdog re-validates the stored token.
    #[serde(default = "default_check_interval_ms")]
    pub check_interval_ms: u64,

    /// Directory backing the shared key-value storage. Empty means the
    /// platform data directory.
    #[serde(default)]
    pub storage_dir: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            check_interval_ms: default_check_interval_ms(),
            storage_dir: String::new(),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub const fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }

    /// Resolved storage directory, if one can be determined.
    #[must_use]
    pub fn storage_path(&self) -> Option<PathBuf> {
        if self.storage_dir.is_empty() {
            dirs::data_local_dir().map(|dir| dir.join("pointcheck").join("storage"))
        } else {
            Some(PathBuf::from(&self.storage_dir))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watchdog_ticks_every_second_by_default() {
        let config = SessionConfig::default();
        assert_eq!(config.check_interval(), Duration::from_secs(1));
        assert!(config.storage_dir.is_empty());
    }

    #[test]
    fn explicit_storage_dir_wins() {
        let config = SessionConfig {
            storage_dir: "/tmp/pc-store".into(),
            ..Default::default()
        };
        assert_eq!(config.storage_path(), Some(PathBuf::from("/tmp/pc-store")));
    }
}
