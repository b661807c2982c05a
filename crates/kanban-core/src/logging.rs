use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named state transition, e.g. `kanban/moveTask`, and the version it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub version: u64,
    pub action: String,
}

impl LogEntry {
    pub fn new(version: u64, action: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            version,
            action: action.into(),
        }
    }
}

pub trait Loggable {
    fn record(&mut self, version: u64, action: &str);
    fn entries(&self) -> &[LogEntry];

    /// Entries produced after `version`, oldest first.
    fn since(&self, version: u64) -> &[LogEntry] {
        let entries = self.entries();
        let start = entries.partition_point(|entry| entry.version <= version);
        &entries[start..]
    }
}
