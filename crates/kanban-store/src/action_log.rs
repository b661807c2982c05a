use kanban_core::{LogEntry, Loggable};

pub const MAX_LOG_ENTRIES: usize = 100;

/// Most recent named actions, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    entries: Vec<LogEntry>,
}

impl Loggable for ActionLog {
    fn record(&mut self, version: u64, action: &str) {
        self.entries.push(LogEntry::new(version, action));
        if self.entries.len() > MAX_LOG_ENTRIES {
            let excess = self.entries.len() - MAX_LOG_ENTRIES;
            self.entries.drain(..excess);
        }
    }

    fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_most_recent_entries() {
        let mut log = ActionLog::default();
        for i in 0..(MAX_LOG_ENTRIES + 5) {
            log.record(i as u64 + 1, &format!("action {}", i));
        }

        let entries = log.entries();
        assert_eq!(entries.len(), MAX_LOG_ENTRIES);
        assert_eq!(entries[0].action, "action 5");
        assert_eq!(
            entries[MAX_LOG_ENTRIES - 1].action,
            format!("action {}", MAX_LOG_ENTRIES + 4)
        );
    }

    #[test]
    fn test_since_skips_seen_versions() {
        let mut log = ActionLog::default();
        log.record(1, "kanban/addBoard");
        log.record(2, "kanban/addColumn");
        log.record(3, "ui/toggleTheme");

        let recent: Vec<_> = log.since(1).iter().map(|e| e.action.as_str()).collect();
        assert_eq!(recent, vec!["kanban/addColumn", "ui/toggleTheme"]);
        assert!(log.since(3).is_empty());
    }
}
