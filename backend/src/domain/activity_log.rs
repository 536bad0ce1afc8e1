use log::debug;
use shared::LogEntry;
use std::sync::Arc;

use super::clock::Clock;
use super::error::ServiceResult;
use crate::storage::{FlockStore, Logs};

/// Appends entries to the activity log and orders them for display
#[derive(Clone)]
pub struct ActivityLog {
    clock: Arc<dyn Clock>,
}

impl ActivityLog {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Append a new entry stamped with the current time
    pub fn record(&self, store: &mut FlockStore, description: impl Into<String>) -> ServiceResult<LogEntry> {
        let entry = LogEntry::new(self.clock.now(), description);
        debug!("Activity: {}", entry.description);

        let appended = entry.clone();
        store.mutate::<Logs, _, _>(move |logs| logs.push(appended))?;
        Ok(entry)
    }

    /// Entries newest first; entries with the same date keep their recorded order
    pub fn display_order(logs: &[LogEntry]) -> Vec<&LogEntry> {
        let mut ordered: Vec<&LogEntry> = logs.iter().collect();
        ordered.sort_by(|a, b| b.date.cmp(&a.date));
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::storage::InMemoryKeyValueStore;
    use chrono::{TimeZone, Utc};

    fn jan(day: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_display_order_is_newest_first() {
        let logs = vec![
            LogEntry::new(jan(3), "third"),
            LogEntry::new(jan(1), "first"),
            LogEntry::new(jan(2), "second"),
        ];

        let ordered: Vec<&str> = ActivityLog::display_order(&logs)
            .iter()
            .map(|e| e.description.as_str())
            .collect();

        assert_eq!(ordered, vec!["third", "second", "first"]);
        // storage order is untouched
        assert_eq!(logs[0].description, "third");
        assert_eq!(logs[1].description, "first");
    }

    #[test]
    fn test_display_order_keeps_ties_stable() {
        let logs = vec![
            LogEntry::new(jan(1), "a"),
            LogEntry::new(jan(1), "b"),
            LogEntry::new(jan(2), "c"),
        ];

        let ordered: Vec<&str> = ActivityLog::display_order(&logs)
            .iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(ordered, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_record_appends_with_clock_time() {
        let clock = Arc::new(FixedClock::new(jan(5)));
        let log = ActivityLog::new(clock);
        let mut store = FlockStore::initialize(Box::new(InMemoryKeyValueStore::new()));

        log.record(&mut store, "one").unwrap();
        log.record(&mut store, "two").unwrap();

        let logs = &store.state().logs;
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].description, "one");
        assert_eq!(logs[1].description, "two");
        assert_eq!(logs[1].date, jan(5));
    }
}
