use std::collections::VecDeque;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::Level;

/// A single log entry captured from tracing
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Thread-safe ring buffer of the most recent log entries
#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: Arc<RwLock<VecDeque<LogEntry>>>,
    max_entries: usize,
}

impl LogBuffer {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(max_entries))),
            max_entries,
        }
    }

    pub fn push(&self, entry: LogEntry) {
        if self.max_entries == 0 {
            return;
        }
        let mut entries = self.write();
        if entries.len() >= self.max_entries {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    pub fn get_entries(&self) -> Vec<LogEntry> {
        self.read().iter().cloned().collect()
    }

    /// Up to `height` entries ending `offset` entries before the newest
    pub fn window(&self, offset: usize, height: usize) -> Vec<LogEntry> {
        let entries = self.read();
        let end = entries.len().saturating_sub(offset);
        let start = end.saturating_sub(height);
        entries.range(start..end).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while logging must not take the logs screen down with it
    fn read(&self) -> RwLockReadGuard<'_, VecDeque<LogEntry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, VecDeque<LogEntry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}
