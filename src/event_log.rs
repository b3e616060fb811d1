//! On-screen history of dialog and lifecycle events

use crate::constants::MAX_EVENT_LOG_ENTRIES;
use chrono::{DateTime, Local};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dialog,
    Lifecycle,
    Navigation,
    Settings,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub kind: EntryKind,
    pub message: String,
}

/// Bounded, newest-last list of entries
#[derive(Debug, Default)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: EntryKind, message: impl Into<String>) {
        if self.entries.len() >= MAX_EVENT_LOG_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            timestamp: Local::now(),
            kind,
            message: message.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// The most recent `count` entries, oldest first
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &LogEntry> {
        let skip = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(skip)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
