//! Bounded trailing command log.

use std::collections::VecDeque;

use gridbot_core::{LogKind, LogLine};

/// One retained log entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Monotonic sequence number, unique within a session.
    pub id: u64,
    /// Line tag.
    pub kind: LogKind,
    /// Line text.
    pub text: String,
}

/// A fixed-capacity window over the most recent log lines.
///
/// Ids keep counting across [`clear()`](CommandLog::clear), so a front end
/// can key rendered rows by id without collisions after a reset.
///
/// # Examples
///
/// ```
/// use gridbot_core::{LogKind, LogLine};
/// use gridbot_engine::CommandLog;
///
/// let mut log = CommandLog::new(2);
/// let line = |t: &str| LogLine { kind: LogKind::Output, text: t.into() };
/// assert_eq!(log.append([line("a"), line("b"), line("c")]), 1);
/// let ids: Vec<_> = log.entries().map(|e| e.id).collect();
/// assert_eq!(ids, [2, 3]);
/// ```
#[derive(Clone, Debug)]
pub struct CommandLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_id: u64,
}

impl CommandLog {
    /// Create an empty log. `capacity` is raised to at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    /// Append lines in order, evicting from the front as needed.
    ///
    /// Returns the number of evicted entries.
    pub fn append(&mut self, lines: impl IntoIterator<Item = LogLine>) -> usize {
        let mut evicted = 0;
        for line in lines {
            if self.entries.len() == self.capacity {
                self.entries.pop_front();
                evicted += 1;
            }
            self.entries.push_back(LogEntry {
                id: self.next_id,
                kind: line.kind,
                text: line.text,
            });
            self.next_id += 1;
        }
        evicted
    }

    /// Retained entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.entries.iter()
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry. The id counter is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
