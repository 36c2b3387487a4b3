use std::collections::VecDeque;
use std::sync::Mutex;

/// Default number of terms kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Bounded, deduplicated, most-recent-first list of search terms.
#[derive(Debug)]
pub struct SearchHistoryLog {
    capacity: usize,
    terms: Mutex<VecDeque<String>>,
}

impl Default for SearchHistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl SearchHistoryLog {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            terms: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a term. Blank terms are ignored; a repeated term moves to the front.
    ///
    /// Returns whether the log changed.
    pub fn record(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }

        let mut terms = self.terms.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if terms.front().is_some_and(|newest| newest == term) {
            return false;
        }

        terms.retain(|existing| existing != term);
        terms.push_front(term.to_string());
        terms.truncate(self.capacity);
        true
    }

    /// Snapshot, most recent first.
    pub fn list(&self) -> Vec<String> {
        self.terms
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }
}
