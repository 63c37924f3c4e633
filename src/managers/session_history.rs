//! Session history for a single page.
//!
//! Implements `SessionHistoryTrait` (traversal) and [`HistoryApi`] (state
//! mutation) over an in-memory list of entries with a current index.

use serde_json::Value;
use uuid::Uuid;

use crate::platform::HistoryApi;
use crate::types::errors::HistoryError;
use crate::types::history::HistoryEntry;

/// Trait defining session history traversal.
pub trait SessionHistoryTrait {
    fn go(&mut self, delta: i64) -> Option<&HistoryEntry>;
    fn back(&mut self) -> Option<&HistoryEntry>;
    fn forward(&mut self) -> Option<&HistoryEntry>;
    fn current(&self) -> &HistoryEntry;
    fn current_index(&self) -> usize;
    fn len(&self) -> usize;
    fn entries(&self) -> &[HistoryEntry];
}

/// In-memory session history. Always holds at least the initial entry.
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl SessionHistory {
    /// Creates a history whose only entry is `initial_url` with no state.
    pub fn new(initial_url: &str) -> Self {
        Self {
            entries: vec![Self::entry(initial_url, "", Value::Null)],
            index: 0,
        }
    }

    fn entry(url: &str, title: &str, state: Value) -> HistoryEntry {
        HistoryEntry {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            title: title.to_string(),
            state,
        }
    }
}

impl SessionHistoryTrait for SessionHistory {
    /// Moves `delta` entries through the history. Returns the new current
    /// entry, or `None` without moving when `delta` is zero or out of range.
    fn go(&mut self, delta: i64) -> Option<&HistoryEntry> {
        if delta == 0 {
            return None;
        }
        let target = self.index as i64 + delta;
        if target < 0 || target >= self.entries.len() as i64 {
            return None;
        }
        self.index = target as usize;
        self.entries.get(self.index)
    }

    fn back(&mut self) -> Option<&HistoryEntry> {
        self.go(-1)
    }

    fn forward(&mut self) -> Option<&HistoryEntry> {
        self.go(1)
    }

    fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    fn current_index(&self) -> usize {
        self.index
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

impl HistoryApi for SessionHistory {
    fn state(&self) -> Value {
        self.current().state.clone()
    }

    fn title(&self) -> String {
        self.current().title.clone()
    }

    /// Drops every entry after the current one, then appends the new entry.
    /// Without a URL the new entry keeps the current URL.
    fn push_state(
        &mut self,
        state: Value,
        title: &str,
        url: Option<&str>,
    ) -> Result<(), HistoryError> {
        let url = url.unwrap_or(&self.entries[self.index].url).to_string();
        self.entries.truncate(self.index + 1);
        self.entries.push(Self::entry(&url, title, state));
        self.index = self.entries.len() - 1;
        Ok(())
    }

    /// Overwrites the current entry in place, keeping its id.
    fn replace_state(
        &mut self,
        state: Value,
        title: &str,
        url: Option<&str>,
    ) -> Result<(), HistoryError> {
        let current = &mut self.entries[self.index];
        current.state = state;
        current.title = title.to_string();
        if let Some(url) = url {
            current.url = url.to_string();
        }
        Ok(())
    }
}
