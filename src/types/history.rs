use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single entry in a page's session history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: String,
    pub url: String,
    pub title: String,
    /// Opaque state associated with the entry by the page.
    pub state: Value,
}
