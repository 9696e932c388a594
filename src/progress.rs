//! Visited-page progress.
//!
//! Persisted as a JSON object mapping page id to `true`, e.g.
//! `{"home":true,"links":true}`.

use crate::{
    log,
    quiz::percent,
    storage::{KeyValueStore, StorageResult},
};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
pub struct ProgressTracker {
    key: String,
    pages: BTreeSet<String>,
    visited: BTreeSet<String>,
}

impl ProgressTracker {
    /// Create a tracker over the known page set, persisted under `key`.
    pub fn new<I, S>(key: impl Into<String>, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            pages: pages.into_iter().map(Into::into).collect(),
            visited: BTreeSet::new(),
        }
    }

    /// Replace the in-memory state with what the store holds.
    ///
    /// Absent or unparsable data reads as nothing visited.
    pub fn load(&mut self, store: &dyn KeyValueStore) -> StorageResult<u32> {
        self.visited = match store.get(&self.key)? {
            Some(raw) => match serde_json::from_str::<BTreeMap<String, bool>>(&raw) {
                Ok(map) => map
                    .into_iter()
                    .filter_map(|(page, seen)| seen.then_some(page))
                    .collect(),
                Err(err) => {
                    log!("warn"; "ignoring malformed progress: {}", err);
                    BTreeSet::new()
                }
            },
            None => BTreeSet::new(),
        };
        Ok(self.percentage())
    }

    /// Mark `page` visited and persist the whole map.
    ///
    /// The in-memory set only changes once the store accepted the write.
    pub fn mark_visited(&mut self, store: &mut dyn KeyValueStore, page: &str) -> StorageResult<u32> {
        let mut map: BTreeMap<&str, bool> =
            self.visited.iter().map(|p| (p.as_str(), true)).collect();
        map.insert(page, true);
        store.set(&self.key, &serde_json::to_string(&map)?)?;
        self.visited.insert(page.to_owned());
        Ok(self.percentage())
    }

    pub fn is_visited(&self, page: &str) -> bool {
        self.visited.contains(page)
    }

    pub const fn visited(&self) -> &BTreeSet<String> {
        &self.visited
    }

    /// Number of known pages that have been visited.
    pub fn visited_known(&self) -> usize {
        self.visited.intersection(&self.pages).count()
    }

    pub fn total(&self) -> usize {
        self.pages.len()
    }

    /// `round(100 * visited / total)` over the known page set.
    pub fn percentage(&self) -> u32 {
        percent(self.visited_known(), self.total())
    }
}
