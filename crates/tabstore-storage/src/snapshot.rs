//! Point-in-time storage snapshots

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::kind::{Entry, StorageKind};

/// The tab's storage as it was at one instant.
///
/// Immutable. Discard it after any mutation and read again; nothing patches
/// a snapshot in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    local: IndexMap<String, String>,
    session: IndexMap<String, String>,
    cookies: Vec<Entry>,
    taken_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(
        local: IndexMap<String, String>,
        session: IndexMap<String, String>,
        cookies: Vec<Entry>,
    ) -> Self {
        Self {
            local,
            session,
            cookies,
            taken_at: Utc::now(),
        }
    }

    /// What a restricted tab reads as
    pub fn empty() -> Self {
        Self::new(IndexMap::new(), IndexMap::new(), Vec::new())
    }

    pub fn local(&self) -> &IndexMap<String, String> {
        &self.local
    }

    pub fn session(&self) -> &IndexMap<String, String> {
        &self.session
    }

    pub fn cookies(&self) -> &[Entry] {
        &self.cookies
    }

    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    /// Rows for `kind` in enumeration order
    pub fn entries(&self, kind: StorageKind) -> Vec<Entry> {
        match kind {
            StorageKind::Local => map_entries(&self.local),
            StorageKind::Session => map_entries(&self.session),
            StorageKind::Cookies => self.cookies.clone(),
        }
    }

    /// Value stored under `key`. For cookies the first match wins.
    pub fn get(&self, kind: StorageKind, key: &str) -> Option<&str> {
        match kind {
            StorageKind::Local => self.local.get(key).map(String::as_str),
            StorageKind::Session => self.session.get(key).map(String::as_str),
            StorageKind::Cookies => self
                .cookies
                .iter()
                .find(|c| c.key == key)
                .map(|c| c.value.as_str()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.session.is_empty() && self.cookies.is_empty()
    }
}

fn map_entries(map: &IndexMap<String, String>) -> Vec<Entry> {
    map.iter().map(|(k, v)| Entry::new(k.clone(), v.clone())).collect()
}

/// Result of reading a tab.
///
/// Keeps "the page cannot be inspected" apart from "the page has nothing
/// stored"; transport failures travel separately as errors.
#[derive(Debug, Clone, PartialEq)]
pub enum TabStorage {
    Restricted,
    Available(Snapshot),
}

impl TabStorage {
    pub fn is_restricted(&self) -> bool {
        matches!(self, TabStorage::Restricted)
    }

    pub fn into_snapshot(self) -> Snapshot {
        match self {
            TabStorage::Restricted => Snapshot::empty(),
            TabStorage::Available(snapshot) => snapshot,
        }
    }
}
