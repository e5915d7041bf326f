//! Active tab handle

use serde::{Deserialize, Serialize};

/// Opaque tab handle issued by the host browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u32);

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The tab the popup currently targets.
///
/// Never cached: it is looked up again for every read or write, since the
/// user may switch tabs while the popup stays open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTab {
    pub id: TabId,
    /// Absent for privileged tabs the extension cannot see into
    pub url: Option<String>,
}

impl ActiveTab {
    pub fn new(id: TabId, url: Option<String>) -> Self {
        Self { id, url }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}
