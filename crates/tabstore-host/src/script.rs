//! Scripts run inside a tab's page context
//!
//! The host injects these into the page. Each variant is one fixed operation
//! against `localStorage` or `sessionStorage`.

use serde::{Deserialize, Serialize};

/// Page-scoped key/value store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageArea {
    Local,
    Session,
}

impl StorageArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageArea::Local => "local",
            StorageArea::Session => "session",
        }
    }
}

impl std::fmt::Display for StorageArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PageScript {
    /// Shallow copy of both stores: `{"local": {..}, "session": {..}}`
    ReadStorage,
    /// `setItem(key, value)` on the given area
    SetItem {
        area: StorageArea,
        key: String,
        value: String,
    },
    /// `removeItem(key)` on the given area
    RemoveItem { area: StorageArea, key: String },
}

impl PageScript {
    /// Whether the script mutates the page
    pub fn is_write(&self) -> bool {
        !matches!(self, PageScript::ReadStorage)
    }
}

/// Result of a script in one frame of the tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    pub frame_id: u32,
    pub result: serde_json::Value,
}

impl FrameResult {
    pub fn main_frame(result: serde_json::Value) -> Self {
        Self {
            frame_id: 0,
            result,
        }
    }
}
