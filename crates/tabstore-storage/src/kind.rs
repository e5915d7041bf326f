//! Storage kinds and entries

use serde::{Deserialize, Serialize};
use tabstore_host::{Cookie, StorageArea};

/// Which backing store an operation targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Local,
    Session,
    Cookies,
}

impl StorageKind {
    /// Selector order
    pub const ALL: [StorageKind; 3] = [StorageKind::Local, StorageKind::Session, StorageKind::Cookies];

    /// The page store behind this kind; cookies live in the browser's jar
    pub fn area(&self) -> Option<StorageArea> {
        match self {
            StorageKind::Local => Some(StorageArea::Local),
            StorageKind::Session => Some(StorageArea::Session),
            StorageKind::Cookies => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StorageKind::Local => "Local",
            StorageKind::Session => "Session",
            StorageKind::Cookies => "Cookies",
        }
    }

    /// Element id of the selector button
    pub fn button_id(&self) -> &'static str {
        match self {
            StorageKind::Local => "btn-local",
            StorageKind::Session => "btn-session",
            StorageKind::Cookies => "btn-cookies",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Local => "local",
            StorageKind::Session => "session",
            StorageKind::Cookies => "cookies",
        }
    }
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(StorageKind::Local),
            "session" => Ok(StorageKind::Session),
            "cookies" => Ok(StorageKind::Cookies),
            _ => Err(format!("Unknown storage kind: {}", s)),
        }
    }
}

/// A key/value pair as shown in the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<Cookie> for Entry {
    fn from(cookie: Cookie) -> Self {
        Self {
            key: cookie.name,
            value: cookie.value,
        }
    }
}
