//! Host error types

use thiserror::Error;

use crate::tab::TabId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Tab query failed: {0}")]
    TabQuery(String),

    #[error("Script execution failed in tab {tab}: {reason}")]
    ScriptExecution { tab: TabId, reason: String },

    #[error("Cookie store error: {reason}")]
    Cookie { reason: String },

    #[error("Tab closed: {0}")]
    TabClosed(TabId),

    #[error("Permission denied for {0}")]
    PermissionDenied(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
