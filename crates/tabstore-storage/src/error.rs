//! Storage error types

use tabstore_host::{HostError, TabId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("Page script returned no frame result in tab {0}")]
    NoFrameResult(TabId),

    #[error("Malformed page result: {0}")]
    MalformedResult(#[from] serde_json::Error),
}
