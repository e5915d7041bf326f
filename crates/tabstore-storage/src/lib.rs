//! Tabstore Storage
//!
//! Read and write the active tab's client-side storage:
//! - Local storage and session storage, through scripts run in the page
//! - Cookies, through the browser's cookie jar scoped to the tab URL
//!
//! Every operation resolves the active tab afresh and consults the access
//! guard first. Restricted pages read as empty and ignore writes.

mod error;
mod gate;
mod kind;
mod mutation;
mod reader;
mod snapshot;
mod writer;

pub use error::StorageError;
pub use kind::{Entry, StorageKind};
pub use mutation::Mutation;
pub use reader::StorageReader;
pub use snapshot::{Snapshot, TabStorage};
pub use writer::{StorageWriter, WriteOutcome};

pub type Result<T> = std::result::Result<T, StorageError>;
