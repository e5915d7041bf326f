//! Tabstore Core
//!
//! The popup surface over the active tab's storage: a selector for
//! local / session / cookies, an editable key/value table and an add-entry
//! form. Each user action writes through to the tab and redraws the table
//! from a fresh read.
//!
//! An embedder calls [`init_logging`] once at startup, then
//! [`Popup::launch`] with its [`BrowserHost`], its [`PopupView`] and the path
//! of the JSON config each time the popup surface opens. UI events go
//! through [`Popup::dispatch`].

mod config;
mod error;
mod events;
mod popup;
mod view;

pub use config::Config;
pub use error::CoreError;
pub use events::PopupEvent;
pub use popup::{Popup, RenderOutcome};
pub use view::{AddForm, PopupView, Row, SelectorButton, TableStatus, TableView};

// Re-export the layers the popup is built on
pub use tabstore_guard::{is_restricted, RestrictionPolicy};
pub use tabstore_host::{ActiveTab, BrowserHost, HostError, InMemoryBrowser, TabId};
pub use tabstore_storage::{
    Entry, Mutation, Snapshot, StorageError, StorageKind, StorageReader, StorageWriter, TabStorage,
    WriteOutcome,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging. `RUST_LOG` overrides the default `info` filter.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
