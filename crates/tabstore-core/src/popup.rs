//! Popup session
//!
//! One [`Popup`] lives for as long as the popup surface is open and is built
//! afresh every time it opens, so the selected kind always starts from the
//! configured initial kind.
//!
//! Every render reads the tab again. Nothing is cached between renders, and a
//! mutation is always followed by a redraw of the kind it touched.

use parking_lot::{Mutex, RwLock};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use tabstore_host::BrowserHost;
use tabstore_storage::{Mutation, StorageKind, StorageReader, StorageWriter, TabStorage};

use crate::config::Config;
use crate::view::{PopupView, Row, TableStatus};
use crate::Result;

/// What a user action ended up doing to the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered { kind: StorageKind, rows: usize },
    /// Page cannot be inspected; the table was emptied
    Restricted,
    /// A newer render started while this one was reading; its result was dropped
    Superseded,
    /// Read or write failed; the table keeps its last rendered rows
    Failed(String),
    /// Input was blank; nothing was written or redrawn
    Rejected,
}

pub struct Popup<V: PopupView> {
    id: Uuid,
    reader: StorageReader,
    writer: StorageWriter,
    view: Mutex<V>,
    initial_kind: StorageKind,
    current_kind: RwLock<StorageKind>,
    generation: AtomicU64,
    discard_stale_renders: bool,
}

impl<V: PopupView> Popup<V> {
    /// Build a popup session without rendering anything
    pub fn new(host: Arc<dyn BrowserHost>, view: V, config: &Config) -> Self {
        let policy = Arc::new(config.restriction_policy());

        Self {
            id: Uuid::new_v4(),
            reader: StorageReader::new(Arc::clone(&host), Arc::clone(&policy)),
            writer: StorageWriter::new(host, policy),
            view: Mutex::new(view),
            initial_kind: config.initial_kind,
            current_kind: RwLock::new(config.initial_kind),
            generation: AtomicU64::new(0),
            discard_stale_renders: config.discard_stale_renders,
        }
    }

    /// Build a popup session and render the initial kind
    pub async fn open(host: Arc<dyn BrowserHost>, view: V, config: &Config) -> Self {
        let popup = Self::new(host, view, config);
        tracing::info!(popup_id = %popup.id, kind = %popup.initial_kind, "Popup opened");
        popup.show_kind(popup.initial_kind).await;
        popup
    }

    /// Load the config at `config_path` and open a popup with it.
    /// A missing file opens with the defaults.
    pub async fn launch<P: AsRef<Path>>(
        host: Arc<dyn BrowserHost>,
        view: V,
        config_path: P,
    ) -> Result<Self> {
        let config = Config::load(config_path)?;
        Ok(Self::open(host, view, &config).await)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current_kind(&self) -> StorageKind {
        *self.current_kind.read()
    }

    pub fn initial_kind(&self) -> StorageKind {
        self.initial_kind
    }

    pub fn with_view<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&V) -> T,
    {
        let view = self.view.lock();
        f(&*view)
    }

    pub fn with_view_mut<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut V) -> T,
    {
        let mut view = self.view.lock();
        f(&mut *view)
    }

    /// Select `kind`, read the tab and redraw the table
    pub async fn show_kind(&self, kind: StorageKind) -> RenderOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.current_kind.write() = kind;
        self.view.lock().highlight(kind);

        let result = self.reader.read().await;

        if self.discard_stale_renders && self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(popup_id = %self.id, kind = %kind, generation, "Dropped stale render");
            return RenderOutcome::Superseded;
        }

        let mut view = self.view.lock();
        match result {
            Ok(TabStorage::Restricted) => {
                view.clear_rows();
                view.set_status(TableStatus::Restricted);
                RenderOutcome::Restricted
            }
            Ok(TabStorage::Available(snapshot)) => {
                let entries = snapshot.entries(kind);
                let rows = entries.len();

                view.clear_rows();
                for entry in entries {
                    view.append_row(Row::new(kind, entry));
                }
                view.set_status(if rows == 0 {
                    TableStatus::Empty
                } else {
                    TableStatus::Rows(rows)
                });

                tracing::debug!(popup_id = %self.id, kind = %kind, rows, "Rendered table");
                RenderOutcome::Rendered { kind, rows }
            }
            Err(e) => {
                tracing::warn!(popup_id = %self.id, kind = %kind, error = %e, "Failed to read storage");
                view.set_status(TableStatus::Error(e.to_string()));
                RenderOutcome::Failed(e.to_string())
            }
        }
    }

    /// Redraw whatever kind is selected
    pub async fn refresh(&self) -> RenderOutcome {
        self.show_kind(self.current_kind()).await
    }

    /// Apply `mutation` to `kind`, then redraw `kind`
    pub async fn commit(&self, kind: StorageKind, mutation: Mutation) -> RenderOutcome {
        let op = mutation.as_str();

        match self.writer.apply(kind, mutation).await {
            Ok(outcome) => {
                tracing::debug!(popup_id = %self.id, kind = %kind, op, ?outcome, "Committed edit");
                self.show_kind(kind).await
            }
            Err(e) => {
                tracing::warn!(popup_id = %self.id, kind = %kind, op, error = %e, "Failed to write storage");
                self.view.lock().set_status(TableStatus::Error(e.to_string()));
                RenderOutcome::Failed(e.to_string())
            }
        }
    }

    /// Add an entry from the add form to the selected kind.
    ///
    /// Both fields are trimmed. A blank key is rejected without touching the
    /// tab or the form.
    pub async fn add_entry(&self, key: &str, value: &str) -> RenderOutcome {
        let key = key.trim();
        let value = value.trim();

        if key.is_empty() {
            tracing::debug!(popup_id = %self.id, "Rejected add with blank key");
            return RenderOutcome::Rejected;
        }

        let kind = self.current_kind();
        let mutation = Mutation::Add {
            key: key.to_string(),
            value: value.to_string(),
        };

        match self.writer.apply(kind, mutation).await {
            Ok(_) => {
                self.view.lock().clear_add_form();
                self.show_kind(kind).await
            }
            Err(e) => {
                tracing::warn!(popup_id = %self.id, kind = %kind, error = %e, "Failed to add entry");
                self.view.lock().set_status(TableStatus::Error(e.to_string()));
                RenderOutcome::Failed(e.to_string())
            }
        }
    }
}
