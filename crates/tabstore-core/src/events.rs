//! Popup event wiring
//!
//! Maps user interactions on the popup surface to popup operations:
//! selector clicks, cell commits, delete clicks and the add form.

use serde::{Deserialize, Serialize};
use tabstore_storage::StorageKind;

use crate::popup::{Popup, RenderOutcome};
use crate::view::{PopupView, Row, TableView};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PopupEvent {
    /// Surface shown; render the initial kind
    Opened,
    /// Selector button clicked
    SelectKind { kind: StorageKind },
    /// Key cell edited in place
    KeyEdited { row: Row, new_key: String },
    /// Value cell edited in place
    ValueEdited { row: Row, new_value: String },
    DeleteClicked { row: Row },
    AddSubmitted { key: String, value: String },
    Refresh,
}

impl<V: PopupView> Popup<V> {
    pub async fn dispatch(&self, event: PopupEvent) -> RenderOutcome {
        tracing::trace!(popup_id = %self.id(), ?event, "Dispatching popup event");

        match event {
            PopupEvent::Opened => self.show_kind(self.initial_kind()).await,
            PopupEvent::SelectKind { kind } => self.show_kind(kind).await,
            PopupEvent::KeyEdited { row, new_key } => match row.commit_key(&new_key) {
                Some(mutation) => self.commit(row.kind, mutation).await,
                None => {
                    tracing::debug!(popup_id = %self.id(), key = %row.key, "Rejected blank key edit");
                    RenderOutcome::Rejected
                }
            },
            PopupEvent::ValueEdited { row, new_value } => {
                self.commit(row.kind, row.commit_value(&new_value)).await
            }
            PopupEvent::DeleteClicked { row } => self.commit(row.kind, row.delete()).await,
            PopupEvent::AddSubmitted { key, value } => self.add_entry(&key, &value).await,
            PopupEvent::Refresh => self.refresh().await,
        }
    }
}

impl TableView {
    /// Event for submitting the add form as currently filled in
    pub fn submit_add_form(&self) -> PopupEvent {
        let form = self.add_form();
        PopupEvent::AddSubmitted {
            key: form.key.clone(),
            value: form.value.clone(),
        }
    }
}
