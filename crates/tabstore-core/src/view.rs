//! Popup view surface
//!
//! Three selector buttons, a table of key/value rows with edit and delete
//! affordances, and an add-entry form. [`PopupView`] is what the renderer
//! draws into; [`TableView`] keeps it all in memory.

use serde::{Deserialize, Serialize};
use tabstore_storage::{Entry, Mutation, StorageKind};

/// What the table is showing beyond its rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "lowercase")]
pub enum TableStatus {
    Rows(usize),
    Empty,
    /// The page forbids extension access
    Restricted,
    /// The last read or write failed; rows are from the last good render
    Error(String),
}

impl TableStatus {
    pub fn message(&self) -> String {
        match self {
            TableStatus::Rows(1) => "1 entry".to_string(),
            TableStatus::Rows(n) => format!("{} entries", n),
            TableStatus::Empty => "No entries found".to_string(),
            TableStatus::Restricted => "Storage access unavailable on this page".to_string(),
            TableStatus::Error(e) => format!("Error: {}", e),
        }
    }
}

/// One rendered entry, bound to the kind it was read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub kind: StorageKind,
    pub key: String,
    pub value: String,
}

impl Row {
    pub fn new(kind: StorageKind, entry: Entry) -> Self {
        Self {
            kind,
            key: entry.key,
            value: entry.value,
        }
    }

    /// Key cell committed. `None` if the new key is blank.
    pub fn commit_key(&self, new_key: &str) -> Option<Mutation> {
        if new_key.trim().is_empty() {
            return None;
        }
        Some(Mutation::set(Some(self.key.as_str()), new_key, &self.value))
    }

    /// Value cell committed
    pub fn commit_value(&self, new_value: &str) -> Mutation {
        Mutation::set(Some(self.key.as_str()), &self.key, new_value)
    }

    /// Delete control clicked
    pub fn delete(&self) -> Mutation {
        Mutation::delete(self.key.as_str())
    }
}

/// One selector button as drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectorButton {
    pub kind: StorageKind,
    pub id: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Text inputs of the add-entry form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddForm {
    pub key: String,
    pub value: String,
}

pub trait PopupView: Send {
    /// Mark the selector button for `kind` active and every other one inactive
    fn highlight(&mut self, kind: StorageKind);

    fn clear_rows(&mut self);

    fn append_row(&mut self, row: Row);

    fn set_status(&mut self, status: TableStatus);

    fn clear_add_form(&mut self);
}

/// In-memory popup surface
#[derive(Debug, Clone, Default, Serialize)]
pub struct TableView {
    rows: Vec<Row>,
    active: Option<StorageKind>,
    status: Option<TableStatus>,
    form: AddForm,
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, key: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Rows as `(key, value)` pairs in display order
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.rows
            .iter()
            .map(|r| (r.key.as_str(), r.value.as_str()))
            .collect()
    }

    pub fn active_kind(&self) -> Option<StorageKind> {
        self.active
    }

    /// Selector buttons in display order
    pub fn buttons(&self) -> Vec<SelectorButton> {
        StorageKind::ALL
            .into_iter()
            .map(|kind| SelectorButton {
                kind,
                id: kind.button_id(),
                label: kind.label(),
                active: self.active == Some(kind),
            })
            .collect()
    }

    /// Each selector button id with its active flag
    pub fn active_buttons(&self) -> Vec<(&'static str, bool)> {
        self.buttons()
            .into_iter()
            .map(|button| (button.id, button.active))
            .collect()
    }

    pub fn status(&self) -> Option<&TableStatus> {
        self.status.as_ref()
    }

    pub fn add_form(&self) -> &AddForm {
        &self.form
    }

    /// Type into the add-entry form
    pub fn fill_add_form(&mut self, key: &str, value: &str) {
        self.form = AddForm {
            key: key.to_string(),
            value: value.to_string(),
        };
    }
}

impl PopupView for TableView {
    fn highlight(&mut self, kind: StorageKind) {
        self.active = Some(kind);
    }

    fn clear_rows(&mut self) {
        self.rows.clear();
    }

    fn append_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    fn set_status(&mut self, status: TableStatus) {
        self.status = Some(status);
    }

    fn clear_add_form(&mut self) {
        self.form = AddForm::default();
    }
}
