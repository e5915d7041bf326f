//! Storage mutations
//!
//! Adding a row, editing a value and editing a key in place are all "write
//! this key"; a key edit additionally removes the old key first. The tagged
//! form keeps a pure value update from being mistaken for a rename.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    Add {
        key: String,
        value: String,
    },
    /// Remove `old_key`, then write `new_key`
    Rename {
        old_key: String,
        new_key: String,
        value: String,
    },
    UpdateValue {
        key: String,
        value: String,
    },
    Delete {
        key: String,
    },
}

impl Mutation {
    /// Normalise a set-with-optional-old-key request.
    ///
    /// No old key is an add, an unchanged key is a value update, anything
    /// else is a rename.
    pub fn set(old_key: Option<&str>, new_key: &str, value: &str) -> Self {
        match old_key {
            None => Mutation::Add {
                key: new_key.to_string(),
                value: value.to_string(),
            },
            Some(old) if old == new_key => Mutation::UpdateValue {
                key: new_key.to_string(),
                value: value.to_string(),
            },
            Some(old) => Mutation::Rename {
                old_key: old.to_string(),
                new_key: new_key.to_string(),
                value: value.to_string(),
            },
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        Mutation::Delete { key: key.into() }
    }

    /// The key that holds the entry once the mutation is applied
    pub fn key(&self) -> &str {
        match self {
            Mutation::Add { key, .. } | Mutation::UpdateValue { key, .. } | Mutation::Delete { key } => key,
            Mutation::Rename { new_key, .. } => new_key,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mutation::Add { .. } => "add",
            Mutation::Rename { .. } => "rename",
            Mutation::UpdateValue { .. } => "update_value",
            Mutation::Delete { .. } => "delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_normalisation() {
        assert_eq!(
            Mutation::set(None, "k", "v"),
            Mutation::Add {
                key: "k".to_string(),
                value: "v".to_string()
            }
        );
        assert_eq!(
            Mutation::set(Some("k"), "k", "v"),
            Mutation::UpdateValue {
                key: "k".to_string(),
                value: "v".to_string()
            }
        );
        assert_eq!(
            Mutation::set(Some("k1"), "k2", "v"),
            Mutation::Rename {
                old_key: "k1".to_string(),
                new_key: "k2".to_string(),
                value: "v".to_string()
            }
        );
    }

    #[test]
    fn test_key() {
        assert_eq!(Mutation::set(Some("a"), "b", "v").key(), "b");
        assert_eq!(Mutation::delete("gone").key(), "gone");
        assert_eq!(Mutation::delete("gone").as_str(), "delete");
    }
}
