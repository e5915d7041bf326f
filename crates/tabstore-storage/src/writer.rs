//! Storage Writer
//!
//! Applies a [`Mutation`] to the store behind a [`StorageKind`] on the active
//! tab. Cookies are set and removed through the cookie jar scoped to the tab
//! URL; local and session storage through scripts run in the page.

use std::sync::Arc;

use tabstore_guard::RestrictionPolicy;
use tabstore_host::{BrowserHost, CookieDetails, PageScript};

use crate::gate::{eligible_tab, EligibleTab};
use crate::kind::StorageKind;
use crate::mutation::Mutation;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    /// No active tab, or its page is restricted. Nothing was attempted.
    Skipped,
}

pub struct StorageWriter {
    host: Arc<dyn BrowserHost>,
    policy: Arc<RestrictionPolicy>,
}

impl StorageWriter {
    pub fn new(host: Arc<dyn BrowserHost>, policy: Arc<RestrictionPolicy>) -> Self {
        Self { host, policy }
    }

    /// Apply `mutation` to `kind` on the active tab.
    ///
    /// The tab is resolved once, so both halves of a rename hit the same page.
    pub async fn apply(&self, kind: StorageKind, mutation: Mutation) -> Result<WriteOutcome> {
        let Some(tab) = eligible_tab(self.host.as_ref(), &self.policy).await? else {
            tracing::debug!(kind = %kind, op = mutation.as_str(), "Skipped write");
            return Ok(WriteOutcome::Skipped);
        };

        tracing::debug!(
            tab_id = %tab.id,
            kind = %kind,
            op = mutation.as_str(),
            key = %mutation.key(),
            "Applying storage mutation"
        );

        match mutation {
            Mutation::Add { key, value } | Mutation::UpdateValue { key, value } => {
                self.write(&tab, kind, key, value).await?;
            }
            Mutation::Rename {
                old_key,
                new_key,
                value,
            } => {
                self.remove(&tab, kind, old_key).await?;
                self.write(&tab, kind, new_key, value).await?;
            }
            Mutation::Delete { key } => {
                self.remove(&tab, kind, key).await?;
            }
        }

        Ok(WriteOutcome::Applied)
    }

    /// Write `new_key -> value`, removing `old_key` first when it differs
    pub async fn set_entry(
        &self,
        kind: StorageKind,
        old_key: Option<&str>,
        new_key: &str,
        value: &str,
    ) -> Result<WriteOutcome> {
        self.apply(kind, Mutation::set(old_key, new_key, value)).await
    }

    /// Remove `key`. Removing a key that is not there is not an error.
    pub async fn remove_entry(&self, kind: StorageKind, key: &str) -> Result<WriteOutcome> {
        self.apply(kind, Mutation::delete(key)).await
    }

    async fn write(&self, tab: &EligibleTab, kind: StorageKind, key: String, value: String) -> Result<()> {
        match kind.area() {
            None => {
                self.host
                    .set_cookie(CookieDetails::new(tab.url.as_str(), key, value))
                    .await?
            }
            Some(area) => {
                self.host
                    .execute_in_tab(tab.id, PageScript::SetItem { area, key, value })
                    .await?;
            }
        }
        Ok(())
    }

    async fn remove(&self, tab: &EligibleTab, kind: StorageKind, key: String) -> Result<()> {
        match kind.area() {
            None => self.host.remove_cookie(&tab.url, &key).await?,
            Some(area) => {
                self.host
                    .execute_in_tab(tab.id, PageScript::RemoveItem { area, key })
                    .await?;
            }
        }
        Ok(())
    }
}

impl Clone for StorageWriter {
    fn clone(&self) -> Self {
        Self {
            host: Arc::clone(&self.host),
            policy: Arc::clone(&self.policy),
        }
    }
}
