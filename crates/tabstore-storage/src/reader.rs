//! Storage Reader
//!
//! Fetches a fresh snapshot of the active tab: the page's local and session
//! storage via an injected read script, and the cookies visible to its URL.
//! Both fetches run concurrently and the read fails if either does.

use futures_util::future::try_join;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use tabstore_guard::RestrictionPolicy;
use tabstore_host::{BrowserHost, PageScript};

use crate::error::StorageError;
use crate::gate::eligible_tab;
use crate::kind::Entry;
use crate::snapshot::{Snapshot, TabStorage};
use crate::Result;

/// Shape returned by [`PageScript::ReadStorage`]
#[derive(Debug, Default, Deserialize)]
struct PageStorage {
    #[serde(default)]
    local: IndexMap<String, Value>,
    #[serde(default)]
    session: IndexMap<String, Value>,
}

pub struct StorageReader {
    host: Arc<dyn BrowserHost>,
    policy: Arc<RestrictionPolicy>,
}

impl StorageReader {
    pub fn new(host: Arc<dyn BrowserHost>, policy: Arc<RestrictionPolicy>) -> Self {
        Self { host, policy }
    }

    /// Read the active tab, telling restricted pages apart from readable ones
    pub async fn read(&self) -> Result<TabStorage> {
        let Some(tab) = eligible_tab(self.host.as_ref(), &self.policy).await? else {
            return Ok(TabStorage::Restricted);
        };

        let (frames, cookies) = try_join(
            self.host.execute_in_tab(tab.id, PageScript::ReadStorage),
            self.host.get_all_cookies(&tab.url),
        )
        .await?;

        let frame = frames
            .into_iter()
            .next()
            .ok_or(StorageError::NoFrameResult(tab.id))?;
        let page: PageStorage = match frame.result {
            Value::Null => PageStorage::default(),
            result => serde_json::from_value(result)?,
        };

        let snapshot = Snapshot::new(
            stringify(page.local),
            stringify(page.session),
            cookies.into_iter().map(Entry::from).collect(),
        );

        tracing::debug!(
            tab_id = %tab.id,
            local = snapshot.local().len(),
            session = snapshot.session().len(),
            cookies = snapshot.cookies().len(),
            taken_at = %snapshot.taken_at(),
            "Read storage snapshot"
        );

        Ok(snapshot.into())
    }

    /// Read the active tab; restricted pages read as the empty snapshot
    pub async fn read_snapshot(&self) -> Result<Snapshot> {
        Ok(self.read().await?.into_snapshot())
    }
}

impl Clone for StorageReader {
    fn clone(&self) -> Self {
        Self {
            host: Arc::clone(&self.host),
            policy: Arc::clone(&self.policy),
        }
    }
}

impl From<Snapshot> for TabStorage {
    fn from(snapshot: Snapshot) -> Self {
        TabStorage::Available(snapshot)
    }
}

/// Page stores only hold strings, but a page may have patched them
fn stringify(map: IndexMap<String, Value>) -> IndexMap<String, String> {
    map.into_iter()
        .map(|(k, v)| match v {
            Value::String(s) => (k, s),
            other => (k, other.to_string()),
        })
        .collect()
}
