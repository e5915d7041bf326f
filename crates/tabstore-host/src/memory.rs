//! In-memory browser
//!
//! A self-contained stand-in for the extension platform: a tab strip with one
//! active tab, per-origin local storage, per-tab session storage and a cookie
//! jar keyed by host. Every call is recorded, and any call kind can be made to
//! fail once to exercise transport errors.
//!
//! Like a real browser it refuses page scripts and cookie access on anything
//! that is not an http(s) page.

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

use crate::cookie::{Cookie, CookieDetails};
use crate::error::HostError;
use crate::host::BrowserHost;
use crate::script::{FrameResult, PageScript, StorageArea};
use crate::tab::{ActiveTab, TabId};
use crate::Result;

/// A call made against the browser, in the order it was made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    ActiveTab,
    ExecuteInTab { tab: TabId, script: PageScript },
    GetAllCookies { url: String },
    SetCookie(CookieDetails),
    RemoveCookie { url: String, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCallKind {
    ActiveTab,
    ExecuteInTab,
    GetAllCookies,
    SetCookie,
    RemoveCookie,
}

impl HostCall {
    pub fn kind(&self) -> HostCallKind {
        match self {
            HostCall::ActiveTab => HostCallKind::ActiveTab,
            HostCall::ExecuteInTab { .. } => HostCallKind::ExecuteInTab,
            HostCall::GetAllCookies { .. } => HostCallKind::GetAllCookies,
            HostCall::SetCookie(_) => HostCallKind::SetCookie,
            HostCall::RemoveCookie { .. } => HostCallKind::RemoveCookie,
        }
    }

    /// Whether the call reached into a page or the cookie jar
    pub fn touches_storage(&self) -> bool {
        !matches!(self, HostCall::ActiveTab)
    }
}

#[derive(Debug, Clone)]
struct TabRecord {
    url: Option<String>,
}

#[derive(Default)]
struct BrowserState {
    tabs: IndexMap<TabId, TabRecord>,
    active: Option<TabId>,
    next_id: u32,
    /// origin -> entries
    local: HashMap<String, IndexMap<String, String>>,
    session: HashMap<TabId, IndexMap<String, String>>,
    /// host -> name -> cookie
    cookies: HashMap<String, IndexMap<String, Cookie>>,
    calls: Vec<HostCall>,
    failures: HashMap<HostCallKind, String>,
}

impl BrowserState {
    /// Log the call, then fail it if a failure was armed for its kind
    fn record(&mut self, call: HostCall) -> Result<()> {
        let kind = call.kind();
        let tab = match &call {
            HostCall::ExecuteInTab { tab, .. } => Some(*tab),
            _ => None,
        };
        self.calls.push(call);

        let Some(reason) = self.failures.remove(&kind) else {
            return Ok(());
        };

        tracing::debug!(?kind, %reason, "Injected host failure");

        Err(match (kind, tab) {
            (HostCallKind::ActiveTab, _) => HostError::TabQuery(reason),
            (HostCallKind::ExecuteInTab, Some(tab)) => HostError::ScriptExecution { tab, reason },
            _ => HostError::Cookie { reason },
        })
    }

    fn area_mut(&mut self, area: StorageArea, origin: &str, tab: TabId) -> &mut IndexMap<String, String> {
        match area {
            StorageArea::Local => self.local.entry(origin.to_string()).or_default(),
            StorageArea::Session => self.session.entry(tab).or_default(),
        }
    }
}

/// Shared handle to an in-memory browser. Clones see the same state.
pub struct InMemoryBrowser {
    state: Arc<RwLock<BrowserState>>,
}

impl InMemoryBrowser {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(BrowserState::default())),
        }
    }

    /// Open a tab and make it the active one
    pub fn open_tab(&self, url: Option<&str>) -> TabId {
        let mut state = self.state.write();
        state.next_id += 1;
        let id = TabId(state.next_id);
        state.tabs.insert(
            id,
            TabRecord {
                url: url.map(str::to_string),
            },
        );
        state.active = Some(id);
        id
    }

    pub fn activate(&self, tab: TabId) {
        let mut state = self.state.write();
        if state.tabs.contains_key(&tab) {
            state.active = Some(tab);
        }
    }

    /// Close a tab. The last remaining tab becomes active.
    pub fn close_tab(&self, tab: TabId) {
        let mut state = self.state.write();
        state.tabs.shift_remove(&tab);
        state.session.remove(&tab);
        if state.active == Some(tab) {
            state.active = state.tabs.keys().last().copied();
        }
    }

    pub fn navigate(&self, tab: TabId, url: &str) {
        if let Some(record) = self.state.write().tabs.get_mut(&tab) {
            record.url = Some(url.to_string());
        }
    }

    pub fn seed_local(&self, url: &str, key: &str, value: &str) -> Result<()> {
        let origin = origin_of(&page_url(Some(url))?);
        self.state
            .write()
            .local
            .entry(origin)
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    pub fn seed_session(&self, tab: TabId, key: &str, value: &str) {
        self.state
            .write()
            .session
            .entry(tab)
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    pub fn seed_cookie(&self, url: &str, name: &str, value: &str) -> Result<()> {
        let host = host_of(&page_url(Some(url))?)?;
        insert_cookie(&mut self.state.write(), host, name, value);
        Ok(())
    }

    /// Current local storage of the page at `url`
    pub fn local_storage(&self, url: &str) -> IndexMap<String, String> {
        let Ok(parsed) = page_url(Some(url)) else {
            return IndexMap::new();
        };
        self.state
            .read()
            .local
            .get(&origin_of(&parsed))
            .cloned()
            .unwrap_or_default()
    }

    pub fn session_storage(&self, tab: TabId) -> IndexMap<String, String> {
        self.state
            .read()
            .session
            .get(&tab)
            .cloned()
            .unwrap_or_default()
    }

    /// Cookies stored for the host of `url`
    pub fn cookie_jar(&self, url: &str) -> Vec<Cookie> {
        let Some(host) = page_url(Some(url)).ok().and_then(|u| host_of(&u).ok()) else {
            return Vec::new();
        };
        self.state
            .read()
            .cookies
            .get(&host)
            .map(|jar| jar.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.state.read().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.write().calls.clear();
    }

    /// Make the next call of `kind` fail with `reason`
    pub fn fail_next(&self, kind: HostCallKind, reason: impl Into<String>) {
        self.state.write().failures.insert(kind, reason.into());
    }
}

impl Default for InMemoryBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryBrowser {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

#[async_trait]
impl BrowserHost for InMemoryBrowser {
    async fn active_tab(&self) -> Result<Option<ActiveTab>> {
        let mut state = self.state.write();
        state.record(HostCall::ActiveTab)?;

        Ok(state.active.and_then(|id| {
            state
                .tabs
                .get(&id)
                .map(|record| ActiveTab::new(id, record.url.clone()))
        }))
    }

    async fn execute_in_tab(&self, tab: TabId, script: PageScript) -> Result<Vec<FrameResult>> {
        let mut state = self.state.write();
        state.record(HostCall::ExecuteInTab {
            tab,
            script: script.clone(),
        })?;

        let record = state.tabs.get(&tab).cloned().ok_or(HostError::TabClosed(tab))?;
        let origin = origin_of(&page_url(record.url.as_deref())?);

        let result = match script {
            PageScript::ReadStorage => {
                let local = to_object(state.local.get(&origin));
                let session = to_object(state.session.get(&tab));
                json!({ "local": local, "session": session })
            }
            PageScript::SetItem { area, key, value } => {
                state.area_mut(area, &origin, tab).insert(key, value);
                Value::Null
            }
            PageScript::RemoveItem { area, key } => {
                state.area_mut(area, &origin, tab).shift_remove(&key);
                Value::Null
            }
        };

        Ok(vec![FrameResult::main_frame(result)])
    }

    async fn get_all_cookies(&self, url: &str) -> Result<Vec<Cookie>> {
        let mut state = self.state.write();
        state.record(HostCall::GetAllCookies {
            url: url.to_string(),
        })?;

        let host = host_of(&page_url(Some(url))?)?;
        Ok(state
            .cookies
            .get(&host)
            .map(|jar| jar.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn set_cookie(&self, details: CookieDetails) -> Result<()> {
        let mut state = self.state.write();
        state.record(HostCall::SetCookie(details.clone()))?;

        let host = host_of(&page_url(Some(&details.url))?)?;
        insert_cookie(&mut state, host, &details.name, &details.value);
        Ok(())
    }

    async fn remove_cookie(&self, url: &str, name: &str) -> Result<()> {
        let mut state = self.state.write();
        state.record(HostCall::RemoveCookie {
            url: url.to_string(),
            name: name.to_string(),
        })?;

        let host = host_of(&page_url(Some(url))?)?;
        if let Some(jar) = state.cookies.get_mut(&host) {
            jar.shift_remove(name);
        }
        Ok(())
    }
}

/// Parse a URL the browser lets extensions touch
fn page_url(url: Option<&str>) -> Result<Url> {
    let raw = url.ok_or_else(|| HostError::PermissionDenied("<no url>".to_string()))?;
    let parsed = Url::parse(raw).map_err(|e| HostError::InvalidUrl(format!("{}: {}", raw, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(HostError::PermissionDenied(raw.to_string())),
    }
}

fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}

fn host_of(url: &Url) -> Result<String> {
    url.host_str()
        .map(str::to_string)
        .ok_or_else(|| HostError::InvalidUrl(url.to_string()))
}

fn insert_cookie(state: &mut BrowserState, host: String, name: &str, value: &str) {
    let cookie = Cookie {
        name: name.to_string(),
        value: value.to_string(),
        domain: host.clone(),
        path: "/".to_string(),
    };
    state
        .cookies
        .entry(host)
        .or_default()
        .insert(name.to_string(), cookie);
}

fn to_object(entries: Option<&IndexMap<String, String>>) -> Value {
    Value::Object(
        entries
            .into_iter()
            .flatten()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}
