//! Browser host abstraction

use async_trait::async_trait;

use crate::cookie::{Cookie, CookieDetails};
use crate::script::{FrameResult, PageScript};
use crate::tab::{ActiveTab, TabId};
use crate::Result;

/// The four capabilities the popup consumes from the extension platform.
///
/// Every call may suspend on the browser. No timeouts are imposed here; a
/// hang in the browser hangs the caller.
#[async_trait]
pub trait BrowserHost: Send + Sync {
    /// The single active tab in the current window, if any.
    async fn active_tab(&self) -> Result<Option<ActiveTab>>;

    /// Run `script` inside the tab's page. Returns one result per targeted frame.
    async fn execute_in_tab(&self, tab: TabId, script: PageScript) -> Result<Vec<FrameResult>>;

    /// All cookies visible to `url`.
    async fn get_all_cookies(&self, url: &str) -> Result<Vec<Cookie>>;

    async fn set_cookie(&self, details: CookieDetails) -> Result<()>;

    /// Removing a cookie that does not exist succeeds.
    async fn remove_cookie(&self, url: &str, name: &str) -> Result<()>;
}
