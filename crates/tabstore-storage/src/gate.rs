//! Active tab resolution behind the access guard

use tabstore_guard::RestrictionPolicy;
use tabstore_host::{BrowserHost, TabId};

use crate::Result;

/// An active tab the guard let through. Always has a URL.
#[derive(Debug, Clone)]
pub(crate) struct EligibleTab {
    pub id: TabId,
    pub url: String,
}

/// Look up the active tab and check it against `policy`.
///
/// `None` when there is no active tab or its page is restricted. Only a failing
/// tab query is an error.
pub(crate) async fn eligible_tab(
    host: &dyn BrowserHost,
    policy: &RestrictionPolicy,
) -> Result<Option<EligibleTab>> {
    let Some(tab) = host.active_tab().await? else {
        tracing::debug!("No active tab");
        return Ok(None);
    };

    if policy.is_restricted(tab.url()) {
        tracing::debug!(tab_id = %tab.id, "Active tab is restricted");
        return Ok(None);
    }

    Ok(tab.url.map(|url| EligibleTab { id: tab.id, url }))
}
