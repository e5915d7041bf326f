//! Restricted URL policy

use serde::{Deserialize, Serialize};

/// Scheme prefixes of pages the host never lets extensions touch
pub const DEFAULT_RESTRICTED_PREFIXES: &[&str] = &[
    // Chromium internal pages
    "chrome://",
    // Informational pages (about:blank, about:config, ...)
    "about:",
    // Edge internal pages
    "edge://",
];

/// A static list of URL prefixes. Matching is case-sensitive and by prefix only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RestrictionPolicy {
    prefixes: Vec<String>,
}

impl RestrictionPolicy {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        prefixes
            .into_iter()
            .fold(Self { prefixes: Vec::new() }, |policy, p| policy.with_prefix(p))
    }

    /// Add a prefix. Empty and duplicate prefixes are ignored.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if !prefix.is_empty() && !self.prefixes.contains(&prefix) {
            self.prefixes.push(prefix);
        }
        self
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// True when `url` is absent, empty, or starts with a restricted prefix
    pub fn is_restricted(&self, url: Option<&str>) -> bool {
        let url = match url {
            Some(url) if !url.is_empty() => url,
            _ => {
                tracing::debug!("Restricted: tab has no URL");
                return true;
            }
        };

        match self.prefixes.iter().find(|p| url.starts_with(p.as_str())) {
            Some(prefix) => {
                tracing::debug!(url = %url, prefix = %prefix, "Restricted page");
                true
            }
            None => false,
        }
    }
}

impl Default for RestrictionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RESTRICTED_PREFIXES.iter().copied())
    }
}

impl From<Vec<String>> for RestrictionPolicy {
    fn from(prefixes: Vec<String>) -> Self {
        Self::new(prefixes)
    }
}

impl From<RestrictionPolicy> for Vec<String> {
    fn from(policy: RestrictionPolicy) -> Self {
        policy.prefixes
    }
}

/// Check `url` against the default policy
pub fn is_restricted(url: Option<&str>) -> bool {
    RestrictionPolicy::default().is_restricted(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_is_restricted() {
        assert!(is_restricted(None));
        assert!(is_restricted(Some("")));
    }

    #[test]
    fn test_privileged_schemes() {
        for url in [
            "chrome://extensions",
            "chrome://settings/cookies",
            "about:blank",
            "about:config",
            "edge://flags",
        ] {
            assert!(is_restricted(Some(url)), "{} should be restricted", url);
        }
    }

    #[test]
    fn test_web_pages_allowed() {
        for url in [
            "https://example.com",
            "http://localhost:8080/app",
            "https://chrome.example.com/about:",
            "https://edge.net/",
        ] {
            assert!(!is_restricted(Some(url)), "{} should be allowed", url);
        }
    }

    #[test]
    fn test_prefix_match_is_case_sensitive() {
        assert!(!is_restricted(Some("CHROME://extensions")));
        assert!(!is_restricted(Some(" chrome://extensions")));
    }

    #[test]
    fn test_extended_policy() {
        let policy = RestrictionPolicy::default()
            .with_prefix("chrome-extension://")
            .with_prefix("about:")
            .with_prefix("");

        assert_eq!(policy.prefixes().len(), 4);
        assert!(policy.is_restricted(Some("chrome-extension://abc/popup.html")));
        assert!(!RestrictionPolicy::default().is_restricted(Some("chrome-extension://abc/popup.html")));
    }

    #[test]
    fn test_policy_is_plain_data() {
        let policy: RestrictionPolicy =
            serde_json::from_str(r#"["view-source:", "file://"]"#).unwrap();
        assert!(policy.is_restricted(Some("file:///etc/hosts")));
        assert!(!policy.is_restricted(Some("chrome://extensions")));
        assert_eq!(
            serde_json::to_string(&policy).unwrap(),
            r#"["view-source:","file://"]"#
        );
    }

    #[test]
    fn test_deserialized_policy_drops_empty_and_duplicate_prefixes() {
        let policy: RestrictionPolicy =
            serde_json::from_str(r#"["chrome://", "", "chrome://"]"#).unwrap();

        assert_eq!(policy.prefixes(), ["chrome://"]);
        assert!(!policy.is_restricted(Some("https://example.com")));
        assert!(policy.is_restricted(Some("chrome://extensions")));
    }
}
