//! Cookie records as exposed by the browser's cookie jar

use serde::{Deserialize, Serialize};

/// A cookie visible to some URL.
///
/// The real jar carries more attributes (expiry, flags); only the ones the
/// popup needs are modeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
}

/// Arguments for setting a cookie scoped to a page URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieDetails {
    pub url: String,
    pub name: String,
    pub value: String,
}

impl CookieDetails {
    pub fn new(url: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            value: value.into(),
        }
    }
}
