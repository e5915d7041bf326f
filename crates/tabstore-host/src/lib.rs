//! Tabstore Host Interface
//!
//! The narrow slice of the browser extension platform the popup depends on:
//! - Tab lookup (the active tab of the current window)
//! - In-page execution of a typed script against a tab
//! - Cookie jar access scoped to a URL
//!
//! Everything else about the browser is out of reach on purpose.

mod cookie;
mod error;
mod host;
pub mod memory;
mod script;
mod tab;

pub use cookie::{Cookie, CookieDetails};
pub use error::HostError;
pub use host::BrowserHost;
pub use memory::{HostCall, HostCallKind, InMemoryBrowser};
pub use script::{FrameResult, PageScript, StorageArea};
pub use tab::{ActiveTab, TabId};

pub type Result<T> = std::result::Result<T, HostError>;
