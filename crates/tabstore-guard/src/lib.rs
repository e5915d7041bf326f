//! Tabstore Access Guard
//!
//! Browser-internal pages (settings, extension gallery, about pages) forbid
//! extensions from injecting scripts or touching page storage. The guard
//! classifies a tab URL before any read or write is attempted.

mod policy;

pub use policy::{is_restricted, RestrictionPolicy, DEFAULT_RESTRICTED_PREFIXES};
