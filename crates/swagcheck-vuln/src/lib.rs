//! SwagCheck Vuln - Known-vulnerability catalog for swagger-ui
//!
//! This crate scrapes the advisory table from the configured source and
//! answers which entries apply to a detected version:
//! - `VulnerabilityCatalog`: load-once catalog with all-or-nothing parsing
//! - `is_version_vulnerable`: version-range containment over raw rule text

pub mod catalog;

pub use catalog::{is_version_vulnerable, parse_advisories, Advisory, VulnerabilityCatalog};
