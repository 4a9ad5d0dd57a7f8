//! SwagCheck Core - Foundation types shared across the SwagCheck crates
//!
//! This crate provides:
//! - `Error` / `Result`: the error taxonomy, with a fatal/degradable split
//! - `version`: magnitude-only semantic version ordering

pub mod error;
pub mod version;

pub use error::{Error, Result};
