//! SwagCheck Common - Shared utilities: logging and configuration
//!
//! This crate provides common functionality used across all SwagCheck crates.

pub mod config;
pub mod logging;

pub use config::Config;
pub use logging::init_logging;
