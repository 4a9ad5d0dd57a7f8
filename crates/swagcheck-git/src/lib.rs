//! SwagCheck Git - Release-tag lookup for short commit hashes
//!
//! This crate answers one question: which release first shipped the commit
//! a deployed bundle was built from. It provides:
//! - `TagSource`: narrow interface over "tags containing commit X"
//! - `GitCli`: shell-out implementation of `TagSource`
//! - `VersionResolver`: special-case overrides + earliest-tag selection
//! - repository prepare/validate helpers for the CLI

pub mod repo;
pub mod resolver;

pub use repo::prepare_repository;
pub use resolver::{GitCli, TagSource, VersionResolver};
