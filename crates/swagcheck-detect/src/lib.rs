//! SwagCheck Detect - swagger-ui version classification
//!
//! This crate fingerprints the version of a deployed swagger-ui instance:
//! - `HttpClient`: bounded-timeout GET client shared with the catalog loader
//! - `AssetClassifier`: script-reference extraction, major-generation
//!   detection, and minor-version detection from the fetched bundle

pub mod classifier;
pub mod client;

pub use classifier::{detect_major, extract_script_srcs, AssetClassifier, MajorGeneration};
pub use client::{ClientError, HttpClient, HttpResponse};
