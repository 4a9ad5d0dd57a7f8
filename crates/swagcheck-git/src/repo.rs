//! Reference repository preparation
//!
//! The resolver needs a local swagger-ui working copy with tag history.
//! This module clones one when missing and validates an existing one,
//! before any classification starts. Failures here are fatal to the run.

use std::path::Path;
use std::process::Command;
use swagcheck_common::config::RepositoryConfig;
use swagcheck_core::{Error, Result};
use tracing::{info, warn};

/// Ensure the configured repository exists and matches the configured
/// remote. Clones when the path is missing or empty (if fetching is
/// enabled); otherwise validates what is already there.
pub fn prepare_repository(config: &RepositoryConfig) -> Result<()> {
    if !config.fetch {
        return Ok(());
    }

    let path = Path::new(&config.path);
    if !path.is_dir() {
        return clone(config);
    }

    info!("Directory for swagger-ui repo already exists.");
    if is_empty_dir(path)? {
        info!("Directory is empty.");
        return clone(config);
    }

    if !is_git_repository(&config.path) {
        return Err(Error::InvalidRepository {
            path: config.path.clone(),
            reason: String::from("not a git repository"),
        });
    }

    if !remotes(&config.path)?.iter().any(|url| url == &config.remote) {
        return Err(Error::InvalidRepository {
            path: config.path.clone(),
            reason: format!("remote {} not found", config.remote),
        });
    }

    info!(
        "Directory is a valid swagger-ui dir with remote {}",
        config.remote
    );
    Ok(())
}

fn clone(config: &RepositoryConfig) -> Result<()> {
    warn!("Cloning swagger-ui repository, this might take a while...");
    let output = Command::new("git")
        .args(["clone", &config.remote, &config.path])
        .output()
        .map_err(|e| Error::InvalidRepository {
            path: config.path.clone(),
            reason: format!("failed to run git clone: {}", e),
        })?;

    if !output.status.success() {
        return Err(Error::InvalidRepository {
            path: config.path.clone(),
            reason: format!(
                "clone failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }
    Ok(())
}

fn is_empty_dir(path: &Path) -> Result<bool> {
    Ok(std::fs::read_dir(path)?.next().is_none())
}

fn is_git_repository(path: &str) -> bool {
    Command::new("git")
        .args(["-C", path, "rev-parse", "--git-dir"])
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Fetch and push URLs of all configured remotes.
fn remotes(path: &str) -> Result<Vec<String>> {
    let output = Command::new("git")
        .args(["-C", path, "remote", "-v"])
        .output()
        .map_err(|e| Error::InvalidRepository {
            path: path.to_string(),
            reason: format!("failed to list remotes: {}", e),
        })?;

    // Lines look like "origin\thttps://... (fetch)"; the URL is the
    // second whitespace-separated field.
    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(str::to_string)
        .collect())
}
