//! Short-hash to release-version resolution against a local git history

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;
use swagcheck_core::{version, Error, Result};
use tracing::{error, info};

/// Placeholder token the tag listing may emit instead of a real tag name.
const TAG_SENTINEL: &str = "$GIT_TAG";

/// Narrow interface over the version-control history: all release tags
/// whose history contains a given commit.
///
/// Kept deliberately small so the shell-out implementation can be swapped
/// for a native library binding, or a mock in tests.
pub trait TagSource {
    fn tags_containing(&self, short_hash: &str) -> Result<Vec<String>>;
}

/// `TagSource` implementation shelling out to the `git` binary.
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }
}

impl TagSource for GitCli {
    fn tags_containing(&self, short_hash: &str) -> Result<Vec<String>> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(["tag", "--contains", short_hash])
            .output()
            .map_err(|e| Error::GitLookup(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            // Typically "no such commit" when the hash is unknown to the repo.
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::GitLookup(
                stderr.split_whitespace().collect::<Vec<_>>().join(" "),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect())
    }
}

/// Resolves a short commit hash to the earliest release tag containing it.
///
/// The assumption is that the earliest tag reachable from a commit is the
/// release that first shipped it. Hashes known to be absent from the
/// history are answered from the special-case table instead.
pub struct VersionResolver {
    source: Box<dyn TagSource + Send + Sync>,
    special_cases: HashMap<String, String>,
}

impl VersionResolver {
    pub fn new(
        source: Box<dyn TagSource + Send + Sync>,
        special_cases: HashMap<String, String>,
    ) -> Self {
        Self {
            source,
            special_cases,
        }
    }

    /// Resolve a short hash to a version string. Absence is a first-class
    /// outcome; lookup failures are logged and absorbed here.
    pub fn resolve(&self, short_hash: &str) -> Option<String> {
        if let Some(version) = self.special_cases.get(short_hash) {
            return Some(version.clone());
        }

        let tags = match self.source.tags_containing(short_hash) {
            Ok(tags) => tags,
            Err(e) => {
                error!("{}", e);
                return None;
            }
        };

        let earliest = tags
            .iter()
            .filter(|tag| !tag.is_empty() && tag.as_str() != TAG_SENTINEL)
            .min_by(|a, b| version::compare(a, b));

        match earliest {
            Some(tag) => Some(tag.clone()),
            None => {
                info!("Unable to find version for hash \"{}\".", short_hash);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockTags {
        response: Result<Vec<String>>,
    }

    impl MockTags {
        fn ok(tags: &[&str]) -> Box<Self> {
            Box::new(Self {
                response: Ok(tags.iter().map(|t| t.to_string()).collect()),
            })
        }

        fn err(message: &str) -> Box<Self> {
            Box::new(Self {
                response: Err(Error::GitLookup(message.into())),
            })
        }
    }

    impl TagSource for MockTags {
        fn tags_containing(&self, _short_hash: &str) -> Result<Vec<String>> {
            match &self.response {
                Ok(tags) => Ok(tags.clone()),
                Err(_) => Err(Error::GitLookup("tag mishap".into())),
            }
        }
    }

    fn cases(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_special_case_bypasses_history() {
        let resolver = VersionResolver::new(
            MockTags::ok(&["v9.9"]),
            cases(&[("aaaaaa", "v1.2")]),
        );
        assert_eq!(resolver.resolve("aaaaaa"), Some("v1.2".into()));
    }

    #[test]
    fn test_single_tag() {
        let resolver = VersionResolver::new(MockTags::ok(&["v1.2"]), HashMap::new());
        assert_eq!(resolver.resolve("aaaaaa"), Some("v1.2".into()));
    }

    #[test]
    fn test_earliest_of_many() {
        let resolver = VersionResolver::new(MockTags::ok(&["v1.3", "v1.2", "v1.4"]), HashMap::new());
        assert_eq!(resolver.resolve("aaaaaa"), Some("v1.2".into()));
    }

    #[test]
    fn test_sentinel_filtered() {
        let resolver =
            VersionResolver::new(MockTags::ok(&["v1.2", "$GIT_TAG", "v1.3"]), HashMap::new());
        assert_eq!(resolver.resolve("aaaaaa"), Some("v1.2".into()));
    }

    #[test]
    fn test_empty_history_is_absent() {
        let resolver = VersionResolver::new(
            MockTags::ok(&[]),
            cases(&[("bbbbbb", "v1.0")]),
        );
        assert_eq!(resolver.resolve("aaaaaa"), None);
    }

    #[test]
    fn test_blank_lines_count_as_empty() {
        let resolver = VersionResolver::new(MockTags::ok(&[""]), HashMap::new());
        assert_eq!(resolver.resolve("aaaaaa"), None);
    }

    #[test]
    fn test_lookup_error_is_absent() {
        let resolver = VersionResolver::new(
            MockTags::err("tag mishap"),
            cases(&[("bbbbbb", "v1.0")]),
        );
        assert_eq!(resolver.resolve("aaaaaa"), None);
    }
}
