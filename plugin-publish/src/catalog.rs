use regex::Regex;
use std::sync::LazyLock;

use crate::error::{PublishError, Result};

/// Minecraft versions known to the publisher, oldest first.
///
/// New releases are appended at the end; entries are never removed or
/// reordered since the supported window is a suffix of this list.
pub const GAME_VERSIONS: &[&str] = &[
    "1.12", "1.12.1", "1.12.2", "1.13", "1.13.1", "1.13.2", "1.14", "1.14.1", "1.14.2", "1.14.3",
    "1.14.4", "1.15", "1.15.1", "1.15.2", "1.16", "1.16.1", "1.16.2", "1.16.3", "1.16.4",
    "1.16.5", "1.17", "1.17.1", "1.18", "1.18.1", "1.18.2", "1.19", "1.19.1", "1.19.2", "1.19.3",
    "1.19.4",
];

/// Fallback used when the manifest does not declare `bukkit-api-version`.
pub const DEFAULT_MINIMUM_VERSION: &str = "1.14.4";

static BASE_VERSION_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([0-9]+\.[0-9]+)\.([0-9]+)").ok());

/// Collapse `major.minor.patch` to `major.minor`.
///
/// Anything without a numeric patch component is returned unchanged.
pub fn base_version(version: &str) -> String {
    BASE_VERSION_PATTERN
        .as_ref()
        .and_then(|re| re.captures(version))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| version.to_string())
}

/// Ordered list of game versions a release can declare support for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCatalog {
    versions: Vec<String>,
}

impl Default for VersionCatalog {
    fn default() -> Self {
        Self::new(GAME_VERSIONS.iter().map(|v| v.to_string()))
    }
}

impl VersionCatalog {
    pub fn new<I, S>(versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            versions: versions.into_iter().map(Into::into).collect(),
        }
    }

    /// Append versions newer than the built-in list, skipping duplicates.
    pub fn extended<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for version in extra {
            let version = version.into();
            if !self.versions.contains(&version) {
                self.versions.push(version);
            }
        }
        self
    }

    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    pub fn latest(&self) -> Option<&str> {
        self.versions.last().map(String::as_str)
    }

    /// Every catalog entry from `minimum` (after normalization) to the newest.
    pub fn supported_from(&self, minimum: &str) -> Result<Vec<String>> {
        let minimum = base_version(minimum);

        let index = self
            .versions
            .iter()
            .position(|v| *v == minimum)
            .ok_or_else(|| PublishError::UnknownGameVersion {
                version: minimum.clone(),
                latest: self.latest().unwrap_or("none").to_string(),
            })?;

        Ok(self.versions[index..].to_vec())
    }
}
