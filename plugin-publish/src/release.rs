use std::path::{Path, PathBuf};

use crate::artifact;
use crate::catalog::{base_version, VersionCatalog};
use crate::changelog;
use crate::cli::AmbiguityPolicy;
use crate::config::DefaultConfig;
use crate::error::Result;
use crate::manifest;

pub const MANIFEST_FILE: &str = "pom.xml";
pub const CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Everything both upload targets need to know about one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    root: PathBuf,
    artifact: PathBuf,
    version: String,
    minimum_game_version: String,
    game_versions: Vec<String>,
    changelog: String,
    release_notes_file: String,
}

impl ReleaseDescriptor {
    /// Resolve the artifact, supported versions and changelog under `root`.
    pub fn load(
        root: &Path,
        version: &str,
        settings: &DefaultConfig,
        policy: AmbiguityPolicy,
        catalog: &VersionCatalog,
    ) -> Result<Self> {
        let artifact = artifact::locate(
            &root.join(&settings.artifact_dir),
            &settings.artifact_extension,
            policy,
        )?;

        let minimum = match manifest::read_api_version(&root.join(MANIFEST_FILE))? {
            Some(declared) => declared,
            None => {
                tracing::info!(
                    "bukkit-api-version not defined in {}, defaulting to {}",
                    MANIFEST_FILE,
                    settings.default_game_version
                );
                settings.default_game_version.clone()
            }
        };
        let minimum = base_version(&minimum);

        let game_versions = catalog.supported_from(&minimum)?;
        if let (Some(first), Some(last)) = (game_versions.first(), game_versions.last()) {
            tracing::info!("Plugin supports Minecraft {} - {}", first, last);
        }

        let changelog_path = root.join(CHANGELOG_FILE);
        let changelog = if changelog_path.exists() {
            changelog::read_section(&changelog_path, version)?.unwrap_or_else(|| {
                tracing::warn!(
                    "Version {} not found in changelog or changelog entry is empty!",
                    version
                );
                String::new()
            })
        } else {
            tracing::debug!("No {} in {}", CHANGELOG_FILE, root.display());
            String::new()
        };

        Ok(Self {
            root: root.to_path_buf(),
            artifact,
            version: version.to_string(),
            minimum_game_version: minimum,
            game_versions,
            changelog,
            release_notes_file: settings.release_notes_file.clone(),
        })
    }

    /// Assemble a descriptor from already-resolved parts.
    pub fn new(
        root: impl Into<PathBuf>,
        artifact: impl Into<PathBuf>,
        version: impl Into<String>,
        game_versions: Vec<String>,
        changelog: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            artifact: artifact.into(),
            version: version.into(),
            minimum_game_version: game_versions.first().cloned().unwrap_or_default(),
            game_versions,
            changelog: changelog.into(),
            release_notes_file: DefaultConfig::default().release_notes_file,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn artifact(&self) -> &Path {
        &self.artifact
    }

    /// Artifact file name, as sent in the multipart `file` part.
    pub fn artifact_name(&self) -> String {
        self.artifact
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "artifact.jar".to_string())
    }

    /// Artifact path relative to the root, for log messages.
    pub fn artifact_display(&self) -> String {
        self.artifact
            .strip_prefix(&self.root)
            .unwrap_or(&self.artifact)
            .display()
            .to_string()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn minimum_game_version(&self) -> &str {
        &self.minimum_game_version
    }

    pub fn game_versions(&self) -> &[String] {
        &self.game_versions
    }

    pub fn changelog(&self) -> &str {
        &self.changelog
    }

    pub fn release_notes_path(&self) -> PathBuf {
        self.root.join(&self.release_notes_file)
    }

    /// Write the changelog excerpt next to the project, replacing any old copy.
    pub fn save_changelog(&self) -> Result<PathBuf> {
        let path = self.release_notes_path();
        std::fs::write(&path, &self.changelog)?;
        tracing::info!("Wrote release notes to {}", path.display());
        Ok(path)
    }
}
