use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use crate::cli::AmbiguityPolicy;
use crate::error::{PublishError, Result};

/// Find the single build artifact `*.<extension>` directly inside `dir`.
pub fn locate(dir: &Path, extension: &str, policy: AmbiguityPolicy) -> Result<PathBuf> {
    let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{escaped_dir}/*.{extension}");

    let entries = glob::glob(&pattern)
        .map_err(|e| PublishError::Config(format!("Invalid artifact pattern {pattern}: {e}")))?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    candidates.sort();

    match candidates.len() {
        0 => Err(PublishError::ArtifactNotFound {
            dir: dir.display().to_string(),
            extension: extension.to_string(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => match policy {
            AmbiguityPolicy::First => {
                tracing::warn!(
                    "Found {} *.{} artifacts, using {}",
                    candidates.len(),
                    extension,
                    candidates[0].display()
                );
                Ok(candidates.remove(0))
            }
            AmbiguityPolicy::Error => Err(PublishError::AmbiguousArtifact {
                extension: extension.to_string(),
                candidates: candidates.iter().map(|p| p.display().to_string()).collect(),
            }),
        },
    }
}

/// Hex-encoded SHA-256 of a file
pub fn sha256_hex(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_locate_single_artifact() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("plugin-1.0.0.jar"), b"jar").unwrap();
        fs::write(dir.path().join("plugin.pom"), b"pom").unwrap();

        let path = locate(dir.path(), "jar", AmbiguityPolicy::Error).unwrap();
        assert_eq!(path.file_name().unwrap(), "plugin-1.0.0.jar");
    }

    #[test]
    fn test_locate_ignores_subdirectories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("classes")).unwrap();
        fs::write(dir.path().join("classes/nested.jar"), b"jar").unwrap();

        let err = locate(dir.path(), "jar", AmbiguityPolicy::First).unwrap_err();
        assert!(matches!(err, PublishError::ArtifactNotFound { .. }));
    }

    #[test]
    fn test_locate_ambiguous_first() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b-plugin.jar"), b"b").unwrap();
        fs::write(dir.path().join("a-plugin.jar"), b"a").unwrap();

        let path = locate(dir.path(), "jar", AmbiguityPolicy::First).unwrap();
        assert_eq!(path.file_name().unwrap(), "a-plugin.jar");
    }

    #[test]
    fn test_locate_ambiguous_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("plugin.jar"), b"a").unwrap();
        fs::write(dir.path().join("plugin-sources.jar"), b"b").unwrap();

        let err = locate(dir.path(), "jar", AmbiguityPolicy::Error).unwrap_err();
        match err {
            PublishError::AmbiguousArtifact { candidates, .. } => assert_eq!(candidates.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sha256_hex() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("test.jar");
        fs::write(&file, b"Hello, World!").unwrap();

        assert_eq!(
            sha256_hex(&file).unwrap(),
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }
}
