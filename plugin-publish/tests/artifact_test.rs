use plugin_publish::artifact::{locate, sha256_hex};
use plugin_publish::cli::AmbiguityPolicy;
use plugin_publish::error::PublishError;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_locate_maven_output() {
    let temp_dir = tempdir().unwrap();
    let target = temp_dir.path().join("target");

    // Typical Maven target/ contents next to the shaded jar
    fs::create_dir_all(target.join("classes")).unwrap();
    fs::create_dir_all(target.join("maven-archiver")).unwrap();
    fs::write(target.join("maven-archiver/pom.properties"), b"version=1.0.0").unwrap();
    fs::write(target.join("example-plugin-1.0.0.jar"), b"jar content").unwrap();

    let artifact = locate(&target, "jar", AmbiguityPolicy::Error).unwrap();
    assert_eq!(artifact, target.join("example-plugin-1.0.0.jar"));
}

#[test]
fn test_locate_other_extension() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("plugin.jar"), b"jar").unwrap();
    fs::write(temp_dir.path().join("plugin.zip"), b"zip").unwrap();

    let artifact = locate(temp_dir.path(), "zip", AmbiguityPolicy::Error).unwrap();
    assert_eq!(artifact.file_name().unwrap(), "plugin.zip");
}

#[test]
fn test_missing_directory() {
    let temp_dir = tempdir().unwrap();

    let result = locate(&temp_dir.path().join("target"), "jar", AmbiguityPolicy::First);
    match result {
        Err(PublishError::ArtifactNotFound { extension, .. }) => assert_eq!(extension, "jar"),
        other => panic!("expected ArtifactNotFound, got {other:?}"),
    }
}

#[test]
fn test_ambiguous_error_lists_candidates() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("plugin-1.0.0.jar"), b"a").unwrap();
    fs::write(temp_dir.path().join("original-plugin-1.0.0.jar"), b"b").unwrap();

    let err = locate(temp_dir.path(), "jar", AmbiguityPolicy::Error).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("plugin-1.0.0.jar"));
    assert!(message.contains("original-plugin-1.0.0.jar"));
}

#[test]
fn test_checksum_format() {
    let temp_dir = tempdir().unwrap();
    let file = temp_dir.path().join("plugin.jar");
    fs::write(&file, b"Hello, World!").unwrap();

    let digest = sha256_hex(&file).unwrap();
    assert_eq!(digest.len(), 64);
    assert_eq!(
        digest,
        "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
    );
}
