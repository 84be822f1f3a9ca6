//! Integration tests for plugin-publish
//!
//! These tests run the full publish sequence against a scratch project and an
//! in-memory transport.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use plugin_publish::cli::Args;
use plugin_publish::config::Config;
use plugin_publish::error::PublishError;
use plugin_publish::memory::{MemoryTransport, Method};
use plugin_publish::publisher::Publisher;
use tempfile::TempDir;

const MODRINTH_URL: &str = "https://api.modrinth.com/v2/version";
const CURSEFORGE_VERSIONS_URL: &str = "https://minecraft.curseforge.com/api/game/versions";
const CURSEFORGE_UPLOAD_URL: &str =
    "https://minecraft.curseforge.com/api/projects/31337/upload-file";

const CHANGELOG: &str = "# Changelog

## 1.2.0 (2023-01-01)

- Added /spawn
- Fixed teleport delay

## 1.1.0 (2022-01-01)

- Initial release
";

/// Test helper to create a Maven plugin project with a built jar
fn setup_test_project(api_version: Option<&str>) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let property = api_version
        .map(|v| format!("<bukkit-api-version>{v}</bukkit-api-version>"))
        .unwrap_or_default();
    let pom = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <groupId>com.example</groupId>
    <artifactId>example-plugin</artifactId>
    <version>1.2.0</version>
    <properties>
        <java.version>17</java.version>
        {property}
    </properties>
</project>
"#
    );
    fs::write(temp_dir.path().join("pom.xml"), pom).expect("Failed to write pom.xml");

    fs::create_dir_all(temp_dir.path().join("target")).expect("Failed to create target");
    fs::write(
        temp_dir.path().join("target/example-plugin-1.2.0.jar"),
        b"PK\x03\x04 plugin",
    )
    .expect("Failed to write jar");

    fs::write(temp_dir.path().join("CHANGELOG.md"), CHANGELOG).expect("Failed to write changelog");

    temp_dir
}

fn publisher(args: Args, transport: &Arc<MemoryTransport>) -> Publisher {
    Publisher::with_transport(args, Config::default(), transport.clone())
}

fn args_with_targets(root: &Path) -> Args {
    let mut args = Args::new(root, "1.2.0");
    args.modrinth_project = Some("AbCdEf12".to_string());
    args.modrinth_token = Some("mr-token".to_string());
    args.curseforge_project = Some("31337".to_string());
    args.curseforge_token = Some("cf-token".to_string());
    args
}

#[tokio::test]
async fn test_no_targets_only_writes_release_notes() {
    let project = setup_test_project(Some("1.19"));
    let transport = Arc::new(MemoryTransport::new());

    let release = publisher(Args::new(project.path(), "1.2.0"), &transport)
        .run()
        .await
        .unwrap();

    assert!(transport.requests().is_empty());
    assert_eq!(release.changelog(), "- Added /spawn\n- Fixed teleport delay");

    let notes = fs::read_to_string(project.path().join("ci-release.md")).unwrap();
    assert_eq!(notes, "- Added /spawn\n- Fixed teleport delay");
}

#[tokio::test]
async fn test_publishes_to_both_platforms() {
    let project = setup_test_project(Some("1.19.2"));
    let transport = Arc::new(MemoryTransport::new());
    transport.respond(
        Method::Get,
        CURSEFORGE_VERSIONS_URL,
        200,
        r#"[
            {"id": 9186, "gameVersionTypeID": 1, "name": "1.19", "slug": "1-19"},
            {"id": 9190, "gameVersionTypeID": 1, "name": "1.19.4", "slug": "1-19-4"},
            {"id": 9261, "gameVersionTypeID": 1, "name": "1.18.2", "slug": "1-18-2"}
        ]"#,
    );

    let release = publisher(args_with_targets(project.path()), &transport)
        .run()
        .await
        .unwrap();
    assert_eq!(release.game_versions()[0], "1.19");

    let requests = transport.requests();
    let urls: Vec<&str> = requests.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec![MODRINTH_URL, CURSEFORGE_VERSIONS_URL, CURSEFORGE_UPLOAD_URL]);

    let modrinth = requests[0].form.as_ref().unwrap();
    assert_eq!(requests[0].header("Authorization"), Some("mr-token"));
    assert_eq!(modrinth.file_name, "example-plugin-1.2.0.jar");
    assert_eq!(modrinth.json["version_number"], "1.2.0");
    assert_eq!(modrinth.json["game_versions"][0], "1.19");
    assert_eq!(modrinth.json["game_versions"][4], "1.19.4");
    assert_eq!(modrinth.json["changelog"], "- Added /spawn\n- Fixed teleport delay");

    let curseforge = requests[2].form.as_ref().unwrap();
    assert_eq!(requests[2].header("X-Api-Token"), Some("cf-token"));
    assert_eq!(curseforge.json["gameVersions"], serde_json::json!([9186, 9190]));
}

#[tokio::test]
async fn test_default_api_version() {
    let project = setup_test_project(None);
    let transport = Arc::new(MemoryTransport::new());

    let release = publisher(Args::new(project.path(), "1.2.0"), &transport)
        .run()
        .await
        .unwrap();

    assert_eq!(release.minimum_game_version(), "1.14");
    assert_eq!(release.game_versions().first().unwrap(), "1.14");
    assert_eq!(release.game_versions().last().unwrap(), "1.19.4");
}

#[tokio::test]
async fn test_unknown_version_has_empty_notes() {
    let project = setup_test_project(Some("1.19"));
    let transport = Arc::new(MemoryTransport::new());

    let release = publisher(Args::new(project.path(), "9.9.9"), &transport)
        .run()
        .await
        .unwrap();

    assert_eq!(release.changelog(), "");
    let notes = fs::read_to_string(project.path().join("ci-release.md")).unwrap();
    assert!(notes.is_empty());
}

#[tokio::test]
async fn test_modrinth_failure_stops_the_run() {
    let project = setup_test_project(Some("1.19"));
    let transport = Arc::new(MemoryTransport::new());
    transport.respond(Method::Post, MODRINTH_URL, 500, "internal error");

    let err = publisher(args_with_targets(project.path()), &transport)
        .run()
        .await
        .unwrap_err();

    match err.downcast_ref::<PublishError>() {
        Some(PublishError::UploadFailed { platform, status, .. }) => {
            assert_eq!(platform, "Modrinth");
            assert_eq!(*status, 500);
        }
        other => panic!("expected UploadFailed, got {other:?}"),
    }

    // CurseForge is never contacted
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, MODRINTH_URL);
}

#[tokio::test]
async fn test_curseforge_failure_after_modrinth() {
    let project = setup_test_project(Some("1.19"));
    let transport = Arc::new(MemoryTransport::new());
    transport.respond(Method::Get, CURSEFORGE_VERSIONS_URL, 200, "[]");
    transport.respond(Method::Post, CURSEFORGE_UPLOAD_URL, 400, "bad metadata");

    let result = publisher(args_with_targets(project.path()), &transport)
        .run()
        .await;

    assert!(result.is_err());
    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test]
async fn test_missing_token_fails_before_upload() {
    let project = setup_test_project(Some("1.19"));
    let transport = Arc::new(MemoryTransport::new());

    let mut args = args_with_targets(project.path());
    args.curseforge_token = None;

    let err = publisher(args, &transport).run().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PublishError>(),
        Some(PublishError::MissingCredential { .. })
    ));
    assert!(transport.requests().is_empty());
    assert!(!project.path().join("ci-release.md").exists());
}

#[tokio::test]
async fn test_dry_run_makes_no_requests() {
    let project = setup_test_project(Some("1.19"));
    let transport = Arc::new(MemoryTransport::new());

    let mut args = args_with_targets(project.path());
    args.dry_run = true;
    args.save_changelog = false;

    publisher(args, &transport).run().await.unwrap();

    assert!(transport.requests().is_empty());
    assert!(!project.path().join("ci-release.md").exists());
}

#[tokio::test]
async fn test_missing_artifact() {
    let project = setup_test_project(Some("1.19"));
    fs::remove_file(project.path().join("target/example-plugin-1.2.0.jar")).unwrap();
    let transport = Arc::new(MemoryTransport::new());

    let err = publisher(args_with_targets(project.path()), &transport)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PublishError>(),
        Some(PublishError::ArtifactNotFound { .. })
    ));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_extra_catalog_versions_from_config() {
    let project = setup_test_project(Some("1.20.1"));
    let transport = Arc::new(MemoryTransport::new());

    let mut config = Config::default();
    config.catalog.extra_versions = vec!["1.20".to_string(), "1.20.1".to_string()];

    let release = Publisher::with_transport(Args::new(project.path(), "1.2.0"), config, transport.clone())
        .run()
        .await
        .unwrap();

    assert_eq!(release.game_versions(), &["1.20", "1.20.1"]);
}
