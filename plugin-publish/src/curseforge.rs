use serde::{Deserialize, Serialize};

use crate::config::CurseForgeConfig;
use crate::error::{PublishError, Result};
use crate::release::ReleaseDescriptor;
use crate::transport::{HttpResponse, Transport, UploadForm};

const TOKEN_HEADER: &str = "X-Api-Token";

/// One entry of `GET /game/versions`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameVersion {
    pub id: u64,
    #[serde(rename = "gameVersionTypeID")]
    pub game_version_type_id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// `metadata` part of an upload-file request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub changelog: String,
    pub changelog_type: String,
    pub display_name: String,
    pub game_versions: Vec<u64>,
    pub release_type: String,
}

/// Ids of the versions of type `type_id` whose name is in `supported`.
pub fn select_game_version_ids(
    versions: &[GameVersion],
    type_id: u64,
    supported: &[String],
) -> Vec<u64> {
    versions
        .iter()
        .filter(|v| v.game_version_type_id == type_id)
        .filter(|v| supported.iter().any(|s| *s == v.name))
        .map(|v| v.id)
        .collect()
}

pub struct CurseForgeClient<'a> {
    transport: &'a dyn Transport,
    config: &'a CurseForgeConfig,
}

impl<'a> CurseForgeClient<'a> {
    pub fn new(transport: &'a dyn Transport, config: &'a CurseForgeConfig) -> Self {
        Self { transport, config }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), path)
    }

    fn check(&self, response: HttpResponse) -> Result<HttpResponse> {
        if response.is_success() {
            return Ok(response);
        }
        tracing::error!("CurseForge responded with {}: {}", response.status, response.body);
        Err(PublishError::UploadFailed {
            platform: "CurseForge".to_string(),
            status: response.status,
            body: response.body,
        })
    }

    /// Every game version CurseForge knows about.
    pub async fn game_versions(&self, api_token: &str) -> Result<Vec<GameVersion>> {
        let response = self
            .transport
            .get(&self.api_url("game/versions"), &[(TOKEN_HEADER, api_token)])
            .await?;
        let response = self.check(response)?;

        Ok(serde_json::from_str(&response.body)?)
    }

    /// Upload the release artifact as a new file of `project_id`.
    pub async fn upload(
        &self,
        release: &ReleaseDescriptor,
        project_id: &str,
        api_token: &str,
    ) -> Result<()> {
        let known = self.game_versions(api_token).await?;
        let game_version_ids = select_game_version_ids(
            &known,
            self.config.game_version_type_id,
            release.game_versions(),
        );
        tracing::debug!("Matched CurseForge game version ids: {:?}", game_version_ids);
        if game_version_ids.is_empty() {
            tracing::warn!(
                "None of Minecraft {:?} matched a CurseForge game version of type {}",
                release.game_versions(),
                self.config.game_version_type_id
            );
        }

        let metadata = FileMetadata {
            changelog: release.changelog().to_string(),
            changelog_type: "markdown".to_string(),
            display_name: release.version().to_string(),
            game_versions: game_version_ids,
            release_type: self.config.release_type.clone(),
        };

        tracing::info!(
            "Uploading artifact {} (version {}) to CurseForge (Project ID {})",
            release.artifact_display(),
            release.version(),
            project_id
        );

        let form = UploadForm {
            file_field: "file".to_string(),
            file_name: release.artifact_name(),
            file_content: tokio::fs::read(release.artifact()).await?,
            json_field: "metadata".to_string(),
            json: serde_json::to_value(&metadata)?,
        };

        let url = self.api_url(&format!("projects/{project_id}/upload-file"));
        let response = self
            .transport
            .post_multipart(&url, &[(TOKEN_HEADER, api_token)], form)
            .await?;

        tracing::info!("CurseForge response: {}", response.body);
        self.check(response)?;

        tracing::info!("Successfully uploaded {} to CurseForge", release.version());
        Ok(())
    }
}
