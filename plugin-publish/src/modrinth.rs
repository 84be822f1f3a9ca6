use serde::Serialize;

use crate::config::ModrinthConfig;
use crate::error::{PublishError, Result};
use crate::release::ReleaseDescriptor;
use crate::transport::{Transport, UploadForm};

const FILE_PART: &str = "file";

/// `data` part of a Modrinth create-version request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VersionData {
    pub name: String,
    pub version_number: String,
    pub changelog: String,
    pub dependencies: Vec<serde_json::Value>,
    pub game_versions: Vec<String>,
    pub version_type: String,
    pub loaders: Vec<String>,
    pub featured: bool,
    pub status: String,
    pub requested_status: String,
    pub project_id: String,
    pub file_parts: Vec<String>,
    pub primary_file: String,
}

impl VersionData {
    pub fn new(release: &ReleaseDescriptor, project_id: &str, config: &ModrinthConfig) -> Self {
        Self {
            name: release.version().to_string(),
            version_number: release.version().to_string(),
            changelog: release.changelog().to_string(),
            dependencies: Vec::new(),
            game_versions: release.game_versions().to_vec(),
            version_type: config.version_type.clone(),
            loaders: config.loaders.clone(),
            featured: config.featured,
            status: "listed".to_string(),
            requested_status: "listed".to_string(),
            project_id: project_id.to_string(),
            file_parts: vec![FILE_PART.to_string()],
            primary_file: FILE_PART.to_string(),
        }
    }
}

pub struct ModrinthClient<'a> {
    transport: &'a dyn Transport,
    config: &'a ModrinthConfig,
}

impl<'a> ModrinthClient<'a> {
    pub fn new(transport: &'a dyn Transport, config: &'a ModrinthConfig) -> Self {
        Self { transport, config }
    }

    fn version_url(&self) -> String {
        format!("{}/version", self.config.api_url.trim_end_matches('/'))
    }

    /// Create a new version of `project_id` with the release artifact attached.
    pub async fn upload(
        &self,
        release: &ReleaseDescriptor,
        project_id: &str,
        auth_token: &str,
    ) -> Result<()> {
        let data = VersionData::new(release, project_id, self.config);

        tracing::info!(
            "Uploading artifact {} (version {}) to Modrinth (Project ID {})",
            release.artifact_display(),
            release.version(),
            project_id
        );

        let form = UploadForm {
            file_field: FILE_PART.to_string(),
            file_name: release.artifact_name(),
            file_content: tokio::fs::read(release.artifact()).await?,
            json_field: "data".to_string(),
            json: serde_json::to_value(&data)?,
        };

        let response = self
            .transport
            .post_multipart(&self.version_url(), &[("Authorization", auth_token)], form)
            .await?;

        if !response.is_success() {
            tracing::error!("Modrinth responded with {}: {}", response.status, response.body);
            return Err(PublishError::UploadFailed {
                platform: "Modrinth".to_string(),
                status: response.status,
                body: response.body,
            });
        }

        tracing::debug!("Modrinth response: {}", response.body);
        tracing::info!("Successfully uploaded {} to Modrinth", release.version());
        Ok(())
    }
}
