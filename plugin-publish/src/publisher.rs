use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use crate::artifact;
use crate::catalog::VersionCatalog;
use crate::cli::Args;
use crate::config::Config;
use crate::curseforge::CurseForgeClient;
use crate::error::PublishError;
use crate::modrinth::{ModrinthClient, VersionData};
use crate::release::ReleaseDescriptor;
use crate::transport::{ReqwestTransport, Transport};

/// An upload target with both its project id and token resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub project_id: String,
    pub token: String,
}

/// Pair a project id with its token.
///
/// No project id means the platform is skipped. A project id without a
/// token is an error.
fn target(
    platform: &str,
    project_id: Option<&String>,
    token: Option<&String>,
    token_variable: &str,
) -> Result<Option<Target>, PublishError> {
    match (project_id, token) {
        (None, _) => Ok(None),
        (Some(project_id), Some(token)) => Ok(Some(Target {
            project_id: project_id.clone(),
            token: token.clone(),
        })),
        (Some(_), None) => Err(PublishError::MissingCredential {
            platform: platform.to_string(),
            variable: token_variable.to_string(),
        }),
    }
}

pub struct Publisher {
    args: Args,
    config: Config,
    catalog: VersionCatalog,
    transport: Arc<dyn Transport>,
}

impl Publisher {
    pub fn new(mut args: Args) -> Result<Self> {
        let config = Config::discover(args.config_path().as_deref())
            .context("Failed to load configuration")?;

        config.merge_with_args(&mut args);

        let transport = ReqwestTransport::new(Duration::from_secs(config.default.timeout))?;

        Ok(Self::with_transport(args, config, Arc::new(transport)))
    }

    /// Build a publisher around an explicit configuration and transport.
    pub fn with_transport(args: Args, config: Config, transport: Arc<dyn Transport>) -> Self {
        let catalog = VersionCatalog::default().extended(config.catalog.extra_versions.clone());

        Self {
            args,
            config,
            catalog,
            transport,
        }
    }

    pub fn modrinth_target(&self) -> Result<Option<Target>, PublishError> {
        target(
            "Modrinth",
            self.args.modrinth_project.as_ref(),
            self.args.modrinth_token.as_ref(),
            "MODRINTH_AUTH",
        )
    }

    pub fn curseforge_target(&self) -> Result<Option<Target>, PublishError> {
        target(
            "CurseForge",
            self.args.curseforge_project.as_ref(),
            self.args.curseforge_token.as_ref(),
            "CURSEFORGE_API_TOKEN",
        )
    }

    pub fn load_release(&self) -> Result<ReleaseDescriptor> {
        let release = ReleaseDescriptor::load(
            &self.args.root,
            &self.args.version,
            &self.config.default,
            self.args.on_ambiguous.unwrap_or(self.config.default.on_ambiguous),
            &self.catalog,
        )
        .with_context(|| format!("Failed to prepare release {}", self.args.version))?;

        Ok(release)
    }

    pub async fn run(&self) -> Result<ReleaseDescriptor> {
        tracing::info!("Publishing release {}", self.args.version);

        // Both checked before anything is uploaded
        let modrinth = self.modrinth_target()?;
        let curseforge = self.curseforge_target()?;

        let release = self.load_release()?;
        tracing::info!(
            "Artifact {} (sha256 {})",
            release.artifact_display(),
            artifact::sha256_hex(release.artifact())?
        );

        if self.args.save_changelog {
            release
                .save_changelog()
                .context("Failed to write release notes")?;
        }

        match modrinth {
            Some(target) if self.args.dry_run => {
                let data = VersionData::new(&release, &target.project_id, &self.config.modrinth);
                tracing::info!(
                    "Dry run: would upload to Modrinth with {}",
                    serde_json::to_string_pretty(&data)?
                );
            }
            Some(target) => {
                ModrinthClient::new(self.transport.as_ref(), &self.config.modrinth)
                    .upload(&release, &target.project_id, &target.token)
                    .await
                    .context("Modrinth upload failed")?;
            }
            None => tracing::debug!("MODRINTH_PROJECT_ID not set, skipping Modrinth"),
        }

        match curseforge {
            Some(target) if self.args.dry_run => {
                tracing::info!(
                    "Dry run: would upload to CurseForge project {} for Minecraft {:?}",
                    target.project_id,
                    release.game_versions()
                );
            }
            Some(target) => {
                CurseForgeClient::new(self.transport.as_ref(), &self.config.curseforge)
                    .upload(&release, &target.project_id, &target.token)
                    .await
                    .context("CurseForge upload failed")?;
            }
            None => tracing::debug!("CURSEFORGE_PROJECT_ID not set, skipping CurseForge"),
        }

        tracing::info!("Release {} published", release.version());
        Ok(release)
    }
}
