use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(
    name = "plugin-publish",
    version,
    about = "Publish a plugin release to Modrinth and CurseForge",
    long_about = None
)]
pub struct PublishCli {
    /// Project root containing pom.xml, CHANGELOG.md and target/
    #[clap(long, env = "CI_PROJECT_DIR", default_value = ".")]
    pub root: PathBuf,

    /// Release version, usually the CI tag (e.g., 1.2.0)
    #[clap(long, env = "CI_COMMIT_TAG")]
    pub release_version: String,

    /// Modrinth project id; Modrinth is skipped when unset
    #[clap(long, env = "MODRINTH_PROJECT_ID")]
    pub modrinth_project: Option<String>,

    /// Modrinth authorization token
    #[clap(long, env = "MODRINTH_AUTH", hide_env_values = true)]
    pub modrinth_token: Option<String>,

    /// CurseForge project id; CurseForge is skipped when unset
    #[clap(long, env = "CURSEFORGE_PROJECT_ID")]
    pub curseforge_project: Option<String>,

    /// CurseForge API token
    #[clap(long, env = "CURSEFORGE_API_TOKEN", hide_env_values = true)]
    pub curseforge_token: Option<String>,

    /// What to do when several artifacts match
    #[clap(long, value_enum)]
    pub on_ambiguous: Option<AmbiguityPolicy>,

    /// Don't write the changelog excerpt to disk
    #[clap(long)]
    pub no_save_changelog: bool,

    /// Resolve everything and log the payloads without uploading
    #[clap(long)]
    pub dry_run: bool,

    /// Configuration file path (relative paths resolve against the root)
    #[clap(long, default_value = ".config/publish.toml")]
    pub config: PathBuf,

    /// Enable verbose output
    #[clap(long)]
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub struct Args {
    pub root: PathBuf,
    pub version: String,
    pub modrinth_project: Option<String>,
    pub modrinth_token: Option<String>,
    pub curseforge_project: Option<String>,
    pub curseforge_token: Option<String>,
    pub on_ambiguous: Option<AmbiguityPolicy>,
    pub save_changelog: bool,
    pub dry_run: bool,
    pub config: Option<PathBuf>,
    pub verbose: bool,
}

impl From<PublishCli> for Args {
    fn from(cli: PublishCli) -> Self {
        Args {
            root: cli.root,
            version: cli.release_version,
            modrinth_project: non_empty(cli.modrinth_project),
            modrinth_token: non_empty(cli.modrinth_token),
            curseforge_project: non_empty(cli.curseforge_project),
            curseforge_token: non_empty(cli.curseforge_token),
            on_ambiguous: cli.on_ambiguous,
            save_changelog: !cli.no_save_changelog,
            dry_run: cli.dry_run,
            config: Some(cli.config),
            verbose: cli.verbose,
        }
    }
}

/// CI systems export unset variables as empty strings.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Args {
    /// Minimal arguments for a root and version; every upload target unset.
    pub fn new(root: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Args {
            root: root.into(),
            version: version.into(),
            modrinth_project: None,
            modrinth_token: None,
            curseforge_project: None,
            curseforge_token: None,
            on_ambiguous: None,
            save_changelog: true,
            dry_run: false,
            config: None,
            verbose: false,
        }
    }

    /// Configuration file location, resolved against the project root.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.as_ref().map(|path| {
            if path.is_absolute() {
                path.clone()
            } else {
                self.root.join(path)
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AmbiguityPolicy {
    /// Take the first match in path order
    #[default]
    First,
    /// Fail the run
    Error,
}

impl std::fmt::Display for AmbiguityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AmbiguityPolicy::First => write!(f, "first"),
            AmbiguityPolicy::Error => write!(f, "error"),
        }
    }
}
