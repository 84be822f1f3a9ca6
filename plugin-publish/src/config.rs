use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::catalog::DEFAULT_MINIMUM_VERSION;
use crate::cli::AmbiguityPolicy;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub default: DefaultConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub modrinth: ModrinthConfig,

    #[serde(default)]
    pub curseforge: CurseForgeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DefaultConfig {
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,

    #[serde(default = "default_artifact_extension")]
    pub artifact_extension: String,

    #[serde(default)]
    pub on_ambiguous: AmbiguityPolicy,

    #[serde(default = "default_game_version")]
    pub default_game_version: String,

    #[serde(default = "default_release_notes_file")]
    pub release_notes_file: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for DefaultConfig {
    fn default() -> Self {
        Self {
            artifact_dir: default_artifact_dir(),
            artifact_extension: default_artifact_extension(),
            on_ambiguous: AmbiguityPolicy::default(),
            default_game_version: default_game_version(),
            release_notes_file: default_release_notes_file(),
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct CatalogConfig {
    /// Versions released after the built-in list, oldest first
    #[serde(default)]
    pub extra_versions: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModrinthConfig {
    #[serde(default = "default_modrinth_api_url")]
    pub api_url: String,

    #[serde(default = "default_loaders")]
    pub loaders: Vec<String>,

    #[serde(default = "default_release_type")]
    pub version_type: String,

    #[serde(default = "default_featured")]
    pub featured: bool,
}

impl Default for ModrinthConfig {
    fn default() -> Self {
        Self {
            api_url: default_modrinth_api_url(),
            loaders: default_loaders(),
            version_type: default_release_type(),
            featured: default_featured(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CurseForgeConfig {
    #[serde(default = "default_curseforge_api_url")]
    pub api_url: String,

    /// `gameVersionTypeID` of the entries that count as Minecraft versions
    #[serde(default = "default_game_version_type_id")]
    pub game_version_type_id: u64,

    #[serde(default = "default_release_type")]
    pub release_type: String,
}

impl Default for CurseForgeConfig {
    fn default() -> Self {
        Self {
            api_url: default_curseforge_api_url(),
            game_version_type_id: default_game_version_type_id(),
            release_type: default_release_type(),
        }
    }
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("target")
}

fn default_artifact_extension() -> String {
    "jar".to_string()
}

fn default_game_version() -> String {
    DEFAULT_MINIMUM_VERSION.to_string()
}

fn default_release_notes_file() -> String {
    "ci-release.md".to_string()
}

fn default_timeout() -> u64 {
    300
}

fn default_modrinth_api_url() -> String {
    "https://api.modrinth.com/v2".to_string()
}

fn default_loaders() -> Vec<String> {
    vec![
        "bukkit".to_string(),
        "paper".to_string(),
        "spigot".to_string(),
    ]
}

fn default_release_type() -> String {
    "release".to_string()
}

fn default_featured() -> bool {
    true
}

fn default_curseforge_api_url() -> String {
    "https://minecraft.curseforge.com/api".to_string()
}

fn default_game_version_type_id() -> u64 {
    1
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the user-wide configuration file path
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("plugin-publish.toml"))
            .unwrap_or_else(|| PathBuf::from("~/.config/plugin-publish.toml"))
    }

    /// Load the project file if present, otherwise the user-wide one.
    pub fn discover(project_path: Option<&Path>) -> Result<Self> {
        match project_path {
            Some(path) if path.exists() => Self::load(path),
            _ => Self::load(&Self::default_path()),
        }
    }

    /// Merge configuration with command line arguments
    pub fn merge_with_args(&self, args: &mut crate::cli::Args) {
        if args.on_ambiguous.is_none() {
            args.on_ambiguous = Some(self.default.on_ambiguous);
        }
    }
}
