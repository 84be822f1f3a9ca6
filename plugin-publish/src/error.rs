use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse pom.xml: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No *.{extension} artifact found in {dir}")]
    ArtifactNotFound { dir: String, extension: String },

    #[error("Found {} artifacts matching *.{extension}, expected exactly one: {}", .candidates.len(), .candidates.join(", "))]
    AmbiguousArtifact {
        extension: String,
        candidates: Vec<String>,
    },

    #[error("Minecraft version '{version}' is not in the known version list (latest known: {latest})")]
    UnknownGameVersion { version: String, latest: String },

    #[error("Upload to {platform} failed: HTTP {status} - {body}")]
    UploadFailed {
        platform: String,
        status: u16,
        body: String,
    },

    #[error("{platform} project id is set but {variable} is missing")]
    MissingCredential { platform: String, variable: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PublishError>;
