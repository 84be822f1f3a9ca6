//! # plugin-publish
//!
//! Publishes a Bukkit plugin release to Modrinth and CurseForge from CI.
//!
//! ## Overview
//!
//! A single run locates the built jar under `target/`, reads the minimum
//! supported Minecraft version from `pom.xml`, derives the list of supported
//! versions, extracts the matching `CHANGELOG.md` section and uploads the jar
//! to every platform whose project id is configured.
//!
//! ## Usage
//!
//! ```bash
//! # GitLab CI provides CI_PROJECT_DIR and CI_COMMIT_TAG
//! MODRINTH_PROJECT_ID=AbCdEf12 MODRINTH_AUTH=... plugin-publish
//!
//! # Explicit arguments, nothing uploaded
//! plugin-publish --root . --release-version 1.2.0 --dry-run
//! ```
//!
//! ## Changelog Format
//!
//! Sections are level-2 headings of the form `## 1.2.0 (2023-01-01)`. The
//! body of the section matching the release version becomes the release
//! notes and is also written to `ci-release.md`.
//!
//! ## Configuration
//!
//! Optional settings live in `.config/publish.toml` in the project, or
//! `~/.config/plugin-publish.toml` for user-wide settings.

/// Artifact discovery and checksums
pub mod artifact;

/// Known Minecraft versions and version normalization
pub mod catalog;

/// Changelog section extraction
pub mod changelog;

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Configuration file handling and default settings management
pub mod config;

/// CurseForge upload client
pub mod curseforge;

/// Error types and error handling utilities
pub mod error;

/// `pom.xml` reading
pub mod manifest;

/// In-memory transport for tests
pub mod memory;

/// Modrinth upload client
pub mod modrinth;

/// Entry sequence tying release resolution and uploads together
pub mod publisher;

/// The release being published
pub mod release;

/// HTTP transport abstraction
pub mod transport;
