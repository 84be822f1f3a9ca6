use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::Result;

const SECTION_MARKER: &str = "## ";

/// `<version> (<YYYY-MM-DD>)`, the text of a release heading.
static RELEASE_HEADING_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([0-9.]+) \((\d{4}-\d{2}-\d{2})\)$").ok());

/// Version named by a level-2 release heading, if the heading has that shape.
fn heading_version(line: &str) -> Option<&str> {
    let heading = line.trim_matches('#').trim();
    RELEASE_HEADING_PATTERN
        .as_ref()?
        .captures(heading)?
        .get(1)
        .map(|m| m.as_str())
}

/// Extract the body of the `## <version> (<date>)` section.
///
/// Lines are stripped; any level-2 heading ends the section. Returns `None`
/// when no such section exists or it has no content.
pub fn extract_section(content: &str, version: &str) -> Option<String> {
    let mut lines = Vec::new();
    let mut in_section = false;

    for line in content.lines().map(str::trim) {
        if line.starts_with(SECTION_MARKER) {
            in_section = heading_version(line) == Some(version);
            if in_section {
                tracing::debug!("Found version {} in changelog", version);
            }
        } else if in_section {
            lines.push(line);
        }
    }

    let excerpt = lines.join("\n").trim().to_string();
    (!excerpt.is_empty()).then_some(excerpt)
}

/// Read a changelog file and extract the section for `version`.
pub fn read_section(path: &Path, version: &str) -> Result<Option<String>> {
    tracing::info!("Reading changelog from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Ok(extract_section(&content, version))
}
