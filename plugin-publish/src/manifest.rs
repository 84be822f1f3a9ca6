use std::path::Path;

use crate::error::Result;

const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
const API_VERSION_PROPERTY: &str = "bukkit-api-version";

/// Read `<properties><bukkit-api-version>` from a Maven `pom.xml`.
///
/// Returns `Ok(None)` when the property is missing or blank.
pub fn read_api_version(path: &Path) -> Result<Option<String>> {
    let content = std::fs::read_to_string(path)?;
    parse_api_version(&content)
}

pub fn parse_api_version(content: &str) -> Result<Option<String>> {
    let document = roxmltree::Document::parse(content)?;

    let version = document
        .root_element()
        .children()
        .find(|n| n.has_tag_name((POM_NAMESPACE, "properties")))
        .and_then(|properties| {
            properties
                .children()
                .find(|n| n.has_tag_name((POM_NAMESPACE, API_VERSION_PROPERTY)))
        })
        .and_then(|node| node.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string);

    Ok(version)
}
