use std::collections::BTreeMap;
use std::path::Path;

/// Name of the build-properties file alongside `Publish.toml`.
pub const PROPERTIES_FILENAME: &str = ".stagehand.env";

/// Loads a `.stagehand.env` file (shell-style `KEY=value` format).
///
/// `.stagehand.env` holds build properties and secrets (signing key and
/// passphrase, repository credentials). Values are available via
/// `${env:VAR}` interpolation in `Publish.toml` and take precedence over
/// process environment variables during credential resolution.
pub fn load_properties(path: &Path) -> miette::Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    if !path.is_file() {
        return Ok(map);
    }
    let content =
        std::fs::read_to_string(path).map_err(stagehand_util::errors::StagehandError::Io)?;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = trimmed.split_once('=') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    Ok(map)
}

/// Interpolate `${env:VAR}` references in a string.
///
/// Looks up values first from the provided `properties` map (populated from
/// `.stagehand.env`), then falls back to actual process environment
/// variables. Unresolvable references become empty strings; required values
/// are enforced later by [`crate::credentials`] and manifest validation.
pub fn interpolate(input: &str, properties: &BTreeMap<String, String>) -> String {
    let mut result = input.to_string();
    while let Some(start) = result.find("${env:") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let end = start + end;
        let key = &result[start + 6..end];
        let value = properties
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
            .unwrap_or_default();
        result.replace_range(start..=end, &value);
    }
    result
}
