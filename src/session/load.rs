use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::record::SessionRecord;

/// Load a session from a YAML or JSON file.
///
/// Files ending in `.json` are read as JSON, everything else as YAML.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The content cannot be parsed
/// - The session fails validation (all problems are listed)
pub fn load_session(path: &Path) -> Result<SessionRecord> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read session file at {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let record: SessionRecord = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse session: invalid YAML in {}", path.display()))?
    };

    if let Err(errors) = record.validate() {
        anyhow::bail!(
            "Invalid session in {}:\n  - {}",
            path.display(),
            errors.join("\n  - ")
        );
    }

    Ok(record)
}
