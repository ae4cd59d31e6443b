use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

pub type SettingsDocument = Map<String, Value>;

/// Read the settings document. Absent, unreadable or non-object files read
/// as an empty document.
pub fn read(path: &Path) -> SettingsDocument {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return SettingsDocument::new(),
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(doc)) => doc,
        _ => {
            debug!(path = %path.display(), "settings file is not a JSON object, treating as empty");
            SettingsDocument::new()
        }
    }
}

/// Set one key, leaving every other key untouched.
/// Returns false without writing when the key already holds `value`.
pub fn write(path: &Path, key: &str, value: Value) -> Result<bool> {
    let mut doc = read(path);

    if doc.get(key) == Some(&value) {
        return Ok(false);
    }
    doc.insert(key.to_string(), value);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(&doc)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write settings: {}", path.display()))?;

    Ok(true)
}
