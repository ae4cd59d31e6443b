use crate::config::TripwireConfig;
use crate::input::HookInput;
use crate::matcher::first_match;
use crate::response::Response;
use crate::settings::{self, SettingsDocument};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const STYLE_KEY: &str = "outputStyle";

/// Project settings file holding the active output style
pub fn settings_path(cwd: &str) -> PathBuf {
    Path::new(cwd).join(".claude").join("settings.local.json")
}

/// Stored style as-is; the default only when the key is absent
fn current_style(doc: &SettingsDocument, default_style: &str) -> Value {
    doc.get(STYLE_KEY)
        .cloned()
        .unwrap_or_else(|| Value::String(default_style.to_string()))
}

fn describe(style: &Value) -> String {
    match style {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Switch the project's output style when the prompt asks for a different one.
pub fn run(input: &HookInput, config: &TripwireConfig) -> Response {
    if input.hook_event_name != "UserPromptSubmit" {
        return Response::Silent;
    }

    let Some(detected) = first_match(&input.prompt, &config.style_rules) else {
        debug!("style: no trigger");
        return Response::Silent;
    };

    let path = settings_path(&input.cwd);
    let doc = settings::read(&path);
    let current = current_style(&doc, &config.default_style);
    let wanted = Value::String(detected.to_string());

    if current == wanted {
        debug!(style = detected, "style: already active");
        return Response::Silent;
    }

    let current = describe(&current);
    match settings::write(&path, STYLE_KEY, wanted) {
        Ok(true) => {
            info!(from = %current, to = detected, "style: switched");
            Response::hidden_message(format!(
                "Output style switched from '{}' to '{}'",
                current, detected
            ))
        }
        Ok(false) => Response::Silent,
        Err(e) => {
            let error = format!("{:#}", e);
            warn!(error = %error, "style: failed to update settings");
            Response::Silent
        }
    }
}
