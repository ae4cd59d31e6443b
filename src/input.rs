use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Input JSON from Claude Code hook system.
///
/// Every field is optional on the wire; missing, null or non-string values
/// become empty strings. Unread fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HookInput {
    #[serde(deserialize_with = "lenient_string")]
    pub hook_event_name: String,
    /// Prompt text (only present for UserPromptSubmit events)
    #[serde(deserialize_with = "lenient_string")]
    pub prompt: String,
    #[serde(deserialize_with = "lenient_string")]
    pub cwd: String,
    /// Tool name (only present for PreToolUse/PostToolUse events)
    #[serde(deserialize_with = "lenient_string")]
    pub tool_name: String,
    pub tool_input: Value,
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

impl HookInput {
    /// Parse a hook payload. Only non-JSON input or a non-object top level is rejected.
    pub fn parse(buffer: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(buffer).context("Invalid JSON input")?;
        if !value.is_object() {
            bail!("Invalid JSON input: expected a JSON object");
        }
        let input = serde_json::from_value(value).context("Invalid JSON input")?;
        Ok(input)
    }

    /// Plan text submitted through ExitPlanMode, empty if absent.
    pub fn plan(&self) -> &str {
        self.tool_input
            .get("plan")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}
