use serde::Serialize;
use std::io::{self, Write};

/// JSON output understood by the Claude Code hook system
#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    /// Hide the hook's stdout from the transcript
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppress_output: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: String,
    pub additional_context: String,
}

/// What a hook wants written to stdout
#[derive(Debug, PartialEq)]
pub enum Response {
    /// No trigger: print nothing
    Silent,
    /// Plain text shown to the consumer as-is
    Text(String),
    Json(HookOutput),
}

impl Response {
    /// A message for the user that stays out of the model's context
    pub fn hidden_message(message: impl Into<String>) -> Self {
        Response::Json(HookOutput {
            suppress_output: Some(true),
            system_message: Some(message.into()),
            ..Default::default()
        })
    }

    /// Context injected into the model without appearing in the transcript
    pub fn additional_context(event: &str, context: impl Into<String>) -> Self {
        Response::Json(HookOutput {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: event.to_string(),
                additional_context: context.into(),
            }),
            ..Default::default()
        })
    }

    pub fn emit(&self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Response::Silent => return Ok(()),
            Response::Text(text) => writeln!(out, "{}", text)?,
            Response::Json(output) => {
                serde_json::to_writer(&mut *out, output)?;
                writeln!(out)?;
            }
        }
        out.flush()
    }
}
