use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

/// A regex paired with the label it assigns to matching text
#[derive(Debug, Clone)]
pub struct TriggerRule {
    pattern: Regex,
    label: String,
}

impl TriggerRule {
    /// Compile a case-insensitive rule.
    pub fn new(pattern: &str, label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .with_context(|| format!("Invalid pattern '{}' for '{}'", pattern, label))?;
        Ok(Self { pattern, label })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Label of the first rule, in declaration order, that matches anywhere in `text`.
pub fn first_match<'a>(text: &str, rules: &'a [TriggerRule]) -> Option<&'a str> {
    rules
        .iter()
        .find(|rule| rule.is_match(text))
        .map(TriggerRule::label)
}

/// Labels of every matching rule. Each label appears once, ordered by first declaration.
pub fn match_any<'a>(text: &str, rules: &'a [TriggerRule]) -> Vec<&'a str> {
    let mut labels: Vec<&str> = Vec::new();
    for rule in rules {
        if !labels.contains(&rule.label()) && rule.is_match(text) {
            labels.push(rule.label());
        }
    }
    labels
}
