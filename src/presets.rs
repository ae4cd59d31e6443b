use crate::config::{ReminderDef, StyleDef};
use std::collections::HashMap;
use std::sync::LazyLock;

/// A named bundle of rules that can be referenced from tripwire.yaml via `presets: ["name"]`
#[derive(Debug, Default)]
pub struct Preset {
    pub reminders: Vec<ReminderDef>,
    pub styles: Vec<StyleDef>,
}

/// Presets applied when the config does not list any
pub const DEFAULT_PRESETS: &[&str] = &["reminders", "styles"];

pub const DEBUGGING_PROMPT: &str = include_str!("prompts/debugging.md");
pub const INVESTIGATION_PROMPT: &str = include_str!("prompts/investigation.md");
pub const PROMPT_IMPROVEMENT_PROMPT: &str = include_str!("prompts/prompt_improvement.md");
pub const PLANNING_PROMPT: &str = include_str!("prompts/planning.md");
pub const PARALLEL_PROMPT: &str = include_str!("prompts/parallel.md");
pub const PLAN_REVIEW_PROMPT: &str = include_str!("prompts/plan_review.md");

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn reminder(label: &str, patterns: &[&str], message: &str) -> ReminderDef {
    ReminderDef {
        label: label.to_string(),
        patterns: strings(patterns),
        message: message.to_string(),
    }
}

fn style(style: &str, patterns: &[&str]) -> StyleDef {
    StyleDef {
        style: style.to_string(),
        patterns: strings(patterns),
    }
}

pub static PRESETS: LazyLock<HashMap<&'static str, Preset>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // Evaluated in this order; the first category with a hit wins in `first` mode
    m.insert(
        "reminders",
        Preset {
            reminders: vec![
                reminder(
                    "debugging",
                    &[
                        r"\b(debug|debugging|bug)\b",
                        r"\b(why.*not work|what.*wrong|not working)\b",
                        r"\b(stack trace|error message|exception|\^\^\^)\b",
                    ],
                    DEBUGGING_PROMPT,
                ),
                reminder(
                    "investigation",
                    &[
                        r"\b(investigate|research|analyze|examine|explore|understand)\b",
                        r"\b(how does.*work|figure out|explain|find out)\b",
                        r"\b(code review|audit|inspect)\b",
                    ],
                    INVESTIGATION_PROMPT,
                ),
                reminder(
                    "prompt-improvement",
                    &[
                        r"\b(improv|enhanc).*\b(prompt|prompting)\b",
                        r"\b(prompt|prompting).*\b(improv|enhanc)\b",
                        r"\b(better|optimize|refine).*\b(prompt|prompting)\b",
                        r"\b(prompt|prompting).*\b(better|optimize|refine)\b",
                    ],
                    PROMPT_IMPROVEMENT_PROMPT,
                ),
                reminder(
                    "planning",
                    &[
                        r"\b(make|create|develop|write|build).*\bplan\b",
                        r"\bplan\s+(out|for|the)\b",
                        r"\bplanning\s+(out|for|the)\b",
                        r"\b(implementation|feature|system)\s+plan\b",
                    ],
                    PLANNING_PROMPT,
                ),
                reminder(
                    "parallel",
                    &[
                        r"\b(parallel|parallelize|parallelization|concurrently|simultaneously)\b",
                        r"\bin parallel\b",
                        r"\bat the same time\b",
                        r"\bconcurrent execution\b",
                    ],
                    PARALLEL_PROMPT,
                ),
            ],
            styles: Vec::new(),
        },
    );

    // Planning takes precedence over the catch-all developer style
    m.insert(
        "styles",
        Preset {
            reminders: Vec::new(),
            styles: vec![
                style("Brainstorming", &[r"\b(brainstorm)\b"]),
                style("Business Panel", &[r"\b(business panel)\b"]),
                style("Deep Research", &[r"\b(deep research)\b"]),
                style(
                    "Planning",
                    &[
                        r"\b(plan out|make a plan|plan this|planning|create a plan|design a plan|map out|architect)\b",
                    ],
                ),
                style(
                    "Sr. Software Developer",
                    &[r"\b(implement|build|code|develop|fix|refactor|optimize|debug|deploy)\b"],
                ),
            ],
        },
    );

    m
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::GUIDE_PLACEHOLDER;
    use crate::matcher::TriggerRule;

    #[test]
    fn test_presets_exist() {
        for name in DEFAULT_PRESETS {
            assert!(PRESETS.contains_key(name), "missing preset {}", name);
        }
    }

    #[test]
    fn test_reminder_order() {
        let labels: Vec<&str> = PRESETS["reminders"]
            .reminders
            .iter()
            .map(|r| r.label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec![
                "debugging",
                "investigation",
                "prompt-improvement",
                "planning",
                "parallel"
            ]
        );
    }

    #[test]
    fn test_all_patterns_compile() {
        for (name, preset) in PRESETS.iter() {
            for r in &preset.reminders {
                for p in &r.patterns {
                    assert!(
                        TriggerRule::new(p, r.label.as_str()).is_ok(),
                        "preset {} reminder {} has bad pattern {}",
                        name,
                        r.label,
                        p
                    );
                }
            }
            for s in &preset.styles {
                for p in &s.patterns {
                    assert!(
                        TriggerRule::new(p, s.style.as_str()).is_ok(),
                        "preset {} style {} has bad pattern {}",
                        name,
                        s.style,
                        p
                    );
                }
            }
        }
    }

    #[test]
    fn test_only_guide_prompts_use_placeholder() {
        assert!(PARALLEL_PROMPT.contains(GUIDE_PLACEHOLDER));
        assert!(PLAN_REVIEW_PROMPT.contains(GUIDE_PLACEHOLDER));
        assert!(!DEBUGGING_PROMPT.contains(GUIDE_PLACEHOLDER));
        assert!(!PLANNING_PROMPT.contains(GUIDE_PLACEHOLDER));
    }
}
