use crate::degraded::Degraded;
use crate::matcher::TriggerRule;
use crate::presets::{Preset, DEFAULT_PRESETS, PLAN_REVIEW_PROMPT, PRESETS};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".claude";
const CONFIG_FILENAME: &str = "tripwire.yaml";

/// Style assumed when the settings file has no outputStyle
pub const DEFAULT_STYLE: &str = "Sr. Software Developer";

/// How many reminder categories may fire for one prompt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderMode {
    /// Only the first matching category, in declaration order
    #[default]
    First,
    /// Every matching category
    All,
}

/// A reminder category as written in config or presets
#[derive(Debug, Clone, Deserialize)]
pub struct ReminderDef {
    /// Category name (for logs and error messages)
    pub label: String,
    /// Any of these patterns triggers the category
    pub patterns: Vec<String>,
    /// Text injected on match; `{guide}` is replaced with the shared guide
    pub message: String,
}

/// An output style and the keywords that select it
#[derive(Debug, Clone, Deserialize)]
pub struct StyleDef {
    pub style: String,
    pub patterns: Vec<String>,
}

/// Raw configuration structure (as parsed from YAML)
#[derive(Debug, Default, Deserialize)]
struct TripwireConfigRaw {
    /// Built-in preset names to include
    presets: Option<Vec<String>>,
    reminder_mode: Option<ReminderMode>,
    /// Custom reminder categories, evaluated after presets
    reminders: Option<Vec<ReminderDef>>,
    /// Custom styles, evaluated after presets
    styles: Option<Vec<StyleDef>>,
    default_style: Option<String>,
    guide_path: Option<String>,
    state_path: Option<String>,
    log_path: Option<String>,
    plan_review_message: Option<String>,
}

#[derive(Debug)]
pub struct Reminder {
    pub label: String,
    pub message: String,
}

/// Resolved configuration (presets expanded, patterns compiled)
#[derive(Debug)]
pub struct TripwireConfig {
    pub reminder_mode: ReminderMode,
    pub reminders: Vec<Reminder>,
    /// One rule per reminder pattern, labelled with its category
    pub reminder_rules: Vec<TriggerRule>,
    /// One rule per style pattern, labelled with the style name
    pub style_rules: Vec<TriggerRule>,
    pub default_style: String,
    pub guide_path: PathBuf,
    pub state_path: PathBuf,
    pub log_path: PathBuf,
    pub plan_review_message: String,
}

impl TripwireConfig {
    /// Built-in presets with default paths
    pub fn defaults() -> Self {
        resolve(TripwireConfigRaw::default(), None).unwrap_or_else(|_| Self {
            reminder_mode: ReminderMode::default(),
            reminders: Vec::new(),
            reminder_rules: Vec::new(),
            style_rules: Vec::new(),
            default_style: DEFAULT_STYLE.to_string(),
            guide_path: default_guide_path(),
            state_path: default_state_path(),
            log_path: default_log_path(),
            plan_review_message: PLAN_REVIEW_PROMPT.to_string(),
        })
    }

    pub fn reminder_message(&self, label: &str) -> Option<&str> {
        self.reminders
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.message.as_str())
    }
}

fn default_guide_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".claude")
        .join("guides")
        .join("parallel.md")
}

fn default_state_path() -> PathBuf {
    std::env::temp_dir().join("tripwire-plan.state")
}

fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("tripwire.log")
}

/// Expand a leading `~` to the home directory
fn expand_home(path: &str) -> PathBuf {
    let home = || dirs::home_dir().unwrap_or_default();
    if path == "~" {
        home()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home().join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Get the user-wide config path, $XDG_CONFIG_HOME/tripwire/config.yaml
fn get_xdg_config_path() -> PathBuf {
    let xdg_config = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs::home_dir().unwrap_or_default().join(".config"));

    xdg_config.join("tripwire").join("config.yaml")
}

/// Resolves preset names to their definitions
fn resolve_presets(preset_names: &[String], origin: &str) -> Result<Vec<&'static Preset>> {
    let mut presets = Vec::new();

    for name in preset_names {
        match PRESETS.get(name.as_str()) {
            Some(preset) => presets.push(preset),
            None => bail!("Invalid config at {}: preset '{}' not found", origin, name),
        }
    }

    Ok(presets)
}

fn validate_reminder(reminder: &ReminderDef, origin: &str) -> Result<()> {
    if reminder.label.is_empty() {
        bail!("Invalid config at {}: reminder missing 'label'", origin);
    }
    if reminder.patterns.is_empty() {
        bail!(
            "Invalid config at {}: reminder '{}' missing 'patterns'",
            origin,
            reminder.label
        );
    }
    if reminder.message.trim().is_empty() {
        bail!(
            "Invalid config at {}: reminder '{}' missing 'message'",
            origin,
            reminder.label
        );
    }
    Ok(())
}

fn validate_style(style: &StyleDef, origin: &str) -> Result<()> {
    if style.style.is_empty() {
        bail!("Invalid config at {}: style missing 'style'", origin);
    }
    if style.patterns.is_empty() {
        bail!(
            "Invalid config at {}: style '{}' missing 'patterns'",
            origin,
            style.style
        );
    }
    Ok(())
}

fn resolve(raw: TripwireConfigRaw, config_path: Option<&Path>) -> Result<TripwireConfig> {
    let origin = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());

    let preset_names = raw
        .presets
        .unwrap_or_else(|| DEFAULT_PRESETS.iter().map(|s| s.to_string()).collect());
    let presets = resolve_presets(&preset_names, &origin)?;

    let user_reminders = raw.reminders.unwrap_or_default();
    let user_styles = raw.styles.unwrap_or_default();

    // Validate user entries (preset entries are trusted)
    for reminder in &user_reminders {
        validate_reminder(reminder, &origin)?;
    }
    for style in &user_styles {
        validate_style(style, &origin)?;
    }

    // Merge: presets first, then user entries
    let reminder_defs = presets
        .iter()
        .flat_map(|p| p.reminders.iter())
        .chain(user_reminders.iter());
    let style_defs = presets
        .iter()
        .flat_map(|p| p.styles.iter())
        .chain(user_styles.iter());

    let mut reminders: Vec<Reminder> = Vec::new();
    let mut reminder_rules = Vec::new();
    for def in reminder_defs {
        if reminders.iter().any(|r| r.label == def.label) {
            bail!(
                "Invalid config at {}: reminder '{}' defined more than once",
                origin,
                def.label
            );
        }
        for pattern in &def.patterns {
            let rule = TriggerRule::new(pattern, def.label.as_str())
                .with_context(|| format!("Invalid config at {}", origin))?;
            reminder_rules.push(rule);
        }
        reminders.push(Reminder {
            label: def.label.clone(),
            message: def.message.clone(),
        });
    }

    let mut style_rules = Vec::new();
    for def in style_defs {
        for pattern in &def.patterns {
            let rule = TriggerRule::new(pattern, def.style.as_str())
                .with_context(|| format!("Invalid config at {}", origin))?;
            style_rules.push(rule);
        }
    }

    Ok(TripwireConfig {
        reminder_mode: raw.reminder_mode.unwrap_or_default(),
        reminders,
        reminder_rules,
        style_rules,
        default_style: raw
            .default_style
            .unwrap_or_else(|| DEFAULT_STYLE.to_string()),
        guide_path: raw
            .guide_path
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(default_guide_path),
        state_path: raw
            .state_path
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(default_state_path),
        log_path: raw
            .log_path
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(default_log_path),
        plan_review_message: raw
            .plan_review_message
            .unwrap_or_else(|| PLAN_REVIEW_PROMPT.to_string()),
    })
}

/// Loads and parses a tripwire.yaml config file.
/// Resolves presets and merges them with custom rules.
pub fn load_config(config_path: &Path) -> Result<TripwireConfig> {
    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

    let parsed: TripwireConfigRaw = if content.trim().is_empty() {
        TripwireConfigRaw::default()
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", config_path.display()))?
    };

    resolve(parsed, Some(config_path))
}

/// Finds the nearest .claude/tripwire.yaml by walking up from a directory.
pub fn find_nearest_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILENAME);
        if config_path.is_file() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Pick the config file for this invocation: explicit path, then the
/// project's nearest config, then the user-wide one.
fn locate_config(explicit: Option<&Path>, cwd: &str) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if !cwd.is_empty() {
        if let Some(path) = find_nearest_config(Path::new(cwd)) {
            return Some(path);
        }
    }

    let xdg = get_xdg_config_path();
    xdg.is_file().then_some(xdg)
}

/// Load configuration for a hook run. A broken config file never fails the
/// hook: the built-in defaults are used and the problem is reported as a warning.
pub fn load(explicit: Option<&Path>, cwd: &str) -> Degraded<TripwireConfig> {
    let Some(path) = locate_config(explicit, cwd) else {
        return Degraded::ok(TripwireConfig::defaults());
    };

    match load_config(&path) {
        Ok(config) => Degraded::ok(config),
        Err(e) => Degraded::fallback(
            TripwireConfig::defaults(),
            format!("Ignoring config {}: {:#}", path.display(), e),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::first_match;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_include_presets() {
        let config = TripwireConfig::defaults();
        assert_eq!(config.reminder_mode, ReminderMode::First);
        assert_eq!(config.reminders.len(), 5);
        assert!(config.reminder_message("debugging").is_some());
        assert_eq!(config.default_style, DEFAULT_STYLE);
        assert!(config.guide_path.ends_with(".claude/guides/parallel.md"));
        assert_eq!(
            first_match("let's brainstorm", &config.style_rules),
            Some("Brainstorming")
        );
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "");

        let config = load_config(&path).unwrap();
        assert_eq!(config.reminders.len(), 5);
    }

    #[test]
    fn test_custom_reminder_after_presets() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            temp.path(),
            r#"
reminder_mode: all
reminders:
  - label: testing
    patterns: ['\btests?\b']
    message: "Run the test suite."
"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.reminder_mode, ReminderMode::All);
        assert_eq!(config.reminders.len(), 6);
        assert_eq!(config.reminders[5].label, "testing");
        assert_eq!(config.reminder_message("testing"), Some("Run the test suite."));
    }

    #[test]
    fn test_presets_can_be_disabled() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            temp.path(),
            r#"
presets: []
styles:
  - style: Reviewer
    patterns: ['\breview\b']
"#,
        );

        let config = load_config(&path).unwrap();
        assert!(config.reminders.is_empty());
        assert!(config.reminder_rules.is_empty());
        assert_eq!(config.style_rules.len(), 1);
        assert_eq!(first_match("review this", &config.style_rules), Some("Reviewer"));
        assert_eq!(first_match("brainstorm", &config.style_rules), None);
    }

    #[test]
    fn test_paths_and_style_overrides() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            temp.path(),
            r#"
default_style: Planning
guide_path: /opt/guides/parallel.md
state_path: /var/tmp/plan.state
log_path: ~/tripwire.log
plan_review_message: "Review: {guide}"
"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.default_style, "Planning");
        assert_eq!(config.guide_path, PathBuf::from("/opt/guides/parallel.md"));
        assert_eq!(config.state_path, PathBuf::from("/var/tmp/plan.state"));
        assert!(config.log_path.ends_with("tripwire.log"));
        assert!(!config.log_path.starts_with("~"));
        assert_eq!(config.plan_review_message, "Review: {guide}");
    }

    #[test]
    fn test_unknown_preset_fails() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "presets: [nope]\n");

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("preset 'nope' not found"));
    }

    #[test]
    fn test_invalid_regex_fails() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            temp.path(),
            r#"
styles:
  - style: Broken
    patterns: ['(unclosed']
"#,
        );

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_reminder_without_message_fails() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            temp.path(),
            r#"
reminders:
  - label: empty
    patterns: ['x']
    message: "  "
"#,
        );

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_duplicate_reminder_label_fails() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            temp.path(),
            r#"
reminders:
  - label: debugging
    patterns: ['oops']
    message: "again"
"#,
        );

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_find_nearest_config_walks_up() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let deep = root.join("src/lib");
        fs::create_dir_all(&deep).unwrap();
        fs::create_dir_all(root.join(CONFIG_DIR)).unwrap();
        let config_path = root.join(CONFIG_DIR).join(CONFIG_FILENAME);
        fs::write(&config_path, "reminder_mode: all\n").unwrap();

        assert_eq!(find_nearest_config(&deep), Some(config_path));
    }

    #[test]
    fn test_load_explicit_config() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "reminder_mode: all\n");

        let loaded = load(Some(&path), "");
        assert!(!loaded.is_degraded());
        assert_eq!(loaded.value.reminder_mode, ReminderMode::All);
    }

    #[test]
    fn test_load_broken_config_falls_back() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "reminder_mode: [not, a, mode]\n");

        let loaded = load(Some(&path), "");
        assert!(loaded.is_degraded());
        assert_eq!(loaded.value.reminder_mode, ReminderMode::First);
        assert_eq!(loaded.value.reminders.len(), 5);
    }

    #[test]
    fn test_load_missing_explicit_config_falls_back() {
        let temp = TempDir::new().unwrap();
        let loaded = load(Some(&temp.path().join("missing.yaml")), "");
        assert!(loaded.is_degraded());
    }
}
