use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;

mod config;
mod dedup;
mod degraded;
mod guide;
mod hooks;
mod input;
mod logging;
mod matcher;
mod presets;
mod response;
mod settings;

use input::HookInput;

/// Keyword-triggered Claude Code hooks. Reads one hook payload from stdin.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file (default: nearest .claude/tripwire.yaml, then $XDG_CONFIG_HOME/tripwire/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    hook: Hook,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Hook {
    /// UserPromptSubmit: inject workflow reminders for trigger words
    Reminder,
    /// UserPromptSubmit: switch the project's output style
    Style,
    /// PostToolUse: ask for a parallelized version of a new plan
    PlanReview,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let input = read_input()?;

    let config = config::load(cli.config.as_deref(), &input.cwd);
    logging::init(&config.value.log_path);
    let config = config.log();

    info!(
        hook = ?cli.hook,
        event = %input.hook_event_name,
        tool = %input.tool_name,
        "hook invoked"
    );

    let (response, pending) = match cli.hook {
        Hook::Reminder => (hooks::reminder::run(&input, &config), None),
        Hook::Style => (hooks::style::run(&input, &config), None),
        Hook::PlanReview => hooks::plan_review::run(&input, &config),
    };

    response.emit(&mut io::stdout().lock())?;
    // Only a delivered response counts as seen
    if let Some(pending) = pending {
        pending.commit();
    }
    Ok(())
}

fn read_input() -> Result<HookInput> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read hook input")?;
    HookInput::parse(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_hooks() {
        let cli = Cli::try_parse_from(["tripwire", "plan-review"]).unwrap();
        assert!(matches!(cli.hook, Hook::PlanReview));
        assert!(cli.config.is_none());

        let cli = Cli::try_parse_from(["tripwire", "style", "--config", "/tmp/t.yaml"]).unwrap();
        assert!(matches!(cli.hook, Hook::Style));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/t.yaml")));
    }

    #[test]
    fn test_cli_requires_hook() {
        assert!(Cli::try_parse_from(["tripwire"]).is_err());
        assert!(Cli::try_parse_from(["tripwire", "unknown"]).is_err());
    }
}
