use crate::config::{ReminderMode, TripwireConfig};
use crate::guide;
use crate::input::HookInput;
use crate::matcher::{first_match, match_any};
use crate::response::Response;
use tracing::{debug, info};

/// Print workflow guidance for every reminder category the prompt triggers.
pub fn run(input: &HookInput, config: &TripwireConfig) -> Response {
    let labels: Vec<&str> = match config.reminder_mode {
        ReminderMode::First => first_match(&input.prompt, &config.reminder_rules)
            .into_iter()
            .collect(),
        ReminderMode::All => match_any(&input.prompt, &config.reminder_rules),
    };

    if labels.is_empty() {
        debug!("reminder: no trigger");
        return Response::Silent;
    }
    info!(categories = ?labels, "reminder: triggered");

    let blocks: Vec<String> = labels
        .iter()
        .filter_map(|label| config.reminder_message(label))
        .map(|message| guide::interpolate(message, &config.guide_path).log())
        .collect();

    Response::Text(blocks.join("\n"))
}
