use crate::config::TripwireConfig;
use crate::dedup::{self, Pending};
use crate::guide;
use crate::input::HookInput;
use crate::response::Response;
use tracing::info;

const EXIT_PLAN_TOOL: &str = "ExitPlanMode";

/// Ask the model to parallelize a freshly drafted plan, once per distinct plan.
/// The returned `Pending` must be committed after the response is emitted.
pub fn run(input: &HookInput, config: &TripwireConfig) -> (Response, Option<Pending>) {
    if input.tool_name != EXIT_PLAN_TOOL {
        return (Response::Silent, None);
    }

    let plan = input.plan();
    if plan.is_empty() {
        info!("plan-review: ExitPlanMode called with an empty plan");
        return (Response::Silent, None);
    }

    let Some(pending) = dedup::should_proceed(plan, &config.state_path) else {
        info!("plan-review: plan unchanged, skipping");
        return (Response::Silent, None);
    };

    info!("plan-review: new plan, injecting review prompt");
    let prompt = guide::interpolate(&config.plan_review_message, &config.guide_path).log();
    (
        Response::additional_context("PostToolUse", prompt),
        Some(pending),
    )
}
