pub mod plan_review;
pub mod reminder;
pub mod style;
