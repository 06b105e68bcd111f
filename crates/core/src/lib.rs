pub mod catalog;
pub mod itinerary;
pub mod models;
mod phrasebook;
pub mod planner;
pub mod random;
pub mod render;
pub mod tips;
pub mod validation;

pub use catalog::{group_for, resolve, DestinationGroup};
pub use itinerary::{assemble, build_header};
pub use models::*;
pub use planner::{day_kind, plan_day, DiningLevel};
pub use random::{pick_from, RandomSource, RngSource, ScriptedSource};
pub use render::{render_error_html, render_html, render_text};
pub use tips::build_tips;
pub use validation::{validate_request, RequestError, RequestLimits};
