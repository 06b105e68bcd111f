use crate::catalog::resolve;
use crate::models::{Itinerary, ItineraryHeader, TravelRequest};
use crate::phrasebook::{fill, phrasebook};
use crate::planner::plan_day;
use crate::random::RandomSource;
use crate::tips::build_tips;

/// Builds the whole itinerary for one request. The profile is resolved
/// once and shared by every day; `rng` is consulted for the departure-day
/// food and the general tips only.
pub fn assemble<R>(request: &TravelRequest, rng: &mut R) -> Itinerary
where
    R: RandomSource + ?Sized,
{
    let locale = request.locale;
    let profile = resolve(&request.destination, locale);
    let budget = request.budget_tier();
    let styles = request.style_tags();

    let days = (1..=request.days)
        .map(|day| plan_day(day, request.days, &profile, &styles, budget, locale, rng))
        .collect();

    let tips = build_tips(budget, locale, rng);

    Itinerary {
        locale,
        header: build_header(request),
        profile,
        days,
        tips,
    }
}

pub fn build_header(request: &TravelRequest) -> ItineraryHeader {
    let copy = phrasebook(request.locale);

    let styles_label = if request.styles.is_empty() {
        copy.default_styles.to_string()
    } else {
        request.styles.join(", ")
    };

    let title = fill(copy.title, "{days}", &request.days.to_string());
    let title = fill(&title, "{destination}", &request.destination);

    ItineraryHeader {
        title,
        destination: request.destination.clone(),
        days: request.days,
        party_label: fill(copy.party, "{count}", &request.party_size.to_string()),
        styles_label,
        budget_label: request.budget.clone(),
        traveler_label: format!("{} {}", request.age_bracket, request.gender)
            .trim()
            .to_string(),
    }
}
