use crate::models::{ActivityEntry, BudgetTier, DayKind, DayPlan, DestinationProfile, Locale, StyleTag};
use crate::phrasebook::{fill, phrasebook, Phrasebook, Slot};
use crate::random::{pick_from, RandomSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiningLevel {
    Premium,
    Standard,
    Budget,
}

impl DiningLevel {
    /// Unknown budget labels dine at the budget level.
    pub fn for_tier(tier: Option<BudgetTier>) -> Self {
        match tier {
            Some(BudgetTier::TwoMPlus) => Self::Premium,
            Some(BudgetTier::OneToTwoM) => Self::Standard,
            Some(BudgetTier::Under1M) | None => Self::Budget,
        }
    }
}

pub fn day_kind(day: u32, total_days: u32) -> DayKind {
    if day == 1 {
        DayKind::Arrival
    } else if day == total_days {
        DayKind::Departure
    } else {
        DayKind::Middle
    }
}

pub fn plan_day<R>(
    day: u32,
    total_days: u32,
    profile: &DestinationProfile,
    styles: &[StyleTag],
    budget: Option<BudgetTier>,
    locale: Locale,
    rng: &mut R,
) -> DayPlan
where
    R: RandomSource + ?Sized,
{
    let copy = phrasebook(locale);
    let kind = day_kind(day, total_days);

    let entries = match kind {
        DayKind::Arrival => arrival_entries(copy, profile),
        DayKind::Departure => {
            let food = pick_from(rng, &profile.foods)
                .map(String::as_str)
                .unwrap_or_default();
            departure_entries(copy, food)
        }
        DayKind::Middle => middle_entries(copy, day, profile, styles, budget),
    };

    DayPlan { day, kind, entries }
}

fn arrival_entries(copy: &Phrasebook, profile: &DestinationProfile) -> Vec<ActivityEntry> {
    let [check_in, tasting, sightseeing, evening] = copy.arrival;
    vec![
        entry(check_in, None),
        entry(tasting, Some(("{food}", cyclic(&profile.foods, 0)))),
        entry(sightseeing, Some(("{attraction}", cyclic(&profile.attractions, 0)))),
        entry(evening, None),
    ]
}

fn departure_entries(copy: &Phrasebook, food: &str) -> Vec<ActivityEntry> {
    let [shopping, last_meal, transfer] = copy.departure;
    vec![
        entry(shopping, None),
        entry(last_meal, Some(("{food}", food))),
        entry(transfer, None),
    ]
}

fn middle_entries(
    copy: &Phrasebook,
    day: u32,
    profile: &DestinationProfile,
    styles: &[StyleTag],
    budget: Option<BudgetTier>,
) -> Vec<ActivityEntry> {
    let index = day as usize;
    let morning_spot = cyclic(&profile.attractions, index);
    let afternoon_spot = cyclic(&profile.attractions, index + 1);
    let food = cyclic(&profile.foods, index);

    let guide = if budget == Some(BudgetTier::TwoMPlus) {
        copy.private_guide
    } else {
        copy.self_guided
    };
    let dining = match DiningLevel::for_tier(budget) {
        DiningLevel::Premium => copy.dining_premium,
        DiningLevel::Standard => copy.dining_standard,
        DiningLevel::Budget => copy.dining_budget,
    };

    let [morning, lunch, afternoon, evening] = copy.middle;
    vec![
        ActivityEntry {
            time: morning.time.to_string(),
            title: fill(morning.title, "{attraction}", morning_spot),
            description: fill(morning.description, "{guide}", guide),
        },
        entry(lunch, Some(("{food}", food))),
        ActivityEntry {
            time: afternoon.time.to_string(),
            title: fill(afternoon.title, "{attraction}", afternoon_spot),
            description: fill(afternoon.description, "{style}", style_description(copy, styles)),
        },
        entry(evening, Some(("{dining}", dining))),
    ]
}

/// Relaxation beats couple beats family, regardless of selection order.
fn style_description(copy: &Phrasebook, styles: &[StyleTag]) -> &'static str {
    if styles.contains(&StyleTag::Relaxation) {
        copy.style_relaxation
    } else if styles.contains(&StyleTag::Couple) {
        copy.style_couple
    } else if styles.contains(&StyleTag::Family) {
        copy.style_family
    } else {
        copy.style_default
    }
}

fn entry(slot: Slot, substitution: Option<(&str, &str)>) -> ActivityEntry {
    let (title, description) = match substitution {
        Some((key, value)) => (fill(slot.title, key, value), fill(slot.description, key, value)),
        None => (slot.title.to_string(), slot.description.to_string()),
    };
    ActivityEntry {
        time: slot.time.to_string(),
        title,
        description,
    }
}

fn cyclic(items: &[String], index: usize) -> &str {
    if items.is_empty() {
        return "";
    }
    &items[index % items.len()]
}
