use crate::models::{BudgetTier, Locale, TipsBlock};
use crate::phrasebook::phrasebook;
use crate::random::{pick_from, RandomSource};

pub const GENERAL_TIP_DRAWS: usize = 3;

/// Three general tips sampled with replacement, then every tip of the
/// budget tier. Unknown tiers get the `1-2M` tips.
pub fn build_tips<R>(budget: Option<BudgetTier>, locale: Locale, rng: &mut R) -> TipsBlock
where
    R: RandomSource + ?Sized,
{
    let copy = phrasebook(locale);

    let general = (0..GENERAL_TIP_DRAWS)
        .filter_map(|_| pick_from(rng, &copy.general_tips))
        .map(|tip| tip.to_string())
        .collect();

    let budget_tips = match budget.unwrap_or(BudgetTier::OneToTwoM) {
        BudgetTier::Under1M => &copy.tips_under_1m,
        BudgetTier::OneToTwoM => &copy.tips_1_2m,
        BudgetTier::TwoMPlus => &copy.tips_2m_plus,
    };

    TipsBlock {
        heading: copy.tips_heading.to_string(),
        general,
        budget: budget_tips.iter().map(|tip| tip.to_string()).collect(),
    }
}
