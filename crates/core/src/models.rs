use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl Locale {
    pub fn from_optional_str(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "en" || v == "en-us" || v == "english" => Self::En,
            _ => Self::Ko,
        }
    }

    pub fn as_code(self) -> &'static str {
        match self {
            Self::Ko => "ko",
            Self::En => "en",
        }
    }
}

/// Closed set of budget bands offered by the trip form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetTier {
    #[serde(rename = "under-1M")]
    Under1M,
    #[serde(rename = "1-2M")]
    OneToTwoM,
    #[serde(rename = "2M-plus")]
    TwoMPlus,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 3] = [Self::Under1M, Self::OneToTwoM, Self::TwoMPlus];

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "under-1m" | "under_1m" | "under1m" | "budget" => return Some(Self::Under1M),
            "1-2m" | "1_2m" | "standard" => return Some(Self::OneToTwoM),
            "2m-plus" | "2m_plus" | "2m+" | "premium" => return Some(Self::TwoMPlus),
            _ => {}
        }

        // The form submits the Korean labels verbatim.
        if normalized.contains("200만원 이상") {
            Some(Self::TwoMPlus)
        } else if normalized.contains("100-200만원") {
            Some(Self::OneToTwoM)
        } else if normalized.contains("100만원 미만") {
            Some(Self::Under1M)
        } else {
            None
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Under1M => "under-1M",
            Self::OneToTwoM => "1-2M",
            Self::TwoMPlus => "2M-plus",
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Under1M, Locale::Ko) => "100만원 미만",
            (Self::OneToTwoM, Locale::Ko) => "100-200만원",
            (Self::TwoMPlus, Locale::Ko) => "200만원 이상",
            (Self::Under1M, Locale::En) => "Under 1M KRW",
            (Self::OneToTwoM, Locale::En) => "1-2M KRW",
            (Self::TwoMPlus, Locale::En) => "2M+ KRW",
        }
    }
}

/// Style tags that change generated content. Any other tag is carried
/// through to the header untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleTag {
    Relaxation,
    Couple,
    Family,
}

impl StyleTag {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "relaxation" | "relax" | "휴양" | "휴양여행" => Some(Self::Relaxation),
            "couple" | "romantic" | "커플" | "커플여행" => Some(Self::Couple),
            "family" | "가족" | "가족여행" => Some(Self::Family),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelRequest {
    pub destination: String,
    #[serde(default = "default_party_size", deserialize_with = "deserialize_count")]
    pub party_size: u32,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub age_bracket: String,
    #[serde(deserialize_with = "deserialize_count")]
    pub days: u32,
    pub budget: String,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub locale: Locale,
}

impl TravelRequest {
    /// `None` when the budget label matches no known tier.
    pub fn budget_tier(&self) -> Option<BudgetTier> {
        BudgetTier::parse(&self.budget)
    }

    pub fn style_tags(&self) -> Vec<StyleTag> {
        self.styles
            .iter()
            .filter_map(|style| StyleTag::parse(style))
            .collect()
    }
}

fn default_party_size() -> u32 {
    1
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CountField {
    Number(u32),
    Text(String),
}

/// Form fields arrive as either numbers or text such as `"3"` or `"3일"`;
/// text keeps its leading digits.
fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match CountField::deserialize(deserializer)? {
        CountField::Number(value) => Ok(value),
        CountField::Text(text) => {
            let trimmed = text.trim();
            let digits = trimmed
                .find(|c: char| !c.is_ascii_digit())
                .map_or(trimmed, |end| &trimmed[..end]);
            digits
                .parse::<u32>()
                .map_err(|_| D::Error::custom(format!("expected a whole number, got {text:?}")))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationProfile {
    pub country: String,
    pub attractions: Vec<String>,
    pub foods: Vec<String>,
    pub culture: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub time: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    Arrival,
    Middle,
    Departure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: u32,
    pub kind: DayKind,
    pub entries: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryHeader {
    pub title: String,
    pub destination: String,
    pub days: u32,
    pub party_label: String,
    pub styles_label: String,
    pub budget_label: String,
    pub traveler_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipsBlock {
    pub heading: String,
    pub general: Vec<String>,
    pub budget: Vec<String>,
}

impl TipsBlock {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.general
            .iter()
            .chain(self.budget.iter())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.general.len() + self.budget.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    pub locale: Locale,
    pub header: ItineraryHeader,
    pub profile: DestinationProfile,
    pub days: Vec<DayPlan>,
    pub tips: TipsBlock,
}

/// Fixed user-facing notice shown when generation fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorNotice {
    pub title: String,
    pub message: String,
    pub retry_label: String,
}

impl ErrorNotice {
    pub fn for_locale(locale: Locale) -> Self {
        let copy = crate::phrasebook::phrasebook(locale);
        Self {
            title: copy.error_title.to_string(),
            message: copy.error_message.to_string(),
            retry_label: copy.retry_label.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_korean_budget_labels() {
        assert_eq!(BudgetTier::parse("100만원 미만"), Some(BudgetTier::Under1M));
        assert_eq!(BudgetTier::parse("100-200만원"), Some(BudgetTier::OneToTwoM));
        assert_eq!(BudgetTier::parse("200만원 이상"), Some(BudgetTier::TwoMPlus));
        assert_eq!(BudgetTier::parse(" 2M-Plus "), Some(BudgetTier::TwoMPlus));
        assert_eq!(BudgetTier::parse("whatever"), None);
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let request: TravelRequest = serde_json::from_str(
            r#"{ "destination": "Tokyo", "days": 3, "budget": "1-2M", "styles": ["couple", "food"] }"#,
        )
        .unwrap();

        assert_eq!(request.party_size, 1);
        assert_eq!(request.locale, Locale::Ko);
        assert_eq!(request.budget_tier(), Some(BudgetTier::OneToTwoM));
        assert_eq!(request.style_tags(), vec![StyleTag::Couple]);
    }

    #[test]
    fn counts_accept_numeric_text() {
        let request: TravelRequest = serde_json::from_str(
            r#"{ "destination": "도쿄", "party_size": "2", "days": " 4일", "budget": "100-200만원" }"#,
        )
        .unwrap();
        assert_eq!(request.party_size, 2);
        assert_eq!(request.days, 4);

        let error = serde_json::from_str::<TravelRequest>(
            r#"{ "destination": "도쿄", "days": "three", "budget": "100-200만원" }"#,
        )
        .unwrap_err();
        assert!(error.to_string().contains("whole number"));
    }
}
