use serde::{Deserialize, Serialize};

use crate::models::{DestinationProfile, Locale};

/// Keyword groups in match priority order. The fallback group matches
/// everything the keyword groups miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationGroup {
    Japan,
    France,
    Korea,
    Fallback,
}

impl DestinationGroup {
    pub const KEYWORD_GROUPS: [DestinationGroup; 3] = [Self::Japan, Self::France, Self::Korea];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Japan => &["일본", "도쿄", "오사카", "japan", "tokyo", "osaka"],
            Self::France => &["프랑스", "파리", "france", "paris"],
            Self::Korea => &["한국", "서울", "부산", "korea", "seoul", "busan"],
            Self::Fallback => &[],
        }
    }
}

struct ProfileTable {
    country: &'static str,
    attractions: [&'static str; 5],
    foods: [&'static str; 5],
    culture: &'static str,
}

pub fn group_for(destination: &str) -> DestinationGroup {
    let lower = destination.to_lowercase();

    DestinationGroup::KEYWORD_GROUPS
        .into_iter()
        .find(|group| contains_any(&lower, group.keywords()))
        .unwrap_or(DestinationGroup::Fallback)
}

pub fn resolve(destination: &str, locale: Locale) -> DestinationProfile {
    let group = group_for(destination);
    let table = table(group, locale);

    DestinationProfile {
        country: if group == DestinationGroup::Fallback {
            destination.to_string()
        } else {
            table.country.to_string()
        },
        attractions: table.attractions.iter().map(ToString::to_string).collect(),
        foods: table.foods.iter().map(ToString::to_string).collect(),
        culture: table.culture.to_string(),
    }
}

fn table(group: DestinationGroup, locale: Locale) -> &'static ProfileTable {
    match (group, locale) {
        (DestinationGroup::Japan, Locale::Ko) => &JAPAN_KO,
        (DestinationGroup::Japan, Locale::En) => &JAPAN_EN,
        (DestinationGroup::France, Locale::Ko) => &FRANCE_KO,
        (DestinationGroup::France, Locale::En) => &FRANCE_EN,
        (DestinationGroup::Korea, Locale::Ko) => &KOREA_KO,
        (DestinationGroup::Korea, Locale::En) => &KOREA_EN,
        (DestinationGroup::Fallback, Locale::Ko) => &FALLBACK_KO,
        (DestinationGroup::Fallback, Locale::En) => &FALLBACK_EN,
    }
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}

static JAPAN_KO: ProfileTable = ProfileTable {
    country: "일본",
    attractions: [
        "센소지 절",
        "도쿄 스카이트리",
        "시부야 크로싱",
        "아키하바라",
        "우에노 공원",
    ],
    foods: ["스시", "라멘", "야키토리", "타코야키", "온센 요리"],
    culture: "일본 전통문화 체험",
};

static JAPAN_EN: ProfileTable = ProfileTable {
    country: "Japan",
    attractions: [
        "Senso-ji Temple",
        "Tokyo Skytree",
        "Shibuya Crossing",
        "Akihabara",
        "Ueno Park",
    ],
    foods: ["sushi", "ramen", "yakitori", "takoyaki", "onsen cuisine"],
    culture: "Traditional Japanese culture",
};

static FRANCE_KO: ProfileTable = ProfileTable {
    country: "프랑스",
    attractions: [
        "에펠탑",
        "루브르 박물관",
        "샹젤리제 거리",
        "몽마르트 언덕",
        "베르사유 궁전",
    ],
    foods: ["크루아상", "마카롱", "프랑스 와인", "치즈", "에스카르고"],
    culture: "프랑스 예술과 문화",
};

static FRANCE_EN: ProfileTable = ProfileTable {
    country: "France",
    attractions: [
        "Eiffel Tower",
        "Louvre Museum",
        "Champs-Élysées",
        "Montmartre",
        "Palace of Versailles",
    ],
    foods: ["croissant", "macarons", "French wine", "cheese", "escargot"],
    culture: "French art and culture",
};

static KOREA_KO: ProfileTable = ProfileTable {
    country: "한국",
    attractions: ["경복궁", "명동", "강남", "부산 해운대", "제주도"],
    foods: ["한식", "김치", "불고기", "비빔밥", "치킨"],
    culture: "한국 전통문화",
};

static KOREA_EN: ProfileTable = ProfileTable {
    country: "Korea",
    attractions: [
        "Gyeongbokgung Palace",
        "Myeongdong",
        "Gangnam",
        "Haeundae Beach",
        "Jeju Island",
    ],
    foods: ["hansik", "kimchi", "bulgogi", "bibimbap", "Korean fried chicken"],
    culture: "Traditional Korean culture",
};

static FALLBACK_KO: ProfileTable = ProfileTable {
    country: "",
    attractions: [
        "주요 관광지",
        "역사적 명소",
        "자연 경관",
        "문화 체험지",
        "쇼핑 지역",
    ],
    foods: [
        "현지 특색 요리",
        "전통 음식",
        "거리 음식",
        "현지 별미",
        "현지 디저트",
    ],
    culture: "현지 문화 체험",
};

static FALLBACK_EN: ProfileTable = ProfileTable {
    country: "",
    attractions: [
        "main sights",
        "historic landmarks",
        "natural scenery",
        "cultural experience spots",
        "shopping district",
    ],
    foods: [
        "local specialties",
        "traditional dishes",
        "street food",
        "regional delicacies",
        "local desserts",
    ],
    culture: "Local culture experience",
};
