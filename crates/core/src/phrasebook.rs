//! Literal text tables. Placeholders in braces are substituted by the
//! planner, tips and header builders.

use crate::models::Locale;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Slot {
    pub time: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const fn slot(time: &'static str, title: &'static str, description: &'static str) -> Slot {
    Slot {
        time,
        title,
        description,
    }
}

#[derive(Debug)]
pub(crate) struct Phrasebook {
    pub arrival: [Slot; 4],
    pub departure: [Slot; 3],
    pub middle: [Slot; 4],
    pub private_guide: &'static str,
    pub self_guided: &'static str,
    pub style_relaxation: &'static str,
    pub style_couple: &'static str,
    pub style_family: &'static str,
    pub style_default: &'static str,
    pub dining_premium: &'static str,
    pub dining_standard: &'static str,
    pub dining_budget: &'static str,
    pub general_tips: [&'static str; 5],
    pub tips_under_1m: [&'static str; 3],
    pub tips_1_2m: [&'static str; 3],
    pub tips_2m_plus: [&'static str; 3],
    pub tips_heading: &'static str,
    pub title: &'static str,
    pub party: &'static str,
    pub default_styles: &'static str,
    pub day_heading: &'static str,
    pub error_title: &'static str,
    pub error_message: &'static str,
    pub retry_label: &'static str,
}

pub(crate) fn phrasebook(locale: Locale) -> &'static Phrasebook {
    match locale {
        Locale::Ko => &KO,
        Locale::En => &EN,
    }
}

pub(crate) fn fill(template: &str, key: &str, value: &str) -> String {
    template.replace(key, value)
}

static KO: Phrasebook = Phrasebook {
    arrival: [
        slot(
            "09:00",
            "공항 도착 및 호텔 체크인",
            "현지 교통카드 구매, 환전 및 기본 정보 확인",
        ),
        slot(
            "12:00",
            "현지 전통 음식 체험",
            "{food}을 맛볼 수 있는 현지 맛집 방문",
        ),
        slot(
            "14:00",
            "{attraction} 방문",
            "첫날은 가벼운 관광지 둘러보기와 현지 분위기 적응",
        ),
        slot(
            "18:00",
            "저녁 식사 및 현지 거리 탐방",
            "현지 음식 문화 체험과 쇼핑 지역 구경",
        ),
    ],
    departure: [
        slot(
            "09:00",
            "마지막 쇼핑 및 기념품 구매",
            "여행 기념품과 현지 특산품 구매",
        ),
        slot("12:00", "마지막 현지 음식 체험", "{food} 마지막 맛보기"),
        slot(
            "15:00",
            "공항 이동 및 출국 준비",
            "체크아웃, 공항 이동, 면세점 쇼핑",
        ),
    ],
    middle: [
        slot(
            "09:00",
            "{attraction} 관광",
            "현지 가이드 투어 또는 자유 관광 ({guide})",
        ),
        slot("12:30", "점심식사", "{food} 전문점에서 현지 음식 체험"),
        slot("14:30", "{attraction} 탐방", "{style}"),
        slot("18:00", "저녁 활동", "{dining}"),
    ],
    private_guide: "프라이빗 가이드",
    self_guided: "자유 관광",
    style_relaxation: "여유로운 휴식과 관광",
    style_couple: "로맨틱한 스팟 방문",
    style_family: "가족 친화적 활동",
    style_default: "문화 체험 활동",
    dining_premium: "고급 레스토랑에서 저녁식사",
    dining_standard: "현지 인기 맛집 방문",
    dining_budget: "현지 길거리 음식 체험",
    general_tips: [
        "현지 교통카드를 미리 구매하면 이동비를 절약할 수 있습니다",
        "현지 언어로 기본 인사말을 배워가면 더 친근한 여행이 됩니다",
        "여행자 보험은 필수! 안전한 여행을 위해 꼭 가입하세요",
        "현지 날씨를 확인하고 적절한 옷차림을 준비하세요",
        "중요한 서류들은 복사본을 따로 보관하세요",
    ],
    tips_under_1m: [
        "호스텔이나 게스트하우스를 이용하면 숙박비를 절약할 수 있습니다",
        "현지 대중교통과 도보를 활용해 이동비를 줄이세요",
        "현지 마트에서 간단한 식료품을 구매해 식비를 절약하세요",
    ],
    tips_1_2m: [
        "중급 호텔과 현지 맛집을 적절히 조합하세요",
        "일부 관광지는 패키지 투어를, 일부는 자유 관광을 선택하세요",
        "기념품은 현지 전통시장에서 구매하면 더 저렴합니다",
    ],
    tips_2m_plus: [
        "고급 호텔과 미슐린 레스토랑을 경험해보세요",
        "프라이빗 가이드 투어로 더 깊이 있는 여행을 즐기세요",
        "현지 럭셔리 쇼핑몰에서 특별한 기념품을 구매해보세요",
    ],
    tips_heading: "여행 꿀팁",
    title: "{destination} {days}일 맞춤 여행 코스",
    party: "{count}명",
    default_styles: "일반 관광",
    day_heading: "Day {day}",
    error_title: "오류가 발생했습니다",
    error_message: "여행 추천을 생성하는 중 문제가 발생했습니다. 잠시 후 다시 시도해주세요.",
    retry_label: "다시 시도",
};

static EN: Phrasebook = Phrasebook {
    arrival: [
        slot(
            "09:00",
            "Airport arrival and hotel check-in",
            "Buy a local transit card, exchange currency and get oriented",
        ),
        slot(
            "12:00",
            "Local traditional food tasting",
            "Visit a local favourite serving {food}",
        ),
        slot(
            "14:00",
            "Visit {attraction}",
            "Light sightseeing on day one to settle into the local atmosphere",
        ),
        slot(
            "18:00",
            "Dinner and street exploring",
            "Sample the local food culture and browse the shopping district",
        ),
    ],
    departure: [
        slot(
            "09:00",
            "Last-minute shopping and souvenirs",
            "Pick up souvenirs and local specialties",
        ),
        slot("12:00", "One last local meal", "A final taste of {food}"),
        slot(
            "15:00",
            "Airport transfer and departure",
            "Check out, head to the airport, duty-free shopping",
        ),
    ],
    middle: [
        slot(
            "09:00",
            "Sightseeing at {attraction}",
            "Guided tour or independent sightseeing ({guide})",
        ),
        slot("12:30", "Lunch", "Local cuisine at a {food} specialist"),
        slot("14:30", "Explore {attraction}", "{style}"),
        slot("18:00", "Evening", "{dining}"),
    ],
    private_guide: "private guide",
    self_guided: "self-guided",
    style_relaxation: "relaxed sightseeing and rest",
    style_couple: "romantic spot visit",
    style_family: "family-friendly activities",
    style_default: "cultural activity",
    dining_premium: "Dinner at an upscale restaurant",
    dining_standard: "A popular local restaurant",
    dining_budget: "Local street food",
    general_tips: [
        "Buying a local transit card in advance saves on transport",
        "Learning a few basic greetings in the local language makes the trip friendlier",
        "Travel insurance is a must for a safe trip",
        "Check the local weather and pack suitable clothing",
        "Keep copies of important documents separately",
    ],
    tips_under_1m: [
        "Hostels and guesthouses keep accommodation costs down",
        "Use public transport and walk to cut travel costs",
        "Buy simple groceries at local markets to save on meals",
    ],
    tips_1_2m: [
        "Mix mid-range hotels with popular local restaurants",
        "Book package tours for some sights and explore others on your own",
        "Souvenirs are cheaper at traditional local markets",
    ],
    tips_2m_plus: [
        "Treat yourself to luxury hotels and Michelin-starred restaurants",
        "Private guided tours give a deeper look at the destination",
        "Find special souvenirs at local luxury shopping malls",
    ],
    tips_heading: "Travel tips",
    title: "{days}-day custom itinerary for {destination}",
    party: "{count} travelers",
    default_styles: "general sightseeing",
    day_heading: "Day {day}",
    error_title: "Something went wrong",
    error_message: "We couldn't generate your travel recommendation. Please try again in a moment.",
    retry_label: "Try again",
};
