//! Compile-time trip catalog
//!
//! Popular destinations, travel styles and budget tiers offered by the
//! wizard. Nothing here is derived from user input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Atmosphere a destination is known for, used to order the home list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMood {
    #[default]
    Beach,
    City,
}

impl TravelMood {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beach => "바다 감성",
            Self::City => "도시 감성",
        }
    }
}

impl FromStr for TravelMood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beach" => Ok(Self::Beach),
            "city" => Ok(Self::City),
            other => Err(format!("Unknown travel mood: {}", other)),
        }
    }
}

/// A destination card on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub name: &'static str,
    pub name_en: &'static str,
    pub cities: &'static str,
    pub emoji: &'static str,
    pub avg_price: &'static str,
    pub mood: TravelMood,
}

pub const POPULAR_DESTINATIONS: [Destination; 8] = [
    Destination {
        name: "일본",
        name_en: "Japan",
        cities: "도쿄, 오사카, 교토",
        emoji: "🇯🇵",
        avg_price: "80만원~",
        mood: TravelMood::City,
    },
    Destination {
        name: "태국",
        name_en: "Thailand",
        cities: "방콕, 푸켓, 치앙마이",
        emoji: "🇹🇭",
        avg_price: "90만원~",
        mood: TravelMood::Beach,
    },
    Destination {
        name: "베트남",
        name_en: "Vietnam",
        cities: "다낭, 호치민, 하노이",
        emoji: "🇻🇳",
        avg_price: "70만원~",
        mood: TravelMood::Beach,
    },
    Destination {
        name: "프랑스",
        name_en: "France",
        cities: "파리, 니스, 리옹",
        emoji: "🇫🇷",
        avg_price: "200만원~",
        mood: TravelMood::City,
    },
    Destination {
        name: "미국",
        name_en: "USA",
        cities: "뉴욕, LA, 샌프란시스코",
        emoji: "🇺🇸",
        avg_price: "250만원~",
        mood: TravelMood::City,
    },
    Destination {
        name: "스페인",
        name_en: "Spain",
        cities: "바르셀로나, 마드리드",
        emoji: "🇪🇸",
        avg_price: "180만원~",
        mood: TravelMood::City,
    },
    Destination {
        name: "싱가포르",
        name_en: "Singapore",
        cities: "싱가포르",
        emoji: "🇸🇬",
        avg_price: "120만원~",
        mood: TravelMood::City,
    },
    Destination {
        name: "영국",
        name_en: "UK",
        cities: "런던, 에든버러",
        emoji: "🇬🇧",
        avg_price: "220만원~",
        mood: TravelMood::City,
    },
];

/// Popular destinations with the preferred mood first.
///
/// The sort is stable, so catalog order is kept within each mood.
pub fn sorted_by_mood(preferred: TravelMood) -> Vec<Destination> {
    let mut destinations = POPULAR_DESTINATIONS.to_vec();
    destinations.sort_by_key(|d| d.mood != preferred);
    destinations
}

/// Selectable travel styles (multi-choice)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Mountain,
    Ocean,
    City,
    Resort,
    Forest,
    Historic,
    Photo,
    Shopping,
    Food,
    Cafe,
    Art,
    Music,
}

impl TravelStyle {
    pub const ALL: [TravelStyle; 12] = [
        Self::Mountain,
        Self::Ocean,
        Self::City,
        Self::Resort,
        Self::Forest,
        Self::Historic,
        Self::Photo,
        Self::Shopping,
        Self::Food,
        Self::Cafe,
        Self::Art,
        Self::Music,
    ];

    /// Stable identifier stored in the trip selection
    pub fn id(&self) -> &'static str {
        match self {
            Self::Mountain => "mountain",
            Self::Ocean => "ocean",
            Self::City => "city",
            Self::Resort => "resort",
            Self::Forest => "forest",
            Self::Historic => "historic",
            Self::Photo => "photo",
            Self::Shopping => "shopping",
            Self::Food => "food",
            Self::Cafe => "cafe",
            Self::Art => "art",
            Self::Music => "music",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mountain => "산/자연",
            Self::Ocean => "바다/해변",
            Self::City => "도시/관광",
            Self::Resort => "리조트",
            Self::Forest => "숲/트레킹",
            Self::Historic => "역사/문화",
            Self::Photo => "사진 명소",
            Self::Shopping => "쇼핑",
            Self::Food => "맛집 탐방",
            Self::Cafe => "카페 투어",
            Self::Art => "예술/전시",
            Self::Music => "음악/공연",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }
}

/// Budget tiers (single choice)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Budget,
    Standard,
    Premium,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 3] = [Self::Budget, Self::Standard, Self::Premium];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Budget => "가성비 여행",
            Self::Standard => "일반 여행",
            Self::Premium => "프리미엄 여행",
        }
    }

    pub fn range(&self) -> &'static str {
        match self {
            Self::Budget => "~100만원",
            Self::Standard => "100~200만원",
            Self::Premium => "200만원~",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.id() == id)
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.range())
    }
}

/// Prompt suggestions offered next to the freeform request field
pub const EXAMPLE_PROMPTS: [&str; 6] = [
    "해변 근처에 있는 인스타 감성 카페 위주로 추천해줘",
    "인플루언서가 자주 가는 숨은 맛집을 포함해줘",
    "일출과 일몰 명소를 꼭 넣어주고, 사진 찍기 좋은 곳 위주로",
    "현지인들이 가는 로컬 장소를 많이 포함해줘",
    "가족 여행이라 아이들이 좋아할만한 장소 추천해줘",
    "쇼핑과 맛집을 균형있게 섞어서 일정 짜줘",
];

/// A spot recommended alongside every route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendedSpot {
    pub name: &'static str,
    pub time: &'static str,
    pub kind: &'static str,
}

pub const RECOMMENDED_SPOTS: [RecommendedSpot; 3] = [
    RecommendedSpot {
        name: "해변 선셋 포인트",
        time: "17:30 추천",
        kind: "사진 명소",
    },
    RecommendedSpot {
        name: "현지 맛집 거리",
        time: "19:00 추천",
        kind: "맛집",
    },
    RecommendedSpot {
        name: "인플루언서 추천 카페",
        time: "14:00 추천",
        kind: "카페",
    },
];

/// Human label for a stored option id (style or budget)
pub fn option_label(id: &str) -> Option<&'static str> {
    TravelStyle::from_id(id)
        .map(|s| s.label())
        .or_else(|| BudgetTier::from_id(id).map(|b| b.label()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_by_mood_puts_preferred_first() {
        let beach_first = sorted_by_mood(TravelMood::Beach);
        assert_eq!(beach_first[0].name_en, "Thailand");
        assert_eq!(beach_first[1].name_en, "Vietnam");
        assert_eq!(beach_first[2].name_en, "Japan");
        assert_eq!(beach_first.len(), POPULAR_DESTINATIONS.len());

        let city_first = sorted_by_mood(TravelMood::City);
        assert_eq!(city_first[0].name_en, "Japan");
        assert!(city_first[..6].iter().all(|d| d.mood == TravelMood::City));
        assert!(city_first[6..].iter().all(|d| d.mood == TravelMood::Beach));
    }

    #[test]
    fn test_style_ids_are_unique_and_resolvable() {
        for style in TravelStyle::ALL {
            assert_eq!(TravelStyle::from_id(style.id()), Some(style));
        }
        let mut ids: Vec<_> = TravelStyle::ALL.iter().map(|s| s.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn test_option_label_resolves_both_namespaces() {
        assert_eq!(option_label("food"), Some("맛집 탐방"));
        assert_eq!(option_label("standard"), Some("일반 여행"));
        assert_eq!(option_label("nonsense"), None);
    }

    #[test]
    fn test_mood_parse() {
        assert_eq!("Beach".parse::<TravelMood>(), Ok(TravelMood::Beach));
        assert_eq!(" city ".parse::<TravelMood>(), Ok(TravelMood::City));
        assert!("mountain".parse::<TravelMood>().is_err());
    }
}
