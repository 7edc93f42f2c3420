//! Route presets
//!
//! The three itineraries shown on the comparison screen, keyed by
//! [`RouteKey`], together with the map waypoints used to draw them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a route preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKey {
    #[default]
    Optimal,
    Budget,
    Oceanview,
}

impl RouteKey {
    /// Tab order on the comparison screen
    pub const ALL: [RouteKey; 3] = [Self::Optimal, Self::Budget, Self::Oceanview];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Optimal => "optimal",
            Self::Budget => "budget",
            Self::Oceanview => "oceanview",
        }
    }

    pub fn preset(&self) -> &'static RoutePreset {
        match self {
            Self::Optimal => &ROUTE_PRESETS[0],
            Self::Budget => &ROUTE_PRESETS[1],
            Self::Oceanview => &ROUTE_PRESETS[2],
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let idx = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown route key: {}", s))
    }
}

/// Line color of a route on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapColor {
    Red,
    Green,
    Blue,
}

/// A labelled waypoint in map space (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
    pub label: &'static str,
    pub icon: &'static str,
}

/// One day of an itinerary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPlan {
    pub day: u8,
    pub activities: [&'static str; 4],
}

/// Cost split shown in the booking summary, in units of 10,000 KRW
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostBreakdown {
    pub flights: u32,
    pub lodging: u32,
    pub tours: u32,
    pub meals: u32,
}

impl CostBreakdown {
    pub fn total(&self) -> u32 {
        self.flights + self.lodging + self.tours + self.meals
    }
}

/// A fixed itinerary definition
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePreset {
    pub key: RouteKey,
    pub name: &'static str,
    pub description: &'static str,
    /// Total price in units of 10,000 KRW
    pub total_cost: u32,
    pub duration: &'static str,
    pub nights: u8,
    pub score: u8,
    pub highlights: [&'static str; 3],
    pub days: [DayPlan; 3],
    pub breakdown: CostBreakdown,
    pub waypoints: [MapPoint; 5],
    pub color: MapColor,
}

pub static ROUTE_PRESETS: [RoutePreset; 3] = [
    RoutePreset {
        key: RouteKey::Optimal,
        name: "최적 경로",
        description: "가격과 일정의 완벽한 균형",
        total_cost: 112,
        duration: "3박 4일",
        nights: 3,
        score: 95,
        highlights: ["인기 관광지 모두 포함", "이동 시간 최소화", "평균 대비 8% 저렴"],
        days: [
            DayPlan {
                day: 1,
                activities: ["인천공항 출발 10:00", "호텔 체크인", "해변 산책", "현지 맛집 저녁"],
            },
            DayPlan {
                day: 2,
                activities: ["오션뷰 카페", "명소 투어", "인플루언서 추천 루트", "선셋 포토 스팟"],
            },
            DayPlan {
                day: 3,
                activities: ["수상 액티비티", "쇼핑 거리", "야시장 탐방", "호텔 휴식"],
            },
        ],
        breakdown: CostBreakdown {
            flights: 40,
            lodging: 45,
            tours: 20,
            meals: 7,
        },
        waypoints: [
            MapPoint { x: 80.0, y: 320.0, label: "공항", icon: "✈" },
            MapPoint { x: 160.0, y: 250.0, label: "호텔", icon: "H" },
            MapPoint { x: 240.0, y: 180.0, label: "관광지", icon: "T" },
            MapPoint { x: 300.0, y: 140.0, label: "맛집", icon: "F" },
            MapPoint { x: 340.0, y: 100.0, label: "해변", icon: "B" },
        ],
        color: MapColor::Red,
    },
    RoutePreset {
        key: RouteKey::Budget,
        name: "가성비 경로",
        description: "최저가로 알찬 여행",
        total_cost: 89,
        duration: "3박 4일",
        nights: 3,
        score: 88,
        highlights: ["최저가 항공편", "가성비 숙소", "무료 관광지 위주"],
        days: [
            DayPlan {
                day: 1,
                activities: ["심야 항공편 23:50", "공항 근처 숙소", "아침 해변", "로컬 맛집"],
            },
            DayPlan {
                day: 2,
                activities: ["무료 박물관", "해변 산책", "재래시장 탐방", "저렴한 맛집"],
            },
            DayPlan {
                day: 3,
                activities: ["트레킹", "무료 전망대", "카페 거리", "조조 항공편 준비"],
            },
        ],
        breakdown: CostBreakdown {
            flights: 30,
            lodging: 32,
            tours: 15,
            meals: 12,
        },
        waypoints: [
            MapPoint { x: 90.0, y: 310.0, label: "공항", icon: "✈" },
            MapPoint { x: 140.0, y: 260.0, label: "숙소", icon: "H" },
            MapPoint { x: 220.0, y: 200.0, label: "무료관광", icon: "T" },
            MapPoint { x: 290.0, y: 150.0, label: "재래시장", icon: "M" },
            MapPoint { x: 350.0, y: 90.0, label: "카페거리", icon: "C" },
        ],
        color: MapColor::Green,
    },
    RoutePreset {
        key: RouteKey::Oceanview,
        name: "오션뷰 경로",
        description: "바다를 최대한 즐기는 일정",
        total_cost: 145,
        duration: "3박 4일",
        nights: 3,
        score: 92,
        highlights: ["오션뷰 리조트", "해변 중심 일정", "수상 액티비티 포함"],
        days: [
            DayPlan {
                day: 1,
                activities: ["오전 항공편", "오션뷰 리조트 체크인", "프라이빗 비치", "선셋 디너"],
            },
            DayPlan {
                day: 2,
                activities: ["스노클링", "요트 투어", "해변 카페", "오션뷰 레스토랑"],
            },
            DayPlan {
                day: 3,
                activities: ["서핑 레슨", "해변 마사지", "시푸드 맛집", "비치 파티"],
            },
        ],
        breakdown: CostBreakdown {
            flights: 45,
            lodging: 65,
            tours: 25,
            meals: 10,
        },
        waypoints: [
            MapPoint { x: 70.0, y: 330.0, label: "공항", icon: "✈" },
            MapPoint { x: 150.0, y: 240.0, label: "리조트", icon: "R" },
            MapPoint { x: 230.0, y: 170.0, label: "해변", icon: "B" },
            MapPoint { x: 300.0, y: 120.0, label: "요트투어", icon: "Y" },
            MapPoint { x: 360.0, y: 80.0, label: "비치클럽", icon: "C" },
        ],
        color: MapColor::Blue,
    },
];

/// Lowest, middle and highest preset price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceAnalysis {
    pub lowest: u32,
    pub average: u32,
    pub highest: u32,
}

impl PriceAnalysis {
    /// Summarize the preset table. The middle price of the sorted table is
    /// reported as the reference "average".
    pub fn from_presets(presets: &[RoutePreset]) -> Option<Self> {
        let mut costs: Vec<u32> = presets.iter().map(|p| p.total_cost).collect();
        if costs.is_empty() {
            return None;
        }
        costs.sort_unstable();
        Some(Self {
            lowest: costs[0],
            average: costs[costs.len() / 2],
            highest: costs[costs.len() - 1],
        })
    }

    /// Signed percentage difference of `cost` against the reference price
    pub fn relative_percent(&self, cost: u32) -> i64 {
        if self.average == 0 {
            return 0;
        }
        let diff = cost as f64 - self.average as f64;
        (diff * 100.0 / self.average as f64).round() as i64
    }

    /// Short verdict such as "21% 저렴" or "균형잡힌 선택"
    pub fn verdict(&self, cost: u32) -> String {
        match self.relative_percent(cost) {
            0 => "균형잡힌 선택".to_string(),
            p if p < 0 => format!("{}% 저렴", -p),
            p => format!("{}% 프리미엄", p),
        }
    }
}

/// A sampled point of the decorative route curve
pub type PathPoint = (f64, f64);

/// Lift of each quadratic control point above the segment midpoint
const CURVE_LIFT: f64 = 30.0;

/// Smooth path through `points`.
///
/// Each consecutive pair is joined by a quadratic Bezier whose control
/// point sits at the segment midpoint lifted by [`CURVE_LIFT`]. Every
/// segment is sampled `steps` times; the first point is always included.
/// Fewer than two points yields an empty path.
pub fn curve_path(points: &[MapPoint], steps: usize) -> Vec<PathPoint> {
    if points.len() < 2 {
        return Vec::new();
    }
    let steps = steps.max(1);
    let mut path = Vec::with_capacity(1 + (points.len() - 1) * steps);
    path.push((points[0].x, points[0].y));

    for pair in points.windows(2) {
        let (p0, p2) = (pair[0], pair[1]);
        let cx = (p0.x + p2.x) / 2.0;
        let cy = (p0.y + p2.y) / 2.0 - CURVE_LIFT;
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            let u = 1.0 - t;
            let x = u * u * p0.x + 2.0 * u * t * cx + t * t * p2.x;
            let y = u * u * p0.y + 2.0 * u * t * cy + t * t * p2.y;
            path.push((x, y));
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_key_parse_and_cycle() {
        assert_eq!("budget".parse::<RouteKey>(), Ok(RouteKey::Budget));
        assert!("scenic".parse::<RouteKey>().is_err());
        assert_eq!(RouteKey::Oceanview.next(), RouteKey::Optimal);
        assert_eq!(RouteKey::Optimal.previous(), RouteKey::Oceanview);
        assert_eq!(RouteKey::default(), RouteKey::Optimal);
    }

    #[test]
    fn test_presets_are_keyed_consistently() {
        for key in RouteKey::ALL {
            let preset = key.preset();
            assert_eq!(preset.key, key);
            assert_eq!(preset.breakdown.total(), preset.total_cost);
        }
    }

    #[test]
    fn test_price_analysis() {
        let analysis = PriceAnalysis::from_presets(&ROUTE_PRESETS).unwrap();
        assert_eq!(analysis.lowest, 89);
        assert_eq!(analysis.average, 112);
        assert_eq!(analysis.highest, 145);

        assert_eq!(analysis.verdict(89), "21% 저렴");
        assert_eq!(analysis.verdict(112), "균형잡힌 선택");
        assert_eq!(analysis.verdict(145), "29% 프리미엄");
        assert!(PriceAnalysis::from_presets(&[]).is_none());
    }

    #[test]
    fn test_curve_path_endpoints_and_lift() {
        let points = &RouteKey::Optimal.preset().waypoints;
        let path = curve_path(points, 10);
        assert_eq!(path.len(), 1 + 4 * 10);
        assert_eq!(path[0], (80.0, 320.0));
        assert_eq!(*path.last().unwrap(), (340.0, 100.0));
        // segment end lands exactly on the next waypoint
        assert_eq!(path[10], (160.0, 250.0));

        // halfway through the first segment the curve sits above the chord
        let (mx, my) = path[5];
        assert!((mx - 120.0).abs() < 1e-9);
        assert!((my - (285.0 - 15.0)).abs() < 1e-9);
    }

    #[test]
    fn test_curve_path_degenerate() {
        let single = &RouteKey::Budget.preset().waypoints[..1];
        assert!(curve_path(single, 8).is_empty());
        assert_eq!(curve_path(&RouteKey::Budget.preset().waypoints[..2], 0).len(), 2);
    }
}
