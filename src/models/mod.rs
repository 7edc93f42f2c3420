//! Data models module
//!
//! Contains the compile-time trip catalog, the route presets and the
//! accumulated trip selection.

pub mod catalog;
pub mod route;
pub mod selection;

// Re-export commonly used types
pub use catalog::{
    BudgetTier,
    Destination,
    TravelMood,
    TravelStyle,
};
pub use route::{
    PriceAnalysis,
    RouteKey,
    RoutePreset,
};
pub use selection::{
    DateRange,
    OptionsSubmission,
    TripSelection,
};
