//! Utility functions module
//!
//! Contains helper functions for price, date and duration formatting.

pub mod units;

// Re-export commonly used functions
pub use units::{
    format_duration, format_korean_date, format_long_date,
    format_manwon, mask_card_number, progress_ratio,
};
