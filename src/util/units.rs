//! Units formatting utilities
//!
//! Human-readable formatting of prices, dates and durations for the
//! wizard screens.

use chrono::NaiveDate;
use std::time::Duration;

/// Format a price given in units of 10,000 KRW
///
/// # Examples
/// ```
/// use tripplan::util::units::format_manwon;
///
/// assert_eq!(format_manwon(112), "112만원");
/// assert_eq!(format_manwon(0), "0원");
/// ```
pub fn format_manwon(amount: u32) -> String {
    if amount == 0 {
        "0원".to_string()
    } else {
        format!("{}만원", amount)
    }
}

/// Format a date the way the calendar summary shows it
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tripplan::util::units::format_korean_date;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
/// assert_eq!(format_korean_date(date), "3월 4일");
/// ```
pub fn format_korean_date(date: NaiveDate) -> String {
    date.format("%-m월 %-d일").to_string()
}

/// Long date used on calendar buttons, e.g. "Mar 1, 2026"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format duration into human-readable string
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use tripplan::util::units::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs >= 60 {
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{}m {}s", minutes, seconds)
    } else if total_secs > 0 {
        if millis > 0 {
            format!("{}.{:02}s", total_secs, millis / 10)
        } else {
            format!("{}s", total_secs)
        }
    } else {
        format!("{}ms", millis)
    }
}

/// Fraction of `total` covered by `elapsed`, clamped to `0.0..=1.0`
pub fn progress_ratio(elapsed: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
}

/// Mask all but the last four digits of a card number
pub fn mask_card_number(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() <= 4 {
        return digits.into_iter().collect();
    }
    let visible: String = digits[digits.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(digits.len() - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_manwon() {
        assert_eq!(format_manwon(89), "89만원");
        assert_eq!(format_manwon(145), "145만원");
        assert_eq!(format_manwon(0), "0원");
    }

    #[test]
    fn test_format_dates() {
        let date = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
        assert_eq!(format_korean_date(date), "12월 25일");
        assert_eq!(format_long_date(date), "Dec 25, 2026");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(3)), "3s");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
    }

    #[test]
    fn test_progress_ratio() {
        let total = Duration::from_secs(3);
        assert_eq!(progress_ratio(Duration::ZERO, total), 0.0);
        assert!((progress_ratio(Duration::from_millis(1500), total) - 0.5).abs() < 1e-9);
        assert_eq!(progress_ratio(Duration::from_secs(10), total), 1.0);
        assert_eq!(progress_ratio(Duration::from_secs(1), Duration::ZERO), 1.0);
    }

    #[test]
    fn test_mask_card_number() {
        assert_eq!(mask_card_number("1234 5678 9012 3456"), "************3456");
        assert_eq!(mask_card_number("12"), "12");
        assert_eq!(mask_card_number(""), "");
    }
}
