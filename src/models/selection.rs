//! Accumulated trip choices
//!
//! [`TripSelection`] is what the wizard carries forward between screens.
//! [`OptionsSubmission`] is the raw payload of the options screen, checked
//! against the submit guard before anything is stored.

use crate::models::catalog::{BudgetTier, TravelStyle};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Inclusive travel period with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Returns `None` when `end` precedes `start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn days(&self) -> i64 {
        self.nights() + 1
    }

    /// Korean trip length label, e.g. "3박 4일"
    pub fn length_label(&self) -> String {
        format!("{}박 {}일", self.nights(), self.days())
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}일)",
            self.start.format("%-m/%-d"),
            self.end.format("%-m/%-d"),
            self.nights()
        )
    }
}

/// What the options screen hands to the controller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionsSubmission {
    pub styles: BTreeSet<TravelStyle>,
    pub budget: Option<BudgetTier>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub prompt: String,
}

impl OptionsSubmission {
    /// The travel period, once both ends are picked in order
    pub fn date_range(&self) -> Option<DateRange> {
        DateRange::new(self.start_date?, self.end_date?)
    }

    /// Submit guard: at least one style, a budget tier and both dates
    pub fn is_complete(&self) -> bool {
        !self.styles.is_empty() && self.budget.is_some() && self.date_range().is_some()
    }

    /// Stored option ids: the chosen style ids plus the budget id
    pub fn option_ids(&self) -> BTreeSet<String> {
        self.styles
            .iter()
            .map(|s| s.id().to_string())
            .chain(self.budget.map(|b| b.id().to_string()))
            .collect()
    }
}

/// Choices accumulated over one wizard session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripSelection {
    pub destination: String,
    pub selected_option_ids: BTreeSet<String>,
    pub freeform_prompt: String,
    pub chosen_route_key: String,
    pub travel_dates: Option<DateRange>,
}

impl TripSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
