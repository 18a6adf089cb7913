use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::{Dataset, Observation};

// ---------------------------------------------------------------------------
// Filter predicate: date range + season selection
// ---------------------------------------------------------------------------

/// Inclusive calendar range. `start > end` matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Season selection: the "select all" toggle plus the multiselect contents.
/// The multiselect is only consulted while `all` is off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonSelection {
    pub all: bool,
    pub selected: BTreeSet<String>,
}

impl SeasonSelection {
    pub fn matches(&self, season: &str) -> bool {
        self.all || self.selected.contains(season)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub date_range: DateRange,
    pub seasons: SeasonSelection,
}

impl FilterState {
    /// Full date range, "select all" on and every season pre-selected.
    /// `None` for an empty dataset, which has no range to pick from.
    pub fn for_dataset(dataset: &Dataset) -> Option<Self> {
        let start = dataset.first_date()?;
        let end = dataset.last_date()?;
        Some(FilterState {
            date_range: DateRange { start, end },
            seasons: SeasonSelection {
                all: true,
                selected: dataset.seasons.iter().cloned().collect(),
            },
        })
    }

    pub fn matches(&self, obs: &Observation) -> bool {
        self.date_range.contains(obs.date) && self.seasons.matches(&obs.season)
    }
}

/// Return the observations passing the date and season filters, in
/// dataset order. The dataset itself is left untouched.
pub fn filter<'a>(dataset: &'a Dataset, filters: &FilterState) -> Vec<&'a Observation> {
    dataset
        .observations()
        .iter()
        .filter(|obs| filters.matches(obs))
        .collect()
}
