use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// DayKind – the boolean-like workingday flag
// ---------------------------------------------------------------------------

/// Whether an observation falls on a working day or on a holiday/weekend.
///
/// Ordered so that `NonWorking` sorts first, matching a `0/1` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayKind {
    NonWorking,
    Working,
}

impl FromStr for DayKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "working day" | "workingday" => Ok(DayKind::Working),
            "0" | "false" | "no" | "holiday" | "weekend" | "holiday/weekend"
            | "non-working day" | "non working day" => Ok(DayKind::NonWorking),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for DayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayKind::Working => write!(f, "Working day"),
            DayKind::NonWorking => write!(f, "Holiday / weekend"),
        }
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of the CSV
// ---------------------------------------------------------------------------

/// A single hourly rental record.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Calendar day of the record.
    pub date: NaiveDate,
    /// Hour of day, 0–23.
    pub hour: u8,
    pub season: String,
    pub weather_condition: String,
    pub day_kind: DayKind,
    pub total_count: u32,
    pub casual: u32,
    pub registered: u32,
}

impl Observation {
    /// `total_count >= casual + registered`; assumed by the source data, not enforced.
    pub fn counts_consistent(&self) -> bool {
        u64::from(self.total_count) >= u64::from(self.casual) + u64::from(self.registered)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All observations sorted ascending by date, plus the category labels
/// the filter widgets need.
#[derive(Debug, Clone)]
pub struct Dataset {
    observations: Vec<Observation>,
    /// Distinct season labels in order of first appearance.
    pub seasons: Vec<String>,
    /// Distinct weather labels in order of first appearance.
    pub weather_conditions: Vec<String>,
}

impl Dataset {
    /// Sort the observations by date and build the label indices.
    pub fn from_observations(mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|o| o.date);

        let mut seasons: Vec<String> = Vec::new();
        let mut weather_conditions: Vec<String> = Vec::new();
        for obs in &observations {
            if !seasons.contains(&obs.season) {
                seasons.push(obs.season.clone());
            }
            if !weather_conditions.contains(&obs.weather_condition) {
                weather_conditions.push(obs.weather_condition.clone());
            }
        }

        Dataset {
            observations,
            seasons,
            weather_conditions,
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Earliest date in the dataset.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    /// Latest date in the dataset.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn obs(date: &str, hour: u8, season: &str, weather: &str, total: u32) -> Observation {
        Observation {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            hour,
            season: season.to_string(),
            weather_condition: weather.to_string(),
            day_kind: DayKind::Working,
            total_count: total,
            casual: total / 4,
            registered: total - total / 4,
        }
    }

    #[test]
    fn from_observations_sorts_by_date() {
        let ds = Dataset::from_observations(vec![
            obs("2011-03-02", 0, "Spring", "Clear", 5),
            obs("2011-01-01", 0, "Winter", "Mist", 3),
            obs("2011-02-15", 0, "Winter", "Clear", 4),
        ]);
        let dates: Vec<String> = ds.observations().iter().map(|o| o.date.to_string()).collect();
        assert_eq!(dates, ["2011-01-01", "2011-02-15", "2011-03-02"]);
        assert_eq!(ds.first_date(), NaiveDate::from_ymd_opt(2011, 1, 1));
        assert_eq!(ds.last_date(), NaiveDate::from_ymd_opt(2011, 3, 2));
    }

    #[test]
    fn labels_follow_first_appearance_after_sort() {
        let ds = Dataset::from_observations(vec![
            obs("2011-06-01", 0, "Summer", "Clear", 5),
            obs("2011-01-01", 0, "Winter", "Mist", 3),
            obs("2011-01-02", 0, "Winter", "Clear", 4),
        ]);
        assert_eq!(ds.seasons, ["Winter", "Summer"]);
        assert_eq!(ds.weather_conditions, ["Mist", "Clear"]);
    }

    #[test]
    fn day_kind_parses_common_spellings() {
        assert_eq!("1".parse::<DayKind>(), Ok(DayKind::Working));
        assert_eq!(" Working Day ".parse::<DayKind>(), Ok(DayKind::Working));
        assert_eq!("0".parse::<DayKind>(), Ok(DayKind::NonWorking));
        assert_eq!("Holiday".parse::<DayKind>(), Ok(DayKind::NonWorking));
        assert_eq!("yes".parse::<DayKind>(), Ok(DayKind::Working));
        assert_eq!("TRUE".parse::<DayKind>(), Ok(DayKind::Working));
        assert_eq!("workingday".parse::<DayKind>(), Ok(DayKind::Working));
        assert_eq!("no".parse::<DayKind>(), Ok(DayKind::NonWorking));
        assert_eq!("false".parse::<DayKind>(), Ok(DayKind::NonWorking));
        assert_eq!("weekend".parse::<DayKind>(), Ok(DayKind::NonWorking));
        assert_eq!("Non-working day".parse::<DayKind>(), Ok(DayKind::NonWorking));
        assert!("maybe".parse::<DayKind>().is_err());
        assert!(DayKind::NonWorking < DayKind::Working);
    }

    #[test]
    fn counts_consistency_is_checked_without_overflow() {
        let mut o = obs("2011-01-01", 0, "Winter", "Clear", 10);
        assert!(o.counts_consistent());
        o.casual = u32::MAX;
        assert!(!o.counts_consistent());
    }
}
