//! Summary tables computed from a filtered set of observations.
//!
//! Every function here assumes a non-empty input; the caller checks for
//! the empty case and never reaches aggregation with it.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::model::{DayKind, Observation};

// ---------------------------------------------------------------------------
// Table rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: u64,
    pub casual: u64,
    pub registered: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyMean {
    pub hour: u8,
    pub mean_total: f64,
}

/// Mean rentals for one category label (a season or a weather condition).
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMean {
    pub label: String,
    pub mean_total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentMean {
    pub day_kind: DayKind,
    pub mean_casual: f64,
    pub mean_registered: f64,
}

/// Running sum and row count for a mean.
#[derive(Default, Clone, Copy)]
struct Acc {
    sum: u64,
    n: u64,
}

impl Acc {
    fn push(&mut self, v: u32) {
        self.sum += u64::from(v);
        self.n += 1;
    }

    fn mean(self) -> f64 {
        self.sum as f64 / self.n as f64
    }
}

// ---------------------------------------------------------------------------
// Aggregators
// ---------------------------------------------------------------------------

/// Per-day sums over a contiguous calendar: days between the first and
/// last date without any row appear with zero sums.
pub fn daily_totals(rows: &[&Observation]) -> Vec<DailyTotal> {
    let mut by_day: BTreeMap<NaiveDate, DailyTotal> = BTreeMap::new();
    for obs in rows {
        let day = by_day.entry(obs.date).or_insert(DailyTotal {
            date: obs.date,
            total: 0,
            casual: 0,
            registered: 0,
        });
        day.total += u64::from(obs.total_count);
        day.casual += u64::from(obs.casual);
        day.registered += u64::from(obs.registered);
    }

    let (Some(&first), Some(&last)) = (by_day.keys().next(), by_day.keys().next_back()) else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|date| {
            by_day.get(&date).copied().unwrap_or(DailyTotal {
                date,
                total: 0,
                casual: 0,
                registered: 0,
            })
        })
        .collect()
}

/// Mean `total_count` per hour of day, ascending by hour.
pub fn hourly_trend(rows: &[&Observation]) -> Vec<HourlyMean> {
    let mut by_hour: BTreeMap<u8, Acc> = BTreeMap::new();
    for obs in rows {
        by_hour.entry(obs.hour).or_default().push(obs.total_count);
    }
    by_hour
        .into_iter()
        .map(|(hour, acc)| HourlyMean {
            hour,
            mean_total: acc.mean(),
        })
        .collect()
}

/// Group by a label, mean `total_count`, highest mean first.
fn mean_by_label<'a>(
    rows: &[&'a Observation],
    key: impl Fn(&'a Observation) -> &'a str,
) -> Vec<CategoryMean> {
    let mut by_label: BTreeMap<&str, Acc> = BTreeMap::new();
    for obs in rows {
        by_label.entry(key(obs)).or_default().push(obs.total_count);
    }
    let mut table: Vec<CategoryMean> = by_label
        .into_iter()
        .map(|(label, acc)| CategoryMean {
            label: label.to_string(),
            mean_total: acc.mean(),
        })
        .collect();
    // Stable: equal means keep label order.
    table.sort_by(|a, b| b.mean_total.total_cmp(&a.mean_total));
    table
}

pub fn by_weather(rows: &[&Observation]) -> Vec<CategoryMean> {
    mean_by_label(rows, |o| o.weather_condition.as_str())
}

pub fn by_season(rows: &[&Observation]) -> Vec<CategoryMean> {
    mean_by_label(rows, |o| o.season.as_str())
}

/// Mean casual and registered rentals per workingday flag.
pub fn user_segments(rows: &[&Observation]) -> Vec<SegmentMean> {
    let mut by_kind: BTreeMap<DayKind, (Acc, Acc)> = BTreeMap::new();
    for obs in rows {
        let (casual, registered) = by_kind.entry(obs.day_kind).or_default();
        casual.push(obs.casual);
        registered.push(obs.registered);
    }
    by_kind
        .into_iter()
        .map(|(day_kind, (casual, registered))| SegmentMean {
            day_kind,
            mean_casual: casual.mean(),
            mean_registered: registered.mean(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// KPIs
// ---------------------------------------------------------------------------

/// The four metric tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Kpis {
    pub total_rentals: u64,
    /// Mean of the daily totals, rounded half to even.
    pub mean_daily_rentals: u64,
    pub total_registered: u64,
    pub total_casual: u64,
}

impl Kpis {
    /// Substitute shown when the filter leaves no rows.
    pub fn zero() -> Self {
        Kpis::default()
    }

    pub fn from_daily(daily: &[DailyTotal]) -> Self {
        if daily.is_empty() {
            return Kpis::zero();
        }
        let total_rentals: u64 = daily.iter().map(|d| d.total).sum();
        let mean = total_rentals as f64 / daily.len() as f64;
        Kpis {
            total_rentals,
            mean_daily_rentals: mean.round_ties_even() as u64,
            total_registered: daily.iter().map(|d| d.registered).sum(),
            total_casual: daily.iter().map(|d| d.casual).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::obs;

    fn refs(rows: &[Observation]) -> Vec<&Observation> {
        rows.iter().collect()
    }

    #[test]
    fn daily_sums_cover_every_calendar_day() {
        let rows = vec![
            obs("2011-01-01", 0, "Winter", "Clear", 8),
            obs("2011-01-01", 1, "Winter", "Clear", 4),
            obs("2011-01-03", 0, "Winter", "Clear", 20),
        ];
        let daily = daily_totals(&refs(&rows));
        assert_eq!(daily.len(), 3);
        assert_eq!(daily[0].total, 12);
        assert_eq!(daily[0].casual, 2 + 1);
        assert_eq!(daily[0].registered, 6 + 3);
        assert_eq!(daily[1].date, NaiveDate::from_ymd_opt(2011, 1, 2).unwrap());
        assert_eq!(daily[1].total, 0);
        assert_eq!(daily[2].total, 20);
    }

    #[test]
    fn daily_total_matches_raw_sum() {
        let rows: Vec<Observation> = (0..48u32)
            .map(|i| {
                let day = format!("2011-02-{:02}", 1 + i / 24);
                obs(&day, (i % 24) as u8, "Winter", "Clear", i * 7 + 1)
            })
            .collect();
        let raw: u64 = rows.iter().map(|o| u64::from(o.total_count)).sum();
        let daily: u64 = daily_totals(&refs(&rows)).iter().map(|d| d.total).sum();
        assert_eq!(daily, raw);
    }

    #[test]
    fn hourly_trend_has_one_row_per_hour_present() {
        let rows = vec![
            obs("2011-01-01", 8, "Winter", "Clear", 100),
            obs("2011-01-02", 8, "Winter", "Clear", 200),
            obs("2011-01-01", 17, "Winter", "Clear", 50),
            obs("2011-01-01", 3, "Winter", "Clear", 1),
        ];
        let hourly = hourly_trend(&refs(&rows));
        let hours: Vec<u8> = hourly.iter().map(|h| h.hour).collect();
        assert_eq!(hours, [3, 8, 17]);
        assert_eq!(hourly[1].mean_total, 150.0);
    }

    #[test]
    fn by_season_means_sorted_descending() {
        let rows = vec![
            obs("2011-04-01", 0, "spring", "Clear", 10),
            obs("2011-04-02", 0, "spring", "Clear", 20),
            obs("2011-07-01", 0, "summer", "Clear", 30),
        ];
        let seasons = by_season(&refs(&rows));
        assert_eq!(
            seasons,
            vec![
                CategoryMean { label: "summer".into(), mean_total: 30.0 },
                CategoryMean { label: "spring".into(), mean_total: 15.0 },
            ]
        );
    }

    #[test]
    fn by_weather_one_row_per_condition_ties_by_label() {
        let rows = vec![
            obs("2011-01-01", 0, "Winter", "Mist", 10),
            obs("2011-01-01", 1, "Winter", "Clear", 10),
            obs("2011-01-01", 2, "Winter", "Rain", 2),
            obs("2011-01-01", 3, "Winter", "Rain", 4),
        ];
        let weather = by_weather(&refs(&rows));
        let labels: Vec<&str> = weather.iter().map(|w| w.label.as_str()).collect();
        assert_eq!(labels, ["Clear", "Mist", "Rain"]);
        assert_eq!(weather[2].mean_total, 3.0);
    }

    #[test]
    fn user_segments_average_per_flag() {
        let mut holiday = obs("2011-01-01", 0, "Winter", "Clear", 0);
        holiday.day_kind = DayKind::NonWorking;
        holiday.casual = 30;
        holiday.registered = 10;
        let mut work_a = obs("2011-01-03", 0, "Winter", "Clear", 0);
        work_a.casual = 2;
        work_a.registered = 40;
        let mut work_b = work_a.clone();
        work_b.casual = 4;
        work_b.registered = 60;

        let rows = vec![work_a, holiday, work_b];
        let segments = user_segments(&refs(&rows));
        assert_eq!(
            segments,
            vec![
                SegmentMean { day_kind: DayKind::NonWorking, mean_casual: 30.0, mean_registered: 10.0 },
                SegmentMean { day_kind: DayKind::Working, mean_casual: 3.0, mean_registered: 50.0 },
            ]
        );
    }

    #[test]
    fn kpis_from_daily_round_half_to_even() {
        let day = |d: u32, total: u64| DailyTotal {
            date: NaiveDate::from_ymd_opt(2011, 1, d).unwrap(),
            total,
            casual: total / 2,
            registered: total - total / 2,
        };
        let kpis = Kpis::from_daily(&[day(1, 10), day(2, 15)]);
        assert_eq!(kpis.total_rentals, 25);
        assert_eq!(kpis.mean_daily_rentals, 12);
        assert_eq!(kpis.total_casual + kpis.total_registered, 25);

        let kpis = Kpis::from_daily(&[day(1, 10), day(2, 17)]);
        assert_eq!(kpis.mean_daily_rentals, 14);

        assert_eq!(Kpis::from_daily(&[]), Kpis::zero());
    }
}
