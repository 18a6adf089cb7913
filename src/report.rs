use crate::data::aggregate::{
    self, CategoryMean, DailyTotal, HourlyMean, Kpis, SegmentMean,
};
use crate::data::model::Observation;

// ---------------------------------------------------------------------------
// Dashboard view: EMPTY or POPULATED
// ---------------------------------------------------------------------------

/// All aggregate tables for one filter selection.
#[derive(Debug, Clone)]
pub struct Report {
    pub daily: Vec<DailyTotal>,
    pub hourly: Vec<HourlyMean>,
    pub by_weather: Vec<CategoryMean>,
    pub by_season: Vec<CategoryMean>,
    pub segments: Vec<SegmentMean>,
    pub kpis: Kpis,
}

#[derive(Debug, Clone, Default)]
pub enum DashboardView {
    /// No rows passed the filters: warning, zero metrics, no charts.
    #[default]
    Empty,
    Populated(Box<Report>),
}

impl DashboardView {
    /// Aggregation runs only for a non-empty selection.
    pub fn build(rows: &[&Observation]) -> Self {
        if rows.is_empty() {
            return DashboardView::Empty;
        }
        let daily = aggregate::daily_totals(rows);
        let kpis = Kpis::from_daily(&daily);
        DashboardView::Populated(Box::new(Report {
            hourly: aggregate::hourly_trend(rows),
            by_weather: aggregate::by_weather(rows),
            by_season: aggregate::by_season(rows),
            segments: aggregate::user_segments(rows),
            daily,
            kpis,
        }))
    }

    pub fn kpis(&self) -> Kpis {
        match self {
            DashboardView::Empty => Kpis::zero(),
            DashboardView::Populated(report) => report.kpis,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, DashboardView::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, FilterState};
    use crate::data::model::tests::obs;
    use crate::data::model::Dataset;

    fn dataset() -> Dataset {
        Dataset::from_observations(vec![
            obs("2011-01-01", 8, "Winter", "Clear", 120),
            obs("2011-01-01", 17, "Winter", "Mist", 80),
            obs("2011-04-10", 8, "Spring", "Clear", 300),
            obs("2011-04-12", 12, "Spring", "Rain", 40),
            obs("2011-07-04", 17, "Summer", "Clear", 500),
        ])
    }

    #[test]
    fn empty_selection_gives_zero_kpis() {
        let view = DashboardView::build(&[]);
        assert!(view.is_empty());
        assert_eq!(view.kpis(), Kpis::zero());
    }

    #[test]
    fn full_selection_matches_unfiltered_aggregation() {
        let ds = dataset();
        let filters = FilterState::for_dataset(&ds).unwrap();
        let filtered = DashboardView::build(&filter(&ds, &filters));

        let all: Vec<&Observation> = ds.observations().iter().collect();
        let raw = Kpis::from_daily(&aggregate::daily_totals(&all));

        assert_eq!(filtered.kpis(), raw);
        assert_eq!(raw.total_rentals, 1040);
    }

    #[test]
    fn populated_view_has_every_table() {
        let ds = dataset();
        let all: Vec<&Observation> = ds.observations().iter().collect();
        let DashboardView::Populated(report) = DashboardView::build(&all) else {
            panic!("expected populated view");
        };
        assert_eq!(report.hourly.len(), 3);
        assert_eq!(report.by_weather.len(), 3);
        assert_eq!(report.by_season.len(), 3);
        assert_eq!(report.by_season[0].label, "Summer");
        assert_eq!(report.segments.len(), 1);
        // 2011-01-01 through 2011-07-04 inclusive.
        assert_eq!(report.daily.len(), 185);
    }
}
