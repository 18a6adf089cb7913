use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::data::filter::{filter, FilterState};
use crate::data::loader::DatasetCache;
use crate::data::model::Dataset;
use crate::report::DashboardView;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Trend,
    Weather,
    Users,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Trend, Tab::Weather, Tab::Users];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Trend => "📈 Trend & Rush Hour",
            Tab::Weather => "🌤 Weather & Season",
            Tab::Users => "👥 User Profile",
        }
    }
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    cache: DatasetCache,

    /// File the current dataset came from.
    pub source: Option<PathBuf>,

    pub dataset: Option<Arc<Dataset>>,

    /// Date range and season selection. `None` until a non-empty dataset is loaded.
    pub filters: Option<FilterState>,

    /// Aggregates for the current filters, rebuilt on every filter change.
    pub view: DashboardView,

    /// Number of rows passing the current filters.
    pub visible_rows: usize,

    pub active_tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load (or fetch from the cache) a dataset and reset the filters to it.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let dataset = self
            .cache
            .load(path)
            .with_context(|| format!("loading {}", path.display()))?;
        self.source = Some(path.to_path_buf());
        self.set_dataset(dataset);
        Ok(())
    }

    /// Like [`AppState::open`], but reports failure in the status line and keeps
    /// the current dataset.
    pub fn open_or_report(&mut self, path: &Path) {
        if let Err(e) = self.open(path) {
            log::error!("Failed to load file: {e:#}");
            self.status_message = Some(format!("Error: {e:#}"));
        }
    }

    /// Ingest a dataset and initialise the filters to select everything.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.filters = FilterState::for_dataset(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the view after a filter change.
    pub fn refilter(&mut self) {
        let (Some(ds), Some(filters)) = (&self.dataset, &self.filters) else {
            self.view = DashboardView::Empty;
            self.visible_rows = 0;
            return;
        };
        let rows = filter(ds, filters);
        self.visible_rows = rows.len();
        self.view = DashboardView::build(&rows);
        log::debug!(
            "Filter {:?} keeps {} of {} rows",
            filters,
            rows.len(),
            ds.len()
        );
    }

    /// Set the date range as picked. A range outside the data or with
    /// `start > end` leaves the view empty.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        if let Some(filters) = &mut self.filters {
            filters.date_range.start = start;
            filters.date_range.end = end;
        }
        self.refilter();
    }

    /// Toggle the "select all seasons" checkbox.
    pub fn set_all_seasons(&mut self, all: bool) {
        if let Some(filters) = &mut self.filters {
            filters.seasons.all = all;
        }
        self.refilter();
    }

    /// Add or remove one season in the multiselect.
    pub fn toggle_season(&mut self, season: &str) {
        if let Some(filters) = &mut self.filters {
            let selected = &mut filters.seasons.selected;
            if !selected.remove(season) {
                selected.insert(season.to_string());
            }
        }
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::Kpis;
    use crate::data::model::tests::obs;

    fn state() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(Arc::new(Dataset::from_observations(vec![
            obs("2011-01-01", 8, "Winter", "Clear", 100),
            obs("2011-04-01", 8, "Spring", "Clear", 200),
            obs("2011-07-01", 8, "Summer", "Rain", 300),
        ])));
        state
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn starts_populated_with_everything_selected() {
        let state = state();
        assert_eq!(state.visible_rows, 3);
        assert!(!state.view.is_empty());
        assert_eq!(state.view.kpis().total_rentals, 600);
    }

    #[test]
    fn unticking_every_season_switches_to_empty_and_back() {
        let mut state = state();
        state.set_all_seasons(false);
        assert_eq!(state.visible_rows, 3);

        for season in ["Winter", "Spring", "Summer"] {
            state.toggle_season(season);
        }
        assert!(state.view.is_empty());
        assert_eq!(state.view.kpis(), Kpis::zero());

        state.toggle_season("Spring");
        assert_eq!(state.visible_rows, 1);
        assert_eq!(state.view.kpis().total_rentals, 200);

        state.set_all_seasons(true);
        assert_eq!(state.visible_rows, 3);
    }

    #[test]
    fn date_range_is_stored_as_picked() {
        let mut state = state();
        state.set_date_range(date("2010-01-01"), date("2011-03-31"));
        let range = state.filters.as_ref().unwrap().date_range;
        assert_eq!(range.start, date("2010-01-01"));
        assert_eq!(range.end, date("2011-03-31"));
        assert_eq!(state.visible_rows, 1);

        state.set_date_range(date("2011-06-01"), date("2011-02-01"));
        assert!(state.view.is_empty());
    }

    #[test]
    fn range_outside_the_data_is_empty_with_zero_kpis() {
        let mut state = state();
        state.set_date_range(date("2013-01-01"), date("2013-12-31"));
        let range = state.filters.as_ref().unwrap().date_range;
        assert_eq!(range.start, date("2013-01-01"));
        assert_eq!(range.end, date("2013-12-31"));
        assert_eq!(state.visible_rows, 0);
        assert!(state.view.is_empty());
        assert_eq!(state.view.kpis(), Kpis::zero());

        state.set_date_range(date("2009-01-01"), date("2010-12-31"));
        assert!(state.view.is_empty());
        assert_eq!(state.view.kpis(), Kpis::zero());
    }

    #[test]
    fn failed_open_keeps_current_dataset() {
        let mut state = state();
        state.open_or_report(Path::new("/definitely/not/here.csv"));
        assert!(state.status_message.as_deref().unwrap().starts_with("Error"));
        assert_eq!(state.visible_rows, 3);
    }
}
