use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

use super::model::{DayKind, Dataset, Observation};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Line {line}: unparsable date '{value}'")]
    Date { line: usize, value: String },

    #[error("Line {line}: hour {value} is outside 0-23")]
    Hour { line: usize, value: u8 },

    #[error("Line {line}: unrecognised workingday flag '{value}'")]
    WorkingDay { line: usize, value: String },
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Columns read from the CSV; any other columns are ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    date: String,
    hour: u8,
    season: String,
    weather_condition: String,
    workingday_hourly: String,
    total_count: u32,
    casual_hourly: u32,
    registered_hourly: u32,
}

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

impl RawRecord {
    fn into_observation(self, line: usize) -> Result<Observation, LoadError> {
        let date = parse_date(&self.date).ok_or_else(|| LoadError::Date {
            line,
            value: self.date.clone(),
        })?;
        if self.hour > 23 {
            return Err(LoadError::Hour {
                line,
                value: self.hour,
            });
        }
        let day_kind: DayKind = self
            .workingday_hourly
            .parse()
            .map_err(|_| LoadError::WorkingDay {
                line,
                value: self.workingday_hourly.clone(),
            })?;

        Ok(Observation {
            date,
            hour: self.hour,
            season: self.season,
            weather_condition: self.weather_condition,
            day_kind,
            total_count: self.total_count,
            casual: self.casual_hourly,
            registered: self.registered_hourly,
        })
    }
}

/// Load the bike-sharing CSV and return the observations sorted by date.
pub fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut observations = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        // +2: one for the header, one for 1-based line numbers.
        let line = row_no + 2;
        observations.push(result?.into_observation(line)?);
    }

    let inconsistent = observations
        .iter()
        .filter(|o| !o.counts_consistent())
        .count();
    if inconsistent > 0 {
        log::warn!(
            "{inconsistent} rows in {} have total_count below casual + registered",
            path.display()
        );
    }

    Ok(Dataset::from_observations(observations))
}

// ---------------------------------------------------------------------------
// Memo keyed by path + modification time
// ---------------------------------------------------------------------------

struct CachedDataset {
    modified: Option<SystemTime>,
    dataset: Arc<Dataset>,
}

/// Holds the dataset of the most recently loaded path and reloads it only
/// when its modification time changes. Loading another path evicts it.
#[derive(Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CachedDataset>,
}

impl DatasetCache {
    pub fn load(&mut self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        let modified = std::fs::metadata(path)
            .map_err(|e| LoadError::Io(path.to_path_buf(), e))?
            .modified()
            .ok();

        if let Some(entry) = self.entries.get(path) {
            if entry.modified.is_some() && entry.modified == modified {
                log::debug!("Cache hit for {}", path.display());
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        let dataset = Arc::new(load_csv(path)?);
        log::info!(
            "Loaded {} observations from {} ({} seasons, {} weather conditions)",
            dataset.len(),
            path.display(),
            dataset.seasons.len(),
            dataset.weather_conditions.len()
        );
        if dataset.is_empty() {
            log::warn!("{} contains no rows", path.display());
        }
        self.entries.clear();
        self.entries.insert(
            path.to_path_buf(),
            CachedDataset {
                modified,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }
}
