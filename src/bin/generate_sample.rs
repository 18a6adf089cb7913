use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// One output row, in the column layout the dashboard reads.
#[derive(Serialize)]
struct Row {
    date: String,
    hour: u32,
    season: &'static str,
    weather_condition: &'static str,
    workingday_hourly: u8,
    total_count: u32,
    casual_hourly: u32,
    registered_hourly: u32,
}

const WEATHER: [(&str, f64); 4] = [
    ("Clear/Partly Cloudy", 1.0),
    ("Misty/Cloudy", 0.85),
    ("Light Snow/Rain", 0.45),
    ("Severe Weather", 0.15),
];

fn season_of(date: NaiveDate) -> (&'static str, f64) {
    match date.month() {
        3..=5 => ("Spring", 0.9),
        6..=8 => ("Summer", 1.15),
        9..=11 => ("Fall", 1.05),
        _ => ("Winter", 0.55),
    }
}

fn pick_weather(rng: &mut StdRng) -> (&'static str, f64) {
    let r: f64 = rng.random();
    let idx = match r {
        r if r < 0.65 => 0,
        r if r < 0.90 => 1,
        r if r < 0.99 => 2,
        _ => 3,
    };
    WEATHER[idx]
}

/// Hourly demand shape: commute peaks on working days, a midday hump otherwise.
fn hourly_profile(hour: u32, working: bool) -> (f64, f64) {
    let h = f64::from(hour);
    let bump = |centre: f64, width: f64| (-(h - centre).powi(2) / (2.0 * width * width)).exp();
    if working {
        let registered = 40.0 + 420.0 * bump(8.0, 1.0) + 480.0 * bump(17.5, 1.3) + 90.0 * bump(12.5, 2.0);
        let casual = 8.0 + 45.0 * bump(14.0, 3.0);
        (casual, registered)
    } else {
        let registered = 20.0 + 190.0 * bump(13.0, 3.5);
        let casual = 10.0 + 160.0 * bump(14.0, 3.0);
        (casual, registered)
    }
}

fn main() -> Result<()> {
    let output: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dashboard/main_data.csv"));
    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut rng = StdRng::seed_from_u64(42);
    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating {}", output.display()))?;

    let start = NaiveDate::from_ymd_opt(2011, 1, 1).context("start date")?;
    let end = NaiveDate::from_ymd_opt(2012, 12, 31).context("end date")?;

    let mut rows = 0usize;
    for date in start.iter_days().take_while(|d| *d <= end) {
        let working = !matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let (season, season_factor) = season_of(date);
        // Ridership grows in the second year.
        let growth = if date.year() == 2012 { 1.6 } else { 1.0 };

        for hour in 0..24 {
            let (weather, weather_factor) = pick_weather(&mut rng);
            let (casual, registered) = hourly_profile(hour, working);
            let scale = season_factor * weather_factor * growth;
            let noise = |rng: &mut StdRng| rng.random_range(0.8..1.2);

            let casual = (casual * scale * noise(&mut rng)).round() as u32;
            let registered = (registered * scale * noise(&mut rng)).round() as u32;

            writer.serialize(Row {
                date: date.to_string(),
                hour,
                season,
                weather_condition: weather,
                workingday_hourly: u8::from(working),
                total_count: casual + registered,
                casual_hourly: casual,
                registered_hourly: registered,
            })?;
            rows += 1;
        }
    }
    writer.flush()?;

    println!("Wrote {rows} hourly rows to {}", output.display());
    Ok(())
}
