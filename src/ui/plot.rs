use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, Ui};
use egui_plot::{
    uniform_grid_spacer, Bar, BarChart, GridMark, Legend, Line, LineStyle, Plot, PlotPoints,
    Points, VLine,
};

use crate::color::{self, ColorMap};
use crate::report::Report;

/// Hours highlighted as commute peaks on the hourly chart.
pub const PEAK_HOURS: [f64; 2] = [8.0, 17.0];

const CHART_HEIGHT: f32 = 300.0;

pub const SEGMENT_CHART_TITLE: &str = "Working Days vs Holidays";

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Axis labels for bars placed at integer positions `0..labels.len()`.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let pos = mark.value.round();
        if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
            return String::new();
        }
        labels.get(pos as usize).cloned().unwrap_or_default()
    }
}

fn day_number(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

fn day_label(value: f64) -> Option<String> {
    NaiveDate::from_num_days_from_ce_opt(value.round() as i32).map(|d| d.to_string())
}

/// Axis label for whole-day grid marks; sub-day marks stay blank.
fn day_axis_label(value: f64) -> String {
    if (value - value.round()).abs() > 1e-6 {
        return String::new();
    }
    day_label(value).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tab (a): daily trend and rush hour
// ---------------------------------------------------------------------------

pub fn trend_tab(ui: &mut Ui, report: &Report) {
    ui.heading("Rental Trend & Rush Hour");
    daily_chart(ui, report);
    ui.add_space(12.0);
    ui.strong("Rush Hour Analysis");
    hourly_chart(ui, report);
}

fn daily_chart(ui: &mut Ui, report: &Report) {
    let points: PlotPoints = report
        .daily
        .iter()
        .map(|d| [day_number(d.date), d.total as f64])
        .collect();

    Plot::new("daily_trend")
        .height(CHART_HEIGHT)
        .y_axis_label("Total Rentals")
        .x_axis_formatter(|mark, _range| day_axis_label(mark.value))
        .label_formatter(|_name, value| {
            let day = day_label(value.x).unwrap_or_default();
            format!("{day}\n{:.0} rentals", value.y)
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name("Daily rentals")
                    .color(color::DAILY_LINE)
                    .width(2.0),
            );
        });
}

fn hourly_chart(ui: &mut Ui, report: &Report) {
    let coords: Vec<[f64; 2]> = report
        .hourly
        .iter()
        .map(|h| [f64::from(h.hour), h.mean_total])
        .collect();

    Plot::new("hourly_trend")
        .height(CHART_HEIGHT)
        .x_axis_label("Hour (00:00 - 23:00)")
        .y_axis_label("Average Rentals")
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 6.0, 24.0]))
        .include_x(0.0)
        .include_x(23.0)
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for hour in PEAK_HOURS {
                plot_ui.vline(
                    VLine::new(hour)
                        .color(color::PEAK_MARKER)
                        .style(LineStyle::dashed_loose()),
                );
            }
            plot_ui.line(
                Line::new(PlotPoints::from(coords.clone()))
                    .name("Mean rentals")
                    .color(color::HOURLY_LINE)
                    .width(3.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(coords))
                    .color(color::HOURLY_LINE)
                    .radius(4.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Tab (b): weather and season
// ---------------------------------------------------------------------------

pub fn weather_tab(ui: &mut Ui, report: &Report) {
    ui.heading("Environmental Factors");
    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("By Weather");
        weather_chart(&mut cols[0], report);
        cols[1].strong("By Season");
        season_chart(&mut cols[1], report);
    });
}

/// Horizontal bars, highest mean on top.
fn weather_chart(ui: &mut Ui, report: &Report) {
    let n = report.by_weather.len();
    let colors = ColorMap::cycling(
        report.by_weather.iter().map(|w| w.label.as_str()),
        &color::WEATHER_PALETTE,
    );
    let bars: Vec<Bar> = report
        .by_weather
        .iter()
        .enumerate()
        .map(|(i, w)| {
            Bar::new((n - 1 - i) as f64, w.mean_total)
                .name(&w.label)
                .fill(colors.color_for(&w.label))
                .width(0.7)
        })
        .collect();
    let labels: Vec<String> = report.by_weather.iter().rev().map(|w| w.label.clone()).collect();

    Plot::new("by_weather")
        .height(CHART_HEIGHT)
        .x_axis_label("Average Rentals")
        .y_axis_formatter(category_axis(labels))
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .include_x(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

fn season_chart(ui: &mut Ui, report: &Report) {
    let colors = ColorMap::generated(report.by_season.iter().map(|s| s.label.as_str()));
    let bars: Vec<Bar> = report
        .by_season
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Bar::new(i as f64, s.mean_total)
                .name(&s.label)
                .fill(colors.color_for(&s.label))
                .width(0.7)
        })
        .collect();
    let labels: Vec<String> = report.by_season.iter().map(|s| s.label.clone()).collect();

    Plot::new("by_season")
        .height(CHART_HEIGHT)
        .y_axis_label("Average Rentals")
        .x_axis_formatter(category_axis(labels))
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Tab (c): casual vs registered
// ---------------------------------------------------------------------------

pub fn users_tab(ui: &mut Ui, report: &Report) {
    ui.heading("User Type Comparison");
    segment_chart(ui, report);

    egui::CollapsingHeader::new("💡 Insight").show(ui, |ui: &mut Ui| {
        ui.label(
            "• Registered users (members) dominate on working days: bikes serve \
             as everyday transport to work and school.",
        );
        ui.label(
            "• Casual users rise sharply on holidays and weekends, pointing to \
             recreational use.",
        );
    });
}

fn segment_chart(ui: &mut Ui, report: &Report) {
    const OFFSET: f64 = 0.2;

    ui.strong(SEGMENT_CHART_TITLE);
    let casual: Vec<Bar> = report
        .segments
        .iter()
        .enumerate()
        .map(|(i, s)| Bar::new(i as f64 - OFFSET, s.mean_casual).width(OFFSET * 2.0))
        .collect();
    let registered: Vec<Bar> = report
        .segments
        .iter()
        .enumerate()
        .map(|(i, s)| Bar::new(i as f64 + OFFSET, s.mean_registered).width(OFFSET * 2.0))
        .collect();
    let labels: Vec<String> = report.segments.iter().map(|s| s.day_kind.to_string()).collect();

    Plot::new("user_segments")
        .height(CHART_HEIGHT * 1.2)
        .y_axis_label("Average Rentals")
        .x_axis_formatter(category_axis(labels))
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .legend(Legend::default())
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(casual)
                    .name("Casual")
                    .color(color::CASUAL_BAR),
            );
            plot_ui.bar_chart(
                BarChart::new(registered)
                    .name("Registered")
                    .color(color::REGISTERED_BAR),
            );
        });
}
