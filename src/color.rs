use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// Fixed chart colours.
pub const DAILY_LINE: Color32 = Color32::from_rgb(0x4A, 0x90, 0xE2);
pub const HOURLY_LINE: Color32 = Color32::from_rgb(0xFF, 0x6B, 0x6B);
pub const CASUAL_BAR: Color32 = Color32::from_rgb(0x64, 0xB5, 0xF6);
pub const REGISTERED_BAR: Color32 = Color32::from_rgb(0xFF, 0xB7, 0x4D);
pub const PEAK_MARKER: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 77);
pub const WARNING: Color32 = Color32::from_rgb(0xE6, 0xA2, 0x3C);

/// Weather bars cycle through these.
pub const WEATHER_PALETTE: [Color32; 4] = [
    Color32::from_rgb(0x90, 0xCA, 0xF9),
    Color32::from_rgb(0xCF, 0xD8, 0xDC),
    Color32::from_rgb(0xFF, 0xAB, 0x91),
    Color32::from_rgb(0xFF, 0xCC, 0xBC),
];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// `n` colours from dark blue-violet to yellow-green, evenly spaced.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.5 } else { i as f32 / (n - 1) as f32 };
            let hue = 270.0 - t * 190.0;
            let hsl = Hsl::new(hue, 0.6, 0.3 + t * 0.3);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the labels of a category column to stable colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Spread a generated palette over `labels` in the given order.
    pub fn generated<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        Self::from_pairs(labels.into_iter().zip(palette))
    }

    /// Assign `palette` to `labels`, wrapping around when there are more labels.
    pub fn cycling<'a>(labels: impl IntoIterator<Item = &'a str>, palette: &[Color32]) -> Self {
        Self::from_pairs(labels.into_iter().zip(palette.iter().copied().cycle()))
    }

    fn from_pairs<'a>(pairs: impl Iterator<Item = (&'a str, Color32)>) -> Self {
        ColorMap {
            mapping: pairs.map(|(l, c)| (l.to_string(), c)).collect(),
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}
