use std::path::PathBuf;

use eframe::egui;

pub const DEFAULT_DATA_PATH: &str = "dashboard/main_data.csv";

/// Startup settings: where the data lives and how big the window is.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            window_size: [1400.0, 900.0],
            min_window_size: [800.0, 500.0],
        }
    }
}

impl DashboardConfig {
    /// Build from the process arguments (program name first). The only
    /// argument is an optional data path.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = args.into_iter().nth(1) {
            config.data_path = PathBuf::from(path);
        }
        config
    }

    pub fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title("Bike Sharing Dashboard")
                .with_inner_size(self.window_size)
                .with_min_inner_size(self.min_window_size),
            ..Default::default()
        }
    }
}
