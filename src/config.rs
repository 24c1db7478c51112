use std::path::PathBuf;

use crate::presenter::PresenterConfig;

/// Fixed relative location of the dataset.
pub const DEFAULT_DATA_PATH: &str = "data/contaminant-levels.csv";

/// Startup settings of the viewer window.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub data_path: PathBuf,
    pub title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub max_table_rows: usize,
    pub wide_label_chars: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            title: "FDA Food Contaminants Explorer".to_string(),
            window_size: [1280.0, 860.0],
            min_window_size: [720.0, 480.0],
            max_table_rows: 1000,
            wide_label_chars: 80,
        }
    }
}

impl ViewerConfig {
    pub fn presenter(&self) -> PresenterConfig {
        PresenterConfig {
            max_table_rows: self.max_table_rows,
            wide_label_chars: self.wide_label_chars,
        }
    }
}
