use crate::data::filter::{filtered_indices, FilterCriteria};
use crate::data::model::{Dataset, FilterOptions};
use crate::presenter::ChartKind;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Where the one-off startup load stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    Failed,
}

/// Everything the viewer knows, independent of rendering.
#[derive(Debug, Default)]
pub struct AppState {
    /// Loaded dataset (None until the load finishes).
    pub dataset: Option<Dataset>,

    /// Dropdown contents, built once from the full dataset.
    pub options: FilterOptions,

    /// Active filter selections.
    pub filters: FilterCriteria,

    /// Indices of records passing the current filters.
    pub visible_indices: Vec<usize>,

    /// Column aggregated by the bar chart.
    pub chart_kind: ChartKind,

    pub status: LoadStatus,
}

impl AppState {
    /// Ingest the loaded dataset: build dropdown options and show everything.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.options = FilterOptions::from_dataset(&dataset);
        self.filters = FilterCriteria::default();
        self.visible_indices = (0..dataset.len()).collect();
        self.dataset = Some(dataset);
        self.status = LoadStatus::Ready;
    }

    pub fn set_failed(&mut self) {
        self.dataset = None;
        self.visible_indices.clear();
        self.status = LoadStatus::Failed;
    }

    /// Recompute `visible_indices` from scratch.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.filters);
        }
    }
}
