use log::{debug, error, info, trace};

use crate::data::filter::Criterion;
use crate::data::loader::{self, DataSource};
use crate::data::model::Dataset;
use crate::data::stats::Summary;
use crate::presenter::{build_chart, build_table, ChartKind, PresenterConfig, Renderer, TableView};
use crate::state::{AppState, LoadStatus};

/// A user interaction with the filter controls.
#[derive(Debug, Clone, PartialEq)]
pub enum CriteriaChange {
    Set(Criterion, String),
    LevelRange { min: Option<f64>, max: Option<f64> },
    ChartKind(ChartKind),
    Clear,
}

/// Owns the application state and drives the renderer after every change.
pub struct Controller<R: Renderer> {
    state: AppState,
    renderer: R,
    config: PresenterConfig,
}

impl<R: Renderer> Controller<R> {
    pub fn new(renderer: R, config: PresenterConfig) -> Self {
        Self {
            state: AppState::default(),
            renderer,
            config,
        }
    }

    /// Load synchronously from `source` and render the first view.
    pub fn start(&mut self, source: &dyn DataSource) {
        let result = loader::load(source);
        self.on_loaded(result);
    }

    /// Finish startup with the outcome of the dataset load.
    pub fn on_loaded(&mut self, result: anyhow::Result<Dataset>) {
        match result {
            Ok(dataset) => {
                info!(
                    "Loaded {} records with columns {:?}",
                    dataset.len(),
                    dataset.columns
                );
                self.state.set_dataset(dataset);
                self.render();
            }
            Err(e) => {
                error!("Failed to load dataset: {e:#}");
                self.state.set_failed();
                self.renderer.render_table(TableView::LoadFailed);
            }
        }
    }

    /// Apply one interaction. Changes before the dataset is ready are ignored.
    pub fn handle(&mut self, change: CriteriaChange) {
        if self.state.status != LoadStatus::Ready {
            trace!("Ignoring {change:?} while {:?}", self.state.status);
            return;
        }
        trace!("Criteria change: {change:?}");
        let changed = match change {
            CriteriaChange::Set(criterion, value) => self.state.filters.set(criterion, value),
            CriteriaChange::LevelRange { min, max } => {
                self.state.filters.set_level_range(min, max)
            }
            CriteriaChange::ChartKind(kind) => {
                let changed = self.state.chart_kind != kind;
                self.state.chart_kind = kind;
                changed
            }
            CriteriaChange::Clear => {
                let changed = !self.state.filters.is_unset()
                    || self.state.chart_kind != ChartKind::default();
                self.state.filters = Default::default();
                self.state.chart_kind = ChartKind::default();
                changed
            }
        };
        if changed {
            self.recompute();
        }
    }

    pub fn set_criterion(&mut self, criterion: Criterion, value: impl Into<String>) {
        self.handle(CriteriaChange::Set(criterion, value.into()));
    }

    /// Rebuild the filtered view and render it.
    pub fn recompute(&mut self) {
        self.state.refilter();
        debug!(
            "Filtered view: {} of {} records for {:?}",
            self.state.visible_indices.len(),
            self.state.dataset.as_ref().map_or(0, Dataset::len),
            self.state.filters
        );
        self.render();
    }

    fn render(&mut self) {
        let Some(dataset) = &self.state.dataset else {
            return;
        };
        let view = &self.state.visible_indices;
        self.renderer
            .render_table(build_table(dataset, view, self.config.max_table_rows));
        self.renderer.render_chart(build_chart(
            dataset,
            view,
            self.state.chart_kind,
            self.config.wide_label_chars,
        ));
        self.renderer.render_summary(Summary::from_view(dataset, view));
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::StaticSource;
    use crate::presenter::ChartView;

    #[derive(Default)]
    struct Counter {
        tables: usize,
        charts: usize,
        last_table: Option<TableView>,
    }

    impl Renderer for Counter {
        fn render_table(&mut self, table: TableView) {
            self.tables += 1;
            self.last_table = Some(table);
        }
        fn render_chart(&mut self, _chart: ChartView) {
            self.charts += 1;
        }
        fn render_summary(&mut self, _summary: Summary) {}
    }

    const CSV: &str = "Contaminant,Commodity,Contaminant Level Type,Level,Reference,Link to Reference\n\
                       Lead,Rice,Action Level,0.1 ppm,CPG,https://a\n\
                       Arsenic,Rice,Guidance,0.2 ppm,CPG,https://b\n";

    #[test]
    fn changes_before_load_are_ignored() {
        let mut controller = Controller::new(Counter::default(), PresenterConfig::default());
        controller.set_criterion(Criterion::Search, "lead");
        assert_eq!(controller.renderer().tables, 0);
        assert_eq!(controller.state().filters.search, None);
    }

    #[test]
    fn every_effective_change_renders_both_views() {
        let mut controller = Controller::new(Counter::default(), PresenterConfig::default());
        controller.start(&StaticSource::new("memory", CSV));
        assert_eq!(controller.renderer().tables, 1);
        assert_eq!(controller.renderer().charts, 1);

        controller.set_criterion(Criterion::Contaminant, "Lead");
        assert_eq!(controller.renderer().tables, 2);
        assert_eq!(controller.renderer().charts, 2);

        // same value again: nothing to recompute
        controller.set_criterion(Criterion::Contaminant, "Lead");
        assert_eq!(controller.renderer().tables, 2);

        controller.handle(CriteriaChange::Clear);
        assert_eq!(controller.renderer().tables, 3);
        assert_eq!(controller.state().visible_indices, vec![0, 1]);
    }

    #[test]
    fn chart_kind_switch_rerenders() {
        let mut controller = Controller::new(Counter::default(), PresenterConfig::default());
        controller.start(&StaticSource::new("memory", CSV));
        controller.handle(CriteriaChange::ChartKind(ChartKind::Commodities));
        assert_eq!(controller.renderer().charts, 2);
        assert_eq!(controller.state().chart_kind, ChartKind::Commodities);
    }

    #[test]
    fn clear_restores_default_chart() {
        let mut controller = Controller::new(Counter::default(), PresenterConfig::default());
        controller.start(&StaticSource::new("memory", CSV));
        controller.handle(CriteriaChange::ChartKind(ChartKind::Heatmap));
        assert_eq!(controller.renderer().charts, 2);

        controller.handle(CriteriaChange::Clear);
        assert_eq!(controller.state().chart_kind, ChartKind::Contaminants);
        assert_eq!(controller.renderer().charts, 3);

        // already at defaults
        controller.handle(CriteriaChange::Clear);
        assert_eq!(controller.renderer().charts, 3);
    }

    #[test]
    fn non_finite_level_bound_hides_nothing() {
        let csv = "Contaminant,Level\nLead,1 ppm\nMercury,n/a\n";
        let mut controller = Controller::new(Counter::default(), PresenterConfig::default());
        controller.start(&StaticSource::new("memory", csv));
        controller.handle(CriteriaChange::LevelRange {
            min: Some(f64::NAN),
            max: None,
        });
        assert_eq!(controller.state().visible_indices, vec![0, 1]);
        assert_eq!(controller.renderer().tables, 1);
    }

    #[test]
    fn failed_load_renders_error_row_only() {
        let mut controller = Controller::new(Counter::default(), PresenterConfig::default());
        controller.on_loaded(Err(anyhow::anyhow!("unreachable")));
        assert_eq!(controller.state().status, LoadStatus::Failed);
        assert_eq!(controller.renderer().last_table, Some(TableView::LoadFailed));
        assert_eq!(controller.renderer().charts, 0);
    }
}
