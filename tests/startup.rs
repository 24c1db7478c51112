use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use contaminant_explorer::controller::{Controller, CriteriaChange};
use contaminant_explorer::data::filter::Criterion;
use contaminant_explorer::data::loader::{FileSource, StaticSource};
use contaminant_explorer::data::model::Column;
use contaminant_explorer::data::stats::Summary;
use contaminant_explorer::presenter::{
    ChartKind, ChartView, PresenterConfig, Renderer, TableView, LINK_LABEL, LOAD_FAILURE_MESSAGE,
    NO_CHART_DATA_MESSAGE, NO_MATCHES_MESSAGE,
};
use contaminant_explorer::state::LoadStatus;

/// Keeps every view handed to it.
#[derive(Default)]
struct Recorder {
    tables: Vec<TableView>,
    charts: Vec<ChartView>,
    summaries: Vec<Summary>,
}

impl Recorder {
    fn table(&self) -> &TableView {
        self.tables.last().expect("a table was rendered")
    }

    fn chart(&self) -> &ChartView {
        self.charts.last().expect("a chart was rendered")
    }

    fn bar_labels(&self) -> Vec<(&str, usize)> {
        match self.chart() {
            ChartView::Bars(series) => series
                .bars
                .iter()
                .map(|b| (b.label.as_str(), b.count))
                .collect(),
            other => panic!("expected bars, got {other:?}"),
        }
    }
}

impl Renderer for Recorder {
    fn render_table(&mut self, table: TableView) {
        self.tables.push(table);
    }
    fn render_chart(&mut self, chart: ChartView) {
        self.charts.push(chart);
    }
    fn render_summary(&mut self, summary: Summary) {
        self.summaries.push(summary);
    }
}

const HEADER: &str = "Contaminant,Commodity,Contaminant Level Type,Level,Reference,Link to Reference";

fn started(body: &str) -> Controller<Recorder> {
    let mut controller = Controller::new(Recorder::default(), PresenterConfig::default());
    controller.start(&StaticSource::new("memory", format!("{HEADER}\n{body}")));
    controller
}

fn temp_csv(name: &str, text: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let path = std::env::temp_dir().join(format!(
        "contaminant-explorer-{name}-{}-{nanos}.csv",
        std::process::id()
    ));
    fs::write(&path, text).expect("write temp csv");
    path
}

#[test]
fn chart_orders_by_frequency_with_first_seen_ties() {
    let controller = started(
        "Lead,Rice,Action Level,1,R,L\n\
         Mercury,Fish,Action Level,1,R,L\n\
         Arsenic,Rice,Action Level,1,R,L\n\
         Lead,Rice,Action Level,1,R,L\n\
         Mercury,Fish,Action Level,1,R,L\n\
         Mercury,Tuna,Action Level,1,R,L\n\
         Lead,Candy,Action Level,1,R,L\n",
    );
    assert_eq!(
        controller.renderer().bar_labels(),
        vec![("Lead", 3), ("Mercury", 3), ("Arsenic", 1)]
    );
}

#[test]
fn startup_renders_every_record_and_view() {
    let controller = started(
        "Lead,Rice,Action Level,0.1 ppm,CPG 1,https://example.org/1\n\
         Arsenic,Rice,Guidance Level,100 ppb,CPG 2,\n",
    );
    let recorder = controller.renderer();
    assert_eq!(recorder.tables.len(), 1);
    assert_eq!(recorder.charts.len(), 1);
    assert_eq!(recorder.summaries.len(), 1);
    assert_eq!(controller.state().status, LoadStatus::Ready);

    let TableView::Rows {
        rows,
        total_matches,
    } = recorder.table()
    else {
        panic!("expected rows");
    };
    assert_eq!(*total_matches, 2);
    assert_eq!(rows[0].link, "https://example.org/1");
    assert_eq!(rows[1].link, "");
    assert_eq!(recorder.summaries[0].records, 2);
    assert!(!LINK_LABEL.is_empty());
}

#[test]
fn filtering_to_nothing_shows_both_placeholders() {
    let mut controller = started("Lead,Rice,Action Level,1,R,L\n");
    controller.set_criterion(Criterion::Search, "no such thing");

    let recorder = controller.renderer();
    assert_eq!(recorder.table(), &TableView::NoMatches);
    assert_eq!(recorder.table().placeholder(), Some(NO_MATCHES_MESSAGE));
    assert_eq!(recorder.chart(), &ChartView::NoData);
    assert_eq!(NO_CHART_DATA_MESSAGE, "No data available for visualization");
}

#[test]
fn header_only_file_renders_empty_views() {
    let mut controller = Controller::new(Recorder::default(), PresenterConfig::default());
    controller.start(&StaticSource::new("memory", format!("{HEADER}\n")));
    assert_eq!(controller.state().status, LoadStatus::Ready);
    assert!(controller
        .state()
        .options
        .for_column(Column::Contaminant)
        .is_empty());
    assert_eq!(controller.renderer().table(), &TableView::NoMatches);
    assert_eq!(controller.renderer().chart(), &ChartView::NoData);
}

#[test]
fn unreachable_file_shows_error_row_and_no_chart() {
    let mut controller = Controller::new(Recorder::default(), PresenterConfig::default());
    let source = FileSource::new("definitely/missing/contaminant-levels.csv");
    controller.start(&source);

    assert_eq!(controller.state().status, LoadStatus::Failed);
    let recorder = controller.renderer();
    assert_eq!(recorder.tables, vec![TableView::LoadFailed]);
    assert_eq!(recorder.table().placeholder(), Some(LOAD_FAILURE_MESSAGE));
    assert!(recorder.charts.is_empty());

    // controls stay inert after a failed load
    controller.set_criterion(Criterion::Contaminant, "Lead");
    assert_eq!(controller.renderer().tables.len(), 1);
}

#[test]
fn rice_then_lead_narrows_and_clear_restores() {
    let mut controller = started(
        "Lead,Rice,Action Level,0.1 ppm,CPG 1,https://a\n\
         Arsenic,Rice,Guidance Level,100 ppb,CPG 2,https://b\n\
         Mercury,Fish,Action Level,1 ppm,CPG 3,https://c\n",
    );
    controller.set_criterion(Criterion::Commodity, "Rice");
    assert_eq!(controller.state().visible_indices, vec![0, 1]);
    assert_eq!(
        controller.renderer().bar_labels(),
        vec![("Lead", 1), ("Arsenic", 1)]
    );

    controller.set_criterion(Criterion::Search, "LEAD");
    assert_eq!(controller.state().visible_indices, vec![0]);

    controller.handle(CriteriaChange::Clear);
    assert_eq!(controller.state().visible_indices, vec![0, 1, 2]);
    assert!(controller.state().filters.is_unset());
}

#[test]
fn chart_kind_follows_selected_column() {
    let mut controller = started(
        "Lead,Rice,Action Level,1,R,L\n\
         Arsenic,Rice,Guidance Level,1,R,L\n\
         Mercury,Fish,Action Level,1,R,L\n",
    );
    controller.handle(CriteriaChange::ChartKind(ChartKind::Commodities));
    assert_eq!(
        controller.renderer().bar_labels(),
        vec![("Rice", 2), ("Fish", 1)]
    );
    controller.handle(CriteriaChange::ChartKind(ChartKind::LevelTypes));
    assert_eq!(
        controller.renderer().bar_labels(),
        vec![("Action Level", 2), ("Guidance Level", 1)]
    );
}

#[test]
fn level_range_change_refilters() {
    let mut controller = started(
        "Lead,Rice,Action Level,0.1 ppm,R,L\n\
         Mercury,Fish,Action Level,1 ppm,R,L\n\
         Aflatoxin,Peanuts,Action Level,20 ppb,R,L\n",
    );
    controller.handle(CriteriaChange::LevelRange {
        min: Some(0.5),
        max: None,
    });
    assert_eq!(controller.state().visible_indices, vec![1, 2]);
}

#[test]
fn file_source_reports_modification_date() {
    let path = temp_csv("dated", &format!("{HEADER}\nLead,Rice,Action Level,1,R,L\n"));
    let source = FileSource::new(&path);
    assert_eq!(source.path(), path.as_path());

    let mut controller = Controller::new(Recorder::default(), PresenterConfig::default());
    controller.start(&source);
    let _ = fs::remove_file(&path);

    let dataset = controller.state().dataset.as_ref().expect("dataset loaded");
    assert_eq!(dataset.len(), 1);
    let date = dataset.last_updated.as_deref().expect("file has an mtime");
    assert_eq!(date.len(), 10);
    assert_eq!(&date[4..5], "-");
}

#[test]
fn shipped_dataset_loads() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/contaminant-levels.csv");
    let mut controller = Controller::new(Recorder::default(), PresenterConfig::default());
    controller.start(&FileSource::new(path));

    assert_eq!(controller.state().status, LoadStatus::Ready);
    let TableView::Rows { total_matches, .. } = controller.renderer().table() else {
        panic!("expected rows");
    };
    assert!(*total_matches > 0);
    assert_eq!(controller.state().dataset.as_ref().map(|d| d.columns.len()), Some(6));
}
