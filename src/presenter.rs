//! Turns the filtered view into table rows and chart bars.
//!
//! Nothing here touches egui: the host receives finished [`TableView`] and
//! [`ChartView`] values through the [`Renderer`] trait.

use crate::data::model::{Column, Dataset};
use crate::data::stats::{value_counts, Summary};

pub const LOAD_FAILURE_MESSAGE: &str = "Error loading data. Please try again later.";
pub const NO_MATCHES_MESSAGE: &str = "No data found matching your filters";
pub const NO_CHART_DATA_MESSAGE: &str = "No data available for visualization";
pub const LINK_LABEL: &str = "View Source";

/// Render surface for the two presenter outputs.
pub trait Renderer {
    fn render_table(&mut self, table: TableView);
    fn render_chart(&mut self, chart: ChartView);
    fn render_summary(&mut self, summary: Summary);
}

/// Limits applied while building views.
#[derive(Debug, Clone, Copy)]
pub struct PresenterConfig {
    /// Rows handed to the table at most.
    pub max_table_rows: usize,
    /// Total label characters above which the chart uses its wide layout.
    pub wide_label_chars: usize,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        PresenterConfig {
            max_table_rows: 1000,
            wide_label_chars: 80,
        }
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// One rendered table row, cells in render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub contaminant: String,
    pub commodity: String,
    pub level_type: String,
    pub level: String,
    pub reference: String,
    pub link: String,
}

/// Content of the table area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TableView {
    /// Initial load still running.
    #[default]
    Loading,
    Rows {
        rows: Vec<TableRow>,
        total_matches: usize,
    },
    NoMatches,
    LoadFailed,
}

impl TableView {
    /// Text for the single placeholder row, when there are no data rows.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            TableView::NoMatches => Some(NO_MATCHES_MESSAGE),
            TableView::LoadFailed => Some(LOAD_FAILURE_MESSAGE),
            TableView::Loading | TableView::Rows { .. } => None,
        }
    }

    /// Line shown above the table describing how much is visible.
    pub fn records_message(&self) -> Option<String> {
        match self {
            TableView::Rows {
                rows,
                total_matches,
            } if rows.len() < *total_matches => Some(format!(
                "Showing top {} records of {total_matches} total matching records",
                group_thousands(rows.len())
            )),
            TableView::Rows { total_matches, .. } => {
                Some(format!("Showing all {total_matches} matching records"))
            }
            TableView::NoMatches => Some("Showing all 0 matching records".to_string()),
            TableView::Loading | TableView::LoadFailed => None,
        }
    }
}

/// Build the table for `view`, capped at `max_rows` rows.
pub fn build_table(dataset: &Dataset, view: &[usize], max_rows: usize) -> TableView {
    if view.is_empty() {
        return TableView::NoMatches;
    }
    let rows = view
        .iter()
        .take(max_rows)
        .map(|&idx| {
            let record = &dataset.records[idx];
            TableRow {
                contaminant: record.get(Column::Contaminant).to_string(),
                commodity: record.get(Column::Commodity).to_string(),
                level_type: record.get(Column::LevelType).to_string(),
                level: record.get(Column::Level).to_string(),
                reference: record.get(Column::Reference).to_string(),
                link: record.get(Column::Link).to_string(),
            }
        })
        .collect();
    TableView::Rows {
        rows,
        total_matches: view.len(),
    }
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Chart
// ---------------------------------------------------------------------------

/// What the chart area shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartKind {
    #[default]
    Contaminants,
    Commodities,
    LevelTypes,
    /// Level types stacked per top contaminant.
    LevelTypesByContaminant,
    /// Top contaminants × top commodities count grid.
    Heatmap,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Contaminants,
        ChartKind::Commodities,
        ChartKind::LevelTypes,
        ChartKind::LevelTypesByContaminant,
        ChartKind::Heatmap,
    ];

    /// Column counted by the plain frequency charts.
    fn frequency_column(self) -> Option<Column> {
        match self {
            ChartKind::Contaminants => Some(Column::Contaminant),
            ChartKind::Commodities => Some(Column::Commodity),
            ChartKind::LevelTypes => Some(Column::LevelType),
            ChartKind::LevelTypesByContaminant | ChartKind::Heatmap => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Contaminants => "Contaminants by Frequency",
            ChartKind::Commodities => "Commodities by Frequency",
            ChartKind::LevelTypes => "Level Types by Frequency",
            ChartKind::LevelTypesByContaminant => "Level Types by Top Contaminants",
            ChartKind::Heatmap => "Top Contaminants vs Top Commodities",
        }
    }
}

/// Categories kept on each axis of the stacked and heatmap charts.
pub const TOP_CATEGORIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBar {
    pub label: String,
    pub count: usize,
}

/// Bars ready to draw, tallest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarSeries {
    pub kind: ChartKind,
    pub bars: Vec<ChartBar>,
    /// Labels too wide to sit side by side under the bars.
    pub wide_labels: bool,
}

impl BarSeries {
    pub fn max_count(&self) -> usize {
        self.bars.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// One stacked layer: a level type's count per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackLayer {
    pub label: String,
    pub counts: Vec<usize>,
}

/// Stacked bars over the top contaminants, one layer per level type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackedSeries {
    pub categories: Vec<String>,
    /// Bottom layer first.
    pub layers: Vec<StackLayer>,
    pub wide_labels: bool,
}

impl StackedSeries {
    /// Height of the tallest stack.
    pub fn max_total(&self) -> usize {
        (0..self.categories.len())
            .map(|i| self.layers.iter().map(|l| l.counts[i]).sum::<usize>())
            .max()
            .unwrap_or(0)
    }
}

/// Record counts per (contaminant, commodity) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapGrid {
    /// Contaminants, most frequent first.
    pub rows: Vec<String>,
    /// Commodities, most frequent first.
    pub columns: Vec<String>,
    /// `counts[row][column]`.
    pub counts: Vec<Vec<usize>>,
}

impl HeatmapGrid {
    pub fn max_count(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Content of the chart area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChartView {
    /// Nothing drawn yet (startup, or the load failed).
    #[default]
    Empty,
    NoData,
    Bars(BarSeries),
    Stacked(StackedSeries),
    Heatmap(HeatmapGrid),
}

/// Aggregate `view` for the selected chart.
pub fn build_chart(
    dataset: &Dataset,
    view: &[usize],
    kind: ChartKind,
    wide_label_chars: usize,
) -> ChartView {
    if view.is_empty() {
        return ChartView::NoData;
    }
    match kind.frequency_column() {
        Some(column) => {
            let bars: Vec<ChartBar> = value_counts(dataset, view, column)
                .into_iter()
                .map(|(label, count)| ChartBar { label, count })
                .collect();
            let wide_labels = is_wide(bars.iter().map(|b| b.label.as_str()), wide_label_chars);
            ChartView::Bars(BarSeries {
                kind,
                wide_labels,
                bars,
            })
        }
        None if kind == ChartKind::Heatmap => ChartView::Heatmap(build_heatmap(dataset, view)),
        None => ChartView::Stacked(build_stacked(dataset, view, wide_label_chars)),
    }
}

fn is_wide<'a>(labels: impl Iterator<Item = &'a str>, wide_label_chars: usize) -> bool {
    labels.map(|l| l.chars().count()).sum::<usize>() > wide_label_chars
}

fn top_values(dataset: &Dataset, view: &[usize], column: Column) -> Vec<String> {
    value_counts(dataset, view, column)
        .into_iter()
        .take(TOP_CATEGORIES)
        .map(|(value, _)| value)
        .collect()
}

fn build_stacked(dataset: &Dataset, view: &[usize], wide_label_chars: usize) -> StackedSeries {
    let categories = top_values(dataset, view, Column::Contaminant);
    let mut layers: Vec<StackLayer> = Vec::new();
    for &idx in view {
        let record = &dataset.records[idx];
        let Some(slot) = categories
            .iter()
            .position(|c| c == record.get(Column::Contaminant))
        else {
            continue;
        };
        let level_type = record.get(Column::LevelType);
        let layer = match layers.iter().position(|l| l.label == level_type) {
            Some(i) => &mut layers[i],
            None => {
                layers.push(StackLayer {
                    label: level_type.to_string(),
                    counts: vec![0; categories.len()],
                });
                let last = layers.len() - 1;
                &mut layers[last]
            }
        };
        layer.counts[slot] += 1;
    }
    StackedSeries {
        wide_labels: is_wide(categories.iter().map(String::as_str), wide_label_chars),
        categories,
        layers,
    }
}

fn build_heatmap(dataset: &Dataset, view: &[usize]) -> HeatmapGrid {
    let rows = top_values(dataset, view, Column::Contaminant);
    let columns = top_values(dataset, view, Column::Commodity);
    let mut counts = vec![vec![0; columns.len()]; rows.len()];
    for &idx in view {
        let record = &dataset.records[idx];
        let row = rows.iter().position(|r| r == record.get(Column::Contaminant));
        let col = columns.iter().position(|c| c == record.get(Column::Commodity));
        if let (Some(row), Some(col)) = (row, col) {
            counts[row][col] += 1;
        }
    }
    HeatmapGrid {
        rows,
        columns,
        counts,
    }
}
