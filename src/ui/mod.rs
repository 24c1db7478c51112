pub mod panels;
pub mod plot;
pub mod table;

use crate::data::stats::Summary;
use crate::presenter::{ChartView, Renderer, TableView};

/// The latest presenter output, redrawn by egui every frame.
#[derive(Debug, Default)]
pub struct Surface {
    pub table: TableView,
    pub chart: ChartView,
    pub summary: Summary,
}

impl Renderer for Surface {
    fn render_table(&mut self, table: TableView) {
        self.table = table;
    }

    fn render_chart(&mut self, chart: ChartView) {
        self.chart = chart;
    }

    fn render_summary(&mut self, summary: Summary) {
        self.summary = summary;
    }
}
