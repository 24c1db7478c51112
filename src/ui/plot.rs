use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, FontId, RichText, ScrollArea, Sense, Ui};
use egui_plot::{uniform_grid_spacer, Bar, BarChart, GridMark, Legend, Plot, PlotUi};

use crate::color;
use crate::presenter::{
    BarSeries, ChartKind, ChartView, HeatmapGrid, StackedSeries, NO_CHART_DATA_MESSAGE,
};

const HEATMAP_CELL: egui::Vec2 = egui::vec2(56.0, 26.0);

// ---------------------------------------------------------------------------
// Frequency bar chart (central panel)
// ---------------------------------------------------------------------------

/// Render the chart area with the given height, filling the available width.
pub fn frequency_chart(ui: &mut Ui, chart: &ChartView, height: f32) {
    let size = egui::vec2(ui.available_width(), height);
    match chart {
        ChartView::Empty => {
            ui.allocate_space(size);
        }
        ChartView::NoData => {
            ui.allocate_ui(size, |ui: &mut Ui| {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.label(RichText::new(NO_CHART_DATA_MESSAGE).color(Color32::GRAY));
                });
            });
        }
        ChartView::Bars(series) => bar_plot(ui, series, height),
        ChartView::Stacked(series) => stacked_plot(ui, series, height),
        ChartView::Heatmap(grid) => heatmap(ui, grid, height),
    }
}

/// Bar position of the `i`-th bar. In the wide layout bars run top to bottom
/// along the y axis, tallest first.
fn bar_position(i: usize, wide: bool) -> f64 {
    if wide {
        -(i as f64)
    } else {
        i as f64
    }
}

/// Category name for an axis mark; blank between bars.
fn category_label(labels: &[String], position: f64, wide: bool) -> String {
    if (position - position.round()).abs() > 1e-6 {
        return String::new();
    }
    let idx = if wide { -position.round() } else { position.round() };
    if idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

fn bar_plot(ui: &mut Ui, series: &BarSeries, height: f32) {
    let wide = series.wide_labels;
    let colors = color::bar_palette(series.kind, series.bars.len());

    let bars: Vec<Bar> = series
        .bars
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, (bar, fill))| {
            Bar::new(bar_position(i, wide), bar.count as f64)
                .name(format!("{}: {}", bar.label, bar.count))
                .fill(fill)
                .width(0.7)
        })
        .collect();

    let mut chart = BarChart::new(bars).color(color::accent(series.kind));
    if wide {
        chart = chart.horizontal();
    }

    let labels: Vec<String> = series.bars.iter().map(|b| b.label.clone()).collect();
    ui.label(RichText::new(series.kind.title()).strong());
    let axis = CategoryAxis {
        labels,
        wide,
        max: series.max_count(),
    };
    show_category_plot(ui, "frequency_chart", axis, height, false, |plot_ui| {
        plot_ui.bar_chart(chart)
    });
}

/// Category names along the bar axis and the count range across it.
struct CategoryAxis {
    labels: Vec<String>,
    wide: bool,
    max: usize,
}

/// Fixed, non-interactive plot with category names on the bar axis.
fn show_category_plot(
    ui: &mut Ui,
    id: &str,
    axis: CategoryAxis,
    height: f32,
    legend: bool,
    add_contents: impl FnOnce(&mut PlotUi),
) {
    let CategoryAxis { labels, wide, max } = axis;
    let formatter = move |mark: GridMark, _range: &RangeInclusive<f64>| {
        category_label(&labels, mark.value, wide)
    };
    let category_spacing = uniform_grid_spacer(|_| [1.0, 5.0, 10.0]);

    let mut plot = Plot::new(id)
        .height(height)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .reset();

    if legend {
        plot = plot.legend(Legend::default());
    }
    plot = if wide {
        plot.y_axis_formatter(formatter)
            .y_grid_spacer(category_spacing)
            .x_axis_label("Count")
            .include_x(0.0)
            .include_x(max as f64)
    } else {
        plot.x_axis_formatter(formatter)
            .x_grid_spacer(category_spacing)
            .y_axis_label("Count")
            .include_y(0.0)
            .include_y(max as f64)
    };
    plot.show(ui, add_contents);
}

/// One bar chart per level type, each stacked on the ones before it.
fn stacked_plot(ui: &mut Ui, series: &StackedSeries, height: f32) {
    let wide = series.wide_labels;
    let colors = color::layer_palette(series.layers.len());

    let mut charts: Vec<BarChart> = Vec::with_capacity(series.layers.len());
    for (layer, fill) in series.layers.iter().zip(colors) {
        let bars: Vec<Bar> = layer
            .counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                Bar::new(bar_position(i, wide), count as f64)
                    .name(format!("{}, {}: {count}", series.categories[i], layer.label))
                    .fill(fill)
                    .width(0.7)
            })
            .collect();
        let mut chart = BarChart::new(bars).name(&layer.label).color(fill);
        if wide {
            chart = chart.horizontal();
        }
        let below: Vec<&BarChart> = charts.iter().collect();
        chart = chart.stack_on(&below);
        charts.push(chart);
    }

    ui.label(RichText::new(ChartKind::LevelTypesByContaminant.title()).strong());
    let axis = CategoryAxis {
        labels: series.categories.clone(),
        wide,
        max: series.max_total(),
    };
    show_category_plot(ui, "stacked_chart", axis, height, true, |plot_ui| {
        for chart in charts {
            plot_ui.bar_chart(chart);
        }
    });
}

/// Count grid painted cell by cell; darker means more records.
fn heatmap(ui: &mut Ui, grid: &HeatmapGrid, height: f32) {
    let max = grid.max_count();
    ui.label(RichText::new(ChartKind::Heatmap.title()).strong());
    ScrollArea::both()
        .id_salt("heatmap_scroll")
        .max_height(height)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("heatmap_grid")
                .spacing([2.0, 2.0])
                .show(ui, |ui: &mut Ui| {
                    ui.label("");
                    for commodity in &grid.columns {
                        ui.add_sized(
                            [HEATMAP_CELL.x, HEATMAP_CELL.y],
                            egui::Label::new(RichText::new(commodity).small()).truncate(),
                        )
                        .on_hover_text(commodity.as_str());
                    }
                    ui.end_row();

                    for (contaminant, counts) in grid.rows.iter().zip(&grid.counts) {
                        ui.label(contaminant);
                        for (commodity, &count) in grid.columns.iter().zip(counts) {
                            let (rect, response) =
                                ui.allocate_exact_size(HEATMAP_CELL, Sense::hover());
                            let fill = color::heat(count, max);
                            ui.painter().rect_filled(rect, 2.0, fill);
                            ui.painter().text(
                                rect.center(),
                                Align2::CENTER_CENTER,
                                count.to_string(),
                                FontId::proportional(11.0),
                                color::contrast_text(fill),
                            );
                            response.on_hover_text(format!("{contaminant} × {commodity}: {count}"));
                        }
                        ui.end_row();
                    }
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        vec!["Lead".into(), "Mercury".into(), "Arsenic".into()]
    }

    #[test]
    fn labels_sit_on_whole_positions_only() {
        assert_eq!(category_label(&labels(), 1.0, false), "Mercury");
        assert_eq!(category_label(&labels(), 0.5, false), "");
        assert_eq!(category_label(&labels(), 3.0, false), "");
        assert_eq!(category_label(&labels(), -1.0, false), "");
    }

    #[test]
    fn wide_layout_counts_downwards() {
        assert_eq!(bar_position(2, true), -2.0);
        assert_eq!(category_label(&labels(), -2.0, true), "Arsenic");
        assert_eq!(category_label(&labels(), 1.0, true), "");
    }
}
