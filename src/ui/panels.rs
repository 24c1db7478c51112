use eframe::egui::{self, Color32, Hyperlink, RichText, ScrollArea, Ui};

use crate::controller::CriteriaChange;
use crate::data::filter::Criterion;
use crate::data::model::FilterOption;
use crate::data::stats::Summary;
use crate::presenter::ChartKind;
use crate::state::{AppState, LoadStatus};

const ANY_OPTION: &str = "Any";
const SOURCE_URL: &str =
    "https://www.hfpappexternal.fda.gov/scripts/fdcc/index.cfm?set=contaminant-levels";

/// Text typed into the panel that has not been turned into criteria yet.
#[derive(Debug, Default)]
pub struct FilterInputs {
    pub search: String,
    pub level_min: String,
    pub level_max: String,
}

impl FilterInputs {
    /// A finite number, or `None`; `nan` and `inf` do not count.
    fn parsed_bound(text: &str) -> Option<f64> {
        text.trim().parse().ok().filter(|v: &f64| v.is_finite())
    }

    fn bound_is_invalid(text: &str) -> bool {
        !text.trim().is_empty() && Self::parsed_bound(text).is_none()
    }
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter panel and return the interactions of this frame.
pub fn side_panel(
    ui: &mut Ui,
    state: &AppState,
    inputs: &mut FilterInputs,
    summary: &Summary,
) -> Vec<CriteriaChange> {
    let mut changes = Vec::new();

    ui.heading("Data Filters");
    ui.separator();

    if state.status != LoadStatus::Ready {
        ui.label("No dataset loaded.");
        return changes;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for criterion in [
                Criterion::Contaminant,
                Criterion::Commodity,
                Criterion::LevelType,
            ] {
                let Some(column) = criterion.column() else {
                    continue;
                };
                category_filter(
                    ui,
                    criterion,
                    state.options.for_column(column),
                    state.filters.get(criterion),
                    &mut changes,
                );
                ui.add_space(6.0);
            }

            ui.strong("Search across all fields");
            let search = ui.add(
                egui::TextEdit::singleline(&mut inputs.search)
                    .id_salt(Criterion::Search.control_id())
                    .hint_text("Enter search terms...")
                    .desired_width(f32::INFINITY),
            );
            if search.changed() {
                changes.push(CriteriaChange::Set(
                    Criterion::Search,
                    inputs.search.clone(),
                ));
            }
            ui.add_space(6.0);

            ui.strong("Level range");
            let mut range_changed = false;
            ui.horizontal(|ui: &mut Ui| {
                for (text, hint) in [(&mut inputs.level_min, "min"), (&mut inputs.level_max, "max")]
                {
                    let invalid = FilterInputs::bound_is_invalid(text);
                    let mut edit = egui::TextEdit::singleline(text)
                        .hint_text(hint)
                        .desired_width(70.0);
                    if invalid {
                        edit = edit.text_color(Color32::RED);
                    }
                    range_changed |= ui.add(edit).changed();
                }
            });
            if range_changed {
                changes.push(CriteriaChange::LevelRange {
                    min: FilterInputs::parsed_bound(&inputs.level_min),
                    max: FilterInputs::parsed_bound(&inputs.level_max),
                });
            }
            ui.add_space(6.0);

            if ui.button("Clear All Filters").clicked() {
                *inputs = FilterInputs::default();
                changes.push(CriteriaChange::Clear);
            }

            ui.separator();
            summary_card(ui, summary);
        });

    changes
}

/// One dropdown with an `Any` entry followed by the sorted values.
fn category_filter(
    ui: &mut Ui,
    criterion: Criterion,
    options: &[FilterOption],
    current: Option<&str>,
    changes: &mut Vec<CriteriaChange>,
) {
    if let Some(column) = criterion.column() {
        ui.strong(column.label());
    }
    egui::ComboBox::from_id_salt(criterion.control_id())
        .selected_text(current.unwrap_or(ANY_OPTION))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), ANY_OPTION).clicked() {
                changes.push(CriteriaChange::Set(criterion, String::new()));
            }
            for option in options {
                let selected = current == Some(option.value.as_str());
                if ui.selectable_label(selected, option.label()).clicked() {
                    changes.push(CriteriaChange::Set(criterion, option.value.clone()));
                }
            }
        });
}

fn summary_card(ui: &mut Ui, summary: &Summary) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        egui::Grid::new("summary_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui: &mut Ui| {
                for (label, value) in summary.rows() {
                    ui.label(label);
                    ui.strong(value);
                    ui.end_row();
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Chart selector
// ---------------------------------------------------------------------------

/// Row of chart kinds; returns the one clicked this frame.
pub fn chart_selector(ui: &mut Ui, current: ChartKind) -> Option<ChartKind> {
    let mut picked = None;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for kind in ChartKind::ALL {
            if ui.selectable_label(current == kind, kind.title()).clicked() {
                picked = Some(kind);
            }
        }
    });
    picked
}

// ---------------------------------------------------------------------------
// Top bar / footer
// ---------------------------------------------------------------------------

pub fn top_bar(ui: &mut Ui, title: &str, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(title);
        ui.separator();

        match state.status {
            LoadStatus::Loading => {
                ui.spinner();
                ui.label("Loading data…");
            }
            LoadStatus::Failed => {
                ui.label(RichText::new("Dataset unavailable").color(Color32::RED));
            }
            LoadStatus::Ready => {
                if let Some(ds) = &state.dataset {
                    ui.label(format!(
                        "{} records loaded, {} visible",
                        ds.len(),
                        state.visible_indices.len()
                    ));
                    if let Some(date) = &ds.last_updated {
                        ui.separator();
                        ui.label(RichText::new(format!("Dataset last updated: {date}")).small());
                    }
                }
            }
        }
    });
}

pub fn footer(ui: &mut Ui) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Data source: FDA Chemical Contaminants Transparency Tool |");
        ui.add(Hyperlink::from_label_and_url("FDA Website", SOURCE_URL).open_in_new_tab(true));
    });
}
