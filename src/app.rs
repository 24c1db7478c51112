use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui;

use crate::config::ViewerConfig;
use crate::controller::{Controller, CriteriaChange};
use crate::data::loader::{self, DataSource, FileSource};
use crate::data::model::Dataset;
use crate::error::LoadError;
use crate::ui::panels::{self, FilterInputs};
use crate::ui::{plot, table, Surface};

type LoadResult = anyhow::Result<Dataset>;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExplorerApp {
    controller: Controller<Surface>,
    /// Receives the dataset from the loader thread; `None` once delivered.
    pending: Option<Receiver<LoadResult>>,
    location: String,
    inputs: FilterInputs,
    title: String,
}

impl ExplorerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &ViewerConfig) -> Self {
        let source = FileSource::new(config.data_path.clone());
        let location = source.location();
        let mut controller = Controller::new(Surface::default(), config.presenter());

        let pending = match spawn_load(source, cc.egui_ctx.clone()) {
            Ok(rx) => Some(rx),
            Err(e) => {
                controller.on_loaded(Err(anyhow::Error::new(e).context("starting loader thread")));
                None
            }
        };

        Self {
            controller,
            pending,
            location,
            inputs: FilterInputs::default(),
            title: config.title.clone(),
        }
    }

    /// Hand the loader result to the controller once it has arrived.
    fn poll_load(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        let Some(result) = receive_load(rx, &self.location) else {
            return;
        };
        self.pending = None;
        self.controller.on_loaded(result);
    }
}

/// The loader outcome if one is ready. A loader that went away without
/// sending counts as an interrupted load.
fn receive_load(rx: &Receiver<LoadResult>, location: &str) -> Option<LoadResult> {
    match rx.try_recv() {
        Ok(result) => Some(result),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => Some(Err(LoadError::Interrupted {
            location: location.to_string(),
        }
        .into())),
    }
}

/// Load the dataset off the UI thread and wake the UI when done.
fn spawn_load(source: FileSource, ctx: egui::Context) -> std::io::Result<Receiver<LoadResult>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("dataset-loader".to_string())
        .spawn(move || {
            log::debug!("Loading dataset from {}", source.location());
            let result = loader::load(&source);
            // The receiver is gone only when the window closed mid-load.
            if tx.send(result).is_ok() {
                ctx.request_repaint();
            }
        })?;
    Ok(rx)
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_load();

        let mut changes: Vec<CriteriaChange> = Vec::new();

        // ---- Top panel: title and dataset info ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.title, self.controller.state());
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui);
        });

        // ---- Left side panel: filters and summary ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                changes.extend(panels::side_panel(
                    ui,
                    self.controller.state(),
                    &mut self.inputs,
                    &self.controller.renderer().summary,
                ));
            });

        // ---- Central panel: chart above table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let surface = self.controller.renderer();
            if let Some(kind) = panels::chart_selector(ui, self.controller.state().chart_kind) {
                changes.push(CriteriaChange::ChartKind(kind));
            }
            let chart_height = (ui.available_height() * 0.45).max(220.0);
            plot::frequency_chart(ui, &surface.chart, chart_height);
            ui.separator();
            table::data_table(ui, &surface.table);
        });

        for change in changes {
            self.controller.handle(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::presenter::{PresenterConfig, TableView};
    use crate::state::LoadStatus;

    #[test]
    fn nothing_received_while_loader_runs() {
        let (_tx, rx) = mpsc::channel::<LoadResult>();
        assert!(receive_load(&rx, "memory").is_none());
    }

    #[test]
    fn vanished_loader_is_an_interrupted_load() {
        let (tx, rx) = mpsc::channel::<LoadResult>();
        drop(tx);

        let result = receive_load(&rx, "data/x.csv").expect("disconnect is final");
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::Interrupted { location }) if location == "data/x.csv"
        ));

        let mut controller = Controller::new(Surface::default(), PresenterConfig::default());
        controller.on_loaded(Err(err));
        assert_eq!(controller.state().status, LoadStatus::Failed);
        assert_eq!(controller.renderer().table, TableView::LoadFailed);
    }

    #[test]
    fn loader_thread_delivers_its_result() {
        let source = FileSource::new("no/such/dir/contaminant-levels.csv");
        let rx = spawn_load(source, egui::Context::default()).expect("thread spawns");
        let result = rx
            .recv_timeout(Duration::from_secs(10))
            .expect("loader sends before exiting");
        assert!(matches!(
            result.unwrap_err().downcast_ref::<LoadError>(),
            Some(LoadError::Read { .. })
        ));
    }
}
