use std::sync::Arc;

use eframe::egui;

use crate::data::model::LaunchDataset;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchBoardApp {
    pub state: AppState,
}

impl LaunchBoardApp {
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        Self {
            state: AppState::new(dataset),
        }
    }
}

impl eframe::App for LaunchBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and dataset counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: site and payload-range controls ----
        egui::SidePanel::left("control_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::control_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: filtered records table (toggleable) ----
        if self.state.show_records {
            egui::TopBottomPanel::bottom("records_panel")
                .default_height(200.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::records_panel(ui, &self.state);
                });
        }

        // ---- Central panel: the two charts, stacked ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let spacing = ui.spacing().item_spacing.y;
            // Two chart areas share the height; each header line takes one
            // text row above its plot.
            let header = ui.text_style_height(&egui::TextStyle::Body) + spacing;
            let chart_height = ((ui.available_height() - 2.0 * header - spacing) / 2.0).max(120.0);

            charts::breakdown_chart(ui, &self.state, chart_height);
            ui.separator();
            charts::correlation_chart(ui, &self.state, chart_height);
        });
    }
}
