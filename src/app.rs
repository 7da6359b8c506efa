use std::time::Duration;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WorldIndicatorsApp {
    pub state: AppState,
}

impl WorldIndicatorsApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for WorldIndicatorsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.state.tick(now);
        if self.state.playing {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // ---- Top panel: title and year cutoff ----
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            panels::header(ui, &self.state);
            ui.add_space(4.0);
            panels::year_slider(ui, &mut self.state);
            ui.add_space(4.0);
        });

        // ---- Left side panel: indicator and countries ----
        egui::SidePanel::left("selector_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: bar + line side by side, map below ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |cols| {
                plot::bar_chart(&mut cols[0], &self.state);
                plot::line_chart(&mut cols[1], &self.state);
            });
            ui.separator();
            plot::map_view(ui, &mut self.state);
        });
    }
}
