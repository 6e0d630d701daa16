use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CurveTraceApp {
    pub state: AppState,
}

impl CurveTraceApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for CurveTraceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: title + plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::plot_header(ui, &self.state);
            plot::curve_plot(ui, &mut self.state);
        });
    }
}
