use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Plot header – title and device summary
// ---------------------------------------------------------------------------

/// Render the title and the device subtitle above the plot.
pub fn plot_header(ui: &mut Ui, state: &AppState) {
    let Some(plot) = &state.plot else {
        return;
    };
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&plot.title);
        if !plot.subtitle.trim().is_empty() {
            ui.label(RichText::new(&plot.subtitle).size(14.0));
        }
    });
    ui.separator();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(path) = &state.source {
            ui.label(path.display().to_string());
        }

        if state.plot.is_some() && ui.button("Reset view").clicked() {
            state.reset_bounds = true;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open curve-trace data")
        .add_filter("Curve trace", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
