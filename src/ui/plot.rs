use eframe::egui::Ui;
use egui_plot::{Corner, Legend, Line, Plot, PlotBounds, PlotPoints};

use crate::data::model::PlotRequest;
use crate::state::AppState;

/// Stroke width of every curve.
const LINE_WIDTH: f32 = 3.0;

// ---------------------------------------------------------------------------
// Curve-trace plot (central panel)
// ---------------------------------------------------------------------------

/// Render the curve family in the central panel.
pub fn curve_plot(ui: &mut Ui, state: &mut AppState) {
    let request = match &state.plot {
        Some(p) => p,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a curve-trace file to view it  (File → Open…)");
            });
            return;
        }
    };

    let reset = std::mem::take(&mut state.reset_bounds);
    let colors = &state.colors;

    Plot::new("curve_trace_plot")
        .legend(
            Legend::default()
                .position(Corner::RightTop)
                .follow_insertion_order(true),
        )
        .x_axis_label(plain_text(&request.x_label))
        .y_axis_label(plain_text(&request.y_label))
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if reset {
                let (x_min, x_max) = request.x_range;
                let (y_min, y_max) = y_extent(request);
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));
            }

            // Series arrive in legend order; insertion order drives the legend.
            for entry in &request.series {
                let points: PlotPoints = entry
                    .series
                    .x
                    .iter()
                    .zip(entry.series.y.iter())
                    .map(|(&xi, &yi)| [xi, yi])
                    .collect();

                let line = Line::new(points)
                    .name(plain_text(&entry.label))
                    .color(colors.color_for(entry.sweep_index))
                    .width(LINE_WIDTH);

                plot_ui.line(line);
            }
        });
}

/// Vertical range covering every series, padded by 5%.
fn y_extent(request: &PlotRequest) -> (f64, f64) {
    let (min, max) = request
        .series
        .iter()
        .flat_map(|s| s.series.y.iter().copied())
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span.abs() < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    (min - span * 0.05, max + span * 0.05)
}

/// Strip matplotlib mathtext markup: `$V_{GS}$` → `V_GS`.
pub fn plain_text(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, '$' | '{' | '}' | '\\'))
        .collect()
}
