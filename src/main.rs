mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use app::CurveTraceApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

#[derive(Parser)]
#[command(author, version, about = "Plot a transistor curve-trace measurement file")]
struct Args {
    /// Curve-trace CSV written by the tracer
    path: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Fail before any window opens if the file cannot be prepared.
    let plot = data::loader::load_trace(&args.path)?;
    log::info!("Prepared {} sweeps for display", plot.series.len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0])
            .with_maximized(true),
        ..Default::default()
    };

    let state = AppState::with_plot(plot, args.path);
    eframe::run_native(
        "Curve Trace",
        options,
        Box::new(|_cc| Ok(Box::new(CurveTraceApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("display failed: {e}"))
}
