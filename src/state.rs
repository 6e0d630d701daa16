use std::path::{Path, PathBuf};

use crate::color::SweepColors;
use crate::data::loader::load_trace;
use crate::data::model::{PlotRequest, SWEEP_COUNT};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Prepared curve family (None until a file has been loaded).
    pub plot: Option<PlotRequest>,

    /// File the current plot came from.
    pub source: Option<PathBuf>,

    /// One colour per sweep position.
    pub colors: SweepColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Set when the plot should snap back to its startup bounds.
    pub reset_bounds: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            plot: None,
            source: None,
            colors: SweepColors::new(SWEEP_COUNT),
            status_message: None,
            reset_bounds: false,
        }
    }
}

impl AppState {
    /// State showing an already prepared plot.
    pub fn with_plot(plot: PlotRequest, source: PathBuf) -> Self {
        let mut state = Self::default();
        state.set_plot(plot, source);
        state
    }

    /// Replace the displayed curve family.
    pub fn set_plot(&mut self, plot: PlotRequest, source: PathBuf) {
        self.plot = Some(plot);
        self.source = Some(source);
        self.status_message = None;
        self.reset_bounds = true;
    }

    /// Load another trace. On failure the current plot is kept and the error
    /// goes to the status line.
    pub fn open(&mut self, path: &Path) {
        match load_trace(path) {
            Ok(plot) => {
                log::info!("Loaded {} sweeps from {}", plot.series.len(), path.display());
                self.set_plot(plot, path.to_path_buf());
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
