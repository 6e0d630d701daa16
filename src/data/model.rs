use std::ops::Range;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Number of metadata rows at the top of every measurement file.
pub const METADATA_ROWS: usize = 3;

/// Number of gate-voltage sweeps the curve tracer records per device.
pub const SWEEP_COUNT: usize = 6;

/// Segment size and filter width used for every run.
///
/// The display window is derived from these: `[filter_width, segment_size)`.
/// It skips the convolution ramp-up at the start and the tail past the raw
/// segment length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepLayout {
    /// Rows per sweep.
    pub segment_size: usize,
    /// Moving-average kernel length.
    pub filter_width: usize,
}

impl Default for SweepLayout {
    fn default() -> Self {
        Self {
            segment_size: 500,
            filter_width: 10,
        }
    }
}

impl SweepLayout {
    /// Body rows required for a complete set of sweeps.
    pub fn body_rows(&self) -> usize {
        SWEEP_COUNT * self.segment_size
    }

    /// Total rows required in the file, metadata included.
    pub fn total_rows(&self) -> usize {
        METADATA_ROWS + self.body_rows()
    }

    /// Body row range covered by sweep `index`.
    pub fn segment_bounds(&self, index: usize) -> Range<usize> {
        index * self.segment_size..(index + 1) * self.segment_size
    }

    /// Index range of a smoothed series that is handed to the renderer.
    pub fn display_window(&self) -> Range<usize> {
        let end = self.segment_size;
        self.filter_width.min(end)..end
    }
}

// ---------------------------------------------------------------------------
// MeasurementFile – the raw parsed file
// ---------------------------------------------------------------------------

/// One body row, still textual, with the file line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based line number in the source file.
    pub line: u64,
    /// Gate voltage, drain voltage, drain current.
    pub fields: [String; 3],
}

/// A curve-trace file split into its metadata block and numeric body.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementFile {
    /// Type/subtype row, terminal identity row, axis label row.
    pub metadata_rows: [[String; 3]; METADATA_ROWS],
    pub body: Vec<RawRow>,
}

impl MeasurementFile {
    /// Axis labels from the third metadata row.
    pub fn axis_labels(&self) -> AxisLabels {
        let [sweep, x, y] = self.metadata_rows[2].clone();
        AxisLabels { sweep, x, y }
    }

    /// Type/subtype fields followed by the three terminal fields, space-joined.
    pub fn device_summary(&self) -> String {
        let [kind, subtype, _] = &self.metadata_rows[0];
        let [t1, t2, t3] = &self.metadata_rows[1];
        [kind, subtype, t1, t2, t3]
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ---------------------------------------------------------------------------
// AxisLabels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabels {
    /// Name of the stepped variable, e.g. `$V_{GS}$`.
    pub sweep: String,
    /// X axis, e.g. `$V_{DS}$`.
    pub x: String,
    /// Y axis, e.g. `$I_D$`.
    pub y: String,
}

// ---------------------------------------------------------------------------
// Sweep – one constant-gate-voltage segment
// ---------------------------------------------------------------------------

/// One sweep with its raw samples and the smoothed drain arrays.
///
/// Smoothed arrays are `filter_width - 1` samples longer than the raw ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    pub gate_voltage: Vec<f64>,
    pub drain_voltage: Vec<f64>,
    pub drain_current: Vec<f64>,
    pub smoothed_drain_voltage: Vec<f64>,
    pub smoothed_drain_current: Vec<f64>,
    /// First gate-voltage sample, used for the legend.
    pub legend_value: f64,
}

impl Sweep {
    /// Slice the smoothed arrays to `window`, clamped to their length.
    pub fn smoothed_series(&self, window: Range<usize>) -> SmoothedSeries {
        let clamp = |v: &[f64]| {
            let end = window.end.min(v.len());
            let start = window.start.min(end);
            v[start..end].to_vec()
        };
        SmoothedSeries {
            x: clamp(&self.smoothed_drain_voltage),
            y: clamp(&self.smoothed_drain_current),
        }
    }
}

/// Plot-ready drain voltage (x) against drain current (y).
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Renderer input
// ---------------------------------------------------------------------------

/// A series plus its legend text.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSeries {
    pub series: SmoothedSeries,
    pub label: String,
    /// Position of the source sweep in the file, for stable colouring.
    pub sweep_index: usize,
}

/// Everything the renderer needs to draw one curve family.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest {
    /// Series in legend order.
    pub series: Vec<LabeledSeries>,
    pub title: String,
    pub subtitle: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: (f64, f64),
}
