use super::error::{Field, TraceError};
use super::filter::moving_average;
use super::model::{
    AxisLabels, LabeledSeries, MeasurementFile, PlotRequest, RawRow, Sweep, SweepLayout,
    SWEEP_COUNT,
};

/// Plot title shown above every curve family.
pub const TITLE: &str = "Curve Trace";

/// Drain-voltage axis bounds shown at startup (volts).
pub const X_RANGE: (f64, f64) = (0.0, 4.85);

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Split the body into sweeps, convert to numbers and smooth each sweep.
///
/// Sweeps are returned in file order. Smoothing never crosses a sweep
/// boundary.
pub fn extract(
    file: &MeasurementFile,
    layout: &SweepLayout,
) -> Result<(AxisLabels, Vec<Sweep>), TraceError> {
    let expected = layout.body_rows();
    if file.body.len() != expected {
        return Err(TraceError::SegmentCount {
            expected,
            actual: file.body.len(),
            segments: SWEEP_COUNT,
            segment_size: layout.segment_size,
        });
    }

    let mut sweeps = Vec::with_capacity(SWEEP_COUNT);
    for index in 0..SWEEP_COUNT {
        let bounds = layout.segment_bounds(index);
        let first_row = bounds.start;
        let sweep = build_sweep(&file.body[bounds], first_row, layout.filter_width)?;
        log::debug!(
            "Sweep {index}: gate {:.3}, {} samples",
            sweep.legend_value,
            sweep.drain_voltage.len()
        );
        sweeps.push(sweep);
    }

    Ok((file.axis_labels(), sweeps))
}

fn build_sweep(rows: &[RawRow], first_row: usize, filter_width: usize) -> Result<Sweep, TraceError> {
    let mut gate_voltage = Vec::with_capacity(rows.len());
    let mut drain_voltage = Vec::with_capacity(rows.len());
    let mut drain_current = Vec::with_capacity(rows.len());

    for (offset, raw) in rows.iter().enumerate() {
        let [vg, vd, id] = parse_row(raw, first_row + offset)?;
        gate_voltage.push(vg);
        drain_voltage.push(vd);
        drain_current.push(id);
    }

    let legend_value = gate_voltage.first().copied().unwrap_or(0.0);
    Ok(Sweep {
        smoothed_drain_voltage: moving_average(&drain_voltage, filter_width),
        smoothed_drain_current: moving_average(&drain_current, filter_width),
        gate_voltage,
        drain_voltage,
        drain_current,
        legend_value,
    })
}

fn parse_row(raw: &RawRow, row: usize) -> Result<[f64; 3], TraceError> {
    let mut values = [0.0; 3];
    for ((slot, text), field) in values.iter_mut().zip(raw.fields.iter()).zip(Field::ALL) {
        *slot = text
            .trim()
            .parse::<f64>()
            .map_err(|_| TraceError::NumericParse {
                row,
                line: raw.line,
                field,
                value: text.clone(),
            })?;
    }
    Ok(values)
}

// ---------------------------------------------------------------------------
// Legend labels
// ---------------------------------------------------------------------------

/// `"<sweep label> = <value to one decimal>"`.
pub fn legend_label(sweep_label: &str, value: f64) -> String {
    format!("{sweep_label} = {value:.1}")
}

/// One label per sweep, in file order.
pub fn legend_labels(labels: &AxisLabels, sweeps: &[Sweep]) -> Vec<String> {
    sweeps
        .iter()
        .map(|s| legend_label(&labels.sweep, s.legend_value))
        .collect()
}

/// Reorder file-ordered items for the legend: last sweep first.
///
/// The tracer steps the gate upward, so this lists the highest gate voltage
/// at the top of the legend.
pub fn presentation_order<T>(mut items: Vec<T>) -> Vec<T> {
    items.reverse();
    items
}

// ---------------------------------------------------------------------------
// Renderer hand-off
// ---------------------------------------------------------------------------

/// Assemble the renderer input. Consumes the sweeps.
pub fn plot_request(
    file: &MeasurementFile,
    labels: &AxisLabels,
    sweeps: Vec<Sweep>,
    layout: &SweepLayout,
) -> PlotRequest {
    let window = layout.display_window();
    let names = legend_labels(labels, &sweeps);

    let series = sweeps
        .into_iter()
        .zip(names)
        .enumerate()
        .map(|(sweep_index, (sweep, label))| LabeledSeries {
            series: sweep.smoothed_series(window.clone()),
            label,
            sweep_index,
        })
        .collect();

    PlotRequest {
        series: presentation_order(series),
        title: TITLE.to_string(),
        subtitle: file.device_summary(),
        x_label: labels.x.clone(),
        y_label: labels.y.clone(),
        x_range: X_RANGE,
    }
}

/// Extract sweeps and assemble the renderer input in one step.
pub fn prepare(file: &MeasurementFile, layout: &SweepLayout) -> Result<PlotRequest, TraceError> {
    let (labels, sweeps) = extract(file, layout)?;
    Ok(plot_request(file, &labels, sweeps, layout))
}
