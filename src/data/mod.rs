/// Data layer: measurement parsing, sweep extraction and smoothing.
///
/// Architecture:
/// ```text
///   curve-trace .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → MeasurementFile (metadata + textual body)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  sweep    │  6 segments → f64 → moving average (filter) → Sweep
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ PlotRequest  │  windowed series, legend labels (reversed), titles
///   └─────────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sweep;
