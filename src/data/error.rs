use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy for the data-preparation pipeline
// ---------------------------------------------------------------------------

/// The three numeric columns of a body row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    GateVoltage,
    DrainVoltage,
    DrainCurrent,
}

impl Field {
    /// Columns in file order.
    pub const ALL: [Field; 3] = [Field::GateVoltage, Field::DrainVoltage, Field::DrainCurrent];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::GateVoltage => write!(f, "gate voltage"),
            Field::DrainVoltage => write!(f, "drain voltage"),
            Field::DrainCurrent => write!(f, "drain current"),
        }
    }
}

/// Structural problems with the measurement file.
#[derive(Debug, Error)]
pub enum MalformedInput {
    #[error("the file is empty")]
    Empty,

    #[error("expected at least {expected} rows, found {actual}")]
    TooFewRows { expected: usize, actual: usize },

    #[error("body row {row} (line {line}) has {fields} fields, expected 3")]
    ShortRow { row: usize, line: u64, fields: usize },
}

/// Everything that can go wrong between reading the file and handing
/// plot-ready series to the renderer.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("malformed measurement file: {0}")]
    MalformedInput(#[from] MalformedInput),

    #[error("body row {row} (line {line}): {field} '{value}' is not a number")]
    NumericParse {
        row: usize,
        line: u64,
        field: Field,
        value: String,
    },

    #[error(
        "expected {expected} body rows ({segments} sweeps of {segment_size}), found {actual}"
    )]
    SegmentCount {
        expected: usize,
        actual: usize,
        segments: usize,
        segment_size: usize,
    },

    #[error("reading measurement file")]
    Read(#[from] csv::Error),
}
