use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::StringRecord;

use super::error::{MalformedInput, TraceError};
use super::model::{MeasurementFile, PlotRequest, RawRow, SweepLayout, METADATA_ROWS};
use super::sweep;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Open and parse a curve-trace file from disk.
pub fn load_file(path: &Path) -> Result<MeasurementFile> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let parsed = parse(file).with_context(|| format!("parsing {}", path.display()))?;
    log::info!(
        "Read {} metadata rows and {} body rows from {}",
        METADATA_ROWS,
        parsed.body.len(),
        path.display()
    );
    Ok(parsed)
}

/// Load a file and run it through extraction, ready for plotting.
pub fn load_trace(path: &Path) -> Result<PlotRequest> {
    let file = load_file(path)?;
    let request = sweep::prepare(&file, &SweepLayout::default())
        .with_context(|| format!("extracting sweeps from {}", path.display()))?;
    Ok(request)
}

/// Parse a curve-trace stream using the standard sweep layout.
pub fn parse<R: Read>(input: R) -> Result<MeasurementFile, TraceError> {
    parse_with_layout(input, &SweepLayout::default())
}

/// Parse a curve-trace stream.
///
/// Layout written by the tracer:
///
/// ```text
/// Type: MOSFET,Subtype: NMOS,
/// Terminal 1: GATE,Terminal 2: DRAIN,Terminal 3: SOURCE
/// $V_{GS}$,$V_{DS}$,$I_D$
/// 0.000000,0.000000,0.000012
/// ...
/// ```
///
/// Fields stay textual here; numeric conversion happens per sweep in the
/// extractor. Metadata rows are cut or padded to three fields. Blank lines
/// are skipped by the CSV reader and do not count as rows.
pub fn parse_with_layout<R: Read>(
    input: R,
    layout: &SweepLayout,
) -> Result<MeasurementFile, TraceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let records = reader
        .records()
        .collect::<Result<Vec<StringRecord>, csv::Error>>()?;

    if records.is_empty() {
        return Err(MalformedInput::Empty.into());
    }
    let expected = layout.total_rows();
    if records.len() < expected {
        return Err(MalformedInput::TooFewRows {
            expected,
            actual: records.len(),
        }
        .into());
    }

    let (head, rest) = records.split_at(METADATA_ROWS);
    let metadata_rows = [
        metadata_triple(&head[0]),
        metadata_triple(&head[1]),
        metadata_triple(&head[2]),
    ];

    let body = rest
        .iter()
        .enumerate()
        .map(|(row, record)| body_row(row, record))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MeasurementFile {
        metadata_rows,
        body,
    })
}

// ---------------------------------------------------------------------------
// Row helpers
// ---------------------------------------------------------------------------

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn metadata_triple(record: &StringRecord) -> [String; 3] {
    let field = |i: usize| record.get(i).unwrap_or("").to_string();
    [field(0), field(1), field(2)]
}

fn body_row(row: usize, record: &StringRecord) -> Result<RawRow, MalformedInput> {
    let line = line_of(record);
    match (record.get(0), record.get(1), record.get(2)) {
        (Some(vg), Some(vd), Some(id)) => Ok(RawRow {
            line,
            fields: [vg.to_string(), vd.to_string(), id.to_string()],
        }),
        _ => Err(MalformedInput::ShortRow {
            row,
            line,
            fields: record.len(),
        }),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write;

    use super::*;

    /// A well-formed file: six sweeps of `segment_size` rows each.
    pub(crate) fn sample_csv(segment_size: usize) -> String {
        let mut out = String::new();
        out.push_str("Type: MOSFET,Subtype: NMOS,\n");
        out.push_str("Terminal 1: GATE,Terminal 2: DRAIN,Terminal 3: SOURCE\n");
        out.push_str("$V_{GS}$,$V_{DS}$,$I_D$\n");
        for sweep in 0..6 {
            for i in 0..segment_size {
                out.push_str(&format!(
                    "{:.6},{:.6},{:.6}\n",
                    sweep as f64,
                    i as f64 * 0.01,
                    1.0
                ));
            }
        }
        out
    }

    #[test]
    fn parses_metadata_and_body() {
        let file = parse(sample_csv(500).as_bytes()).unwrap();
        assert_eq!(file.metadata_rows[0], ["Type: MOSFET", "Subtype: NMOS", ""]);
        assert_eq!(file.metadata_rows[2][1], "$V_{DS}$");
        assert_eq!(file.body.len(), 3000);
        assert_eq!(file.body[0].fields[1], "0.000000");
        assert_eq!(file.body[0].line, 4);
        assert_eq!(file.body[2999].line, 3003);
    }

    #[test]
    fn empty_stream_is_malformed() {
        let err = parse("".as_bytes()).unwrap_err();
        assert!(matches!(err, TraceError::MalformedInput(MalformedInput::Empty)));
    }

    #[test]
    fn too_few_rows_is_malformed() {
        let mut text = sample_csv(500);
        // drop the last line
        text.truncate(text.trim_end().rfind('\n').unwrap() + 1);
        let err = parse(text.as_bytes()).unwrap_err();
        match err {
            TraceError::MalformedInput(MalformedInput::TooFewRows { expected, actual }) => {
                assert_eq!(expected, 3003);
                assert_eq!(actual, 3002);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_body_row_is_malformed() {
        let text = sample_csv(500).replacen("1.000000,0.000000,1.000000", "1.000000,0.000000", 1);
        let err = parse(text.as_bytes()).unwrap_err();
        match err {
            TraceError::MalformedInput(MalformedInput::ShortRow { row, line, fields }) => {
                assert_eq!(row, 500);
                assert_eq!(line, 504);
                assert_eq!(fields, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_metadata_rows_are_padded() {
        let text = sample_csv(500).replacen("$V_{GS}$,$V_{DS}$,$I_D$", "VG", 1);
        let file = parse(text.as_bytes()).unwrap();
        assert_eq!(file.metadata_rows[2], ["VG", "", ""]);
    }

    #[test]
    fn custom_layout_lowers_row_requirement() {
        let layout = SweepLayout {
            segment_size: 20,
            filter_width: 4,
        };
        let file = parse_with_layout(sample_csv(20).as_bytes(), &layout).unwrap();
        assert_eq!(file.body.len(), 120);
    }

    #[test]
    fn load_file_reads_from_disk() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(sample_csv(500).as_bytes()).unwrap();
        let file = load_file(tmp.path()).unwrap();
        assert_eq!(file.body.len(), 3000);
    }

    #[test]
    fn load_trace_builds_plot_request() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(sample_csv(500).as_bytes()).unwrap();
        let request = load_trace(tmp.path()).unwrap();
        assert_eq!(request.series.len(), 6);
    }

    #[test]
    fn load_trace_surfaces_numeric_errors() {
        let text = sample_csv(500).replacen("0.000000,0.010000,1.000000", "0.000000,x,1.000000", 1);
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(text.as_bytes()).unwrap();
        let msg = format!("{:#}", load_trace(tmp.path()).unwrap_err());
        assert!(msg.contains("body row 1 (line 5)"), "{msg}");
        assert!(msg.contains("drain voltage"), "{msg}");
    }

    #[test]
    fn load_file_reports_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("missing.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("opening"));
    }
}
