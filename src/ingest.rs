//! CSV Ingestion - `{timestamp, x, y, z}` sample tables
//!
//! Reads the two per-sensor CSV exports a capture app produces into
//! `AxisSamples` columns. Header names are matched case-insensitively;
//! column order is free. Blank lines are skipped. A missing required column
//! or an unparseable numeric cell is structurally invalid input and fails
//! loudly, per the pipeline's error philosophy.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::types::AxisSamples;

/// Required columns, in output order.
const REQUIRED_COLUMNS: [&str; 4] = ["timestamp", "x", "y", "z"];

/// CSV ingestion errors
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("empty file: no header row")]
    EmptyFile,

    #[error("missing required column '{0}' in header")]
    MissingColumn(&'static str),

    #[error("row {row}: expected at least {expected} fields, found {found}")]
    ShortRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}: invalid numeric value '{value}' in column '{column}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Split one CSV line into owned fields. Capture-app exports occasionally
/// double-quote cells, so a comma inside quotes is field content and a
/// doubled quote inside a quoted cell is a literal quote.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    // Set after a quote is seen inside a quoted cell; the next char decides
    // whether it was an escape or the closing quote
    let mut quote_pending = false;

    for ch in line.chars() {
        if quote_pending {
            quote_pending = false;
            if ch == '"' {
                field.push('"');
                continue;
            }
            quoted = false;
        }
        match ch {
            '"' if quoted => quote_pending = true,
            '"' => quoted = true,
            ',' if !quoted => fields.push(std::mem::take(&mut field)),
            _ => field.push(ch),
        }
    }
    fields.push(field);
    fields
}

/// Parse CSV content into a sample stream.
pub fn parse_axis_csv(content: &str) -> Result<AxisSamples, IngestError> {
    let mut lines = content.lines();
    let header = lines.next().ok_or(IngestError::EmptyFile)?;
    let header_fields: Vec<String> = split_fields(header)
        .iter()
        .map(|f| f.trim().to_lowercase())
        .collect();

    // Resolve each required column to its index
    let mut indices = [0_usize; REQUIRED_COLUMNS.len()];
    for (slot, &name) in REQUIRED_COLUMNS.iter().enumerate() {
        indices[slot] = header_fields
            .iter()
            .position(|f| f == name)
            .ok_or(IngestError::MissingColumn(name))?;
    }
    let max_index = indices.iter().copied().max().unwrap_or(0);

    let mut samples = AxisSamples::new();
    for (line_no, line) in lines.enumerate() {
        let row = line_no + 2; // 1-based, after the header
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_fields(line);
        if fields.len() <= max_index {
            return Err(IngestError::ShortRow {
                row,
                expected: max_index + 1,
                found: fields.len(),
            });
        }

        let mut values = [0.0_f64; REQUIRED_COLUMNS.len()];
        for (slot, &col) in indices.iter().enumerate() {
            let cell = fields[col].trim();
            values[slot] = cell.parse().map_err(|_| IngestError::InvalidValue {
                row,
                column: REQUIRED_COLUMNS[slot],
                value: cell.to_string(),
            })?;
        }
        samples.push(values[0], values[1], values[2], values[3]);
    }

    debug!(samples = samples.len(), "parsed sample table");
    Ok(samples)
}

/// Read and parse a sample-table CSV from disk.
pub fn read_axis_csv(path: &Path) -> Result<AxisSamples, IngestError> {
    let content =
        fs::read_to_string(path).map_err(|e| IngestError::Io(path.to_path_buf(), e))?;
    parse_axis_csv(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_table() {
        let csv = "timestamp,x,y,z\n0,0.1,0.2,9.8\n5,0.2,0.3,9.7\n";
        let samples = parse_axis_csv(csv).expect("parse");
        assert_eq!(samples.len(), 2);
        assert_eq!(samples.timestamp, vec![0.0, 5.0]);
        assert!((samples.z[1] - 9.7).abs() < 1e-12);
    }

    #[test]
    fn test_column_order_is_free() {
        let csv = "z,x,timestamp,y\n9.8,0.1,0,0.2\n";
        let samples = parse_axis_csv(csv).expect("parse");
        assert_eq!(samples.timestamp, vec![0.0]);
        assert_eq!(samples.x, vec![0.1]);
        assert_eq!(samples.y, vec![0.2]);
        assert_eq!(samples.z, vec![9.8]);
    }

    #[test]
    fn test_header_case_insensitive_with_extra_columns() {
        let csv = "Timestamp,X,Y,Z,battery\n100,1,2,3,98\n";
        let samples = parse_axis_csv(csv).expect("parse");
        assert_eq!(samples.len(), 1);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let csv = "timestamp,x,y,z\n0,1,2,3\n\n10,4,5,6\n";
        let samples = parse_axis_csv(csv).expect("parse");
        assert_eq!(samples.len(), 2);
    }

    #[test]
    fn test_missing_column_fails() {
        let csv = "timestamp,x,y\n0,1,2\n";
        match parse_axis_csv(csv) {
            Err(IngestError::MissingColumn("z")) => {}
            other => panic!("expected missing column error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_value_reports_row_and_column() {
        let csv = "timestamp,x,y,z\n0,1,2,3\n10,oops,5,6\n";
        match parse_axis_csv(csv) {
            Err(IngestError::InvalidValue { row, column, value }) => {
                assert_eq!(row, 3);
                assert_eq!(column, "x");
                assert_eq!(value, "oops");
            }
            other => panic!("expected invalid value error, got {other:?}"),
        }
    }

    #[test]
    fn test_short_row_fails() {
        let csv = "timestamp,x,y,z\n0,1\n";
        assert!(matches!(
            parse_axis_csv(csv),
            Err(IngestError::ShortRow { row: 2, .. })
        ));
    }

    #[test]
    fn test_empty_content_fails() {
        assert!(matches!(parse_axis_csv(""), Err(IngestError::EmptyFile)));
    }

    #[test]
    fn test_quoted_fields() {
        let csv = "timestamp,x,y,z\n\"0\",\"1.5\",2,3\n";
        let samples = parse_axis_csv(csv).expect("parse");
        assert!((samples.x[0] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_read_from_disk() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "timestamp,x,y,z\n0,1,2,3\n").expect("write");
        let samples = read_axis_csv(file.path()).expect("read");
        assert_eq!(samples.len(), 1);
    }
}
