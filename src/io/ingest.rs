//! Tiepoint file ingest.
//!
//! The input is a headerless two-column text file, one `depth,age` pair per
//! line. Unlike a general CSV reader we are strict:
//!
//! - every line must hold exactly one comma-separated pair
//! - both fields must parse as finite numbers
//! - blank lines (including a trailing blank line) are errors, not skipped
//!
//! Ordering is checked later by `domain::validate_tiepoints`; this module only
//! turns text into columns.

use std::fs;
use std::path::Path;

use csv::StringRecord;
use tracing::debug;

use crate::domain::Tiepoints;
use crate::error::PipelineError;

/// Read a tiepoint file from disk.
pub fn load_tiepoints(path: &Path) -> Result<Tiepoints, PipelineError> {
    let text = fs::read_to_string(path)?;
    let tiepoints = parse_tiepoints(&text)?;
    debug!(
        path = %path.display(),
        rows = tiepoints.len(),
        "loaded tiepoints"
    );
    Ok(tiepoints)
}

/// Parse tiepoint text (`depth,age` per line).
pub fn parse_tiepoints(text: &str) -> Result<Tiepoints, PipelineError> {
    // The csv reader silently skips empty lines, so reject them up front.
    if let Some(line) = first_blank_line(text) {
        return Err(PipelineError::Parse {
            line,
            message: "blank line".to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut depths = Vec::new();
    let mut ages = Vec::new();
    let mut record = StringRecord::new();

    loop {
        let line = reader.position().line() as usize;
        let more = reader
            .read_record(&mut record)
            .map_err(|e| PipelineError::Parse {
                line,
                message: format!("CSV parse error: {e}"),
            })?;
        if !more {
            break;
        }

        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(line);
        let (depth, age) = parse_record(&record).map_err(|message| PipelineError::Parse { line, message })?;
        depths.push(depth);
        ages.push(age);
    }

    if depths.is_empty() {
        return Err(PipelineError::Parse {
            line: 1,
            message: "no tiepoints found".to_string(),
        });
    }

    Ok(Tiepoints::new(depths, ages))
}

fn parse_record(record: &StringRecord) -> Result<(f64, f64), String> {
    match record.len() {
        1 => Err(format!("expected `depth,age`, found no comma in '{}'", &record[0])),
        2 => {
            let depth = parse_field(&record[0], "depth")?;
            let age = parse_field(&record[1], "age")?;
            Ok((depth, age))
        }
        n => Err(format!("expected 2 fields (`depth,age`), found {n}")),
    }
}

fn parse_field(s: &str, name: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("invalid {name} value '{s}'"))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("non-finite {name} value '{s}'"))
    }
}

/// 1-based line number of the first empty or whitespace-only line.
///
/// A single final newline terminates the last line and is not a blank line.
fn first_blank_line(text: &str) -> Option<usize> {
    let body = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text);
    if body.is_empty() {
        return None;
    }
    body.split('\n')
        .position(|l| l.trim().is_empty())
        .map(|i| i + 1)
}
