//! Output adapters: CSV files and the statement inspector.

use std::fs::File;
use std::io::{BufWriter, Write};

use tracing::{info, warn};

use crate::assemble::Query;
use crate::datatype::ResultSet;
use crate::error::{AutomatchError, Result};

/// Header of raw column names followed by one line per record. Nulls are empty fields.
pub fn write_csv<W: Write>(writer: &mut W, results: &ResultSet) -> Result<()> {
    let header: Vec<String> = results.columns.iter().map(|c| escape_csv_value(c)).collect();
    writeln!(writer, "{}", header.join(","))?;
    for record in &results.records {
        let fields: Vec<String> = record
            .values()
            .iter()
            .map(|v| v.as_ref().map(|s| escape_csv_value(&s.to_string())).unwrap_or_default())
            .collect();
        writeln!(writer, "{}", fields.join(","))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `results` to `path`. Failures are logged, never raised.
pub fn export_csv(path: &str, results: &ResultSet) -> bool {
    let written = File::create(path)
        .map_err(|e| AutomatchError::Export(format!("cannot create {path}: {e}")))
        .and_then(|file| write_csv(&mut BufWriter::new(file), results));
    match written {
        Ok(()) => {
            info!(path, rows = results.len(), "exported results");
            true
        }
        Err(e) => {
            warn!(path, error = %e, "failed to export results to CSV");
            false
        }
    }
}

pub fn escape_csv_value(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// The statement a search ran, with literals in place of placeholders. Display only.
pub fn render_statement(query: &Query) -> String {
    query.to_string()
}
