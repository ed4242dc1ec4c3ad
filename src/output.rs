use crate::error::{OutputError, ScanError};
use crate::types::ScanReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write one display line per result, each terminated by a newline.
pub fn write_lines(path: &Path, report: &ScanReport) -> Result<(), OutputError> {
    let io_err = |source| OutputError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
    for line in report.lines() {
        writeln!(out, "{line}").map_err(io_err)?;
    }
    out.flush().map_err(io_err)
}

/// Write the whole report as pretty JSON.
pub fn write_json(path: &Path, report: &ScanReport) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)?;
    Ok(())
}

/// Save `report` to `path`, as JSON when `json` is set, otherwise as plain lines.
pub fn save(path: &Path, report: &ScanReport, json: bool) -> Result<(), ScanError> {
    if json {
        write_json(path, report)?;
    } else {
        write_lines(path, report)?;
    }
    Ok(())
}
