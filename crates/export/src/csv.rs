use aq_core::{DashboardError, MetricKey, Result, Session};
use chrono::Local;
use std::io::Write;
use std::path::{Path, PathBuf};

/// CSV header row: the shared time axis followed by one column per metric.
pub fn header() -> String {
    let mut columns = vec!["Time"];
    columns.extend(MetricKey::ALL.iter().map(|m| m.column()));
    columns.join(",")
}

/// Serialize the session's window as CSV into `writer`.
///
/// One line per aligned sample, oldest first; missing values are empty
/// cells. Returns the number of data rows written — an empty window writes
/// the header only and returns 0, which callers surface as "nothing to
/// export" rather than an error.
pub fn write_csv<W: Write>(session: &Session, mut writer: W) -> Result<usize> {
    writeln!(writer, "{}", header())?;

    let mut rows = 0;
    for row in session.rows() {
        let mut line = row.at.format("%H:%M:%S").to_string();
        for value in row.values {
            line.push(',');
            if let Some(v) = value {
                line.push_str(&v.to_string());
            }
        }
        writeln!(writer, "{line}")?;
        rows += 1;
    }

    Ok(rows)
}

/// The window as an in-memory CSV string.
pub fn to_csv_string(session: &Session) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(session, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| DashboardError::Export(format!("CSV is not valid UTF-8: {e}")))
}

/// Default export file name, dated with the current day.
pub fn dated_file_name() -> String {
    format!("air_quality_{}.csv", Local::now().format("%Y-%m-%d"))
}

/// Write the window to a dated CSV file under `dir`.
/// Returns the file path and the number of data rows written.
pub fn export_to_dir(session: &Session, dir: impl AsRef<Path>) -> Result<(PathBuf, usize)> {
    let path = dir.as_ref().join(dated_file_name());
    let file = std::fs::File::create(&path)
        .map_err(|e| DashboardError::Export(format!("cannot create '{}': {e}", path.display())))?;

    let rows = write_csv(session, std::io::BufWriter::new(file))?;
    tracing::info!("Exported {rows} rows to {}", path.display());
    Ok((path, rows))
}
