use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use checker_core::BatchEntry;
use engine_logging::engine_info;

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no working accounts to export")]
    NothingToExport,
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

pub fn export_filename(scan_millis: i64) -> String {
    format!("iptv_accounts_{scan_millis}.txt")
}

/// Playlist lines for every successful entry, under a scan-date header.
pub fn render_export(results: &[BatchEntry], scan_millis: i64) -> String {
    let mut buffer = format!("Scan date - {scan_millis}:\n\n");
    for entry in results.iter().filter(|entry| entry.outcome.is_success()) {
        let candidate = &entry.candidate;
        let host = candidate.host.strip_suffix('/').unwrap_or(&candidate.host);
        let _ = writeln!(
            buffer,
            "m3u_url: {host}/get.php?username={}&password={}&type=m3u_plus\n",
            candidate.username, candidate.password
        );
    }
    buffer
}

/// Write [`render_export`] to `{dir}/iptv_accounts_{scan_millis}.txt`.
pub fn write_export(
    dir: &Path,
    results: &[BatchEntry],
    scan_millis: i64,
) -> Result<PathBuf, ExportError> {
    let working = results
        .iter()
        .filter(|entry| entry.outcome.is_success())
        .count();
    if working == 0 {
        return Err(ExportError::NothingToExport);
    }

    let writer = AtomicFileWriter::new(dir);
    let path = writer.write(
        &export_filename(scan_millis),
        &render_export(results, scan_millis),
    )?;
    engine_info!("Exported {} working accounts to {:?}", working, path);
    Ok(path)
}
