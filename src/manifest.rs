//! Manifest projection: file entries → CSV rows on disk.

use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::engine::tools::{matches_extension, relative_manifest_path};
use crate::error::MirrorError;
use crate::types::{FileEntry, ManifestColumns, ManifestRow, Subset};

/// Rows for `entries` in input order, dropping names that fail the extension filter.
pub fn project_rows(
    entries: &[FileEntry],
    subset: Option<&str>,
    ext: Option<&str>,
) -> Result<Vec<ManifestRow>, MirrorError> {
    let subset = subset.map(Subset::parse).transpose()?;
    let rows: Vec<ManifestRow> = entries
        .iter()
        .filter(|e| matches_extension(&e.name, ext))
        .map(|e| ManifestRow {
            name: e.name.clone(),
            url: e.download_url.clone(),
            location: e.download_url.clone(),
            sha256: e.sha256.clone(),
            path: relative_manifest_path(&e.materialized_path, subset.as_ref()),
        })
        .collect();
    debug!(
        "{} of {} entries pass extension filter {:?}",
        rows.len(),
        entries.len(),
        ext
    );
    Ok(rows)
}

/// Manifest text: header plus one line per row, `\n` terminated. Fields are written
/// verbatim; names are assumed comma-free.
pub fn render_manifest(rows: &[ManifestRow], columns: &ManifestColumns) -> String {
    let mut out = columns.header();
    out.push('\n');
    for row in rows {
        let line: Vec<&str> = columns.iter().map(|c| row.field(c)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// Write the manifest for `entries` to `path`, replacing any existing file.
/// Returns the number of rows written. On I/O failure the file may be left truncated.
pub fn project(
    entries: &[FileEntry],
    path: &Path,
    subset: Option<&str>,
    ext: Option<&str>,
    columns: &ManifestColumns,
) -> Result<usize, MirrorError> {
    let rows = project_rows(entries, subset, ext)?;
    let file = File::create(path).map_err(|e| MirrorError::write(path, e))?;
    let mut w = BufWriter::new(file);
    w.write_all(render_manifest(&rows, columns).as_bytes())
        .and_then(|_| w.flush())
        .map_err(|e| MirrorError::write(path, e))?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(rows.len())
}
