//! Directory preparation: create every directory a manifest's rows land in.

use log::{debug, info};
use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::Path;

use crate::engine::tools::{containing_dir, render_template};
use crate::error::MirrorError;
use crate::utils::config::Defaults;

fn invalid(path: &Path, msg: String) -> MirrorError {
    MirrorError::write(path, io::Error::new(io::ErrorKind::InvalidData, msg))
}

/// Create the parent directories of each row's `path` under `root`.
pub fn prepare(manifest_path: &Path, root: &Path) -> Result<usize, MirrorError> {
    prepare_with_format(manifest_path, root, Defaults::FILENAME_FORMAT)
}

/// Like [`prepare`], but the file path of each row is `filename_format` rendered
/// against the row's columns (looked up by header name, not position).
///
/// Returns the number of distinct directories ensured. Existing directories are fine.
pub fn prepare_with_format(
    manifest_path: &Path,
    root: &Path,
    filename_format: &str,
) -> Result<usize, MirrorError> {
    let text =
        std::fs::read_to_string(manifest_path).map_err(|e| MirrorError::write(manifest_path, e))?;
    let mut lines = text.lines().map(|l| l.trim_end_matches('\r'));
    let header: Vec<&str> = match lines.next() {
        Some(h) => h.split(',').collect(),
        None => return Err(invalid(manifest_path, "empty manifest".to_string())),
    };

    let mut dirs = BTreeSet::new();
    for (lineno, line) in lines.enumerate() {
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != header.len() {
            return Err(invalid(
                manifest_path,
                format!(
                    "row {} has {} fields, header has {}",
                    lineno + 2,
                    fields.len(),
                    header.len()
                ),
            ));
        }
        let row: HashMap<&str, &str> = header.iter().copied().zip(fields).collect();
        let file_path = render_template(filename_format, &row).map_err(|e| {
            invalid(manifest_path, format!("filename format {filename_format:?}: {e}"))
        })?;
        let dir = containing_dir(&file_path);
        if !dir.is_empty() {
            dirs.insert(dir.to_string());
        }
    }

    for dir in &dirs {
        let target = root.join(dir);
        std::fs::create_dir_all(&target).map_err(|e| MirrorError::write(&target, e))?;
        debug!("ensured {}", target.display());
    }
    info!("Prepared {} directories under {}", dirs.len(), root.display());
    Ok(dirs.len())
}
