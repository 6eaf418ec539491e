//! Hand a manifest to `datalad addurls`, which downloads and registers every row.

use log::{debug, info};
use std::path::Path;
use std::process::Command;

use crate::error::MirrorError;
use crate::utils::config::RegisterConsts;

/// Arguments after the program name:
/// `addurls --ifexists overwrite --meta location={location} --meta sha256={sha256} <manifest> <url_format> <filename_format>`.
pub fn addurls_args(manifest: &Path, url_format: &str, filename_format: &str) -> Vec<String> {
    let mut args = vec![
        RegisterConsts::SUBCOMMAND.to_string(),
        "--ifexists".to_string(),
        RegisterConsts::IF_EXISTS.to_string(),
    ];
    for meta in RegisterConsts::META {
        args.push("--meta".to_string());
        args.push(meta.to_string());
    }
    args.push(manifest.display().to_string());
    args.push(url_format.to_string());
    args.push(filename_format.to_string());
    args
}

/// Run the registration command inside `dataset_dir`. Stdout/stderr are inherited.
pub fn register(
    manifest: &Path,
    dataset_dir: &Path,
    url_format: &str,
    filename_format: &str,
) -> Result<(), MirrorError> {
    let args = addurls_args(manifest, url_format, filename_format);
    debug!("{} {}", RegisterConsts::PROGRAM, args.join(" "));
    let status = Command::new(RegisterConsts::PROGRAM)
        .args(&args)
        .current_dir(dataset_dir)
        .status()
        .map_err(|e| {
            MirrorError::Registration(format!("spawn {}: {}", RegisterConsts::PROGRAM, e))
        })?;
    if !status.success() {
        return Err(MirrorError::Registration(format!(
            "{} {} exited with {}",
            RegisterConsts::PROGRAM,
            RegisterConsts::SUBCOMMAND,
            status
        )));
    }
    info!("Registered {} in {}", manifest.display(), dataset_dir.display());
    Ok(())
}
