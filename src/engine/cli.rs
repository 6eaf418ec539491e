//! CLI command handler: walk → manifest, then optionally prepare directories and register.

use anyhow::{Context, Result, bail};
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::engine::arg_parser::Cli;
use crate::engine::progress::{create_counter, fetch_callback, finish_bar, refresh_bar};
use crate::manifest::project;
use crate::pipeline::{HttpSource, walk_with};
use crate::prepare::prepare_with_format;
use crate::register::register;
use crate::types::Opts;
use crate::utils::config::{PackagePaths, storage_root_url};
use crate::utils::{api_host_from_env, apply_file_to_opts, load_mirror_toml, setup_logging};

/// Merge defaults < `.osfmirror.toml` < env < CLI, initialising logging on the way.
fn setup_opts(cli: &Cli, config_dir: &Path) -> Result<Opts> {
    let file = load_mirror_toml(config_dir);
    let file_verbose = file
        .as_ref()
        .and_then(|f| f.as_ref().ok())
        .and_then(|f| f.verbose());
    setup_logging(cli.verbose.or(file_verbose).unwrap_or(false));

    let mut opts = Opts::default();
    match file {
        Some(Ok(f)) => apply_file_to_opts(&f, &mut opts),
        Some(Err(msg)) => warn!("{} (config ignored)", msg),
        None => {}
    }
    if let Some(host) = api_host_from_env(config_dir) {
        opts.api_host = host;
    }
    cli.apply_to(&mut opts)?;
    Ok(opts)
}

/// Parse config and run. Entry point for the binary.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_opts(cli, Path::new("."))?;
    let csv = run(&opts, Path::new("."))?;
    println!("{}", csv.display());
    Ok(())
}

/// Run the whole mirror for `opts` with `dataset_dir` as the dataset root.
/// Returns the manifest path.
pub fn run(opts: &Opts, dataset_dir: &Path) -> Result<PathBuf> {
    if opts.key.is_empty() {
        bail!("project key must not be empty");
    }
    let root_url = storage_root_url(&opts.api_host, &opts.key);
    let csv = opts
        .csv
        .clone()
        .unwrap_or_else(|| PackagePaths::get().default_manifest_path(&opts.key));
    debug!("Storage root: {}", root_url);

    let source = HttpSource::new(opts.timeout_secs)?;
    let mut bar = opts.verbose.then(|| create_counter("Listing"));
    if let Some(b) = bar.as_mut() {
        refresh_bar(b);
    }
    let entries = walk_with(
        &source,
        &root_url,
        opts.subset.as_deref(),
        fetch_callback(&mut bar),
    )
    .with_context(|| format!("walk project {}", opts.key))?;
    if let Some(b) = bar.as_mut() {
        finish_bar(b);
    }

    project(
        &entries,
        &csv,
        opts.subset.as_deref(),
        opts.ext.as_deref(),
        &opts.columns,
    )?;

    if opts.prepare || opts.register {
        prepare_with_format(&csv, dataset_dir, &opts.filename_format)?;
    }
    if opts.register {
        register(&csv, dataset_dir, &opts.url_format, &opts.filename_format)?;
    }
    Ok(csv)
}
