use anyhow::{Result, anyhow};
use clap::Parser;
use std::path::PathBuf;

use crate::types::{ManifestColumns, Opts};

/// Mirror an OSF storage project into a CSV manifest.
#[derive(Clone, Parser)]
#[command(name = "osfmirror")]
#[command(
    about = "Walk an OSF project's storage tree and write a name,url,location,sha256,path manifest."
)]
pub struct Cli {
    /// OSF project key (the id after `osf.io/` in the project URL).
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Manifest path. Default: `<temp dir>/<KEY>_recursive.csv`.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Only mirror this subtree, e.g. `tpl-NKI` or `/tpl-NKI/anat`.
    #[arg(long, short = 's')]
    pub subset: Option<String>,

    /// Only keep files whose name ends with this suffix, e.g. `.nii.gz`.
    #[arg(long, short = 'e')]
    pub ext: Option<String>,

    /// Storage API host. Default: files.osf.io (or OSFMIRROR_API_HOST / .env).
    #[arg(long)]
    pub host: Option<String>,

    /// Manifest column order, comma-separated. Must name all five columns.
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Create the directories referenced by the manifest in the current directory.
    #[arg(long, short = 'p', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub prepare: Option<bool>,

    /// Register the manifest with `datalad addurls` (implies --prepare).
    #[arg(long, short = 'r', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub register: Option<bool>,

    /// Template for each file's on-disk path. Default: `{path}`.
    #[arg(long)]
    pub filename_format: Option<String>,

    /// Template for each file's download URL. Default: `{url}`.
    #[arg(long)]
    pub url_format: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, short = 't', value_parser = clap::value_parser!(u64))]
    pub timeout: Option<u64>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}

impl Cli {
    /// Apply flags given on the command line over file/env config.
    pub fn apply_to(&self, opts: &mut Opts) -> Result<()> {
        opts.key = self.key.trim().to_string();
        if let Some(ref h) = self.host {
            opts.api_host = h.clone();
        }
        if let Some(ref p) = self.csv {
            opts.csv = Some(p.clone());
        }
        if let Some(ref s) = self.subset {
            opts.subset = Some(s.clone());
        }
        if let Some(ref e) = self.ext {
            opts.ext = Some(e.clone());
        }
        if !self.columns.is_empty() {
            opts.columns =
                ManifestColumns::from_names(&self.columns).map_err(|e| anyhow!("--columns: {e}"))?;
        }
        if let Some(v) = self.prepare {
            opts.prepare = v;
        }
        if let Some(v) = self.register {
            opts.register = v;
        }
        if let Some(ref f) = self.filename_format {
            opts.filename_format = f.clone();
        }
        if let Some(ref f) = self.url_format {
            opts.url_format = f.clone();
        }
        if let Some(t) = self.timeout {
            opts.timeout_secs = t;
        }
        if let Some(v) = self.verbose {
            opts.verbose = v;
        }
        Ok(())
    }
}
