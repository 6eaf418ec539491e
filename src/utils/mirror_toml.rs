//! Load `.osfmirror.toml` from a directory (CLI only). Lib callers pass everything via MirrorOpts.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::types::{ManifestColumns, Opts};
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct MirrorToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsSection {
    api_host: Option<String>,
    csv: Option<String>,
    subset: Option<String>,
    ext: Option<String>,
    columns: Option<Vec<String>>,
    prepare: Option<bool>,
    register: Option<bool>,
    filename_format: Option<String>,
    url_format: Option<String>,
    verbose: Option<bool>,
    timeout_secs: Option<u64>,
}

impl MirrorToml {
    /// `verbose` as set in the file, if at all. Read before logging is initialised.
    pub fn verbose(&self) -> Option<bool> {
        self.settings.verbose
    }
}

pub fn parse_mirror_toml(s: &str) -> Result<MirrorToml, toml::de::Error> {
    toml::from_str(s)
}

/// Load `.osfmirror.toml` from `dir`. None when the file is missing or unreadable;
/// `Some(Err(msg))` when it exists but does not parse (caller logs and ignores it).
pub fn load_mirror_toml(dir: &Path) -> Option<Result<MirrorToml, String>> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    Some(parse_mirror_toml(&s).map_err(|e| format!("{}: {}", path.display(), e)))
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $opts:expr, $sec_field:ident => $opts_field:ident) => {
        if let Some(v) = $sec.$sec_field.clone() {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before env and CLI.
pub fn apply_file_to_opts(file: &MirrorToml, opts: &mut Opts) {
    let sec = &file.settings;
    apply_file_opt!(sec, opts, api_host => api_host);
    if let Some(ref p) = sec.csv {
        opts.csv = Some(PathBuf::from(p));
    }
    if let Some(ref s) = sec.subset {
        opts.subset = Some(s.clone());
    }
    if let Some(ref e) = sec.ext {
        opts.ext = Some(e.clone());
    }
    if let Some(ref names) = sec.columns {
        match ManifestColumns::from_names(names) {
            Ok(cols) => opts.columns = cols,
            Err(e) => log::warn!(
                "{}: columns ignored: {}",
                PackagePaths::get().config_filename(),
                e
            ),
        }
    }
    apply_file_opt!(sec, opts, prepare => prepare);
    apply_file_opt!(sec, opts, register => register);
    apply_file_opt!(sec, opts, filename_format => filename_format);
    apply_file_opt!(sec, opts, url_format => url_format);
    apply_file_opt!(sec, opts, verbose => verbose);
    apply_file_opt!(sec, opts, timeout_secs => timeout_secs);
}
