//! Application configuration constants.
//! Defaults and URL shapes in one place.

use std::path::PathBuf;
use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
    host_env_key: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
                host_env_key: format!("{}_API_HOST", pkg.to_uppercase()),
            }
        })
    }

    /// `.osfmirror.toml`
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// `OSFMIRROR_API_HOST`
    pub fn host_env_key(&self) -> &str {
        &self.host_env_key
    }

    /// Manifest path used when the caller gives none: `<temp_dir>/<key>_recursive.csv`.
    pub fn default_manifest_path(&self, key: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{key}_recursive.csv"))
    }
}

// ---- Defaults ----

/// Built-in option defaults (lowest precedence).
pub struct Defaults;

impl Defaults {
    pub const API_HOST: &'static str = "files.osf.io";
    pub const FILENAME_FORMAT: &'static str = "{path}";
    pub const URL_FORMAT: &'static str = "{url}";
    pub const TIMEOUT_SECS: u64 = 120;
}

// ---- Remote API ----

/// Storage root URL for a project key: `https://<host>/v1/resources/<key>/providers/osfstorage/`.
pub fn storage_root_url(host: &str, key: &str) -> String {
    format!("https://{host}/v1/resources/{key}/providers/osfstorage/")
}

/// HTTP client tuning.
pub struct HttpConsts;

impl HttpConsts {
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
}

// ---- Registration ----

/// External registration command and its fixed arguments.
pub struct RegisterConsts;

impl RegisterConsts {
    pub const PROGRAM: &'static str = "datalad";
    pub const SUBCOMMAND: &'static str = "addurls";
    pub const IF_EXISTS: &'static str = "overwrite";
    /// Metadata bound from manifest columns on every registered file.
    pub const META: [&'static str; 2] = ["location={location}", "sha256={sha256}"];
}
