//! Public and internal types for the osfmirror API and pipeline.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::MirrorError;

/// A file discovered under the storage root. Folders never become a `FileEntry`;
/// the walker only produces these for `kind == "file"` listing records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    /// Leaf name, all extensions included.
    pub name: String,
    /// Path from the storage root, always starting with `/`.
    pub materialized_path: String,
    pub download_url: String,
    /// Content hash as reported by the API. Carried into the manifest, never checked.
    pub sha256: String,
}

/// Listing record kind. Only `File` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

/// One manifest line. `location` duplicates `url` for the registration tool's metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestRow {
    pub name: String,
    pub url: String,
    pub location: String,
    pub sha256: String,
    pub path: String,
}

impl ManifestRow {
    pub fn field(&self, column: Column) -> &str {
        match column {
            Column::Name => &self.name,
            Column::Url => &self.url,
            Column::Location => &self.location,
            Column::Sha256 => &self.sha256,
            Column::Path => &self.path,
        }
    }
}

/// Manifest column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Url,
    Location,
    Sha256,
    Path,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Name,
        Column::Url,
        Column::Location,
        Column::Sha256,
        Column::Path,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Url => "url",
            Column::Location => "location",
            Column::Sha256 => "sha256",
            Column::Path => "path",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| format!("unknown manifest column {s:?}"))
    }
}

/// Column order of the manifest. Always a permutation of all five columns so the
/// registration tool finds every field it binds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestColumns(Vec<Column>);

impl Default for ManifestColumns {
    fn default() -> Self {
        Self(Column::ALL.to_vec())
    }
}

impl ManifestColumns {
    /// Build from column names, e.g. `["path", "name", "url", "location", "sha256"]`.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, String> {
        let mut cols = Vec::with_capacity(names.len());
        for name in names {
            let col: Column = name.as_ref().parse()?;
            if cols.contains(&col) {
                return Err(format!("duplicate manifest column {:?}", col.as_str()));
            }
            cols.push(col);
        }
        if let Some(missing) = Column::ALL.into_iter().find(|c| !cols.contains(c)) {
            return Err(format!("missing manifest column {:?}", missing.as_str()));
        }
        Ok(Self(cols))
    }

    pub fn iter(&self) -> impl Iterator<Item = Column> + '_ {
        self.0.iter().copied()
    }

    /// Header line without trailing newline.
    pub fn header(&self) -> String {
        self.0
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Subtree restriction, stored as its non-empty path segments.
///
/// `"tpl-NKI"`, `"/tpl-NKI"` and `"tpl-NKI/"` all parse to the same subset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subset {
    segments: Vec<String>,
}

impl Subset {
    /// Parse a slash-separated subset. Fails when no segment remains (`""`, `"/"`, `"//"`).
    pub fn parse(raw: &str) -> Result<Self, MirrorError> {
        let segments: Vec<String> = raw
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if segments.is_empty() {
            return Err(MirrorError::SubsetFormat(raw.to_string()));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Full anchored prefix, e.g. `/tpl-NKI/sub-01`.
    pub fn prefix(&self) -> String {
        self.prefix_at_depth(self.segments.len())
    }

    /// Prefix built from the first `depth + 1` segments (capped at the full subset).
    /// Depth 0 compares only the first segment; once the walk is below the subset,
    /// the whole subset is the prefix.
    pub fn prefix_at_depth(&self, depth: usize) -> String {
        let take = (depth + 1).min(self.segments.len());
        format!("/{}", self.segments[..take].join("/"))
    }

    /// Whether a materialized path is admitted at the given walk depth.
    /// Decides which folders are descended into.
    pub fn admits(&self, materialized_path: &str, depth: usize) -> bool {
        materialized_path.starts_with(&self.prefix_at_depth(depth))
    }

    /// Whether a file may be emitted: its path must start with the full prefix,
    /// whatever depth it was listed at.
    pub fn contains(&self, materialized_path: &str) -> bool {
        materialized_path.starts_with(&self.prefix())
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Lib-only options for [`mirror`](crate::mirror). Only the fields that apply when
/// using the crate directly (no prepare / register step).
#[derive(Clone, Debug, Default)]
pub struct MirrorOpts {
    /// Restrict walk and path rewriting to this subtree.
    pub subset: Option<String>,
    /// Keep only files whose name ends with this suffix (e.g. `.nii.gz`).
    pub ext: Option<String>,
    /// Column order of the written manifest.
    pub columns: ManifestColumns,
}

/// Full options (CLI). Use [`MirrorOpts`] for lib.
#[derive(Clone, Debug)]
pub struct Opts {
    /// OSF project key.
    pub key: String,
    /// Host serving the storage API.
    pub api_host: String,
    /// Manifest path. When None, `<temp_dir>/<key>_recursive.csv`.
    pub csv: Option<PathBuf>,
    pub subset: Option<String>,
    pub ext: Option<String>,
    pub columns: ManifestColumns,
    /// Create the directories the manifest references.
    pub prepare: bool,
    /// Hand the manifest to `datalad addurls` (implies prepare).
    pub register: bool,
    /// Template rendered per row to get the on-disk file path.
    pub filename_format: String,
    /// Template rendered per row to get the download URL.
    pub url_format: String,
    /// Show debug logging and a fetch counter.
    pub verbose: bool,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Opts {
    fn default() -> Self {
        use crate::utils::config::Defaults;
        Self {
            key: String::new(),
            api_host: Defaults::API_HOST.to_string(),
            csv: None,
            subset: None,
            ext: None,
            columns: ManifestColumns::default(),
            prepare: false,
            register: false,
            filename_format: Defaults::FILENAME_FORMAT.to_string(),
            url_format: Defaults::URL_FORMAT.to_string(),
            verbose: false,
            timeout_secs: Defaults::TIMEOUT_SECS,
        }
    }
}
