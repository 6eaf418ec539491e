//! osfmirror: mirror an OSF storage project's file tree into a CSV manifest

pub mod engine;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod prepare;
pub mod register;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use error::MirrorError;
pub use manifest::{project, project_rows, render_manifest};
pub use pipeline::{HttpSource, Listing, MetadataSource, walk, walk_with};
pub use prepare::{prepare, prepare_with_format};
pub use register::register;
pub use utils::config::storage_root_url;

use log::debug;
use std::path::Path;

/// Result alias used by the public osfmirror API
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Walk `root_url` through `source` and write the manifest to `csv`. Returns rows written.
///
/// Nothing is written if the walk fails. Use [`HttpSource`] for the live API:
///
/// ```ignore
/// let source = osfmirror::HttpSource::new(120)?;
/// let url = osfmirror::storage_root_url("files.osf.io", "ue5gx");
/// let opts = osfmirror::MirrorOpts { subset: Some("tpl-NKI".into()), ..Default::default() };
/// let rows = osfmirror::mirror(&source, &url, "/tmp/ue5gx.csv".as_ref(), &opts)?;
/// ```
pub fn mirror<S>(source: &S, root_url: &str, csv: &Path, opts: &MirrorOpts) -> Result<usize>
where
    S: MetadataSource + ?Sized,
{
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    let entries = walk(source, root_url, opts.subset.as_deref())?;
    project(
        &entries,
        csv,
        opts.subset.as_deref(),
        opts.ext.as_deref(),
        &opts.columns,
    )
}
