//! Wire shape of one storage listing page. Unknown fields are ignored.

use log::warn;
use serde::Deserialize;

use crate::error::MirrorError;
use crate::types::{EntryKind, FileEntry};

/// One fetched page: `{"data": [...], "links": {"next": ...}}`.
#[derive(Clone, Debug, Deserialize)]
pub struct Listing {
    pub data: Vec<RawEntry>,
    #[serde(default)]
    pub links: PageLinks,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: Option<String>,
}

/// A file or folder record as listed by the API.
#[derive(Clone, Debug, Deserialize)]
pub struct RawEntry {
    pub attributes: RawAttributes,
    #[serde(default)]
    pub links: EntryLinks,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawAttributes {
    pub name: String,
    pub kind: EntryKind,
    /// Leading-slash path from the storage root.
    pub materialized: String,
    /// API-relative path; appended to the root URL to list a folder.
    pub path: String,
    #[serde(default)]
    pub extra: Option<Extra>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Extra {
    #[serde(default)]
    pub hashes: Option<Hashes>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Hashes {
    #[serde(default)]
    pub sha256: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EntryLinks {
    #[serde(default)]
    pub download: Option<String>,
}

impl Listing {
    /// Decode a page body. `url` is only used for error context.
    pub fn from_json(url: &str, body: &str) -> Result<Self, MirrorError> {
        serde_json::from_str(body).map_err(|e| MirrorError::remote(url, format!("decode: {e}")))
    }
}

impl RawEntry {
    pub fn kind(&self) -> EntryKind {
        self.attributes.kind
    }

    pub fn materialized(&self) -> &str {
        &self.attributes.materialized
    }

    fn sha256(&self) -> Option<&str> {
        self.attributes
            .extra
            .as_ref()?
            .hashes
            .as_ref()?
            .sha256
            .as_deref()
    }

    /// Convert a `file` record. A file without a download link is a malformed page;
    /// a missing hash is tolerated and written as an empty field.
    pub fn into_file_entry(self, page_url: &str) -> Result<FileEntry, MirrorError> {
        let sha256 = match self.sha256() {
            Some(h) => h.to_string(),
            None => {
                warn!("{}: no sha256 reported", self.attributes.materialized);
                String::new()
            }
        };
        let download_url = self.links.download.ok_or_else(|| {
            MirrorError::remote(
                page_url,
                format!("file {} has no download link", self.attributes.materialized),
            )
        })?;
        Ok(FileEntry {
            name: self.attributes.name,
            materialized_path: self.attributes.materialized,
            download_url,
            sha256,
        })
    }
}
