//! In-memory storage API for walker tests. Pages are keyed by full URL.

#![allow(dead_code)]

use osfmirror::{Listing, MetadataSource, MirrorError};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::HashMap;

pub const ROOT: &str = "https://files.example.org/v1/resources/abcde/providers/osfstorage/";

/// Folder API path for a materialized folder path. Mirrors the real API, where the
/// API path is an opaque id rather than the materialized path.
pub fn api_path(materialized: &str) -> String {
    format!("/id{}", materialized.replace('/', "_"))
}

pub fn folder_url(materialized: &str) -> String {
    format!("{ROOT}{}", api_path(materialized))
}

pub fn file(materialized: &str) -> Value {
    let name = materialized.rsplit('/').next().unwrap_or(materialized);
    json!({
        "attributes": {
            "name": name,
            "kind": "file",
            "materialized": materialized,
            "path": format!("/f{}", materialized.replace('/', "_")),
            "extra": { "hashes": { "md5": "x", "sha256": format!("sha-{name}") } }
        },
        "links": { "download": format!("https://dl.example.org{materialized}") }
    })
}

pub fn folder(materialized: &str) -> Value {
    let name = materialized.trim_end_matches('/').rsplit('/').next().unwrap_or("");
    json!({
        "attributes": {
            "name": name,
            "kind": "folder",
            "materialized": materialized,
            "path": api_path(materialized),
            "extra": {}
        },
        "links": { "upload": "https://up.example.org", "new_folder": "https://nf.example.org" }
    })
}

pub fn page(entries: Vec<Value>) -> Value {
    json!({ "data": entries, "links": { "next": null } })
}

#[derive(Default)]
pub struct FakeApi {
    pages: HashMap<String, Value>,
    calls: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, entries: Vec<Value>) -> Self {
        self.pages.insert(ROOT.to_string(), page(entries));
        self
    }

    pub fn with_folder(mut self, materialized: &str, entries: Vec<Value>) -> Self {
        self.pages.insert(folder_url(materialized), page(entries));
        self
    }

    pub fn with_raw(mut self, url: &str, body: Value) -> Self {
        self.pages.insert(url.to_string(), body);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl MetadataSource for FakeApi {
    fn fetch(&self, url: &str) -> Result<Listing, MirrorError> {
        self.calls.borrow_mut().push(url.to_string());
        let body = self.pages.get(url).ok_or_else(|| MirrorError::RemoteFetch {
            url: url.to_string(),
            reason: "HTTP status 404 Not Found".to_string(),
        })?;
        Listing::from_json(url, &body.to_string())
    }
}

/// root: [A/, y.nii.gz, top.txt]; A: [x.txt, B/, z.nii.gz]; A/B: [deep.nii.gz]
pub fn sample_tree() -> FakeApi {
    FakeApi::new()
        .with_root(vec![
            folder("/A/"),
            file("/y.nii.gz"),
            file("/top.txt"),
        ])
        .with_folder(
            "/A/",
            vec![file("/A/x.txt"), folder("/A/B/"), file("/A/z.nii.gz")],
        )
        .with_folder("/A/B/", vec![file("/A/B/deep.nii.gz")])
}

pub fn paths(entries: &[osfmirror::FileEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.materialized_path.as_str()).collect()
}
