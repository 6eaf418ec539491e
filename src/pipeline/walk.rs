//! Depth-first walk of the storage tree with an explicit page stack.

use log::{debug, trace, warn};

use crate::engine::tools::child_url;
use crate::error::MirrorError;
use crate::types::{EntryKind, FileEntry, Subset};

use super::listing::{Listing, RawEntry};
use super::source::MetadataSource;

/// Remaining records of one fetched page, and the walk depth they were listed at.
struct PageCursor {
    url: String,
    entries: std::vec::IntoIter<RawEntry>,
    depth: usize,
}

fn open_page<S, F>(
    source: &S,
    url: String,
    depth: usize,
    on_fetch: &mut Option<F>,
) -> Result<PageCursor, MirrorError>
where
    S: MetadataSource + ?Sized,
    F: FnMut(&str),
{
    let Listing { data, links } = source.fetch(&url)?;
    debug!("{} records at depth {} from {}", data.len(), depth, url);
    if let Some(next) = links.next {
        warn!("{} has further pages ({}); only the first page is read", url, next);
    }
    if let Some(f) = on_fetch.as_mut() {
        f(&url);
    }
    Ok(PageCursor {
        url,
        entries: data.into_iter(),
        depth,
    })
}

/// Every file under `root_url`, optionally restricted to `subset`, in pre-order.
///
/// See [`walk_with`] for the ordering and subset rules.
pub fn walk<S>(source: &S, root_url: &str, subset: Option<&str>) -> Result<Vec<FileEntry>, MirrorError>
where
    S: MetadataSource + ?Sized,
{
    walk_with(source, root_url, subset, None::<fn(&str)>)
}

/// Walk the tree, calling `on_fetch` with each listing URL after it is fetched.
///
/// - Records are visited in API order; a folder's files are spliced in at the folder's
///   position (pre-order, depth-first). One fetch per visited folder, in visit order.
/// - With a subset, a record listed at depth `d` is considered only if its materialized
///   path starts with the first `d + 1` subset segments. Rejected folders are not fetched.
///   Files are emitted only when their path starts with the whole subset prefix.
/// - Any fetch or decode error aborts the walk; no partial result is returned.
/// - An unusable subset fails with [`MirrorError::SubsetFormat`] before any fetch.
pub fn walk_with<S, F>(
    source: &S,
    root_url: &str,
    subset: Option<&str>,
    mut on_fetch: Option<F>,
) -> Result<Vec<FileEntry>, MirrorError>
where
    S: MetadataSource + ?Sized,
    F: FnMut(&str),
{
    let subset = subset.map(Subset::parse).transpose()?;
    if let Some(s) = &subset {
        debug!("Walking {} restricted to {}", root_url, s);
    }

    let mut files = Vec::new();
    let mut stack = vec![open_page(source, root_url.to_string(), 0, &mut on_fetch)?];

    while let Some(top) = stack.last_mut() {
        let Some(entry) = top.entries.next() else {
            stack.pop();
            continue;
        };
        let depth = top.depth;
        if let Some(s) = &subset
            && !s.admits(entry.materialized(), depth)
        {
            trace!("skip {} (outside {})", entry.materialized(), s.prefix_at_depth(depth));
            continue;
        }
        match entry.kind() {
            EntryKind::File => {
                if let Some(s) = &subset
                    && !s.contains(entry.materialized())
                {
                    trace!("skip {} (outside {})", entry.materialized(), s);
                    continue;
                }
                let page_url = top.url.clone();
                files.push(entry.into_file_entry(&page_url)?);
            }
            EntryKind::Folder => {
                let url = child_url(root_url, &entry.attributes.path);
                let page = open_page(source, url, depth + 1, &mut on_fetch)?;
                stack.push(page);
            }
        }
    }

    debug!("Walk found {} files", files.len());
    Ok(files)
}
