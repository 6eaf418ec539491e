//! Metadata discovery: listing decode, page source, depth-first walk.

pub mod listing;
pub mod source;
pub mod walk;

pub use listing::{Listing, PageLinks, RawEntry};
pub use source::{HttpSource, MetadataSource};
pub use walk::{walk, walk_with};
