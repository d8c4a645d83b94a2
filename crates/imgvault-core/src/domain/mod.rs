//! Domain types.
//!
//! Pure data: no I/O, no adapter types in any signature.

mod archive;
mod media;

pub use archive::{
    ArchiveEntry, ArchiveRequest, FetchOutcome, FetchedBody, FetchedResource,
    MISSING_IMAGES_MESSAGE,
};
pub use media::{ImageAsset, ImagePage, ListQuery, TagQuery, TagSearchQuery};
