//! Services composing the ports into use cases.

mod media_catalog;
mod media_pages;

pub use media_catalog::{MediaCatalog, PageParams};
pub use media_pages::MediaPages;
