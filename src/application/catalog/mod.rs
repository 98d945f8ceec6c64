mod catalog_store;
mod errors;

pub use catalog_store::CatalogStore;
pub use errors::{CatalogError, Result};
