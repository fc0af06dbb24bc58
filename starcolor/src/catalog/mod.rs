//! Catalog input and output
//!
//! Reading delimited star catalogs into raw rows, and writing derived
//! records back out as JSON.

pub mod reader;
pub mod record;
pub mod row;
pub mod writer;

pub use reader::{load_catalog, open_catalog, CatalogReader};
pub use record::StarRecord;
pub use row::{fields, CatalogRow};
pub use writer::{load_records, save_records, write_records};
