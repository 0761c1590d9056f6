//! delegate-catalog: file-backed catalogue loading, comparison CSV parsing, and demo export

pub mod comparison_csv;
pub mod loader;

pub use comparison_csv::{parse_comparison_csv, read_comparison};
pub use loader::{check_catalog, export_demo, read_catalog_data, FileCatalog};
