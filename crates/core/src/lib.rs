//! Core types, table model, and dataset classification for the touchmap
//! engine.

pub mod dataset;
pub mod error;
pub mod filename;
pub mod schema;
pub mod table;

pub use dataset::DatasetType;
pub use error::{Error, Result};
pub use filename::{parse_filename, ParsedFilename};
pub use table::Table;
