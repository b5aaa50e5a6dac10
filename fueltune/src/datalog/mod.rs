//! Datalog ingestion.
//!
//! Reads CSV datalogs exported by the logging tool into immutable
//! [`Sample`] records. Column headers are resolved through a
//! [`ColumnMapping`], so logs from tools with different header names only
//! need a different mapping, not different code.

mod columns;
mod error;
mod reader;
mod sample;

pub use columns::{ColumnMapping, Field};
pub use error::{DatalogError, DatalogResult};
pub use reader::DatalogReader;
pub use sample::Sample;
