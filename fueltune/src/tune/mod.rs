//! Tune file codec.
//!
//! A tune file is a JSON document whose `maps` array holds the calibration
//! tables of the engine controller. Each entry carries an `id` and a `data`
//! array of rows, where every row is a comma-separated string of numbers:
//!
//! ```text
//! {
//!  "maps": [
//!   { "id": "base_spark_rpm_index", "data": ["1000, 3000, 5000"] },
//!   { "id": "fuel_base", "data": ["10.0, 12.0", "14.0, 16.0", "18.0, 20.0"] }
//!  ]
//! }
//! ```
//!
//! [`TuneFile`] keeps the whole document so that rewriting one map leaves
//! every other key, map, and field exactly as it was read. The maps the
//! analysis core depends on are addressed through the closed [`MapId`]
//! enumeration.

mod error;
mod file;
mod map_id;
mod rows;

pub use error::{TuneError, TuneResult};
pub use file::TuneFile;
pub use map_id::MapId;
pub use rows::{format_row, parse_rows};
