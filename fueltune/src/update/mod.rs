//! Tune updates.
//!
//! [`TableUpdater`] turns analysis summaries into a new `fuel_base` grid,
//! capping each cell's change relative to the source tune.
//! [`update_tune_file`] writes that grid into a copy of a template tune.

mod error;
mod modification;
mod updater;
mod writer;

pub use error::{UpdateError, UpdateResult};
pub use modification::{pending_modifications, ClampedModification, Modification};
pub use updater::{FuelBaseUpdate, TableUpdater};
pub use writer::{update_tune_file, TemplateOrigin, UpdatePaths, UpdateReport};
