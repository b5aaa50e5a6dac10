//! Writing updated tune files.
//!
//! The structure of the written file comes from a template document; only
//! its `fuel_base` rows are replaced. The template is chosen as follows:
//!
//! 1. The existing file at the output path, so edits made to a previous
//!    output outside `fuel_base` survive a rerun.
//! 2. The `--modify-tune` document, when given.
//! 3. The source tune itself.
//!
//! The `fuel_base` values always come from the source tune, so the choice of
//! template never changes them.

use std::fmt;
use std::path::{Path, PathBuf};

use super::updater::{FuelBaseUpdate, TableUpdater};
use super::{ClampedModification, UpdateError, UpdateResult};
use crate::analysis::CellSummary;
use crate::table::CalibrationTable;
use crate::tune::{format_row, MapId, TuneFile};

/// Where the structure of the written tune came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// A previous output at the destination path.
    ExistingOutput,
    /// A separately supplied tune to modify.
    ModifyTune,
    /// The source tune.
    Source,
}

impl TemplateOrigin {
    /// Get a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            TemplateOrigin::ExistingOutput => "existing output file",
            TemplateOrigin::ModifyTune => "tune to modify",
            TemplateOrigin::Source => "source tune",
        }
    }
}

impl fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Input and output locations for a tune update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePaths {
    /// Tune the analysis ran against. Its `fuel_base` is the baseline.
    pub source: PathBuf,
    /// Where the updated tune is written.
    pub output: PathBuf,
    /// Optional template for everything except `fuel_base`.
    pub modify_tune: Option<PathBuf>,
}

impl UpdatePaths {
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
            modify_tune: None,
        }
    }

    /// Use another tune as the template when no output exists yet.
    pub fn with_modify_tune(mut self, path: impl Into<PathBuf>) -> Self {
        self.modify_tune = Some(path.into());
        self
    }

    /// Template path and origin, by priority.
    pub fn resolve_template(&self) -> (&Path, TemplateOrigin) {
        if self.output.exists() {
            (self.output.as_path(), TemplateOrigin::ExistingOutput)
        } else if let Some(path) = &self.modify_tune {
            (path.as_path(), TemplateOrigin::ModifyTune)
        } else {
            (self.source.as_path(), TemplateOrigin::Source)
        }
    }
}

/// Outcome of writing an updated tune.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    pub output: PathBuf,
    pub template: PathBuf,
    pub template_origin: TemplateOrigin,
    pub change_limit_pct: f64,
    /// Cells written with a new value.
    pub applied: usize,
    /// Cells left at their source value.
    pub skipped: usize,
    pub clamped: Vec<ClampedModification>,
}

/// Apply the summaries to the source tune and write the result.
pub fn update_tune_file(
    paths: &UpdatePaths,
    updater: &TableUpdater,
    enriched: &[CellSummary],
    closed_loop: &[CellSummary],
) -> UpdateResult<UpdateReport> {
    let source_doc = TuneFile::load(&paths.source)?;
    if !source_doc.contains(MapId::FuelBase) {
        return Err(UpdateError::MissingFuelMap {
            path: paths.source.clone(),
        });
    }
    let source = CalibrationTable::from_tune(&source_doc)?;

    let FuelBaseUpdate {
        table,
        applied,
        skipped,
        clamped,
    } = updater.apply(&source, enriched, closed_loop);

    let (template_path, template_origin) = paths.resolve_template();
    let mut template = match template_origin {
        TemplateOrigin::Source => source_doc,
        _ => TuneFile::load(template_path)?,
    };

    let rows = table.fuel_base().iter_rows().map(format_row).collect();
    if !template.replace_rows(MapId::FuelBase, rows) {
        return Err(UpdateError::MissingFuelMap {
            path: template_path.to_path_buf(),
        });
    }
    template.save(&paths.output)?;

    tracing::info!(
        path = %paths.output.display(),
        template = %template_path.display(),
        origin = %template_origin,
        applied,
        clamped = clamped.len(),
        "Wrote updated tune"
    );

    Ok(UpdateReport {
        output: paths.output.clone(),
        template: template_path.to_path_buf(),
        template_origin,
        change_limit_pct: updater.change_limit_pct(),
        applied,
        skipped,
        clamped,
    })
}
