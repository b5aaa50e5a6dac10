//! The tune file document.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use super::{parse_rows, MapId, TuneError, TuneResult};

/// A parsed tune file.
///
/// The document is held as JSON so that fields the analysis does not model
/// survive a rewrite unchanged and in their original order. Only the maps
/// named by [`MapId`] are interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct TuneFile {
    root: Map<String, Value>,
}

impl TuneFile {
    /// Build a tune file from a parsed JSON value.
    ///
    /// The top level must be an object with a `maps` array.
    pub fn from_value(value: Value) -> TuneResult<Self> {
        match value {
            Value::Object(root) => {
                if !matches!(root.get("maps"), Some(Value::Array(_))) {
                    return Err(TuneError::InvalidStructure(
                        "top-level 'maps' array is missing".to_string(),
                    ));
                }
                Ok(Self { root })
            }
            _ => Err(TuneError::InvalidStructure(
                "top level is not a JSON object".to_string(),
            )),
        }
    }

    /// Load and parse a tune file from disk.
    pub fn load(path: &Path) -> TuneResult<Self> {
        let contents = fs::read_to_string(path).map_err(|source| TuneError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let value: Value =
            serde_json::from_str(&contents).map_err(|source| TuneError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let tune = Self::from_value(value)?;

        tracing::debug!(
            path = %path.display(),
            maps = tune.maps().len(),
            "Loaded tune file"
        );

        Ok(tune)
    }

    /// Serialize the document with a one-space indent.
    ///
    /// Non-ASCII text is written as-is.
    pub fn to_json_string(&self) -> TuneResult<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b" ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.root
            .serialize(&mut serializer)
            .map_err(TuneError::Serialize)?;

        String::from_utf8(buf).map_err(|e| {
            TuneError::InvalidStructure(format!("serialized tune is not UTF-8: {}", e))
        })
    }

    /// Write the document to disk.
    ///
    /// Parent directories are created. The file is written to a temporary
    /// sibling first and renamed into place.
    pub fn save(&self, path: &Path) -> TuneResult<()> {
        let write_err = |source| TuneError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let json = self.to_json_string()?;
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, json).map_err(write_err)?;
        fs::rename(&temp_path, path).map_err(write_err)?;

        tracing::debug!(path = %path.display(), "Wrote tune file");
        Ok(())
    }

    fn maps(&self) -> &[Value] {
        match self.root.get("maps") {
            Some(Value::Array(maps)) => maps,
            _ => &[],
        }
    }

    fn find_map(&self, id: MapId) -> Option<&Map<String, Value>> {
        self.maps()
            .iter()
            .filter_map(Value::as_object)
            .find(|entry| entry.get("id").and_then(Value::as_str) == Some(id.as_str()))
    }

    /// Ids of all maps in the document, in file order.
    pub fn map_ids(&self) -> Vec<&str> {
        self.maps()
            .iter()
            .filter_map(|entry| entry.get("id").and_then(Value::as_str))
            .collect()
    }

    /// Whether the document has a map with the given id.
    pub fn contains(&self, id: MapId) -> bool {
        self.find_map(id).is_some()
    }

    /// Raw row strings of a map.
    pub fn rows(&self, id: MapId) -> TuneResult<Vec<&str>> {
        let entry = self.find_map(id).ok_or(TuneError::MissingMap { id })?;
        let malformed = || TuneError::MalformedData {
            id: id.as_str().to_string(),
        };

        let data = entry
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(malformed)?;
        data.iter()
            .map(|row| row.as_str().ok_or_else(malformed))
            .collect()
    }

    /// Parse a map as a 2-D table of numbers.
    pub fn table(&self, id: MapId) -> TuneResult<Vec<Vec<f64>>> {
        let rows = self.rows(id)?;
        let parsed = parse_rows(id.as_str(), &rows)?;
        if parsed.is_empty() {
            return Err(TuneError::EmptyMap { id });
        }
        Ok(parsed)
    }

    /// Parse a map as a 1-D vector (its first numeric row).
    pub fn vector(&self, id: MapId) -> TuneResult<Vec<f64>> {
        let mut table = self.table(id)?;
        Ok(table.swap_remove(0))
    }

    /// Replace the row strings of a map, leaving every other field untouched.
    ///
    /// Returns `false` when the document has no map with this id.
    pub fn replace_rows(&mut self, id: MapId, rows: Vec<String>) -> bool {
        let entry = match self.root.get_mut("maps") {
            Some(Value::Array(maps)) => maps
                .iter_mut()
                .filter_map(Value::as_object_mut)
                .find(|entry| entry.get("id").and_then(Value::as_str) == Some(id.as_str())),
            _ => None,
        };

        match entry {
            Some(entry) => {
                let data = rows.into_iter().map(Value::String).collect();
                entry.insert("data".to_string(), Value::Array(data));
                true
            }
            None => false,
        }
    }
}
