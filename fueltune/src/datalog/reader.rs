//! CSV datalog reader.

use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use super::{ColumnMapping, DatalogError, DatalogResult, Field, Sample};

/// Reads CSV datalogs into [`Sample`]s.
#[derive(Debug, Clone, Default)]
pub struct DatalogReader {
    mapping: ColumnMapping,
}

impl DatalogReader {
    /// Create a reader with the given column mapping.
    pub fn new(mapping: ColumnMapping) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Read every datalog and concatenate their samples in order.
    ///
    /// Fails if `paths` is empty or any log is missing a required column.
    pub fn read_all<P: AsRef<Path>>(&self, paths: &[P]) -> DatalogResult<Vec<Sample>> {
        if paths.is_empty() {
            return Err(DatalogError::NoDatalogs);
        }

        let mut samples = Vec::new();
        for (log_index, path) in paths.iter().enumerate() {
            samples.extend(self.read_path(path.as_ref(), log_index)?);
        }

        tracing::info!(
            logs = paths.len(),
            samples = samples.len(),
            "Loaded datalogs"
        );

        Ok(samples)
    }

    /// Read one datalog file.
    pub fn read_path(&self, path: &Path, log_index: usize) -> DatalogResult<Vec<Sample>> {
        let reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|source| DatalogError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        let samples = self.read_records(reader, path, log_index)?;
        tracing::debug!(
            path = %path.display(),
            samples = samples.len(),
            "Read datalog"
        );
        Ok(samples)
    }

    /// Read a datalog from any reader. `origin` names it in errors.
    pub fn read<R: io::Read>(
        &self,
        reader: R,
        origin: &Path,
        log_index: usize,
    ) -> DatalogResult<Vec<Sample>> {
        let reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        self.read_records(reader, origin, log_index)
    }

    fn read_records<R: io::Read>(
        &self,
        mut reader: csv::Reader<R>,
        origin: &Path,
        log_index: usize,
    ) -> DatalogResult<Vec<Sample>> {
        let headers = reader
            .headers()
            .map_err(|source| DatalogError::Open {
                path: origin.to_path_buf(),
                source,
            })?
            .clone();
        let columns = self.resolve_columns(&headers, origin)?;

        let mut samples = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|source| DatalogError::Record {
                path: origin.to_path_buf(),
                // Header is line 1.
                line: row + 2,
                source,
            })?;

            let value = |field: Field| -> f64 {
                record
                    .get(columns[field as usize])
                    .and_then(|cell| cell.trim().parse::<f64>().ok())
                    .unwrap_or(f64::NAN)
            };

            samples.push(Sample {
                log_index,
                time_s: value(Field::Time),
                load: value(Field::Load),
                rpm: value(Field::Rpm),
                lambda_actual: value(Field::LambdaActual),
                lambda_target: value(Field::LambdaTarget),
                stft: value(Field::Stft),
                ltft: value(Field::Ltft),
                throttle: value(Field::Throttle),
            });
        }

        Ok(samples)
    }

    /// Column position of each field, in [`Field::ALL`] order.
    fn resolve_columns(&self, headers: &StringRecord, origin: &Path) -> DatalogResult<[usize; 8]> {
        let mut columns = [0usize; 8];
        let mut missing = Vec::new();

        for (field, header) in self.mapping.iter() {
            match headers.iter().position(|h| h.trim() == header) {
                Some(pos) => columns[field as usize] = pos,
                None => missing.push(header.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(DatalogError::MissingColumns {
                path: origin.to_path_buf(),
                columns: missing,
            });
        }
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "Time (s),Load (MAF) (g/rev),Engine Speed (rpm),Air/Fuel Sensor #1 (λ),\
Power Mode - Fuel Ratio Target (λ),Fuel Trim - Short Term (%),Fuel Trim - Long Term (%),\
Throttle Position (%),Coolant Temperature (°C)";

    fn read_str(csv: &str) -> DatalogResult<Vec<Sample>> {
        DatalogReader::default().read(csv.as_bytes(), Path::new("test.csv"), 0)
    }

    #[test]
    fn test_reads_rows_and_ignores_extra_columns() {
        let csv = format!(
            "{}\n0.10,1.00,3200,0.90,0.85,0.0,1.5,50,88\n0.20,0.45,2500,1.01,1.00,-2.0,1.5,12,88\n",
            HEADER
        );
        let samples = read_str(&csv).unwrap();
        assert_eq!(samples.len(), 2);

        let first = samples[0];
        assert_eq!(first.time_s, 0.10);
        assert_eq!(first.load, 1.00);
        assert_eq!(first.rpm, 3200.0);
        assert_eq!(first.lambda_actual, 0.90);
        assert_eq!(first.lambda_target, 0.85);
        assert_eq!(first.throttle, 50.0);
        assert_eq!(samples[1].stft, -2.0);
    }

    #[test]
    fn test_empty_cells_read_as_nan() {
        let csv = format!("{}\n0.1,,3000,1.0,1.0,,,20,90\n", HEADER);
        let samples = read_str(&csv).unwrap();
        assert!(samples[0].load.is_nan());
        assert!(samples[0].stft.is_nan());
        assert!(!samples[0].is_complete());
        assert_eq!(samples[0].combined_trim(), 0.0);
    }

    #[test]
    fn test_columns_matched_by_header_not_position() {
        let csv = "Throttle Position (%),Engine Speed (rpm),Time (s),Load (MAF) (g/rev),\
Air/Fuel Sensor #1 (λ),Power Mode - Fuel Ratio Target (λ),Fuel Trim - Short Term (%),\
Fuel Trim - Long Term (%)\n42,4100,3.5,1.6,0.82,0.80,0,0\n";
        let samples = read_str(csv).unwrap();
        assert_eq!(samples[0].throttle, 42.0);
        assert_eq!(samples[0].rpm, 4100.0);
        assert_eq!(samples[0].time_s, 3.5);
    }

    #[test]
    fn test_missing_columns_are_all_reported() {
        let csv = "Time (s),Engine Speed (rpm)\n0.1,3000\n";
        let err = read_str(csv).unwrap_err();
        match err {
            DatalogError::MissingColumns { columns, .. } => {
                assert_eq!(columns.len(), 6);
                assert!(columns.contains(&"Load (MAF) (g/rev)".to_string()));
                assert!(columns.contains(&"Throttle Position (%)".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_custom_mapping() {
        let mapping = ColumnMapping::default()
            .with_header(Field::Time, "t")
            .with_header(Field::Load, "load")
            .with_header(Field::Rpm, "rpm")
            .with_header(Field::LambdaActual, "lam")
            .with_header(Field::LambdaTarget, "lam_tgt")
            .with_header(Field::Stft, "stft")
            .with_header(Field::Ltft, "ltft")
            .with_header(Field::Throttle, "tps");
        let reader = DatalogReader::new(mapping);
        assert_eq!(reader.mapping().header(Field::Rpm), "rpm");
        let csv = "t,load,rpm,lam,lam_tgt,stft,ltft,tps\n1,0.8,2000,1.0,1.0,3,1,10\n";
        let samples = reader.read(csv.as_bytes(), Path::new("x.csv"), 3).unwrap();
        assert_eq!(samples[0].log_index, 3);
        assert_eq!(samples[0].combined_trim(), 4.0);
    }

    #[test]
    fn test_read_all_requires_paths() {
        let paths: [&Path; 0] = [];
        assert!(matches!(
            DatalogReader::default().read_all(&paths),
            Err(DatalogError::NoDatalogs)
        ));
    }

    #[test]
    fn test_read_all_concatenates_logs() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.csv");
        let b = temp.path().join("b.csv");
        fs::write(&a, format!("{}\n0.1,1.0,3000,1.0,1.0,0,0,20,90\n", HEADER)).unwrap();
        fs::write(
            &b,
            format!(
                "{}\n0.1,1.0,3000,1.0,1.0,0,0,20,90\n0.2,1.0,3000,1.0,1.0,0,0,20,90\n",
                HEADER
            ),
        )
        .unwrap();

        let samples = DatalogReader::default().read_all(&[&a, &b]).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].log_index, 0);
        assert_eq!(samples[2].log_index, 1);
    }

    #[test]
    fn test_read_path_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = DatalogReader::default()
            .read_path(&temp.path().join("nope.csv"), 0)
            .unwrap_err();
        assert!(matches!(err, DatalogError::Open { .. }));
    }
}
