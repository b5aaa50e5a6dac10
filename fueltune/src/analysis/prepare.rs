//! Sample preparation: filtering, cell lookup, and regime labelling.

use super::classifier::{ModeClassifier, Regime};
use crate::datalog::Sample;
use crate::table::{CalibrationTable, Cell};

/// A sample with its derived fields attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedSample {
    pub sample: Sample,
    pub cell: Cell,
    pub regime: Regime,
    /// STFT + LTFT (%).
    pub combined_trim: f64,
    /// Measured over commanded lambda. Only set for enriched samples.
    pub lambda_ratio: Option<f64>,
}

impl ClassifiedSample {
    /// Value aggregated for this sample's regime.
    pub fn metric(&self) -> Option<f64> {
        match self.regime {
            Regime::Enriched => self.lambda_ratio,
            Regime::ClosedLoop => Some(self.combined_trim),
        }
    }
}

/// Counts of samples kept and dropped during preparation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreparationStats {
    /// Samples read from the datalogs.
    pub total: usize,
    /// Dropped for a missing RPM, load, or lambda value.
    pub incomplete: usize,
    /// Enriched samples dropped for a non-positive lambda target.
    pub invalid_target: usize,
    /// Enriched samples kept.
    pub enriched: usize,
    /// Closed-loop samples kept.
    pub closed_loop: usize,
}

impl PreparationStats {
    /// Samples that reached aggregation.
    pub fn retained(&self) -> usize {
        self.enriched + self.closed_loop
    }
}

/// Attach cell, regime, and metric to every usable sample.
///
/// Samples with missing data are dropped rather than failing the run; the
/// returned stats say how many. Out-of-range RPM and load values clamp into
/// the edge cells.
pub fn prepare_samples(
    table: &CalibrationTable,
    samples: &[Sample],
) -> (Vec<ClassifiedSample>, PreparationStats) {
    let classifier = ModeClassifier::new(table);
    let mut stats = PreparationStats {
        total: samples.len(),
        ..Default::default()
    };
    let mut prepared = Vec::with_capacity(samples.len());

    for sample in samples {
        let cell = match table.cell_for(sample.rpm, sample.load) {
            Some(cell) if sample.is_complete() => cell,
            _ => {
                stats.incomplete += 1;
                continue;
            }
        };

        let regime = classifier.classify(sample);
        let lambda_ratio = match regime {
            Regime::Enriched if sample.lambda_target > 0.0 => {
                Some(sample.lambda_actual / sample.lambda_target)
            }
            Regime::Enriched => {
                stats.invalid_target += 1;
                continue;
            }
            Regime::ClosedLoop => None,
        };

        match regime {
            Regime::Enriched => stats.enriched += 1,
            Regime::ClosedLoop => stats.closed_loop += 1,
        }

        prepared.push(ClassifiedSample {
            sample: *sample,
            cell,
            regime,
            combined_trim: sample.combined_trim(),
            lambda_ratio,
        });
    }

    tracing::debug!(
        total = stats.total,
        incomplete = stats.incomplete,
        invalid_target = stats.invalid_target,
        enriched = stats.enriched,
        closed_loop = stats.closed_loop,
        "Prepared samples"
    );

    (prepared, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableParts;

    fn table() -> CalibrationTable {
        CalibrationTable::from_parts(TableParts {
            rpm_axis: vec![1000.0, 3000.0, 5000.0],
            load_axis: vec![0.5, 1.0],
            fuel_base: vec![vec![10.0, 12.0], vec![14.0, 16.0], vec![18.0, 20.0]],
            enable_load: vec![0.4, 0.4, 0.4],
            enable_tps: vec![20.0, 20.0, 20.0],
            delay_counter: vec![10.0],
            delay_axis: vec![2000.0],
        })
        .unwrap()
    }

    fn sample(rpm: f64, load: f64, throttle: f64, actual: f64, target: f64) -> Sample {
        Sample {
            log_index: 0,
            time_s: 0.0,
            load,
            rpm,
            lambda_actual: actual,
            lambda_target: target,
            stft: 3.0,
            ltft: f64::NAN,
            throttle,
        }
    }

    #[test]
    fn test_enriched_sample_gets_ratio() {
        let (prepared, stats) = prepare_samples(&table(), &[sample(3200.0, 1.0, 50.0, 0.90, 0.85)]);
        assert_eq!(stats.enriched, 1);

        let s = prepared[0];
        assert_eq!(s.cell, Cell::new(1, 1));
        assert_eq!(s.regime, Regime::Enriched);
        let ratio = s.lambda_ratio.unwrap();
        assert!((ratio - 0.90 / 0.85).abs() < 1e-12);
        assert_eq!(s.metric(), Some(ratio));
    }

    #[test]
    fn test_closed_loop_sample_uses_trim() {
        let (prepared, stats) = prepare_samples(&table(), &[sample(2000.0, 0.6, 10.0, 1.0, 1.0)]);
        assert_eq!(stats.closed_loop, 1);
        assert_eq!(prepared[0].regime, Regime::ClosedLoop);
        assert_eq!(prepared[0].lambda_ratio, None);
        // Missing LTFT counts as zero.
        assert_eq!(prepared[0].metric(), Some(3.0));
    }

    #[test]
    fn test_incomplete_samples_dropped() {
        let samples = [
            sample(f64::NAN, 1.0, 50.0, 0.9, 0.85),
            sample(3000.0, f64::NAN, 50.0, 0.9, 0.85),
            sample(3000.0, 1.0, 50.0, f64::NAN, 0.85),
            sample(3000.0, 1.0, 50.0, 0.9, f64::NAN),
            sample(3000.0, 1.0, 50.0, 0.9, 0.85),
        ];
        let (prepared, stats) = prepare_samples(&table(), &samples);
        assert_eq!(prepared.len(), 1);
        assert_eq!(stats.incomplete, 4);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.retained(), 1);
    }

    #[test]
    fn test_non_positive_target_dropped_from_enriched() {
        let samples = [
            sample(3000.0, 1.0, 50.0, 0.9, 0.0),
            sample(3000.0, 1.0, 50.0, 0.9, -0.5),
        ];
        let (prepared, stats) = prepare_samples(&table(), &samples);
        assert!(prepared.is_empty());
        assert_eq!(stats.invalid_target, 2);
    }

    #[test]
    fn test_out_of_axis_values_clamp_into_edge_cells() {
        let samples = [
            sample(9000.0, 0.1, 10.0, 1.0, 1.0),
            sample(f64::INFINITY, f64::NEG_INFINITY, 10.0, 1.0, 1.0),
        ];
        let (prepared, stats) = prepare_samples(&table(), &samples);
        assert_eq!(stats.incomplete, 0);
        assert_eq!(prepared[0].cell, Cell::new(2, 0));
        assert_eq!(prepared[1].cell, Cell::new(2, 0));
    }
}
