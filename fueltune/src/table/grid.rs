//! Fixed-shape 2-D table storage.

/// A row-major matrix of calibration values.
///
/// The shape is fixed at construction; updates produce a cloned grid rather
/// than resizing one.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl Grid {
    /// Build a grid from nested rows.
    ///
    /// Returns `None` if the rows are ragged or empty.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let cols = rows.first().map(Vec::len)?;
        if cols == 0 || rows.iter().any(|r| r.len() != cols) {
            return None;
        }

        Some(Self {
            rows: rows.len(),
            cols,
            values: rows.iter().flatten().copied().collect(),
        })
    }

    /// Number of rows (RPM breakpoints for `fuel_base`).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (load breakpoints for `fuel_base`).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `(row, col)` lies inside the grid.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Value at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.contains(row, col)
            .then(|| self.values[row * self.cols + col])
    }

    /// Overwrite the value at `(row, col)`.
    ///
    /// Returns `false` and leaves the grid unchanged outside its bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> bool {
        if !self.contains(row, col) {
            return false;
        }
        self.values[row * self.cols + col] = value;
        true
    }

    /// Iterate over rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::from_rows(&[vec![10.0, 12.0], vec![14.0, 16.0], vec![18.0, 20.0]]).unwrap()
    }

    #[test]
    fn test_shape_and_lookup() {
        let g = grid();
        assert_eq!((g.rows(), g.cols()), (3, 2));
        assert_eq!(g.get(1, 1), Some(16.0));
        assert_eq!(g.get(2, 0), Some(18.0));
        assert_eq!(g.get(3, 0), None);
        assert_eq!(g.get(0, 2), None);
    }

    #[test]
    fn test_set_in_and_out_of_bounds() {
        let mut g = grid();
        assert!(g.set(0, 1, 12.5));
        assert_eq!(g.get(0, 1), Some(12.5));
        assert!(!g.set(5, 0, 1.0));
        assert_eq!(g, {
            let mut expected = grid();
            expected.set(0, 1, 12.5);
            expected
        });
    }

    #[test]
    fn test_rejects_ragged_and_empty() {
        assert!(Grid::from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_none());
        assert!(Grid::from_rows(&[]).is_none());
        assert!(Grid::from_rows(&[vec![]]).is_none());
    }
}
