//! Breakpoint axis lookup.
//!
//! A breakpoint axis `[a0, a1, ..., an]` divides a measured quantity into
//! cells. Cell `i` covers `a[i] <= v < a[i+1]`; the last cell is closed at
//! the top, so `v == an` belongs to cell `n`. A value exactly on a
//! breakpoint belongs to the cell starting at that breakpoint.

/// Resolve `value` to the index of the cell that contains it.
///
/// Out-of-range values resolve to the first or last cell when `clamp` is
/// set and to `None` otherwise. NaN and empty axes never resolve.
///
/// # Examples
///
/// ```
/// use fueltune::table::axis_index;
///
/// let axis = [1000.0, 3000.0, 5000.0];
/// assert_eq!(axis_index(3200.0, &axis, true), Some(1));
/// assert_eq!(axis_index(3000.0, &axis, true), Some(1));
/// assert_eq!(axis_index(500.0, &axis, true), Some(0));
/// assert_eq!(axis_index(500.0, &axis, false), None);
/// ```
pub fn axis_index(value: f64, axis: &[f64], clamp: bool) -> Option<usize> {
    let (first, last) = match (axis.first(), axis.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return None,
    };

    if value.is_nan() {
        return None;
    }
    if value < first {
        return clamp.then_some(0);
    }
    if value > last {
        return clamp.then_some(axis.len() - 1);
    }

    // Number of breakpoints <= value, i.e. a right-biased search.
    let upper = axis.partition_point(|&b| b <= value);
    Some(upper.saturating_sub(1).min(axis.len() - 1))
}

/// Position of the first breakpoint that is not greater than its predecessor.
pub(crate) fn first_non_ascending(axis: &[f64]) -> Option<usize> {
    axis.windows(2).position(|w| w[1] <= w[0]).map(|i| i + 1)
}
