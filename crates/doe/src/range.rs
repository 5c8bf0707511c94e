use crate::errors::{DoeError, Result};
use linfa::Float;
use ndarray::{Array2, ArrayBase, Data, Ix2};

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Margin added to the upper bound of an integer parameter so that truncating
/// samples toward the lower integer still reaches the inclusive upper integer.
pub const INTEGER_UPPER_MARGIN: f64 = 0.999999;

/// A validated definition interval `[lower, upper]` of one component of the design space
/// with `lower <= upper`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct ParameterRange<F: Float> {
    lower: F,
    upper: F,
}

impl<F: Float> ParameterRange<F> {
    /// Constructor from two bounds given in any order
    ///
    /// ```
    /// use hypercube_doe::ParameterRange;
    ///
    /// let range = ParameterRange::new(10., 5.).unwrap();
    /// assert_eq!((range.lower(), range.upper()), (5., 10.));
    /// ```
    pub fn new(a: F, b: F) -> Result<Self> {
        normalize_at(0, &[a, b])
    }

    /// Lower bound
    pub fn lower(&self) -> F {
        self.lower
    }

    /// Upper bound
    pub fn upper(&self) -> F {
        self.upper
    }

    /// Width of one of the `ns` equal-width strata partitioning the range.
    /// Infinite when `upper - lower` overflows, see [ParameterRange::stratum_edge].
    pub fn stratum_width(&self, ns: usize) -> F {
        (self.upper - self.lower) / F::cast(ns)
    }

    /// Lower edge of the `i`th of `ns` equal-width strata, `i == ns` giving the upper bound
    pub fn stratum_edge(&self, i: usize, ns: usize) -> F {
        if i >= ns {
            self.upper
        } else {
            lerp(self.lower, self.upper, F::cast(i) / F::cast(ns))
        }
    }

    /// Whether the range reduces to a single point
    pub fn is_degenerate(&self) -> bool {
        self.lower == self.upper
    }

    /// Whether `value` lies within the range, bounds included
    pub fn contains(&self, value: F) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Point at fraction `t` of `[a, b]`, finite even when `b - a` overflows
pub(crate) fn lerp<F: Float>(a: F, b: F, t: F) -> F {
    let span = b - a;
    if span.is_finite() {
        a + t * span
    } else {
        a * (F::one() - t) + b * t
    }
}

pub(crate) fn normalize_at<F: Float>(index: usize, pair: &[F]) -> Result<ParameterRange<F>> {
    let &[a, b] = pair else {
        return Err(DoeError::InvalidRangeShape {
            index,
            len: pair.len(),
        });
    };
    if !a.is_finite() || !b.is_finite() {
        return Err(DoeError::NonFiniteBound { index });
    }
    let (lower, upper) = if a > b { (b, a) } else { (a, b) };
    Ok(ParameterRange { lower, upper })
}

/// Validates a bound pair and orders it as `(lower, upper)`.
///
/// Inverted bounds are silently swapped, equal bounds give a degenerate range.
///
/// # Errors
///
/// * [DoeError::InvalidRangeShape] if `pair` does not hold exactly two values
/// * [DoeError::NonFiniteBound] if a bound is NaN or infinite
pub fn normalize<F: Float>(pair: &[F]) -> Result<ParameterRange<F>> {
    normalize_at(0, pair)
}

/// Normalizes an ordered sequence of bound pairs, reporting the position of the first faulty one.
pub fn normalize_all<F: Float, P: AsRef<[F]>>(ranges: &[P]) -> Result<Vec<ParameterRange<F>>> {
    ranges
        .iter()
        .enumerate()
        .map(|(i, pair)| normalize_at(i, pair.as_ref()))
        .collect()
}

/// Normalizes the rows of a (nx, 2) matrix \[\[lower bound, upper bound\], ...\]
pub fn normalize_xlimits<F: Float>(
    xlimits: &ArrayBase<impl Data<Elem = F>, Ix2>,
) -> Result<Vec<ParameterRange<F>>> {
    if xlimits.ncols() != 2 {
        return Err(DoeError::InvalidRangeShape {
            index: 0,
            len: xlimits.ncols(),
        });
    }
    xlimits
        .rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| normalize_at(i, &[row[0], row[1]]))
        .collect()
}

/// Builds the (nx, 2) matrix \[\[lower bound, upper bound\], ...\] of the given ranges
pub fn to_xlimits<F: Float>(ranges: &[ParameterRange<F>]) -> Array2<F> {
    let mut xlimits = Array2::zeros((ranges.len(), 2));
    for (mut row, range) in xlimits.rows_mut().into_iter().zip(ranges) {
        row[0] = range.lower;
        row[1] = range.upper;
    }
    xlimits
}

/// Widens the upper bound of an integer parameter by [INTEGER_UPPER_MARGIN].
///
/// Has to be applied to the raw bounds, before normalization.
pub fn widen_integer_upper<F: Float>(lower: F, upper: F) -> [F; 2] {
    [lower, upper + F::cast(INTEGER_UPPER_MARGIN)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    #[test]
    fn test_normalize_keeps_order() {
        let range = normalize(&[0., 1.]).unwrap();
        assert_eq!(range.lower(), 0.);
        assert_eq!(range.upper(), 1.);
    }

    #[test]
    fn test_normalize_swaps_inverted_bounds() {
        let range = normalize(&[10., -2.5]).unwrap();
        assert_eq!((range.lower(), range.upper()), (-2.5, 10.));
    }

    #[test]
    fn test_normalize_degenerate() {
        let range = normalize(&[5., 5.]).unwrap();
        assert!(range.is_degenerate());
        assert_eq!(range.stratum_width(3), 0.);
    }

    #[test]
    fn test_normalize_bad_shape() {
        assert_eq!(
            normalize(&[0., 1., 2.]),
            Err(DoeError::InvalidRangeShape { index: 0, len: 3 })
        );
        assert_eq!(
            normalize::<f64>(&[]),
            Err(DoeError::InvalidRangeShape { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_normalize_non_finite() {
        assert_eq!(
            normalize(&[f64::NAN, 1.]),
            Err(DoeError::NonFiniteBound { index: 0 })
        );
        assert_eq!(
            normalize(&[0., f64::INFINITY]),
            Err(DoeError::NonFiniteBound { index: 0 })
        );
    }

    #[test]
    fn test_normalize_all_reports_index() {
        let ranges = vec![vec![0., 1.], vec![3., 2.], vec![1.]];
        assert_eq!(
            normalize_all(&ranges),
            Err(DoeError::InvalidRangeShape { index: 2, len: 1 })
        );
        let ranges = [[0., 1.], [3., 2.]];
        let normalized = normalize_all(&ranges).unwrap();
        assert_eq!(normalized[1], ParameterRange::new(2., 3.).unwrap());
    }

    #[test]
    fn test_xlimits() {
        let xlimits = array![[5., 10.], [1., 0.]];
        let ranges = normalize_xlimits(&xlimits).unwrap();
        assert_abs_diff_eq!(to_xlimits(&ranges), array![[5., 10.], [0., 1.]]);

        let xlimits = array![[5., 10., 0.]];
        assert_eq!(
            normalize_xlimits(&xlimits),
            Err(DoeError::InvalidRangeShape { index: 0, len: 3 })
        );
    }

    #[test]
    fn test_stratum_edges() {
        let range = ParameterRange::new(2., 8.).unwrap();
        let edges: Vec<f64> = (0..=3).map(|i| range.stratum_edge(i, 3)).collect();
        assert_abs_diff_eq!(Array1::from(edges), array![2., 4., 6., 8.], epsilon = 1e-12);

        let range = ParameterRange::new(5., 5.).unwrap();
        assert!((0..=3).all(|i| range.stratum_edge(i, 3) == 5.));
    }

    #[test]
    fn test_stratum_edges_overflowing_width() {
        let range = ParameterRange::new(-f64::MAX, f64::MAX).unwrap();
        assert!(range.stratum_width(4).is_infinite());
        let edges: Vec<f64> = (0..=4).map(|i| range.stratum_edge(i, 4)).collect();
        assert_eq!(edges[0], -f64::MAX);
        assert_eq!(edges[4], f64::MAX);
        assert!(edges.iter().all(|e| e.is_finite()));
        assert!(edges.windows(2).all(|w| w[0] < w[1]));
        assert_abs_diff_eq!(edges[2], 0.);
        assert_eq!(lerp(-f64::MAX, f64::MAX, 0.5), 0.);
    }

    #[test]
    fn test_widen_integer_upper() {
        let [lower, upper] = widen_integer_upper(1f64, 5.);
        assert_eq!(lower, 1.);
        assert_abs_diff_eq!(upper, 5.999999, epsilon = 1e-12);
        assert_eq!(upper.floor(), 5.);
    }
}
