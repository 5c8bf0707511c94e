use crate::errors::{DoeError, Result};
use crate::range::{lerp, normalize_all, normalize_xlimits, to_xlimits, ParameterRange};
use crate::SamplingMethod;
use linfa::Float;
use log::debug;
use ndarray::{Array2, ArrayBase, Data, Ix2};
use ndarray_rand::{
    rand::seq::SliceRandom,
    rand::Rng,
    rand_distr::{Distribution, Uniform},
};

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Kinds of Latin Hypercube Design
#[derive(Clone, Debug, Default, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serializable", serde(rename_all = "lowercase"))]
pub enum LhsKind {
    /// sample is chosen randomly within its latin hypercube intervals
    #[default]
    Classic,
    /// sample is the middle of its latin hypercube intervals
    Centered,
}

/// The LHS design is built as follows: each dimension space is divided into ns sections
/// where ns is the number of sampling points, and one point in selected in each section.
/// Sections are assigned to samples through a random permutation drawn independently
/// for each dimension. The selection method within a section gives different kind of LHS
/// (see [LhsKind])
#[derive(Clone, Debug)]
pub struct Lhs<F: Float> {
    /// Validated ranges, one per component of x
    ranges: Vec<ParameterRange<F>>,
    /// Sampling space definition as a (nx, 2) matrix
    /// The ith row is the [lower_bound, upper_bound] of xi, the ith component of x
    xlimits: Array2<F>,
    /// The requested kind of LHS
    kind: LhsKind,
    /// Seed of the generator created by [Lhs::sample], `None` for non reproducible designs
    seed: Option<u64>,
}

impl<F: Float> Lhs<F> {
    /// Constructor given a design space given a (nx, 2) matrix \[\[lower bound, upper bound\], ...\]
    ///
    /// Inverted bounds are swapped.
    ///
    /// ```
    /// use hypercube_doe::Lhs;
    /// use ndarray::arr2;
    ///
    /// let doe = Lhs::new(&arr2(&[[0.0, 1.0], [5.0, 10.0]])).unwrap();
    /// ```
    pub fn new(xlimits: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<Self> {
        Ok(Self::from_ranges(normalize_xlimits(xlimits)?))
    }

    /// Constructor given an ordered sequence of bound pairs
    ///
    /// ```
    /// use hypercube_doe::Lhs;
    ///
    /// let doe = Lhs::from_pairs(&[[0.0, 1.0], [10.0, 5.0]]).unwrap();
    /// ```
    pub fn from_pairs<P: AsRef<[F]>>(ranges: &[P]) -> Result<Self> {
        Ok(Self::from_ranges(normalize_all(ranges)?))
    }

    /// Constructor given already normalized ranges
    pub fn from_ranges(ranges: Vec<ParameterRange<F>>) -> Self {
        Lhs {
            xlimits: to_xlimits(&ranges),
            ranges,
            kind: LhsKind::default(),
            seed: None,
        }
    }

    /// Sets the kind of LHS
    pub fn kind(mut self, kind: LhsKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the seed used by [Lhs::sample]
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Normalized ranges of the design space
    pub fn ranges(&self) -> &[ParameterRange<F>] {
        &self.ranges
    }

    /// Generates `ns` samples, reproducible when a seed is set.
    ///
    /// # Errors
    ///
    /// [DoeError::InvalidStratificationCount] when `ns` is 0.
    pub fn sample(&self, ns: usize) -> Result<Array2<F>> {
        self.sample_with_seed(ns, self.seed)
    }

    fn classic_lhs<R: Rng>(&self, ns: usize, rng: &mut R) -> Array2<F> {
        let unit = Uniform::<f64>::new(0., 1.);
        let mut lhs = Array2::zeros((ns, self.ranges.len()));
        for (mut col, range) in lhs.columns_mut().into_iter().zip(&self.ranges) {
            let mut cells = strata(range, ns);
            cells.shuffle(rng);
            for (k, (a, b)) in cells.into_iter().enumerate() {
                col[k] = lerp(a, b, F::cast(unit.sample(rng)));
            }
        }
        lhs
    }

    fn centered_lhs<R: Rng>(&self, ns: usize, rng: &mut R) -> Array2<F> {
        let half = F::cast(0.5);
        let mut lhs = Array2::zeros((ns, self.ranges.len()));
        for (mut col, range) in lhs.columns_mut().into_iter().zip(&self.ranges) {
            let mut cells = strata(range, ns);
            cells.shuffle(rng);
            for (k, (a, b)) in cells.into_iter().enumerate() {
                col[k] = lerp(a, b, half);
            }
        }
        lhs
    }
}

impl<F: Float> SamplingMethod<F> for Lhs<F> {
    fn sampling_space(&self) -> &Array2<F> {
        &self.xlimits
    }

    fn sample_using<R: Rng>(&self, ns: usize, rng: &mut R) -> Result<Array2<F>> {
        if ns < 1 {
            return Err(DoeError::InvalidStratificationCount(ns));
        }
        debug!(
            "{:?} LHS of {} point(s) in {} dimension(s)",
            self.kind,
            ns,
            self.ranges.len()
        );
        let lhs = match self.kind {
            LhsKind::Classic => self.classic_lhs(ns, rng),
            LhsKind::Centered => self.centered_lhs(ns, rng),
        };
        Ok(lhs)
    }
}

/// Partitions `range` into `ns` contiguous equal-width strata in ascending order.
/// The last stratum ends exactly on the upper bound.
fn strata<F: Float>(range: &ParameterRange<F>, ns: usize) -> Vec<(F, F)> {
    (0..ns)
        .map(|i| (range.stratum_edge(i, ns), range.stratum_edge(i + 1, ns)))
        .collect()
}

/// Generates a classic Latin Hypercube design of `stratifications` samples over `ranges`.
///
/// `ranges` is an ordered sequence of (lower, upper) pairs, the jth column of the result
/// samples the jth range. With `Some(seed)` the result is reproducible.
///
/// ```
/// use hypercube_doe::generate;
///
/// let doe = generate(&[[5., 10.], [0., 1.]], 4, Some(42)).unwrap();
/// assert_eq!(doe.shape(), &[4, 2]);
/// ```
///
/// # Errors
///
/// * [DoeError::InvalidRangeShape] when a range does not hold exactly two bounds
/// * [DoeError::NonFiniteBound] when a bound is NaN or infinite
/// * [DoeError::InvalidStratificationCount] when `stratifications` is 0
pub fn generate<F: Float, P: AsRef<[F]>>(
    ranges: &[P],
    stratifications: usize,
    seed: Option<u64>,
) -> Result<Array2<F>> {
    Lhs::from_pairs(ranges)?.seed(seed).sample(stratifications)
}
