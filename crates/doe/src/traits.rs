use crate::errors::Result;
use crate::seed::{with_seed, SeedScope};
use linfa::Float;
use ndarray::Array2;
use ndarray_rand::rand::{Rng, SeedableRng};

/// Sampling method allowing to generate a DoE in a given sample space
///
/// A sampling method is able to generate a set of `ns` samples in a given sample space.
/// where the sample space is defined by `[lower_bound_xi, upper_bound_xi]^nx`
/// within `R^nx` where `nx` is the dimension of the sample space: x = (x_i) with i in [1, nx].
pub trait SamplingMethod<F: Float> {
    /// Returns the bounds of the sample space
    ///
    /// # Returns
    ///
    /// * A (nx, 2) matrix where the ith row is the interval of the ith components of a sample.
    fn sampling_space(&self) -> &Array2<F>;

    /// Generates a (ns, nx)-shaped array of samples belonging to `[lower_bound_xi, upper_bound_xi]^nx`
    /// drawing randomness from `rng` only.
    fn sample_using<R: Rng>(&self, ns: usize, rng: &mut R) -> Result<Array2<F>>;

    /// Generates a (ns, nx)-shaped array of samples with a generator owned by this call,
    /// seeded with `seed` if any.
    fn sample_with_seed(&self, ns: usize, seed: Option<u64>) -> Result<Array2<F>> {
        with_seed(seed, |rng| self.sample_using(ns, rng))
    }

    /// Generates a (ns, nx)-shaped array of samples with the caller generator `rng`
    /// reseeded with `seed` if any. `rng` is left in the state it had before the call,
    /// whether sampling succeeds or not.
    fn sample_scoped<R: Rng + SeedableRng + Clone>(
        &self,
        ns: usize,
        rng: &mut R,
        seed: Option<u64>,
    ) -> Result<Array2<F>> {
        let mut scope = SeedScope::new(rng, seed);
        self.sample_using(ns, &mut *scope)
    }
}
