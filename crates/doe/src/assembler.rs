//! Design of experiments over typed parameter definitions.
//!
//! Only numeric parameters are sampled: [ParameterType::Unsupported] ones (textual, boolean, ...)
//! get no column. As columns are then no longer aligned with the input definitions,
//! the resulting [Experiments] carries the ids of the sampled parameters in column order.
use crate::errors::Result;
use crate::lhs::{Lhs, LhsKind};
use crate::range::{normalize_at, widen_integer_upper, ParameterRange};
use crate::seed::with_seed;
use crate::SamplingMethod;
use log::{debug, info};
use ndarray::{Array2, ArrayView1};
use ndarray_rand::rand::Rng;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Type of a parameter of the experiments
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serializable", serde(rename_all = "lowercase"))]
pub enum ParameterType {
    /// Integer parameter in lower bound ..= upper bound
    Integer,
    /// Continuous parameter in [lower bound, upper bound]
    Continuous,
    /// Parameter which can not be sampled (text, boolean, ...)
    Unsupported,
}

impl ParameterType {
    /// Whether parameters of this type get a column in the design
    pub fn is_samplable(&self) -> bool {
        !matches!(self, ParameterType::Unsupported)
    }
}

/// Definition of a parameter of the experiments
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct ParameterDef<I> {
    /// Caller identifier of the parameter
    pub id: I,
    /// Lower bound
    #[cfg_attr(feature = "serializable", serde(default))]
    pub lower: f64,
    /// Upper bound
    #[cfg_attr(feature = "serializable", serde(default))]
    pub upper: f64,
    /// Parameter type
    #[cfg_attr(feature = "serializable", serde(rename = "type"))]
    pub xtype: ParameterType,
}

impl<I> ParameterDef<I> {
    /// Integer parameter taking values in `lower..=upper`
    pub fn integer(id: I, lower: i32, upper: i32) -> Self {
        ParameterDef {
            id,
            lower: f64::from(lower),
            upper: f64::from(upper),
            xtype: ParameterType::Integer,
        }
    }

    /// Continuous parameter taking values in `[lower, upper]`
    pub fn continuous(id: I, lower: f64, upper: f64) -> Self {
        ParameterDef {
            id,
            lower,
            upper,
            xtype: ParameterType::Continuous,
        }
    }

    /// Parameter excluded from sampling
    pub fn unsupported(id: I) -> Self {
        ParameterDef {
            id,
            lower: 0.,
            upper: 0.,
            xtype: ParameterType::Unsupported,
        }
    }
}

/// Experiments generated by an [Assembler]
#[derive(Clone, Debug, PartialEq)]
pub struct Experiments<I> {
    /// Ids of the sampled parameters, the jth id names the jth column
    ids: Vec<I>,
    /// Types of the sampled parameters in column order
    xtypes: Vec<ParameterType>,
    /// Ids of the parameters excluded from sampling
    dropped: Vec<I>,
    /// (count, ids.len()) matrix, one experiment per row
    doe: Array2<f64>,
}

impl<I> Experiments<I> {
    /// Ids of the sampled parameters in column order
    pub fn ids(&self) -> &[I] {
        &self.ids
    }

    /// Ids of the parameters which were not sampled, in input order
    pub fn dropped(&self) -> &[I] {
        &self.dropped
    }

    /// Matrix of the experiments: one row per experiment, one column per sampled parameter
    pub fn doe(&self) -> &Array2<f64> {
        &self.doe
    }

    /// Number of experiments
    pub fn len(&self) -> usize {
        self.doe.nrows()
    }

    /// Whether there is no experiment
    pub fn is_empty(&self) -> bool {
        self.doe.nrows() == 0
    }

    /// Consumes the experiments returning column ids and matrix
    pub fn into_parts(self) -> (Vec<I>, Array2<f64>) {
        (self.ids, self.doe)
    }

    /// Copy of the experiments where integer parameter values are truncated to
    /// the lower integer, continuous ones being left untouched.
    pub fn discretized(&self) -> Array2<f64> {
        let mut doe = self.doe.clone();
        for (mut col, xtype) in doe.columns_mut().into_iter().zip(&self.xtypes) {
            if *xtype == ParameterType::Integer {
                col.mapv_inplace(f64::floor);
            }
        }
        doe
    }
}

impl<I: PartialEq> Experiments<I> {
    /// Values of the parameter `id` across experiments, `None` if `id` was not sampled
    pub fn column(&self, id: &I) -> Option<ArrayView1<'_, f64>> {
        self.ids
            .iter()
            .position(|i| i == id)
            .map(|j| self.doe.column(j))
    }
}

/// Builder of Latin Hypercube experiments over typed parameter definitions
#[derive(Clone, Debug, Default)]
pub struct Assembler {
    kind: LhsKind,
    seed: Option<u64>,
}

impl Assembler {
    /// Constructor of a classic LHS assembler without seed
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the kind of LHS
    pub fn kind(mut self, kind: LhsKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the seed for reproducible experiments
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Generates `count` experiments over the numeric parameters of `defs`.
    ///
    /// Integer upper bounds are widened by [crate::INTEGER_UPPER_MARGIN] so that truncated
    /// values cover the whole integer range.
    ///
    /// # Errors
    ///
    /// * [crate::DoeError::NonFiniteBound] when a numeric parameter has a NaN or infinite bound
    /// * [crate::DoeError::InvalidStratificationCount] when `count` is 0
    pub fn assemble<I: Clone>(
        &self,
        count: usize,
        defs: &[ParameterDef<I>],
    ) -> Result<Experiments<I>> {
        with_seed(self.seed, |rng| self.assemble_using(count, defs, rng))
    }

    /// Same as [Assembler::assemble] with randomness drawn from `rng`, the seed being ignored.
    pub fn assemble_using<I: Clone, R: Rng>(
        &self,
        count: usize,
        defs: &[ParameterDef<I>],
        rng: &mut R,
    ) -> Result<Experiments<I>> {
        let mut ids = Vec::with_capacity(defs.len());
        let mut xtypes = Vec::with_capacity(defs.len());
        let mut dropped = vec![];
        let mut ranges: Vec<ParameterRange<f64>> = Vec::with_capacity(defs.len());
        for (i, def) in defs.iter().enumerate() {
            let pair = match def.xtype {
                ParameterType::Integer => widen_integer_upper(def.lower, def.upper),
                ParameterType::Continuous => [def.lower, def.upper],
                ParameterType::Unsupported => {
                    debug!("Parameter #{i} not sampled: unsupported type");
                    dropped.push(def.id.clone());
                    continue;
                }
            };
            ranges.push(normalize_at(i, &pair)?);
            ids.push(def.id.clone());
            xtypes.push(def.xtype);
        }

        let doe = Lhs::from_ranges(ranges)
            .kind(self.kind)
            .sample_using(count, rng)?;
        info!(
            "Assembled {} experiment(s) over {} parameter(s) ({} not sampled)",
            doe.nrows(),
            ids.len(),
            dropped.len()
        );
        Ok(Experiments {
            ids,
            xtypes,
            dropped,
            doe,
        })
    }
}

/// Generates `count` classic LHS experiments over the numeric parameters of `defs`,
/// see [Assembler::assemble].
pub fn assemble<I: Clone>(count: usize, defs: &[ParameterDef<I>]) -> Result<Experiments<I>> {
    Assembler::new().assemble(count, defs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DoeError;
    use crate::lhs::generate;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_unsupported_filtering() {
        let defs = vec![
            ParameterDef::continuous(1, 0., 1.),
            ParameterDef::unsupported(2),
        ];
        let xps = assemble(10, &defs).unwrap();
        assert_eq!(xps.doe().shape(), &[10, 1]);
        assert_eq!(xps.ids(), &[1]);
        assert_eq!(xps.dropped(), &[2]);
        assert!(xps.column(&1).is_some());
        assert!(xps.column(&2).is_none());
    }

    #[test]
    fn test_columns_follow_retained_order() {
        let defs = vec![
            ParameterDef::unsupported("name"),
            ParameterDef::continuous("temperature", 300., 350.),
            ParameterDef::unsupported("enabled"),
            ParameterDef::integer("replicas", 1, 3),
        ];
        let xps = Assembler::new().seed(Some(42)).assemble(9, &defs).unwrap();
        assert_eq!(xps.ids(), &["temperature", "replicas"]);
        assert_eq!(xps.dropped(), &["name", "enabled"]);
        assert_eq!(xps.len(), 9);

        let temperature = xps.column(&"temperature").unwrap();
        assert!(temperature.iter().all(|&t| (300. ..=350.).contains(&t)));
        let replicas = xps.column(&"replicas").unwrap();
        assert!(replicas.iter().all(|&r| (1. ..4.).contains(&r)));
    }

    #[test]
    fn test_integer_widening_uniform() {
        let defs = vec![ParameterDef::integer(0, 1, 5)];
        let xps = Assembler::new().seed(Some(42)).assemble(1000, &defs).unwrap();
        let levels = xps.discretized();

        let mut counts = [0usize; 5];
        for &v in levels.column(0) {
            assert!((1. ..=5.).contains(&v), "{v} out of integer range");
            counts[v as usize - 1] += 1;
        }
        for count in counts {
            assert!((190..=210).contains(&count), "{counts:?} not uniform");
        }
    }

    #[test]
    fn test_integer_extreme_bounds() {
        let def = ParameterDef::integer("n", i32::MIN, i32::MAX);
        assert_eq!(def.lower as i64, i32::MIN as i64);
        assert_eq!(def.upper as i64, i32::MAX as i64);

        let xps = Assembler::new().seed(Some(5)).assemble(50, &[def]).unwrap();
        let levels = xps.discretized();
        assert!(levels
            .column(0)
            .iter()
            .all(|&v| (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&v)));
    }

    #[test]
    fn test_discretized_keeps_continuous() {
        let defs = vec![
            ParameterDef::continuous("x", 0., 1.),
            ParameterDef::integer("n", -2, 2),
        ];
        let xps = Assembler::new().seed(Some(3)).assemble(20, &defs).unwrap();
        let levels = xps.discretized();
        assert_abs_diff_eq!(levels.column(0), xps.doe().column(0));
        assert!(levels.column(1).iter().all(|v| v.fract() == 0.));
        assert!(levels.column(1).iter().all(|&v| (-2. ..=2.).contains(&v)));
    }

    #[test]
    fn test_continuous_matches_generate() {
        let defs = vec![
            ParameterDef::continuous(10, 5., 10.),
            ParameterDef::continuous(11, 1., 0.),
        ];
        let xps = Assembler::new().seed(Some(42)).assemble(8, &defs).unwrap();
        let doe = generate(&[[5., 10.], [1., 0.]], 8, Some(42)).unwrap();
        assert_eq!(xps.doe(), &doe);
    }

    #[test]
    fn test_assemble_reproducible() {
        let defs = vec![
            ParameterDef::continuous(0, -1., 1.),
            ParameterDef::integer(1, 0, 10),
        ];
        let assembler = Assembler::new().seed(Some(7));
        assert_eq!(
            assembler.assemble(12, &defs).unwrap(),
            assembler.assemble(12, &defs).unwrap()
        );
    }

    #[test]
    fn test_assemble_errors() {
        let defs = vec![
            ParameterDef::unsupported(0),
            ParameterDef::continuous(1, f64::NAN, 1.),
        ];
        assert_eq!(
            assemble(5, &defs),
            Err(DoeError::NonFiniteBound { index: 1 })
        );

        let defs = vec![ParameterDef::continuous(1, 0., 1.)];
        assert_eq!(
            assemble(0, &defs),
            Err(DoeError::InvalidStratificationCount(0))
        );
    }

    #[test]
    fn test_assemble_only_unsupported() {
        let defs = vec![ParameterDef::unsupported(0), ParameterDef::unsupported(1)];
        let xps = assemble(4, &defs).unwrap();
        assert_eq!(xps.doe().shape(), &[4, 0]);
        assert!(xps.ids().is_empty());
        assert_eq!(xps.dropped(), &[0, 1]);
    }
}
