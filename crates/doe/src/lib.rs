/*!
This library implements [Latin Hypercube sampling](https://en.wikipedia.org/wiki/Latin_hypercube_sampling)
to build Designs of Experiments (DoE) driving simulations or physical experiments.

A DoE is generated within a design (or sample) space given as an ordered sequence of
`[lower bound, upper bound]` pairs, one per component of the samples `x`. Each component
range is divided into as many equal-width strata as requested samples and every stratum
is sampled exactly once, strata being assigned to samples by an independent random
permutation per component.

Randomness is never shared between calls: a generation either owns a generator seeded
from an optional seed or draws from a generator handed over by the caller.

Example:
```
use hypercube_doe::{generate, Assembler, Lhs, LhsKind, ParameterDef};

// Design space is defined as [5., 10.] x [0., 1.], samples are 2-dimensional.
// We generate five reproducible samples using classic Latin Hypercube sampling.
let samples = generate(&[[5., 10.], [0., 1.]], 5, Some(42)).unwrap();
// or else using centered Latin Hypercube sampling
let samples = Lhs::from_pairs(&[[5., 10.], [0., 1.]])
    .unwrap()
    .kind(LhsKind::Centered)
    .sample(5)
    .unwrap();

// Typed parameters: text or boolean parameters are left out of the design
let defs = vec![
    ParameterDef::continuous("pressure", 1., 2.5),
    ParameterDef::unsupported("label"),
    ParameterDef::integer("stages", 1, 4),
];
let experiments = Assembler::new().seed(Some(42)).assemble(10, &defs).unwrap();
assert_eq!(experiments.ids(), &["pressure", "stages"]);
```
*/
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod assembler;
mod errors;
mod lhs;
mod range;
mod seed;
mod traits;

pub use assembler::*;
pub use errors::*;
pub use lhs::*;
pub use range::*;
pub use seed::*;
pub use traits::*;
