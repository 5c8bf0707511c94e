use thiserror::Error;

/// A result type for design of experiments generation
pub type Result<T> = std::result::Result<T, DoeError>;

/// An error raised while building a design of experiments
///
/// Every error is raised before any sample is drawn: either a complete design
/// is returned or none at all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DoeError {
    /// When a range entry does not hold exactly two bounds
    #[error("Invalid range shape: range #{index} has {len} bound(s), expected 2 (lower, upper)")]
    InvalidRangeShape {
        /// position of the faulty range in the input sequence
        index: usize,
        /// number of bounds found
        len: usize,
    },
    /// When the requested number of strata (i.e. samples) is less than 1
    #[error("Invalid stratification count: {0}, expected at least 1")]
    InvalidStratificationCount(usize),
    /// When a bound is NaN or infinite
    #[error("Non finite bound in range #{index}")]
    NonFiniteBound {
        /// position of the faulty range in the input sequence
        index: usize,
    },
}
