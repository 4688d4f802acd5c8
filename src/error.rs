use thiserror::Error;

// Unified error type for kryeig status tests

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatusError {
    #[error("test tolerance must be strictly positive (got {0})")]
    InvalidTolerance(f64),
    #[error("quorum must be at least 1 (got {0})")]
    InvalidQuorum(usize),
    #[error("no SortManager was supplied")]
    MissingSorter,
    #[error("auxiliary values: {real} real parts but {imag} imaginary parts")]
    AuxLengthMismatch { real: usize, imag: usize },
    #[error("invalid option: {0}")]
    InvalidOption(String),
    #[error("invalid index {tag} returned from ritz_index() at position {position}")]
    InvalidRitzIndex { position: usize, tag: i32 },
    #[error("{what}: expected at least {expected} entries, found {found}")]
    SizeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("sort manager returned an invalid permutation: {0}")]
    InvalidPermutation(String),
    #[error("residual norm at sorted position {position} is nan or inf")]
    NanOrInfResidual { position: usize },
}
