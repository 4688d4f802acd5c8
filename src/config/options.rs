//! Command-line or API options for the ordered residual-norm status test.
//!
//! This module provides the `OrderedResNormOptions` struct, which is used to
//! specify the tolerance, the residual norm, the quorum and relative scaling
//! of an [`OrderedResNormTest`](crate::status::OrderedResNormTest). `ResType`
//! and `Quorum` parse from strings so parameter lists can feed them directly.

use crate::error::StatusError;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Which residual norm the status test reads from the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResType {
    /// Norm from the solver's orthogonalization manager.
    #[default]
    Orth,
    /// Direct 2-norm of the residual vector.
    TwoNorm,
    /// 2-norm of the Ritz residual.
    RitzRes2Norm,
}

impl fmt::Display for ResType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResType::Orth => "RES_ORTH",
            ResType::TwoNorm => "RES_2NORM",
            ResType::RitzRes2Norm => "RITZRES_2NORM",
        };
        f.write_str(s)
    }
}

impl FromStr for ResType {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orth" | "res_orth" => Ok(ResType::Orth),
            "2norm" | "res_2norm" => Ok(ResType::TwoNorm),
            "ritzres2norm" | "ritzres_2norm" => Ok(ResType::RitzRes2Norm),
            other => Err(StatusError::InvalidOption(format!("unknown residual norm '{other}'"))),
        }
    }
}

/// Number of most significant eigenpairs that must converge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quorum {
    /// Every merged eigenpair must converge.
    #[default]
    All,
    /// At least this many of the most significant eigenpairs.
    AtLeast(NonZeroUsize),
}

impl Quorum {
    /// Quorum of `k` eigenpairs; `k` must be at least 1.
    pub fn at_least(k: usize) -> Result<Self, StatusError> {
        NonZeroUsize::new(k).map(Quorum::AtLeast).ok_or(StatusError::InvalidQuorum(k))
    }

    /// Number of passing entries required out of `num` candidates.
    pub fn needed(self, num: usize) -> usize {
        match self {
            Quorum::All => num,
            Quorum::AtLeast(k) => k.get(),
        }
    }
}

impl fmt::Display for Quorum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quorum::All => f.write_str("all"),
            Quorum::AtLeast(k) => write!(f, "{k}"),
        }
    }
}

impl FromStr for Quorum {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s == "-1" {
            return Ok(Quorum::All);
        }
        let k: usize = s
            .parse()
            .map_err(|_| StatusError::InvalidOption(format!("invalid quorum '{s}'")))?;
        Quorum::at_least(k)
    }
}

/// Status test parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderedResNormOptions<T> {
    /// Convergence tolerance (strictly positive)
    pub tol: T,
    /// Number of significant eigenpairs required to pass
    pub quorum: Quorum,
    /// Residual norm read from the solver
    pub which_norm: ResType,
    /// Scale residuals by the magnitude of their Ritz value
    pub scaled: bool,
}

impl<T> OrderedResNormOptions<T> {
    pub fn new(tol: T) -> Self {
        Self { tol, quorum: Quorum::All, which_norm: ResType::Orth, scaled: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_res_types() {
        assert_eq!("orth".parse::<ResType>().unwrap(), ResType::Orth);
        assert_eq!("RES_2NORM".parse::<ResType>().unwrap(), ResType::TwoNorm);
        assert_eq!(" ritzres2norm ".parse::<ResType>().unwrap(), ResType::RitzRes2Norm);
        assert!(matches!("frobenius".parse::<ResType>(), Err(StatusError::InvalidOption(_))));
    }

    #[test]
    fn parses_quorum() {
        assert_eq!("all".parse::<Quorum>().unwrap(), Quorum::All);
        assert_eq!("-1".parse::<Quorum>().unwrap(), Quorum::All);
        assert_eq!("4".parse::<Quorum>().unwrap(), Quorum::at_least(4).unwrap());
        assert_eq!("0".parse::<Quorum>().unwrap_err(), StatusError::InvalidQuorum(0));
        assert!(matches!("many".parse::<Quorum>(), Err(StatusError::InvalidOption(_))));
    }

    #[test]
    fn quorum_need() {
        assert_eq!(Quorum::All.needed(7), 7);
        assert_eq!(Quorum::at_least(3).unwrap().needed(7), 3);
        assert_eq!(Quorum::at_least(9).unwrap().needed(7), 9);
    }

    #[test]
    fn defaults_match_classic_behaviour() {
        let opts = OrderedResNormOptions::new(1e-8);
        assert_eq!(opts.quorum, Quorum::All);
        assert_eq!(opts.which_norm, ResType::Orth);
        assert!(opts.scaled);
        assert_eq!(ResType::default().to_string(), "RES_ORTH");
    }
}
