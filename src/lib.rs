//! kryeig: ordered residual-norm status tests for Krylov eigensolvers
//!
//! This crate decides whether an iterative eigensolver has converged the
//! *most significant* eigenpairs, with significance defined by a pluggable
//! sort manager. Complex-conjugate Ritz pairs in packed real format,
//! auxiliary (previously deflated) eigenvalues, relative scaling and quorum
//! rules are all supported.

pub mod config;
pub mod core;
pub mod error;
pub mod solver;
pub mod status;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use self::core::*;
pub use error::*;
pub use solver::*;
pub use status::*;
pub use utils::*;
