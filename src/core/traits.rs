//! Core collaborator traits for kryeig.

use crate::error::StatusError;

/// Read-only view of an iterative eigensolver's current Ritz block.
///
/// Ritz values use the packed complex format: a conjugate pair `a ± ib`
/// occupies two adjacent slots holding `a` and `b`, tagged `+1` and `-1`
/// in [`ritz_index`](Eigensolver::ritz_index). Real values are tagged `0`.
pub trait Eigensolver<T> {
    /// Current Ritz values (packed complex format).
    fn ritz_values(&self) -> Vec<T>;
    /// Pair tags for the Ritz values: `0`, `+1` or `-1`.
    fn ritz_index(&self) -> Vec<i32>;
    /// Residual norms measured by the solver's orthogonalization manager.
    fn res_norms(&self) -> Vec<T>;
    /// Residual 2-norms ‖A x − λ x‖₂ of the current block.
    fn res2_norms(&self) -> Vec<T>;
    /// Ritz-residual 2-norms, one per Ritz value.
    fn ritz_res2_norms(&self) -> Vec<T>;
}

/// Significance ordering over a set of (possibly complex) eigenvalues.
pub trait SortManager<T> {
    /// Return a permutation of `0..count`, most significant entry first.
    ///
    /// `re` and `im` hold the real and imaginary parts of the `count`
    /// eigenvalues to be ordered.
    fn sort(
        &self,
        solver: &dyn Eigensolver<T>,
        count: usize,
        re: &[T],
        im: &[T],
    ) -> Result<Vec<usize>, StatusError>;
}
