//! Dense Ritz block over a `faer` operator.
//!
//! `DenseRitzBlock` pairs an operator `A` with a set of packed Ritz values
//! and Ritz vectors and reports their true residual norms. It stands in for
//! a real eigensolver when exercising status tests.
//!
//! Ritz vectors are packed like the values: for a conjugate pair
//! `λ = a ± ib` at columns `i, i+1`, column `i` holds the real part `u` and
//! column `i+1` the imaginary part `v` of the eigenvector `u + iv`. Both
//! halves share the residual
//!
//! ```text
//! ‖(A − λ)(u + iv)‖₂ = sqrt(‖A u − a u + b v‖² + ‖A v − a v − b u‖²)
//! ```
//!
//! Only the first `block_size` pairs count as the solver's current block for
//! [`res_norms`](Eigensolver::res_norms) and [`res2_norms`](Eigensolver::res2_norms);
//! [`ritz_res2_norms`](Eigensolver::ritz_res2_norms) covers every Ritz value.
//! The inner product is Euclidean, so the orthogonal norm equals the 2-norm.

use crate::core::pairs::{PairTag, parse_pair_tags};
use crate::core::traits::Eigensolver;
use crate::error::StatusError;
use faer::Mat;
use num_traits::Float;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

pub struct DenseRitzBlock<T> {
    a: Mat<T>,
    values: Vec<T>,
    index: Vec<i32>,
    vectors: Mat<T>,
    block_size: usize,
    norms: Vec<T>,
}

/// y = A · x[:, col]
fn apply_column<T: Float>(a: &Mat<T>, x: &Mat<T>, col: usize) -> Vec<T> {
    (0..a.nrows())
        .map(|i| (0..a.ncols()).fold(T::zero(), |acc, k| acc + a[(i, k)] * x[(k, col)]))
        .collect()
}

fn residual_norm<T: Float>(a: &Mat<T>, x: &Mat<T>, values: &[T], tags: &[PairTag], j: usize) -> T {
    let n = a.nrows();
    match tags[j] {
        PairTag::Real => {
            let lambda = values[j];
            let ax = apply_column(a, x, j);
            (0..n)
                .map(|k| {
                    let r = ax[k] - lambda * x[(k, j)];
                    r * r
                })
                .fold(T::zero(), |acc, v| acc + v)
                .sqrt()
        }
        PairTag::Primary | PairTag::Secondary => {
            let p = if tags[j] == PairTag::Primary { j } else { j - 1 };
            let (re, im) = (values[p], values[p + 1]);
            let au = apply_column(a, x, p);
            let av = apply_column(a, x, p + 1);
            (0..n)
                .map(|k| {
                    let (u, v) = (x[(k, p)], x[(k, p + 1)]);
                    let rr = au[k] - re * u + im * v;
                    let ri = av[k] - re * v - im * u;
                    rr * rr + ri * ri
                })
                .fold(T::zero(), |acc, v| acc + v)
                .sqrt()
        }
    }
}

impl<T: Float + Send + Sync> DenseRitzBlock<T> {
    /// Build the block and compute residual norms for every Ritz pair.
    ///
    /// # Arguments
    /// * `a` - Square operator
    /// * `values` - Packed Ritz values
    /// * `index` - Pair tags, one per value
    /// * `vectors` - Packed Ritz vectors, one column per value
    /// * `block_size` - Number of leading pairs that form the current block
    ///
    /// # Errors
    /// `SizeMismatch` for inconsistent shapes, `InvalidRitzIndex` for bad or
    /// unmatched tags or a block boundary that splits a conjugate pair.
    pub fn new(a: Mat<T>, values: Vec<T>, index: Vec<i32>, vectors: Mat<T>, block_size: usize) -> Result<Self, StatusError> {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(StatusError::SizeMismatch { what: "operator columns", expected: n, found: a.ncols() });
        }
        if vectors.nrows() != n {
            return Err(StatusError::SizeMismatch { what: "ritz vector rows", expected: n, found: vectors.nrows() });
        }
        let k = values.len();
        if vectors.ncols() != k {
            return Err(StatusError::SizeMismatch { what: "ritz vectors", expected: k, found: vectors.ncols() });
        }
        if index.len() != k {
            return Err(StatusError::SizeMismatch { what: "ritz index", expected: k, found: index.len() });
        }
        if block_size > k {
            return Err(StatusError::SizeMismatch { what: "ritz values", expected: block_size, found: k });
        }
        let tags = parse_pair_tags(&index)?;
        if block_size > 0 && tags[block_size - 1] == PairTag::Primary {
            return Err(StatusError::InvalidRitzIndex { position: block_size - 1, tag: 1 });
        }

        #[cfg(feature = "rayon")]
        let norms: Vec<T> = (0..k)
            .into_par_iter()
            .map(|j| residual_norm(&a, &vectors, &values, &tags, j))
            .collect();
        #[cfg(not(feature = "rayon"))]
        let norms: Vec<T> = (0..k).map(|j| residual_norm(&a, &vectors, &values, &tags, j)).collect();

        log::debug!("dense ritz block: n = {n}, {k} ritz values, block size {block_size}");
        Ok(Self { a, values, index, vectors, block_size, norms })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn operator(&self) -> &Mat<T> {
        &self.a
    }

    pub fn ritz_vectors(&self) -> &Mat<T> {
        &self.vectors
    }
}

impl<T: Float> Eigensolver<T> for DenseRitzBlock<T> {
    fn ritz_values(&self) -> Vec<T> {
        self.values.clone()
    }
    fn ritz_index(&self) -> Vec<i32> {
        self.index.clone()
    }
    fn res_norms(&self) -> Vec<T> {
        self.norms[..self.block_size].to_vec()
    }
    fn res2_norms(&self) -> Vec<T> {
        self.norms[..self.block_size].to_vec()
    }
    fn ritz_res2_norms(&self) -> Vec<T> {
        self.norms.clone()
    }
}
