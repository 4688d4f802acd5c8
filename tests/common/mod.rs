//! Sort managers shared by the integration tests, the benchmark and the demo.

#![allow(dead_code)]

use kryeig::core::traits::{Eigensolver, SortManager};
use kryeig::error::StatusError;
use kryeig::utils::lapy2;
use std::cell::RefCell;

/// Keeps the given order.
pub struct IdentitySort;

impl SortManager<f64> for IdentitySort {
    fn sort(&self, _: &dyn Eigensolver<f64>, count: usize, _: &[f64], _: &[f64]) -> Result<Vec<usize>, StatusError> {
        Ok((0..count).collect())
    }
}

/// Returns a preset permutation.
pub struct FixedOrder(pub Vec<usize>);

impl SortManager<f64> for FixedOrder {
    fn sort(&self, _: &dyn Eigensolver<f64>, _: usize, _: &[f64], _: &[f64]) -> Result<Vec<usize>, StatusError> {
        Ok(self.0.clone())
    }
}

/// Largest magnitude first; ties keep their original order.
pub struct LargestMagnitude;

impl SortManager<f64> for LargestMagnitude {
    fn sort(&self, _: &dyn Eigensolver<f64>, count: usize, re: &[f64], im: &[f64]) -> Result<Vec<usize>, StatusError> {
        let mut perm: Vec<usize> = (0..count).collect();
        perm.sort_by(|&i, &j| lapy2(re[j], im[j]).total_cmp(&lapy2(re[i], im[i])));
        Ok(perm)
    }
}

/// Identity order that records the eigenvalues it was asked to sort.
#[derive(Default)]
pub struct RecordingSort {
    pub seen: RefCell<Vec<(f64, f64)>>,
}

impl SortManager<f64> for RecordingSort {
    fn sort(&self, _: &dyn Eigensolver<f64>, count: usize, re: &[f64], im: &[f64]) -> Result<Vec<usize>, StatusError> {
        *self.seen.borrow_mut() = re.iter().copied().zip(im.iter().copied()).collect();
        Ok((0..count).collect())
    }
}
