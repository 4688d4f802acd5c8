//! Plain-data eigensolver snapshot.

use crate::core::traits::Eigensolver;

/// Frozen Ritz block with explicitly supplied residual arrays.
///
/// Useful for replaying solver state or for driving status tests directly.
/// Residual arrays default to empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RitzSnapshot<T> {
    pub values: Vec<T>,
    pub index: Vec<i32>,
    pub res_norms: Vec<T>,
    pub res2_norms: Vec<T>,
    pub ritz_res2_norms: Vec<T>,
}

impl<T> RitzSnapshot<T> {
    pub fn new(values: Vec<T>, index: Vec<i32>) -> Self {
        Self {
            values,
            index,
            res_norms: Vec::new(),
            res2_norms: Vec::new(),
            ritz_res2_norms: Vec::new(),
        }
    }

    pub fn with_res_norms(mut self, res: Vec<T>) -> Self {
        self.res_norms = res;
        self
    }

    pub fn with_res2_norms(mut self, res: Vec<T>) -> Self {
        self.res2_norms = res;
        self
    }

    pub fn with_ritz_res2_norms(mut self, res: Vec<T>) -> Self {
        self.ritz_res2_norms = res;
        self
    }
}

impl<T: Clone> Eigensolver<T> for RitzSnapshot<T> {
    fn ritz_values(&self) -> Vec<T> {
        self.values.clone()
    }
    fn ritz_index(&self) -> Vec<i32> {
        self.index.clone()
    }
    fn res_norms(&self) -> Vec<T> {
        self.res_norms.clone()
    }
    fn res2_norms(&self) -> Vec<T> {
        self.res2_norms.clone()
    }
    fn ritz_res2_norms(&self) -> Vec<T> {
        self.ritz_res2_norms.clone()
    }
}
