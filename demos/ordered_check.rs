use faer::Mat;
use kryeig::config::{Quorum, ResType};
use kryeig::core::traits::Eigensolver;
use kryeig::error::StatusError;
use kryeig::solver::DenseRitzBlock;
use kryeig::status::{OrderedResNormTest, StatusTest};
use rand::Rng;
use std::sync::Arc;

#[path = "../tests/common/mod.rs"]
mod common;
use common::LargestMagnitude;

fn main() -> Result<(), StatusError> {
    let n = 6;
    // block diagonal: a 2x2 rotation block (±3i) followed by a diagonal
    let mut a = Mat::<f64>::zeros(n, n);
    a[(0, 1)] = -3.0;
    a[(1, 0)] = 3.0;
    for i in 2..n {
        a[(i, i)] = (n - i) as f64;
    }

    // Ritz vectors: exact for the pair, noisy for the real values
    let mut rng = rand::thread_rng();
    let mut x = Mat::<f64>::zeros(n, 4);
    x[(0, 0)] = 1.0;
    x[(1, 1)] = -1.0;
    for j in 2..4 {
        for i in 0..n {
            x[(i, j)] = if i == j { 1.0 } else { 1e-6 * rng.gen_range(-1.0..1.0) };
        }
    }
    let values = vec![0.0, 3.0, 4.0, 3.0];
    let block = DenseRitzBlock::new(a, values, vec![1, -1, 0, 0], x, 4)?;
    println!("residuals = {:?}", block.res2_norms());

    let mut test = OrderedResNormTest::new(Arc::new(LargestMagnitude), 1e-4, Quorum::at_least(3)?, ResType::TwoNorm, true)?;
    test.set_aux_vals(&[10.0]);
    let status = test.check_status(&block)?;
    println!("status = {status}, which = {:?}", test.which_vecs());
    print!("{test}");
    Ok(())
}
