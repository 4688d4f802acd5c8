//! Residual-norm status test over the most significant eigenpairs.
//!
//! `OrderedResNormTest` passes when the most significant eigenpairs, as
//! decided by an injected [`SortManager`], have residual norms below a
//! tolerance. The point is not only to count converged eigenpairs but to
//! check that the *right* ones have converged: many converged insignificant
//! pairs never make the test pass, and unconverged insignificant pairs never
//! make it fail.
//!
//! Besides the tolerance the caller chooses:
//! - the residual norm read from the solver ([`ResType`]),
//! - absolute or relative scale (residual divided by |Ritz value|),
//! - the quorum: how many of the most significant pairs must pass,
//! - a set of auxiliary eigenvalues (e.g. deflated in an earlier solve) that
//!   take part in the ordering and always count as converged.
//!
//! # Evaluation
//! 1. Collect residuals, Ritz values and pair tags from the solver.
//! 2. Unpack conjugate pairs and append the auxiliary eigenvalues.
//! 3. Optionally scale the live residuals; auxiliaries get residual `-1`.
//! 4. Order all `n + m` eigenvalues with the sorter.
//! 5. Check the first `min(need, n + m)` sorted residuals against the tolerance.
//!
//! Passing indices refer to the merged, pre-sort numbering: `[0, n)` are
//! solver entries and `[n, n + m)` auxiliary entries. They are reported in
//! significance order.

use crate::config::options::{OrderedResNormOptions, Quorum, ResType};
use crate::core::pairs::unpack_ritz_pairs;
use crate::core::traits::{Eigensolver, SortManager};
use crate::error::StatusError;
use crate::status::{StatusTest, TestStatus};
use crate::utils::magnitude::lapy2;
use num_traits::Float;
use std::fmt;
use std::sync::Arc;

/// Residual-norm test ordered by significance.
pub struct OrderedResNormTest<T> {
    state: TestStatus,
    tol: T,
    ind: Vec<usize>,
    quorum: Quorum,
    scaled: bool,
    which_norm: ResType,
    aux_re: Vec<T>,
    aux_im: Vec<T>,
    sorter: Arc<dyn SortManager<T>>,
}

/// Builder for [`OrderedResNormTest`]; the sorter is mandatory.
pub struct OrderedResNormBuilder<T> {
    sorter: Option<Arc<dyn SortManager<T>>>,
    options: OrderedResNormOptions<T>,
}

impl<T: Float + fmt::Display> OrderedResNormBuilder<T> {
    pub fn sorter(mut self, sorter: Arc<dyn SortManager<T>>) -> Self {
        self.sorter = Some(sorter);
        self
    }

    pub fn quorum(mut self, quorum: Quorum) -> Self {
        self.options.quorum = quorum;
        self
    }

    pub fn which_norm(mut self, which_norm: ResType) -> Self {
        self.options.which_norm = which_norm;
        self
    }

    pub fn scaled(mut self, scaled: bool) -> Self {
        self.options.scaled = scaled;
        self
    }

    pub fn options(mut self, options: OrderedResNormOptions<T>) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<OrderedResNormTest<T>, StatusError> {
        let sorter = self.sorter.ok_or(StatusError::MissingSorter)?;
        OrderedResNormTest::with_options(sorter, self.options)
    }
}

/// Residuals, Ritz values and pair tags of the live block, aligned to the
/// residual length.
struct Collected<T> {
    values: Vec<T>,
    tags: Vec<i32>,
    res: Vec<T>,
}

fn collect<T: Float>(solver: &dyn Eigensolver<T>, which_norm: ResType) -> Result<Collected<T>, StatusError> {
    let res = match which_norm {
        ResType::Orth => solver.res_norms(),
        ResType::TwoNorm => solver.res2_norms(),
        ResType::RitzRes2Norm => solver.ritz_res2_norms(),
    };
    let n = res.len();
    let mut values = solver.ritz_values();
    let mut tags = solver.ritz_index();
    if values.len() < n {
        return Err(StatusError::SizeMismatch { what: "ritz values", expected: n, found: values.len() });
    }
    if tags.len() < n {
        return Err(StatusError::SizeMismatch { what: "ritz index", expected: n, found: tags.len() });
    }
    values.truncate(n);
    tags.truncate(n);
    Ok(Collected { values, tags, res })
}

/// Divide each residual by the magnitude of its eigenvalue estimate.
/// Residuals of zero-magnitude estimates are left alone.
fn scale_by_magnitude<T: Float>(res: &mut [T], re: &[T], im: &[T]) {
    for ((r, &a), &b) in res.iter_mut().zip(re).zip(im) {
        let mag = lapy2(a, b);
        if mag != T::zero() {
            *r = *r / mag;
        }
    }
}

fn check_permutation(perm: &[usize], num: usize) -> Result<(), StatusError> {
    if perm.len() != num {
        return Err(StatusError::InvalidPermutation(format!(
            "expected {num} entries, got {}",
            perm.len()
        )));
    }
    let mut seen = vec![false; num];
    for &p in perm {
        if p >= num {
            return Err(StatusError::InvalidPermutation(format!("index {p} out of range 0..{num}")));
        }
        if std::mem::replace(&mut seen[p], true) {
            return Err(StatusError::InvalidPermutation(format!("index {p} repeated")));
        }
    }
    Ok(())
}

impl<T: Float + fmt::Display> OrderedResNormTest<T> {
    /// Create a test; fails if `tol` is not strictly positive.
    pub fn new(
        sorter: Arc<dyn SortManager<T>>,
        tol: T,
        quorum: Quorum,
        which_norm: ResType,
        scaled: bool,
    ) -> Result<Self, StatusError> {
        Self::with_options(sorter, OrderedResNormOptions { tol, quorum, which_norm, scaled })
    }

    pub fn with_options(sorter: Arc<dyn SortManager<T>>, options: OrderedResNormOptions<T>) -> Result<Self, StatusError> {
        let mut test = Self {
            state: TestStatus::Undefined,
            tol: T::one(),
            ind: Vec::new(),
            quorum: options.quorum,
            scaled: options.scaled,
            which_norm: options.which_norm,
            aux_re: Vec::new(),
            aux_im: Vec::new(),
            sorter,
        };
        test.set_tolerance(options.tol)?;
        Ok(test)
    }

    /// Start a builder with default options and the given tolerance.
    pub fn builder(tol: T) -> OrderedResNormBuilder<T> {
        OrderedResNormBuilder { sorter: None, options: OrderedResNormOptions::new(tol) }
    }

    fn invalidate(&mut self) {
        self.state = TestStatus::Undefined;
        self.ind.clear();
    }

    /// Set the tolerance. Also resets the status to `Undefined`.
    pub fn set_tolerance(&mut self, tol: T) -> Result<(), StatusError> {
        // NaN fails this comparison too
        if !(tol > T::zero()) {
            return Err(StatusError::InvalidTolerance(tol.to_f64().unwrap_or(f64::NAN)));
        }
        self.invalidate();
        self.tol = tol;
        Ok(())
    }

    pub fn tolerance(&self) -> T {
        self.tol
    }

    /// Set the residual norm used by the test. Also resets the status.
    pub fn set_which_norm(&mut self, which_norm: ResType) {
        self.invalidate();
        self.which_norm = which_norm;
    }

    pub fn which_norm(&self) -> ResType {
        self.which_norm
    }

    /// Scale residuals by the magnitude of their Ritz values (relative
    /// scale). Also resets the status.
    pub fn set_scale(&mut self, relscale: bool) {
        self.invalidate();
        self.scaled = relscale;
    }

    /// True if residuals are scaled by the Ritz value magnitudes.
    pub fn scale(&self) -> bool {
        self.scaled
    }

    /// Set the quorum. Also resets the status.
    pub fn set_quorum(&mut self, quorum: Quorum) {
        self.invalidate();
        self.quorum = quorum;
    }

    pub fn quorum(&self) -> Quorum {
        self.quorum
    }

    /// Set real auxiliary eigenvalues; imaginary parts are zero. Also resets
    /// the status.
    pub fn set_aux_vals(&mut self, vals: &[T]) {
        self.invalidate();
        self.aux_re = vals.to_vec();
        self.aux_im = vec![T::zero(); vals.len()];
    }

    /// Set complex auxiliary eigenvalues. Also resets the status.
    pub fn set_aux_vals_complex(&mut self, re: &[T], im: &[T]) -> Result<(), StatusError> {
        if re.len() != im.len() {
            return Err(StatusError::AuxLengthMismatch { real: re.len(), imag: im.len() });
        }
        self.invalidate();
        self.aux_re = re.to_vec();
        self.aux_im = im.to_vec();
        Ok(())
    }

    /// Auxiliary eigenvalues as `(real parts, imaginary parts)`.
    pub fn aux_vals(&self) -> (&[T], &[T]) {
        (&self.aux_re, &self.aux_im)
    }

    /// Merged indices of the entries that passed, most significant first.
    pub fn which_vecs(&self) -> &[usize] {
        &self.ind
    }

    /// Number of entries that passed.
    pub fn how_many(&self) -> usize {
        self.ind.len()
    }

    fn evaluate(&self, solver: &dyn Eigensolver<T>) -> Result<(TestStatus, Vec<usize>), StatusError> {
        let Collected { values, tags, mut res } = collect(solver, self.which_norm)?;
        let bs = res.len();
        let num = bs + self.aux_re.len();
        if num == 0 {
            log::debug!("ordered res-norm test: nothing to check");
            return Ok((TestStatus::Failed, Vec::new()));
        }

        let (mut re, mut im) = unpack_ritz_pairs(&values, &tags)?;
        re.extend_from_slice(&self.aux_re);
        im.extend_from_slice(&self.aux_im);

        if self.scaled {
            scale_by_magnitude(&mut res, &re[..bs], &im[..bs]);
        }
        // auxiliary values are converged by definition: -1 < tol
        res.resize(num, -T::one());

        let perm = self.sorter.sort(solver, num, &re, &im)?;
        check_permutation(&perm, num)?;

        let need = self.quorum.needed(num);
        let to_check = need.min(num);
        let mut passed = Vec::with_capacity(to_check);
        for (i, &p) in perm.iter().take(to_check).enumerate() {
            let r = res[p];
            if !r.is_finite() {
                log::warn!("ordered res-norm test: residual of entry {p} (sorted position {i}) is {r}");
                return Err(StatusError::NanOrInfResidual { position: i });
            }
            if r < self.tol {
                passed.push(p);
            }
            log::trace!("ordered res-norm test: [{i}] entry {p} residual {r} tol {}", self.tol);
        }

        let status = if passed.len() >= need { TestStatus::Passed } else { TestStatus::Failed };
        log::debug!(
            "ordered res-norm test: {}/{need} passed among {to_check} checked of {num} ({bs} live, {} auxiliary) -> {status}",
            passed.len(),
            self.aux_re.len(),
        );
        if status == TestStatus::Failed {
            passed.clear();
        }
        Ok((status, passed))
    }
}

impl<T: Float + fmt::Display> StatusTest<T> for OrderedResNormTest<T> {
    fn check_status(&mut self, solver: &dyn Eigensolver<T>) -> Result<TestStatus, StatusError> {
        let (state, ind) = self.evaluate(solver)?;
        self.state = state;
        self.ind = ind;
        Ok(state)
    }

    fn status(&self) -> TestStatus {
        self.state
    }

    fn reset(&mut self) {
        self.invalidate();
    }

    fn clear_status(&mut self) {
        self.invalidate();
    }

    fn print(&self, w: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        let pad = " ".repeat(indent);
        writeln!(w, "{pad}- StatusTestOrderedResNorm: {}", self.state)?;
        writeln!(
            w,
            "{pad}(Tolerance,WhichNorm,Scaled,Quorum): ({},{},{},{})",
            self.tol, self.which_norm, self.scaled, self.quorum
        )?;
        write!(w, "{pad}Auxiliary values: ")?;
        if self.aux_re.is_empty() {
            writeln!(w, "[empty]")?;
        } else {
            for (re, im) in self.aux_re.iter().zip(&self.aux_im) {
                write!(w, "({re}, {im})  ")?;
            }
            writeln!(w)?;
        }
        if self.state != TestStatus::Undefined {
            write!(w, "{pad}Which vectors: ")?;
            if self.ind.is_empty() {
                writeln!(w, "[empty]")?;
            } else {
                for i in &self.ind {
                    write!(w, "{i} ")?;
                }
                writeln!(w)?;
            }
        }
        Ok(())
    }
}

impl<T: Float + fmt::Display> fmt::Display for OrderedResNormTest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f, 0)
    }
}
