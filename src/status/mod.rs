//! Status tests for iterative eigensolvers.
//!
//! A status test inspects the solver between iterations and reports a
//! tri-state [`TestStatus`]. Tests keep the result of their last evaluation
//! until they are reset, cleared or reconfigured.
//!
//! Modules:
//! - [`ordered_res_norm`]: residual-norm test over the most significant eigenpairs.
//! - [`combo`]: boolean combinations of status tests.

use crate::core::traits::Eigensolver;
use crate::error::StatusError;
use std::fmt;

/// Result of a status test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestStatus {
    /// Not evaluated since construction, reset, clear or reconfiguration.
    #[default]
    Undefined,
    Passed,
    Failed,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TestStatus::Undefined => "Undefined",
            TestStatus::Passed => "Passed",
            TestStatus::Failed => "Failed",
        };
        f.write_str(s)
    }
}

/// Common interface for eigensolver stopping criteria.
pub trait StatusTest<T> {
    /// Evaluate the test against the solver's current state.
    ///
    /// A fatal error leaves the previous status untouched.
    fn check_status(&mut self, solver: &dyn Eigensolver<T>) -> Result<TestStatus, StatusError>;
    /// Result of the most recent successful `check_status`.
    fn status(&self) -> TestStatus;
    /// Prepare the test for a new problem instance; configuration is kept.
    fn reset(&mut self);
    /// Forget the cached result so `status()` reports `Undefined`.
    fn clear_status(&mut self);
    /// Write a description of the test, each line indented by `indent` spaces.
    fn print(&self, w: &mut dyn fmt::Write, indent: usize) -> fmt::Result;
}

pub mod ordered_res_norm;
pub use ordered_res_norm::{OrderedResNormBuilder, OrderedResNormTest};

pub mod combo;
pub use combo::{ComboType, StatusTestCombo};
