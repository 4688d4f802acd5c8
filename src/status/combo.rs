//! Boolean combinations of status tests.
//!
//! The sequential variants short-circuit: children after the deciding one are
//! not evaluated and get `clear_status()`, so they report `Undefined` rather
//! than a result cached from an earlier iteration.

use crate::core::traits::Eigensolver;
use crate::error::StatusError;
use crate::status::{StatusTest, TestStatus};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboType {
    /// Passed if any child passed; all children are evaluated.
    Or,
    /// Passed if every child passed; all children are evaluated.
    And,
    /// Stop at the first child that passes.
    SeqOr,
    /// Stop at the first child that fails.
    SeqAnd,
}

impl fmt::Display for ComboType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComboType::Or => "OR",
            ComboType::And => "AND",
            ComboType::SeqOr => "SEQOR",
            ComboType::SeqAnd => "SEQAND",
        };
        f.write_str(s)
    }
}

pub struct StatusTestCombo<T> {
    kind: ComboType,
    tests: Vec<Box<dyn StatusTest<T>>>,
    state: TestStatus,
}

impl<T> StatusTestCombo<T> {
    pub fn new(kind: ComboType) -> Self {
        Self { kind, tests: Vec::new(), state: TestStatus::Undefined }
    }

    pub fn with_tests(kind: ComboType, tests: Vec<Box<dyn StatusTest<T>>>) -> Self {
        Self { kind, tests, state: TestStatus::Undefined }
    }

    /// Append a child test. Also resets the combo status.
    pub fn add_test(&mut self, test: Box<dyn StatusTest<T>>) {
        self.tests.push(test);
        self.state = TestStatus::Undefined;
    }

    pub fn kind(&self) -> ComboType {
        self.kind
    }

    /// Change the combination rule. Also resets the combo status.
    pub fn set_kind(&mut self, kind: ComboType) {
        self.kind = kind;
        self.state = TestStatus::Undefined;
    }

    pub fn tests(&self) -> &[Box<dyn StatusTest<T>>] {
        &self.tests
    }

    fn evaluate(&mut self, solver: &dyn Eigensolver<T>) -> Result<TestStatus, StatusError> {
        if self.tests.is_empty() {
            return Ok(TestStatus::Failed);
        }
        let status = match self.kind {
            ComboType::Or | ComboType::And => {
                let mut results = Vec::with_capacity(self.tests.len());
                for test in self.tests.iter_mut() {
                    results.push(test.check_status(solver)?);
                }
                let passed = |s: &TestStatus| *s == TestStatus::Passed;
                let ok = if self.kind == ComboType::Or {
                    results.iter().any(passed)
                } else {
                    results.iter().all(passed)
                };
                if ok { TestStatus::Passed } else { TestStatus::Failed }
            }
            ComboType::SeqOr | ComboType::SeqAnd => {
                // SeqOr stops on Passed, SeqAnd on Failed
                let stop_on = if self.kind == ComboType::SeqOr { TestStatus::Passed } else { TestStatus::Failed };
                let mut status = if self.kind == ComboType::SeqOr { TestStatus::Failed } else { TestStatus::Passed };
                let mut stopped_at = None;
                for (i, test) in self.tests.iter_mut().enumerate() {
                    if test.check_status(solver)? == stop_on {
                        status = stop_on;
                        stopped_at = Some(i);
                        break;
                    }
                }
                if let Some(i) = stopped_at {
                    for test in self.tests.iter_mut().skip(i + 1) {
                        test.clear_status();
                    }
                }
                status
            }
        };
        log::debug!("status test combo {}: {} children -> {status}", self.kind, self.tests.len());
        Ok(status)
    }
}

impl<T> StatusTest<T> for StatusTestCombo<T> {
    fn check_status(&mut self, solver: &dyn Eigensolver<T>) -> Result<TestStatus, StatusError> {
        let status = self.evaluate(solver)?;
        self.state = status;
        Ok(status)
    }

    fn status(&self) -> TestStatus {
        self.state
    }

    fn reset(&mut self) {
        self.state = TestStatus::Undefined;
        for test in self.tests.iter_mut() {
            test.reset();
        }
    }

    fn clear_status(&mut self) {
        self.state = TestStatus::Undefined;
        for test in self.tests.iter_mut() {
            test.clear_status();
        }
    }

    fn print(&self, w: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        let pad = " ".repeat(indent);
        writeln!(w, "{pad}- StatusTestCombo: {}", self.state)?;
        writeln!(w, "{pad}Combination: {}", self.kind)?;
        for test in &self.tests {
            test.print(w, indent + 2)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::snapshot::RitzSnapshot;

    /// Child that always reports a fixed verdict.
    struct Fixed {
        verdict: Result<TestStatus, StatusError>,
        state: TestStatus,
    }

    impl Fixed {
        fn boxed(verdict: TestStatus) -> Box<dyn StatusTest<f64>> {
            Box::new(Fixed { verdict: Ok(verdict), state: TestStatus::Undefined })
        }
    }

    impl StatusTest<f64> for Fixed {
        fn check_status(&mut self, _: &dyn Eigensolver<f64>) -> Result<TestStatus, StatusError> {
            self.state = self.verdict.clone()?;
            Ok(self.state)
        }
        fn status(&self) -> TestStatus {
            self.state
        }
        fn reset(&mut self) {
            self.state = TestStatus::Undefined;
        }
        fn clear_status(&mut self) {
            self.state = TestStatus::Undefined;
        }
        fn print(&self, w: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
            writeln!(w, "{}- Fixed: {}", " ".repeat(indent), self.state)
        }
    }

    fn solver() -> RitzSnapshot<f64> {
        RitzSnapshot::new(vec![], vec![])
    }

    #[test]
    fn or_and_evaluate_every_child() {
        use TestStatus::*;
        let mut or = StatusTestCombo::with_tests(ComboType::Or, vec![Fixed::boxed(Failed), Fixed::boxed(Passed)]);
        assert_eq!(or.check_status(&solver()).unwrap(), Passed);
        assert_eq!(or.tests()[0].status(), Failed);

        let mut and = StatusTestCombo::with_tests(ComboType::And, vec![Fixed::boxed(Passed), Fixed::boxed(Failed)]);
        assert_eq!(and.check_status(&solver()).unwrap(), Failed);
        assert_eq!(and.tests()[1].status(), Failed);
    }

    #[test]
    fn sequential_variants_clear_skipped_children() {
        use TestStatus::*;
        let mut seqor = StatusTestCombo::with_tests(
            ComboType::SeqOr,
            vec![Fixed::boxed(Passed), Fixed::boxed(Passed)],
        );
        assert_eq!(seqor.check_status(&solver()).unwrap(), Passed);
        assert_eq!(seqor.tests()[1].status(), Undefined);

        let mut seqand = StatusTestCombo::with_tests(
            ComboType::SeqAnd,
            vec![Fixed::boxed(Failed), Fixed::boxed(Passed)],
        );
        assert_eq!(seqand.check_status(&solver()).unwrap(), Failed);
        assert_eq!(seqand.tests()[1].status(), Undefined);

        let mut all_pass = StatusTestCombo::with_tests(
            ComboType::SeqAnd,
            vec![Fixed::boxed(Passed), Fixed::boxed(Passed)],
        );
        assert_eq!(all_pass.check_status(&solver()).unwrap(), Passed);
    }

    #[test]
    fn empty_combo_fails() {
        let mut combo = StatusTestCombo::<f64>::new(ComboType::And);
        assert_eq!(combo.check_status(&solver()).unwrap(), TestStatus::Failed);
    }

    #[test]
    fn child_error_keeps_previous_status() {
        let mut combo = StatusTestCombo::<f64>::new(ComboType::Or);
        combo.add_test(Box::new(Fixed {
            verdict: Err(StatusError::NanOrInfResidual { position: 0 }),
            state: TestStatus::Undefined,
        }));
        assert!(combo.check_status(&solver()).is_err());
        assert_eq!(combo.status(), TestStatus::Undefined);
    }

    #[test]
    fn reset_propagates_to_children() {
        let mut combo = StatusTestCombo::with_tests(ComboType::Or, vec![Fixed::boxed(TestStatus::Passed)]);
        combo.check_status(&solver()).unwrap();
        combo.reset();
        assert_eq!(combo.status(), TestStatus::Undefined);
        assert_eq!(combo.tests()[0].status(), TestStatus::Undefined);

        let mut out = String::new();
        combo.print(&mut out, 0).unwrap();
        assert_eq!(out, "- StatusTestCombo: Undefined\nCombination: OR\n  - Fixed: Undefined\n");
    }
}
