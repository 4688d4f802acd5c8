//! Configuration types for status tests.

pub mod options;
pub use options::{OrderedResNormOptions, Quorum, ResType};
