//! Collaborator traits and the packed Ritz value format.

pub mod pairs;
pub mod traits;

pub use pairs::{PairTag, parse_pair_tags, unpack_ritz_pairs};
pub use traits::{Eigensolver, SortManager};
