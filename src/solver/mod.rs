//! Eigensolver snapshots implementing [`Eigensolver`](crate::core::traits::Eigensolver).

pub mod snapshot;
pub use snapshot::RitzSnapshot;

pub mod dense;
pub use dense::DenseRitzBlock;
