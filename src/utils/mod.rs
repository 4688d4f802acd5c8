pub mod magnitude;
pub use magnitude::lapy2;
