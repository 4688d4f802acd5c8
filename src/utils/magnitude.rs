//! Overflow-safe complex magnitude.

use num_traits::Float;

/// `sqrt(x² + y²)` without destructive overflow or underflow.
///
/// Same contract as LAPACK's `xLAPY2`, with NaN in either argument always
/// yielding NaN (`hypot` returns infinity for an infinite argument paired
/// with NaN).
pub fn lapy2<T: Float>(x: T, y: T) -> T {
    if x.is_nan() || y.is_nan() {
        return T::nan();
    }
    x.hypot(y)
}
