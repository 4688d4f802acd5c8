//! Packed complex-conjugate representation of Ritz values.
//!
//! Real eigensolvers report complex Ritz values `a ± ib` in two adjacent
//! real slots: the first holds `a` and is tagged [`PairTag::Primary`], the
//! second holds `b` and is tagged [`PairTag::Secondary`]. Both halves share
//! one residual norm. This module expands that packing back into separate
//! real and imaginary parts.

use crate::error::StatusError;
use num_traits::Float;

/// Pair-index tag of a single packed Ritz value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairTag {
    /// A real Ritz value.
    Real,
    /// First half of a conjugate pair, `a + ib`.
    Primary,
    /// Second half of a conjugate pair, `a − ib`.
    Secondary,
}

impl PairTag {
    /// Raw integer encoding used by [`Eigensolver::ritz_index`](crate::core::traits::Eigensolver::ritz_index).
    pub fn as_i32(self) -> i32 {
        match self {
            PairTag::Real => 0,
            PairTag::Primary => 1,
            PairTag::Secondary => -1,
        }
    }
}

impl TryFrom<i32> for PairTag {
    type Error = i32;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(PairTag::Real),
            1 => Ok(PairTag::Primary),
            -1 => Ok(PairTag::Secondary),
            other => Err(other),
        }
    }
}

/// Parse raw tags, checking that every `+1` is immediately followed by a
/// `-1` and every `-1` immediately preceded by a `+1`.
pub fn parse_pair_tags(tags: &[i32]) -> Result<Vec<PairTag>, StatusError> {
    let parsed = tags
        .iter()
        .enumerate()
        .map(|(position, &tag)| {
            PairTag::try_from(tag).map_err(|tag| StatusError::InvalidRitzIndex { position, tag })
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (i, tag) in parsed.iter().enumerate() {
        let matched = match tag {
            PairTag::Real => true,
            PairTag::Primary => parsed.get(i + 1) == Some(&PairTag::Secondary),
            PairTag::Secondary => i > 0 && parsed[i - 1] == PairTag::Primary,
        };
        if !matched {
            return Err(StatusError::InvalidRitzIndex { position: i, tag: tag.as_i32() });
        }
    }
    Ok(parsed)
}

/// Expand packed Ritz `values` into `(re, im)` using the pair `tags`.
///
/// Only the first `tags.len()` values are read; `values` must be at least as
/// long as `tags`.
pub fn unpack_ritz_pairs<T: Float>(values: &[T], tags: &[i32]) -> Result<(Vec<T>, Vec<T>), StatusError> {
    if values.len() < tags.len() {
        return Err(StatusError::SizeMismatch {
            what: "ritz values",
            expected: tags.len(),
            found: values.len(),
        });
    }
    let tags = parse_pair_tags(tags)?;
    let mut re = Vec::with_capacity(tags.len());
    let mut im = Vec::with_capacity(tags.len());
    for (i, tag) in tags.iter().enumerate() {
        let (r, c) = match tag {
            PairTag::Real => (values[i], T::zero()),
            PairTag::Primary => (values[i], values[i + 1]),
            PairTag::Secondary => (values[i - 1], -values[i]),
        };
        re.push(r);
        im.push(c);
    }
    Ok((re, im))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_values_have_zero_imaginary_part() {
        let (re, im) = unpack_ritz_pairs(&[3.0, -1.5], &[0, 0]).unwrap();
        assert_eq!(re, vec![3.0, -1.5]);
        assert_eq!(im, vec![0.0, 0.0]);
    }

    #[test]
    fn conjugate_pair_expands_to_both_halves() {
        let (re, im) = unpack_ritz_pairs(&[2.0, 0.5, 7.0], &[1, -1, 0]).unwrap();
        assert_eq!(re, vec![2.0, 2.0, 7.0]);
        assert_eq!(im, vec![0.5, -0.5, 0.0]);
    }

    #[test]
    fn extra_values_are_ignored() {
        let (re, im) = unpack_ritz_pairs(&[1.0, 4.0, 9.0, 9.0], &[1, -1]).unwrap();
        assert_eq!(re, vec![1.0, 1.0]);
        assert_eq!(im, vec![4.0, -4.0]);
    }

    #[test]
    fn out_of_range_tag_is_rejected() {
        let err = unpack_ritz_pairs(&[1.0, 2.0], &[0, 2]).unwrap_err();
        assert_eq!(err, StatusError::InvalidRitzIndex { position: 1, tag: 2 });
    }

    #[test]
    fn unmatched_halves_are_rejected() {
        // primary at the end of the block
        let err = unpack_ritz_pairs(&[1.0, 2.0], &[0, 1]).unwrap_err();
        assert_eq!(err, StatusError::InvalidRitzIndex { position: 1, tag: 1 });
        // secondary with no primary before it
        let err = unpack_ritz_pairs(&[1.0, 2.0], &[-1, 0]).unwrap_err();
        assert_eq!(err, StatusError::InvalidRitzIndex { position: 0, tag: -1 });
        // two primaries in a row
        let err = unpack_ritz_pairs(&[1.0, 2.0, 3.0], &[1, 1, -1]).unwrap_err();
        assert_eq!(err, StatusError::InvalidRitzIndex { position: 0, tag: 1 });
    }

    #[test]
    fn short_value_array_is_rejected() {
        let err = unpack_ritz_pairs(&[1.0], &[0, 0]).unwrap_err();
        assert!(matches!(err, StatusError::SizeMismatch { expected: 2, found: 1, .. }));
    }
}
