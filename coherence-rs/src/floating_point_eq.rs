//! Equality and hashing for [`f64`] values embedded in otherwise hashable Quil items.
//!
//! `±0.0` are indistinguishable here, and every NaN equals every other NaN, so the relation is
//! reflexive and may back an [`Eq`] implementation.

use std::hash::{Hash as _, Hasher};

/// Compare two [`f64`]s, treating all `NaN`s as equal.
///
/// Compatible with [`hash`].
#[inline]
pub(crate) fn eq(left: f64, right: f64) -> bool {
    left == right || left.is_nan() && right.is_nan()
}

/// Hash an [`f64`] so that values equal under [`eq`] hash identically.
#[inline]
pub(crate) fn hash<H: Hasher>(value: f64, state: &mut H) {
    let canonical = if value == 0.0 {
        // `-0.0` has its own bit pattern
        0.0f64
    } else if value.is_nan() {
        f64::NAN
    } else {
        value
    };

    canonical.to_bits().hash(state)
}

#[cfg(test)]
mod test {
    use std::{collections::hash_map::DefaultHasher, hash::Hasher};

    use rstest::rstest;

    fn hash(float: f64) -> u64 {
        let mut hasher = DefaultHasher::new();
        super::hash(float, &mut hasher);
        hasher.finish()
    }

    #[rstest]
    #[case(0.0, -0.0)]
    #[case(f64::NAN, -f64::NAN)]
    #[case(1.5, 1.5)]
    fn equal_values_hash_alike(#[case] left: f64, #[case] right: f64) {
        assert!(super::eq(left, right));
        assert_eq!(hash(left), hash(right));
    }

    #[test]
    fn nan_is_not_a_number() {
        assert!(!super::eq(f64::NAN, 0.0));
        assert!(!super::eq(1.0, 2.0));
    }
}
