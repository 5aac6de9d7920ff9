// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

use crate::constraint_system::{LinearCombination, LinearTerm, Variable};
use ark_ff::{BigInteger, Field, PrimeField};
use num_traits::{One, Zero};

/// Returns an iterator over increasing powers of the given `scalar` starting
/// at `0`.
#[inline]
pub fn powers_of<F>(scalar: F) -> impl Iterator<Item = F>
where
    F: Field,
{
    core::iter::successors(Some(F::one()), move |p| Some(*p * scalar))
}

/// Builds the linear combination `sum(vars)`.
pub fn sum<F>(vars: &[Variable]) -> LinearCombination<F>
where
    F: Field,
{
    vars.iter().map(|var| LinearTerm::from(*var)).collect()
}

/// Returns bit `i` (little-endian) of the canonical integer representation
/// of `value`, as a field element.
#[inline]
pub fn field_bit<F>(value: &F, i: usize) -> F
where
    F: PrimeField,
{
    if value.into_repr().get_bit(i) {
        F::one()
    } else {
        F::zero()
    }
}

/// Returns `true` if `value` is exactly `0` or `1`.
#[inline]
pub fn is_boolean<F>(value: &F) -> bool
where
    F: Field,
{
    value.is_zero() || value.is_one()
}

/// Maps a signed integer into the field.
#[inline]
pub(crate) fn from_i64<F>(value: i64) -> F
where
    F: Field,
{
    let magnitude = F::from(value.unsigned_abs());
    if value < 0 {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::batch_test_field;
    use ark_bls12_377::Bls12_377;
    use ark_bls12_381::Bls12_381;

    fn test_powers_of_two<F>()
    where
        F: PrimeField,
    {
        let powers: Vec<F> = powers_of(F::from(2u64)).take(5).collect();
        let expected: Vec<F> =
            [1u64, 2, 4, 8, 16].iter().map(|p| F::from(*p)).collect();
        assert_eq!(powers, expected);
    }

    fn test_field_bit<F>()
    where
        F: PrimeField,
    {
        // 42 = 0b101010
        let value = F::from(42u64);
        let bits: Vec<F> = (0..8).map(|i| field_bit(&value, i)).collect();
        let expected: Vec<F> =
            [0u64, 1, 0, 1, 0, 1, 0, 0].iter().map(|b| F::from(*b)).collect();
        assert_eq!(bits, expected);
    }

    fn test_from_i64<F>()
    where
        F: PrimeField,
    {
        assert_eq!(from_i64::<F>(-3) + F::from(3u64), F::zero());
        assert_eq!(from_i64::<F>(7), F::from(7u64));
        assert!(is_boolean(&from_i64::<F>(1)));
        assert!(!is_boolean(&from_i64::<F>(-1)));
    }

    batch_test_field!(
        [test_powers_of_two, test_field_bit, test_from_i64],
        [] => (Bls12_381)
    );

    batch_test_field!(
        [test_powers_of_two, test_field_bit, test_from_i64],
        [] => (Bls12_377)
    );
}
