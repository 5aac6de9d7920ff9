// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Words of bits and their packed counterparts.
//!
//! An [`UnpackedWord`] holds one variable per bit, least significant bit
//! first. A [`MultiPackedWord`] holds the same value in as few variables as
//! the field regime allows, which is exactly one for
//! [`FieldType::R1P`](super::FieldType::R1P). A [`DualWord`] carries both
//! views; the bit-packing gadgets keep them consistent.

use super::{
    multipacked_size, FieldType, FlagVariable, Protoboard, Variable,
    VariableArray,
};
use ark_ff::PrimeField;
use core::ops::Deref;

/// One variable per bit, index `0` is the least significant bit.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UnpackedWord(VariableArray);

impl UnpackedWord {
    /// Allocates `num_bits` fresh bit variables named `name[i]`.
    pub fn new<F>(pb: &mut Protoboard<F>, num_bits: usize, name: &str) -> Self
    where
        F: PrimeField,
    {
        Self(pb.allocate_array(num_bits, name))
    }

    /// Wraps already allocated bit variables.
    pub fn from_variables(bits: VariableArray) -> Self {
        Self(bits)
    }

    /// Variable holding bit `i`.
    pub fn bit(&self, i: usize) -> FlagVariable {
        self.0[i]
    }

    /// Number of bits.
    pub fn num_bits(&self) -> usize {
        self.0.len()
    }
}

impl Deref for UnpackedWord {
    type Target = [Variable];

    fn deref(&self) -> &[Variable] {
        &self.0
    }
}

impl From<VariableArray> for UnpackedWord {
    fn from(bits: VariableArray) -> Self {
        Self(bits)
    }
}

/// A word of `num_bits` bits packed into field elements.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MultiPackedWord {
    vars: VariableArray,
    num_bits: usize,
    field_type: FieldType,
}

impl MultiPackedWord {
    /// Allocates the packed representation of a `num_bits` word on `pb`.
    ///
    /// # Panics
    ///
    /// Panics if the protoboard's regime has no packing rule.
    pub fn new<F>(pb: &mut Protoboard<F>, num_bits: usize, name: &str) -> Self
    where
        F: PrimeField,
    {
        let field_type = pb.field_type();
        let size = multipacked_size(num_bits, field_type);
        Self {
            vars: pb.allocate_array(size, name),
            num_bits,
            field_type,
        }
    }

    /// Wraps already allocated packed variables.
    pub fn from_variables(
        vars: VariableArray,
        num_bits: usize,
        field_type: FieldType,
    ) -> Self {
        Self {
            vars,
            num_bits,
            field_type,
        }
    }

    /// Number of bits the word represents.
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Regime the word was sized for.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }
}

impl Deref for MultiPackedWord {
    type Target = [Variable];

    fn deref(&self) -> &[Variable] {
        &self.vars
    }
}

/// A word available both packed and bit by bit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DualWord {
    multipacked: MultiPackedWord,
    unpacked: UnpackedWord,
}

impl DualWord {
    /// Allocates both representations of a `num_bits` word. The packed
    /// variables are named `name_p`, the bits `name_u`.
    pub fn new<F>(pb: &mut Protoboard<F>, num_bits: usize, name: &str) -> Self
    where
        F: PrimeField,
    {
        let multipacked =
            MultiPackedWord::new(pb, num_bits, &format!("{}_p", name));
        let unpacked = UnpackedWord::new(pb, num_bits, &format!("{}_u", name));
        Self {
            multipacked,
            unpacked,
        }
    }

    /// Pairs two existing representations of the same word.
    pub fn from_parts(
        multipacked: MultiPackedWord,
        unpacked: UnpackedWord,
    ) -> Self {
        Self {
            multipacked,
            unpacked,
        }
    }

    /// Packed representation.
    pub fn multipacked(&self) -> &MultiPackedWord {
        &self.multipacked
    }

    /// Bit representation.
    pub fn unpacked(&self) -> &UnpackedWord {
        &self.unpacked
    }

    /// Variable holding bit `i`.
    pub fn bit(&self, i: usize) -> FlagVariable {
        self.unpacked.bit(i)
    }

    /// Number of bits.
    pub fn num_bits(&self) -> usize {
        self.unpacked.num_bits()
    }
}

/// A sequence of [`DualWord`]s stored as two parallel arrays.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DualWordArray {
    multipacked: Vec<MultiPackedWord>,
    unpacked: Vec<UnpackedWord>,
}

impl DualWordArray {
    /// Creates an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the array from its two halves.
    ///
    /// # Panics
    ///
    /// Panics if the halves do not have the same number of elements.
    pub fn from_parts(
        multipacked: Vec<MultiPackedWord>,
        unpacked: Vec<UnpackedWord>,
    ) -> Self {
        assert_eq!(
            multipacked.len(),
            unpacked.len(),
            "dual word array size mismatch: {} packed, {} unpacked",
            multipacked.len(),
            unpacked.len()
        );
        Self {
            multipacked,
            unpacked,
        }
    }

    /// Appends a word.
    pub fn push(&mut self, word: DualWord) {
        self.multipacked.push(word.multipacked);
        self.unpacked.push(word.unpacked);
    }

    /// Element `i` as a [`DualWord`].
    pub fn at(&self, i: usize) -> DualWord {
        DualWord::from_parts(self.multipacked[i].clone(), self.unpacked[i].clone())
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.multipacked.len()
    }

    /// Returns `true` if the array holds no words.
    pub fn is_empty(&self) -> bool {
        self.multipacked.is_empty()
    }

    /// Packed half.
    pub fn multipacked(&self) -> &[MultiPackedWord] {
        &self.multipacked
    }

    /// Unpacked half.
    pub fn unpacked(&self) -> &[UnpackedWord] {
        &self.unpacked
    }

    /// One variable per word.
    ///
    /// # Panics
    ///
    /// Panics if any element is packed into more than one variable.
    pub fn packed(&self) -> VariableArray {
        self.multipacked
            .iter()
            .map(|word| {
                assert_eq!(
                    word.len(),
                    1,
                    "cannot convert a multipacked word of {} variables to a \
                     packed variable",
                    word.len()
                );
                word[0]
            })
            .collect()
    }
}

impl core::iter::FromIterator<DualWord> for DualWordArray {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = DualWord>,
    {
        let mut array = Self::new();
        iter.into_iter().for_each(|word| array.push(word));
        array
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ark_bls12_381::Fr;

    #[test]
    fn test_dual_word_allocation() {
        let mut pb = Protoboard::<Fr>::new(FieldType::R1P);
        let word = DualWord::new(&mut pb, 8, "w");
        assert_eq!(word.multipacked().len(), 1);
        assert_eq!(word.num_bits(), 8);
        assert_eq!(word.multipacked().num_bits(), 8);
        assert_eq!(pb.num_variables(), 9);
        assert_eq!(pb.variable_name(word.multipacked()[0]), Some("w_p[0]"));
        assert_eq!(pb.variable_name(word.bit(3)), Some("w_u[3]"));
        assert_eq!(word.bit(0).index() + 7, word.bit(7).index());
    }

    #[test]
    fn test_dual_word_array() {
        let mut pb = Protoboard::<Fr>::new(FieldType::R1P);
        let mut array: DualWordArray =
            (0..3).map(|i| DualWord::new(&mut pb, 4, &format!("w{}", i))).collect();
        assert_eq!(array.len(), 3);
        let extra = DualWord::new(&mut pb, 4, "extra");
        array.push(extra.clone());
        assert_eq!(array.at(3), extra);
        let packed = array.packed();
        assert_eq!(packed.len(), 4);
        assert_eq!(packed[3], extra.multipacked()[0]);
        assert_eq!(array.unpacked()[1].num_bits(), 4);
    }

    #[test]
    #[should_panic(expected = "size mismatch")]
    fn test_dual_word_array_size_mismatch() {
        let mut pb = Protoboard::<Fr>::new(FieldType::R1P);
        let word = DualWord::new(&mut pb, 4, "w");
        DualWordArray::from_parts(vec![word.multipacked().clone()], vec![]);
    }

    #[test]
    #[should_panic(expected = "cannot convert")]
    fn test_packed_requires_single_variable() {
        let mut pb = Protoboard::<Fr>::new(FieldType::R1P);
        let vars = pb.allocate_array(2, "p");
        let bits = UnpackedWord::new(&mut pb, 4, "u");
        let wide = MultiPackedWord::from_variables(vars, 4, FieldType::R1P);
        DualWordArray::from_parts(vec![wide], vec![bits]).packed();
    }

    #[test]
    #[should_panic(expected = "Unknown field type")]
    fn test_agnostic_word_cannot_be_packed() {
        let mut pb = Protoboard::<Fr>::new(FieldType::Agnostic);
        MultiPackedWord::new(&mut pb, 8, "p");
    }
}
