// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Gadgets keeping the two halves of [`DualWord`]s consistent.

use super::{BitPackingGadget, PackingMode};
use crate::{
    constraint_system::{DualWord, DualWordArray, Protoboard},
    error::Error,
    gadget::{self, Gadget, GadgetBuilder},
};
use ark_ff::PrimeField;

struct DualWordBuilder {
    word: DualWord,
    mode: PackingMode,
}

impl<F> GadgetBuilder<F> for DualWordBuilder
where
    F: PrimeField,
{
    type Gadget = DualWordGadget;

    const NAME: &'static str = "DualWord";

    fn init(self, pb: &mut Protoboard<F>) -> DualWordGadget {
        let packing = BitPackingGadget::create(
            pb,
            self.word.unpacked(),
            self.word.multipacked(),
            self.mode,
        );
        DualWordGadget {
            word: self.word,
            packing,
        }
    }
}

/// Packs or unpacks a single [`DualWord`].
#[derive(Clone, Debug)]
pub struct DualWordGadget {
    word: DualWord,
    packing: BitPackingGadget,
}

impl DualWordGadget {
    /// Creates the gadget for `word` in direction `mode`.
    pub fn create<F>(
        pb: &mut Protoboard<F>,
        word: DualWord,
        mode: PackingMode,
    ) -> Self
    where
        F: PrimeField,
    {
        gadget::create(pb, DualWordBuilder { word, mode })
    }

    /// The word kept consistent by this gadget.
    pub fn word(&self) -> &DualWord {
        &self.word
    }
}

impl<F> Gadget<F> for DualWordGadget
where
    F: PrimeField,
{
    fn generate_constraints(&self, pb: &mut Protoboard<F>) {
        self.packing.generate_constraints(pb);
    }

    fn generate_witness(&self, pb: &mut Protoboard<F>) -> Result<(), Error> {
        self.packing.generate_witness(pb)
    }
}

struct DualWordArrayBuilder {
    words: DualWordArray,
    mode: PackingMode,
}

impl<F> GadgetBuilder<F> for DualWordArrayBuilder
where
    F: PrimeField,
{
    type Gadget = DualWordArrayGadget;

    const NAME: &'static str = "DualWordArray";

    fn init(self, pb: &mut Protoboard<F>) -> DualWordArrayGadget {
        let packing = self
            .words
            .unpacked()
            .iter()
            .zip(self.words.multipacked())
            .map(|(unpacked, packed)| {
                BitPackingGadget::create(pb, unpacked, packed, self.mode)
            })
            .collect();
        DualWordArrayGadget {
            words: self.words,
            packing,
        }
    }
}

/// Packs or unpacks every word of a [`DualWordArray`].
#[derive(Clone, Debug)]
pub struct DualWordArrayGadget {
    words: DualWordArray,
    packing: Vec<BitPackingGadget>,
}

impl DualWordArrayGadget {
    /// Creates one packing gadget per word, all in direction `mode`.
    pub fn create<F>(
        pb: &mut Protoboard<F>,
        words: DualWordArray,
        mode: PackingMode,
    ) -> Self
    where
        F: PrimeField,
    {
        gadget::create(pb, DualWordArrayBuilder { words, mode })
    }

    /// The words kept consistent by this gadget.
    pub fn words(&self) -> &DualWordArray {
        &self.words
    }
}

impl<F> Gadget<F> for DualWordArrayGadget
where
    F: PrimeField,
{
    fn generate_constraints(&self, pb: &mut Protoboard<F>) {
        for packing in &self.packing {
            packing.generate_constraints(pb);
        }
    }

    /// Runs every word, then reports the first witness error, if any.
    fn generate_witness(&self, pb: &mut Protoboard<F>) -> Result<(), Error> {
        let mut first_error = None;
        for packing in &self.packing {
            if let Err(error) = packing.generate_witness(pb) {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constraint_system::FieldType;
    use ark_bls12_381::Fr;
    use num_traits::{One, Zero};

    #[test]
    fn test_dual_word_unpack() {
        let mut pb = Protoboard::<Fr>::new(FieldType::R1P);
        let word = DualWord::new(&mut pb, 8, "w");
        let unpack = DualWordGadget::create(&mut pb, word.clone(), PackingMode::Unpack);
        unpack.generate_constraints(&mut pb);
        assert_eq!(pb.num_constraints(), 9);

        pb.set_val(word.multipacked()[0], Fr::from(0x81u64));
        unpack.generate_witness(&mut pb).unwrap();
        assert_eq!(pb.val(word.bit(0)), Fr::one());
        assert_eq!(pb.val(word.bit(7)), Fr::one());
        assert!((1..7).all(|i| pb.val(word.bit(i)).is_zero()));
        assert!(pb.is_satisfied());

        // A packed value wider than the word cannot be decomposed.
        pb.set_val(word.multipacked()[0], Fr::from(0x181u64));
        unpack.generate_witness(&mut pb).unwrap();
        assert!(!pb.is_satisfied());
    }

    #[test]
    fn test_dual_word_pack() {
        let mut pb = Protoboard::<Fr>::new(FieldType::R1P);
        let word = DualWord::new(&mut pb, 4, "w");
        let pack = DualWordGadget::create(&mut pb, word.clone(), PackingMode::Pack);
        pack.generate_constraints(&mut pb);
        assert_eq!(pb.num_constraints(), 1);

        for i in [0, 2, 3] {
            pb.set_val(word.bit(i), Fr::one());
        }
        pack.generate_witness(&mut pb).unwrap();
        assert_eq!(pb.val(word.multipacked()[0]), Fr::from(13u64));
        assert!(pb.is_satisfied());
    }

    #[test]
    fn test_dual_word_array_round_trip() {
        let values = [0u64, 1, 0xab, 0xff];
        let mut pb = Protoboard::<Fr>::new(FieldType::R1P);
        let words: DualWordArray = (0..values.len())
            .map(|i| DualWord::new(&mut pb, 8, &format!("w{}", i)))
            .collect();
        let unpack =
            DualWordArrayGadget::create(&mut pb, words.clone(), PackingMode::Unpack);
        assert_eq!(unpack.words(), &words);
        unpack.generate_constraints(&mut pb);
        assert_eq!(pb.num_constraints(), values.len() * 9);

        for (packed, value) in words.packed().iter().zip(values) {
            pb.set_val(*packed, Fr::from(value));
        }
        unpack.generate_witness(&mut pb).unwrap();
        assert!(pb.is_satisfied());
        for (i, value) in values.iter().enumerate() {
            let word = words.at(i);
            for bit in 0..8 {
                assert_eq!(pb.val(word.bit(bit)), Fr::from((value >> bit) & 1));
            }
        }
    }

    #[test]
    fn test_dual_word_array_reports_first_bad_word() {
        let mut pb = Protoboard::<Fr>::new(FieldType::R1P);
        let words: DualWordArray = (0..3)
            .map(|i| DualWord::new(&mut pb, 2, &format!("w{}", i)))
            .collect();
        let pack = DualWordArrayGadget::create(&mut pb, words.clone(), PackingMode::Pack);
        pack.generate_constraints(&mut pb);
        pb.set_val(words.at(0).bit(0), Fr::one());
        pb.set_val(words.at(1).bit(1), Fr::from(5u64));
        pb.set_val(words.at(2).bit(1), Fr::one());

        let err = pack.generate_witness(&mut pb).unwrap_err();
        assert!(matches!(err, Error::NonBooleanWitness { index: 1, .. }));
        // Words after the faulty one are still packed.
        let packed = words.packed();
        assert_eq!(pb.val(packed[0]), Fr::one());
        assert_eq!(pb.val(packed[1]), Fr::from(10u64));
        assert_eq!(pb.val(packed[2]), Fr::from(2u64));
    }
}
