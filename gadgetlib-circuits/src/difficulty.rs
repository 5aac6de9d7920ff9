// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Proof-of-work style difficulty check on a 64-bit hash value.
//!
//! The hash is received packed. Checking its leading bits needs the bit
//! representation, so the gadget pairs it with fresh bit variables in a
//! [`DualWord`] and unpacks it. Everything else that uses the hash can keep
//! working on the single packed variable.

use ark_ff::PrimeField;
use gadgetlib_core::{
    gadget::{self, Gadget, GadgetBuilder},
    prelude::{
        DualWord, DualWordGadget, Error, MultiPackedWord, PackingMode,
        Protoboard, UnpackedWord,
    },
};

/// Width of the hash value in bits.
pub const HASH_SIZE_IN_BITS: usize = 64;

struct HashDifficultyBuilder {
    hash_value: MultiPackedWord,
    difficulty_bits: usize,
}

impl<F> GadgetBuilder<F> for HashDifficultyBuilder
where
    F: PrimeField,
{
    type Gadget = HashDifficultyGadget;

    const NAME: &'static str = "HashDifficulty";

    fn init(self, pb: &mut Protoboard<F>) -> HashDifficultyGadget {
        assert_eq!(
            self.hash_value.len(),
            1,
            "multipacked word size too large"
        );
        assert!(
            self.difficulty_bits <= HASH_SIZE_IN_BITS,
            "difficulty of {} bits on a {} bit hash",
            self.difficulty_bits,
            HASH_SIZE_IN_BITS
        );
        let bits = UnpackedWord::new(pb, HASH_SIZE_IN_BITS, "hashValue_u");
        let word = DualWord::from_parts(self.hash_value, bits);
        let unpacker = DualWordGadget::create(pb, word, PackingMode::Unpack);
        HashDifficultyGadget {
            difficulty_bits: self.difficulty_bits,
            unpacker,
        }
    }
}

/// Checks that the `difficulty_bits` most significant bits of a 64-bit
/// hash value are zero.
#[derive(Clone, Debug)]
pub struct HashDifficultyGadget {
    difficulty_bits: usize,
    unpacker: DualWordGadget,
}

impl HashDifficultyGadget {
    /// Creates the gadget for the packed `hash_value`.
    ///
    /// # Panics
    ///
    /// Panics if `hash_value` is packed into more than one variable or if
    /// `difficulty_bits` exceeds the hash width.
    pub fn create<F>(
        pb: &mut Protoboard<F>,
        hash_value: MultiPackedWord,
        difficulty_bits: usize,
    ) -> Self
    where
        F: PrimeField,
    {
        gadget::create(
            pb,
            HashDifficultyBuilder {
                hash_value,
                difficulty_bits,
            },
        )
    }

    /// The hash in both representations.
    pub fn hash_value(&self) -> &DualWord {
        self.unpacker.word()
    }
}

impl<F> Gadget<F> for HashDifficultyGadget
where
    F: PrimeField,
{
    fn generate_constraints(&self, pb: &mut Protoboard<F>) {
        self.unpacker.generate_constraints(pb);
        // unpacked()[0] is the least significant bit.
        let word = self.unpacker.word();
        for i in 0..self.difficulty_bits {
            let msb = HASH_SIZE_IN_BITS - 1 - i;
            pb.add_unary_constraint(
                word.bit(msb),
                format!("hashValue[{}] == 0", msb),
            );
        }
    }

    /// Unpacks the hash. A hash missing the difficulty is not an error here;
    /// it shows up as an unsatisfied circuit.
    fn generate_witness(&self, pb: &mut Protoboard<F>) -> Result<(), Error> {
        self.unpacker.generate_witness(pb)
    }
}
