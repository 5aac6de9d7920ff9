// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Bit packing.
//!
//! Constraint breakdown:
//!
//! 1. `packed = sum(unpacked[i] * 2^i)`
//! 2. (UNPACK only) every `unpacked[i]` is boolean.

use super::unsupported_field_type;
use crate::{
    constraint_system::{
        FieldType, FlagVariableArray, LinearCombination, Protoboard, Variable,
    },
    error::Error,
    gadget::{self, Gadget, GadgetBuilder},
    util::{field_bit, is_boolean, powers_of},
};
use ark_ff::PrimeField;
use num_traits::Zero;

/// Direction of a packing gadget, fixed when it is created.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PackingMode {
    /// Bits are the input; the witness computes the packed value. Bits are
    /// not constrained to be boolean.
    Pack,
    /// The packed value is the input; the witness decomposes it and every
    /// bit is constrained to be boolean.
    Unpack,
}

/// Formal parameters of a [`BitPackingGadget`].
#[derive(Clone, Debug)]
pub struct BitPackingBuilder {
    unpacked: FlagVariableArray,
    packed: Vec<Variable>,
    mode: PackingMode,
}

impl BitPackingBuilder {
    /// Records the bits (least significant first), the packed variables and
    /// the direction.
    pub fn new(unpacked: &[Variable], packed: &[Variable], mode: PackingMode) -> Self {
        Self {
            unpacked: unpacked.to_vec(),
            packed: packed.to_vec(),
            mode,
        }
    }
}

impl<F> GadgetBuilder<F> for BitPackingBuilder
where
    F: PrimeField,
{
    type Gadget = BitPackingGadget;

    const NAME: &'static str = "BitPacking";

    fn init(self, pb: &mut Protoboard<F>) -> BitPackingGadget {
        match pb.field_type() {
            FieldType::R1P => {
                assert!(
                    self.unpacked.len() < F::size_in_bits(),
                    "cannot pack {} bits into a field of {} bits",
                    self.unpacked.len(),
                    F::size_in_bits()
                );
                BitPackingGadget::R1P(R1pBitPackingGadget::new(
                    self.unpacked,
                    self.packed,
                    self.mode,
                ))
            }
            other => unsupported_field_type("BitPacking", other),
        }
    }
}

/// Keeps a word's bits and its packed value consistent.
#[derive(Clone, Debug)]
pub enum BitPackingGadget {
    /// Prime field of large characteristic.
    R1P(R1pBitPackingGadget),
}

impl BitPackingGadget {
    /// Creates the variant matching the protoboard's regime.
    ///
    /// # Panics
    ///
    /// Panics if the regime has no packing implementation, if `unpacked` is
    /// empty or does not fit in the field, or if `packed` is not exactly
    /// one variable.
    pub fn create<F>(
        pb: &mut Protoboard<F>,
        unpacked: &[Variable],
        packed: &[Variable],
        mode: PackingMode,
    ) -> Self
    where
        F: PrimeField,
    {
        gadget::create(pb, BitPackingBuilder::new(unpacked, packed, mode))
    }
}

impl<F> Gadget<F> for BitPackingGadget
where
    F: PrimeField,
{
    fn generate_constraints(&self, pb: &mut Protoboard<F>) {
        match self {
            Self::R1P(gadget) => gadget.generate_constraints(pb),
        }
    }

    fn generate_witness(&self, pb: &mut Protoboard<F>) -> Result<(), Error> {
        match self {
            Self::R1P(gadget) => gadget.generate_witness(pb),
        }
    }
}

/// Bit packing over a prime field: the whole word lives in a single
/// variable.
#[derive(Clone, Debug)]
pub struct R1pBitPackingGadget {
    unpacked: FlagVariableArray,
    packed: Variable,
    mode: PackingMode,
}

impl R1pBitPackingGadget {
    const NAME: &'static str = "R1P_BitPacking";

    fn new(
        unpacked: FlagVariableArray,
        packed: Vec<Variable>,
        mode: PackingMode,
    ) -> Self {
        assert!(!unpacked.is_empty(), "attempted to pack 0 bits in R1P");
        assert_eq!(
            packed.len(),
            1,
            "attempted to pack into {} variables in R1P",
            packed.len()
        );
        Self {
            unpacked,
            packed: packed[0],
            mode,
        }
    }

    /// Bits, least significant first.
    pub fn unpacked(&self) -> &[Variable] {
        &self.unpacked
    }

    /// The packed variable.
    pub fn packed(&self) -> Variable {
        self.packed
    }

    /// Direction of the gadget.
    pub fn mode(&self) -> PackingMode {
        self.mode
    }
}

impl<F> Gadget<F> for R1pBitPackingGadget
where
    F: PrimeField,
{
    fn generate_constraints(&self, pb: &mut Protoboard<F>) {
        if self.mode == PackingMode::Unpack {
            for bit in &self.unpacked {
                pb.enforce_booleanity(*bit);
            }
        }
        let sum: LinearCombination<F> = self
            .unpacked
            .iter()
            .zip(powers_of(F::from(2u64)))
            .map(|(bit, two_i)| *bit * two_i)
            .collect();
        pb.add_constraint(
            self.packed,
            LinearCombination::one(),
            sum,
            "packed[0] = sum(2^i * unpacked[i])",
        );
    }

    fn generate_witness(&self, pb: &mut Protoboard<F>) -> Result<(), Error> {
        match self.mode {
            PackingMode::Pack => {
                let mut packed = F::zero();
                let mut first_error = None;
                for (index, (bit, two_i)) in self
                    .unpacked
                    .iter()
                    .zip(powers_of(F::from(2u64)))
                    .enumerate()
                {
                    let value = pb.val(*bit);
                    if !is_boolean(&value) {
                        tracing::warn!(
                            gadget = Self::NAME,
                            index,
                            value = %value,
                            "expected a boolean value"
                        );
                        first_error.get_or_insert(Error::NonBooleanWitness {
                            gadget: Self::NAME,
                            index,
                            value: value.to_string(),
                        });
                    }
                    packed += value * two_i;
                }
                pb.set_val(self.packed, packed);
                first_error.map_or(Ok(()), Err)
            }
            PackingMode::Unpack => {
                let packed = pb.val(self.packed);
                for (i, bit) in self.unpacked.iter().enumerate() {
                    pb.set_val(*bit, field_bit(&packed, i));
                }
                Ok(())
            }
        }
    }
}
