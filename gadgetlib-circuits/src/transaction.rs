// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Balance of a transaction: whatever the inputs hold beyond the outputs is
//! the fee.
//!
//! Constraint breakdown:
//!
//! 1. `sum(inputs) - sum(outputs) - fee == 0`
//!
//! # Soundness
//!
//! The amounts are field elements and are **not** range checked. A prover
//! may pick amounts that wrap around the field modulus, for instance an
//! output of `p - 1`, and still satisfy the constraint. This gadget only
//! shows how a field-specific implementation is selected; a real circuit
//! must bound every amount first.

use ark_ff::PrimeField;
use gadgetlib_core::{
    gadget::{self, Gadget, GadgetBuilder},
    gadgets::unsupported_field_type,
    prelude::{
        Error, FieldType, LinearCombination, Protoboard, Variable,
        VariableArray,
    },
    sum,
};

/// Formal parameters of a [`TransactionAmountsGadget`].
#[derive(Clone, Debug)]
pub struct TransactionAmountsBuilder {
    input_amounts: VariableArray,
    output_amounts: VariableArray,
    fee: Variable,
}

impl TransactionAmountsBuilder {
    /// Records the amounts and the fee variable.
    pub fn new(
        input_amounts: &[Variable],
        output_amounts: &[Variable],
        fee: Variable,
    ) -> Self {
        Self {
            input_amounts: input_amounts.to_vec(),
            output_amounts: output_amounts.to_vec(),
            fee,
        }
    }
}

impl<F> GadgetBuilder<F> for TransactionAmountsBuilder
where
    F: PrimeField,
{
    type Gadget = TransactionAmountsGadget;

    const NAME: &'static str = "TransactionAmounts";

    fn init(self, pb: &mut Protoboard<F>) -> TransactionAmountsGadget {
        match pb.field_type() {
            FieldType::R1P => {
                TransactionAmountsGadget::R1P(R1pTransactionAmountsGadget {
                    input_amounts: self.input_amounts,
                    output_amounts: self.output_amounts,
                    fee: self.fee,
                })
            }
            other => unsupported_field_type("TransactionAmounts", other),
        }
    }
}

/// Computes and constrains the fee of a transaction.
#[derive(Clone, Debug)]
pub enum TransactionAmountsGadget {
    /// Prime field of large characteristic.
    R1P(R1pTransactionAmountsGadget),
}

impl TransactionAmountsGadget {
    /// Creates the variant matching the protoboard's regime.
    pub fn create<F>(
        pb: &mut Protoboard<F>,
        input_amounts: &[Variable],
        output_amounts: &[Variable],
        fee: Variable,
    ) -> Self
    where
        F: PrimeField,
    {
        gadget::create(
            pb,
            TransactionAmountsBuilder::new(input_amounts, output_amounts, fee),
        )
    }
}

impl<F> Gadget<F> for TransactionAmountsGadget
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

/// Transaction balance over a prime field.
#[derive(Clone, Debug)]
pub struct R1pTransactionAmountsGadget {
    input_amounts: VariableArray,
    output_amounts: VariableArray,
    fee: Variable,
}

impl R1pTransactionAmountsGadget {
    fn balance<F>(&self) -> LinearCombination<F>
    where
        F: PrimeField,
    {
        sum::<F>(&self.input_amounts) - sum::<F>(&self.output_amounts)
    }
}

impl<F> Gadget<F> for R1pTransactionAmountsGadget
where
    F: PrimeField,
{
    // TODO: range check every amount by unpacking it with a
    // `BitPackingGadget` in UNPACK mode before summing.
    fn generate_constraints(&self, pb: &mut Protoboard<F>) {
        pb.add_unary_constraint(
            self.balance::<F>() - self.fee,
            "sum(inputs) - sum(outputs) - fee == 0",
        );
    }

    fn generate_witness(&self, pb: &mut Protoboard<F>) -> Result<(), Error> {
        let fee = pb.val_lc(&self.balance());
        pb.set_val(self.fee, fee);
        Ok(())
    }
}
