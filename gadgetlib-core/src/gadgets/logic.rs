// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Boolean AND / OR over an arbitrary number of inputs.
//!
//! Neither gadget enforces booleanity of its inputs; callers that cannot
//! otherwise guarantee it must add those constraints themselves.

use super::unsupported_field_type;
use crate::{
    constraint_system::{
        FieldType, FlagVariable, FlagVariableArray, LinearCombination,
        Protoboard, Variable,
    },
    error::Error,
    gadget::{self, Gadget, GadgetBuilder},
    util::sum,
};
use ark_ff::PrimeField;
use num_traits::{One, Zero};

/// Formal parameters of an [`AndGadget`].
#[derive(Clone, Debug)]
pub struct AndBuilder {
    input: FlagVariableArray,
    result: FlagVariable,
}

impl AndBuilder {
    /// `result = input[0] AND input[1] AND ...`
    pub fn new(input: &[Variable], result: FlagVariable) -> Self {
        Self {
            input: input.to_vec(),
            result,
        }
    }
}

impl<F> GadgetBuilder<F> for AndBuilder
where
    F: PrimeField,
{
    type Gadget = AndGadget;

    const NAME: &'static str = "AND";

    fn init(self, pb: &mut Protoboard<F>) -> AndGadget {
        match pb.field_type() {
            FieldType::R1P => {
                assert!(!self.input.is_empty(), "AND of an empty input");
                AndGadget::R1P(R1pAndGadget {
                    sum_inverse: pb.allocate("sumInverse"),
                    input: self.input,
                    result: self.result,
                })
            }
            other => unsupported_field_type("AND", other),
        }
    }
}

/// Conjunction of boolean inputs.
#[derive(Clone, Debug)]
pub enum AndGadget {
    /// Prime field of large characteristic.
    R1P(R1pAndGadget),
}

impl AndGadget {
    /// Creates the variant matching the protoboard's regime.
    pub fn create<F>(
        pb: &mut Protoboard<F>,
        input: &[Variable],
        result: FlagVariable,
    ) -> Self
    where
        F: PrimeField,
    {
        gadget::create(pb, AndBuilder::new(input, result))
    }
}

impl<F> Gadget<F> for AndGadget
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

/// AND over a prime field.
///
/// With `sum = sum(input) - n`:
///
/// 1. `sum * result = 0`
/// 2. `sum * sumInverse = 1 - result`
///
/// For boolean inputs `sum` is zero exactly when every input is one.
#[derive(Clone, Debug)]
pub struct R1pAndGadget {
    input: FlagVariableArray,
    result: FlagVariable,
    sum_inverse: Variable,
}

impl R1pAndGadget {
    fn shifted_sum<F>(&self) -> LinearCombination<F>
    where
        F: PrimeField,
    {
        sum(&self.input) - LinearCombination::constant(F::from(self.input.len() as u64))
    }
}

impl<F> Gadget<F> for R1pAndGadget
where
    F: PrimeField,
{
    fn generate_constraints(&self, pb: &mut Protoboard<F>) {
        let sum = self.shifted_sum::<F>();
        pb.add_constraint(
            sum.clone(),
            self.result,
            LinearCombination::zero(),
            "sum * result = 0",
        );
        pb.add_constraint(
            sum,
            self.sum_inverse,
            LinearCombination::one() - self.result,
            "sum * sumInverse = 1 - result",
        );
    }

    fn generate_witness(&self, pb: &mut Protoboard<F>) -> Result<(), Error> {
        let sum = pb.val_lc(&self.shifted_sum());
        let (result, sum_inverse) = match sum.inverse() {
            None => (F::one(), F::zero()),
            Some(inverse) => (F::zero(), inverse),
        };
        pb.set_val(self.result, result);
        pb.set_val(self.sum_inverse, sum_inverse);
        Ok(())
    }
}

/// Formal parameters of an [`OrGadget`].
#[derive(Clone, Debug)]
pub struct OrBuilder {
    input: FlagVariableArray,
    result: FlagVariable,
}

impl OrBuilder {
    /// `result = input[0] OR input[1] OR ...`
    pub fn new(input: &[Variable], result: FlagVariable) -> Self {
        Self {
            input: input.to_vec(),
            result,
        }
    }
}

impl<F> GadgetBuilder<F> for OrBuilder
where
    F: PrimeField,
{
    type Gadget = OrGadget;

    const NAME: &'static str = "OR";

    fn init(self, pb: &mut Protoboard<F>) -> OrGadget {
        match pb.field_type() {
            FieldType::R1P => {
                assert!(!self.input.is_empty(), "OR of an empty input");
                OrGadget::R1P(R1pOrGadget {
                    sum_inverse: pb.allocate("sumInverse"),
                    input: self.input,
                    result: self.result,
                })
            }
            other => unsupported_field_type("OR", other),
        }
    }
}

/// Disjunction of boolean inputs.
#[derive(Clone, Debug)]
pub enum OrGadget {
    /// Prime field of large characteristic.
    R1P(R1pOrGadget),
}

impl OrGadget {
    /// Creates the variant matching the protoboard's regime.
    pub fn create<F>(
        pb: &mut Protoboard<F>,
        input: &[Variable],
        result: FlagVariable,
    ) -> Self
    where
        F: PrimeField,
    {
        gadget::create(pb, OrBuilder::new(input, result))
    }
}

impl<F> Gadget<F> for OrGadget
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

/// OR over a prime field.
///
/// With `sum = sum(input)`:
///
/// 1. `sum * sumInverse = result`
/// 2. `(1 - result) * sum = 0`
#[derive(Clone, Debug)]
pub struct R1pOrGadget {
    input: FlagVariableArray,
    result: FlagVariable,
    sum_inverse: Variable,
}

impl<F> Gadget<F> for R1pOrGadget
where
    F: PrimeField,
{
    fn generate_constraints(&self, pb: &mut Protoboard<F>) {
        let sum: LinearCombination<F> = sum(&self.input);
        pb.add_constraint(
            sum.clone(),
            self.sum_inverse,
            self.result,
            "sum * sumInverse = result",
        );
        pb.add_constraint(
            LinearCombination::one() - self.result,
            sum,
            LinearCombination::zero(),
            "(1 - result) * sum = 0",
        );
    }

    fn generate_witness(&self, pb: &mut Protoboard<F>) -> Result<(), Error> {
        let sum = pb.val_lc(&sum(&self.input));
        let (result, sum_inverse) = match sum.inverse() {
            None => (F::zero(), F::zero()),
            Some(inverse) => (F::one(), inverse),
        };
        pb.set_val(self.result, result);
        pb.set_val(self.sum_inverse, sum_inverse);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::batch_test_field;
    use ark_bls12_377::Bls12_377;
    use ark_bls12_381::Bls12_381;

    fn truth_table<F, G>(
        create: fn(&mut Protoboard<F>, &[Variable], Variable) -> G,
        expected: fn(&[bool]) -> bool,
    ) where
        F: PrimeField,
        G: Gadget<F>,
    {
        for num_inputs in 1..=3usize {
            for mask in 0..(1u32 << num_inputs) {
                let mut pb = Protoboard::<F>::new(FieldType::R1P);
                let input = pb.allocate_array(num_inputs, "input");
                let result = pb.allocate("result");
                let gadget = create(&mut pb, &input, result);
                gadget.generate_constraints(&mut pb);

                let bits: Vec<bool> =
                    (0..num_inputs).map(|i| (mask >> i) & 1 == 1).collect();
                for (var, bit) in input.iter().zip(&bits) {
                    pb.set_val(*var, F::from(*bit as u64));
                }
                gadget.generate_witness(&mut pb).unwrap();
                assert!(pb.is_satisfied());
                assert_eq!(pb.val(result), F::from(expected(&bits) as u64));

                // The opposite result cannot be proven.
                pb.set_val(result, F::one() - pb.val(result));
                assert!(!pb.is_satisfied());
            }
        }
    }

    fn test_and_truth_table<F>()
    where
        F: PrimeField,
    {
        truth_table::<F, _>(AndGadget::create, |bits| bits.iter().all(|b| *b));
    }

    fn test_or_truth_table<F>()
    where
        F: PrimeField,
    {
        truth_table::<F, _>(OrGadget::create, |bits| bits.iter().any(|b| *b));
    }

    fn test_and_allocates_inverse<F>()
    where
        F: PrimeField,
    {
        let mut pb = Protoboard::<F>::new(FieldType::R1P);
        let input = pb.allocate_array(2, "input");
        let result = pb.allocate("result");
        AndGadget::create(&mut pb, &input, result);
        assert_eq!(pb.num_variables(), 4);
        assert_eq!(pb.variable_name(Variable(4)), Some("sumInverse"));
    }

    fn test_and_of_nothing<F>()
    where
        F: PrimeField,
    {
        let mut pb = Protoboard::<F>::new(FieldType::R1P);
        let result = pb.allocate("result");
        AndGadget::create(&mut pb, &[], result);
    }

    fn test_or_on_agnostic_protoboard<F>()
    where
        F: PrimeField,
    {
        let mut pb = Protoboard::<F>::new(FieldType::Agnostic);
        let input = pb.allocate_array(2, "input");
        let result = pb.allocate("result");
        OrGadget::create(&mut pb, &input, result);
    }

    batch_test_field!(
        [
            test_and_truth_table,
            test_or_truth_table,
            test_and_allocates_inverse
        ],
        [test_and_of_nothing, test_or_on_agnostic_protoboard] => (Bls12_381)
    );

    batch_test_field!(
        [test_and_truth_table, test_or_truth_table],
        [] => (Bls12_377)
    );
}
