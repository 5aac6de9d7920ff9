// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! NAND of an arbitrary number of boolean inputs.
//!
//! Constraint breakdown:
//!
//! 1. the constraints of an [`AndGadget`] computing `andResult`
//! 2. `1 * (1 - andResult) = output`
//! 3. every input is boolean
//!
//! The AND gadget does not check its inputs. Without (3) the inputs
//! `{2, 1, 0}` with `andResult = 1` would satisfy its constraints.

use ark_ff::PrimeField;
use gadgetlib_core::{
    gadget::{self, Gadget, GadgetBuilder},
    gadgets::AndGadget,
    is_boolean,
    prelude::{Error, FlagVariable, LinearCombination, Protoboard, Variable},
};
use num_traits::One;

struct NandBuilder {
    inputs: Vec<FlagVariable>,
    output: FlagVariable,
}

impl<F> GadgetBuilder<F> for NandBuilder
where
    F: PrimeField,
{
    type Gadget = NandGadget;

    const NAME: &'static str = "NAND";

    fn init(self, pb: &mut Protoboard<F>) -> NandGadget {
        let and_result = pb.allocate("andResult");
        let and = AndGadget::create(pb, &self.inputs, and_result);
        NandGadget {
            inputs: self.inputs,
            output: self.output,
            and_result,
            and,
        }
    }
}

/// `output = NOT (inputs[0] AND inputs[1] AND ...)`
#[derive(Clone, Debug)]
pub struct NandGadget {
    inputs: Vec<FlagVariable>,
    output: FlagVariable,
    and_result: FlagVariable,
    and: AndGadget,
}

impl NandGadget {
    const NAME: &'static str = "NAND";

    /// Creates the gadget, allocating the intermediate AND result.
    pub fn create<F>(
        pb: &mut Protoboard<F>,
        inputs: &[Variable],
        output: FlagVariable,
    ) -> Self
    where
        F: PrimeField,
    {
        gadget::create(
            pb,
            NandBuilder {
                inputs: inputs.to_vec(),
                output,
            },
        )
    }

    /// Variable holding the conjunction of the inputs.
    pub fn and_result(&self) -> FlagVariable {
        self.and_result
    }
}

impl<F> Gadget<F> for NandGadget
where
    F: PrimeField,
{
    fn generate_constraints(&self, pb: &mut Protoboard<F>) {
        self.and.generate_constraints(pb);
        pb.add_constraint(
            LinearCombination::one(),
            LinearCombination::one() - self.and_result,
            self.output,
            "1 * (1 - andResult) = output",
        );
        for input in &self.inputs {
            pb.enforce_booleanity(*input);
        }
    }

    fn generate_witness(&self, pb: &mut Protoboard<F>) -> Result<(), Error> {
        let mut first_error = None;
        for (index, input) in self.inputs.iter().enumerate() {
            let value = pb.val(*input);
            if !is_boolean(&value) {
                tracing::warn!(
                    gadget = Self::NAME,
                    index,
                    value = %value,
                    "NAND input is not boolean"
                );
                first_error.get_or_insert(Error::NonBooleanWitness {
                    gadget: Self::NAME,
                    index,
                    value: value.to_string(),
                });
            }
        }
        if let Err(error) = self.and.generate_witness(pb) {
            first_error.get_or_insert(error);
        }
        let output = F::one() - pb.val(self.and_result);
        pb.set_val(self.output, output);
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::batch_test_circuit;
    use ark_bls12_377::Bls12_377;
    use ark_bls12_381::Bls12_381;
    use gadgetlib_core::prelude::FieldType;
    use num_traits::Zero;

    fn test_nand_walkthrough<F>()
    where
        F: PrimeField,
    {
        let mut pb = Protoboard::<F>::new(FieldType::R1P);
        let inputs = pb.allocate_array(5, "inputs");
        let output = pb.allocate("output");
        assert_eq!(pb.next_free_index(), 7);

        let nand = NandGadget::create(&mut pb, &inputs, output);
        // andResult and the inverse of the AND sum
        assert_eq!(pb.next_free_index(), 9);
        nand.generate_constraints(&mut pb);
        assert_eq!(pb.num_constraints(), 2 + 1 + 5);

        for input in &inputs {
            pb.set_val(*input, F::one());
        }
        nand.generate_witness(&mut pb).unwrap();
        assert!(pb.is_satisfied());
        assert_eq!(pb.val(output), F::zero());

        pb.set_val(inputs[2], F::zero());
        assert!(!pb.is_satisfied());

        // Booleanity catches a non-boolean input.
        pb.set_val(inputs[1], F::from(2u64));
        assert!(!pb.is_satisfied());

        pb.set_val(inputs[1], F::one());
        assert_eq!(pb.val(output), F::zero());
        nand.generate_witness(&mut pb).unwrap();
        assert_eq!(pb.val(output), F::one());
        assert!(pb.is_satisfied());
    }

    fn test_nand_cheating_without_booleanity<F>()
    where
        F: PrimeField,
    {
        let mut pb = Protoboard::<F>::new(FieldType::R1P);
        let inputs = pb.allocate_array(3, "inputs");
        let output = pb.allocate("output");
        let nand = NandGadget::create(&mut pb, &inputs, output);
        nand.generate_constraints(&mut pb);

        for (input, value) in inputs.iter().zip([2u64, 1, 0]) {
            pb.set_val(*input, F::from(value));
        }
        pb.set_val(nand.and_result(), F::one());
        pb.set_val(output, F::zero());
        // 2 + 1 + 0 - 3 = 0, so the AND constraints hold with any inverse.
        let report = pb.first_unsatisfied().unwrap();
        assert_eq!(report.annotation, "enforceBooleanity(inputs[0])");
    }

    fn test_nand_reports_non_boolean_input<F>()
    where
        F: PrimeField,
    {
        let mut pb = Protoboard::<F>::new(FieldType::R1P);
        let inputs = pb.allocate_array(2, "inputs");
        let output = pb.allocate("output");
        let nand = NandGadget::create(&mut pb, &inputs, output);
        nand.generate_constraints(&mut pb);
        pb.set_val(inputs[0], F::one());
        pb.set_val(inputs[1], F::from(3u64));

        let err = nand.generate_witness(&mut pb).unwrap_err();
        assert!(matches!(
            err,
            Error::NonBooleanWitness {
                gadget: "NAND",
                index: 1,
                ..
            }
        ));
        assert!(!pb.is_satisfied());
    }

    batch_test_circuit!(
        [
            test_nand_walkthrough,
            test_nand_cheating_without_booleanity,
            test_nand_reports_non_boolean_input
        ],
        [] => (Bls12_381)
    );

    batch_test_circuit!(
        [test_nand_walkthrough],
        [] => (Bls12_377)
    );
}
