// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Export of a finished circuit to a proof system.
//!
//! A [`ConstraintSystem`] is the ordered list of constraints of a
//! protoboard together with the number of variables it spans, split into a
//! primary (public) prefix and an auxiliary (private) suffix. An
//! [`R1csExample`] adds the matching witness. Variable `i` of the system
//! corresponds to slot `i - 1` of the concatenated primary and auxiliary
//! inputs.

use crate::{
    constraint_system::{
        LinearCombination, Protoboard, Rank1Constraint, TextReader, Variable,
    },
    error::Error,
};
use ark_ff::{PrimeField, UniformRand};
use rand_core::RngCore;
use std::io::{BufRead, Write};

/// Values of the primary (public) input variables.
pub type PrimaryInput<F> = Vec<F>;

/// Values of the auxiliary (private) input variables.
pub type AuxiliaryInput<F> = Vec<F>;

/// A rank-1 constraint system detached from the protoboard that built it.
#[derive(derivative::Derivative)]
#[derivative(
    Clone(bound = ""),
    Debug(bound = ""),
    Default(bound = ""),
    Eq(bound = ""),
    PartialEq(bound = "")
)]
pub struct ConstraintSystem<F>
where
    F: PrimeField,
{
    /// Number of primary input variables
    pub primary_input_size: usize,

    /// Number of auxiliary input variables
    pub auxiliary_input_size: usize,

    /// Constraints in order
    pub constraints: Vec<Rank1Constraint<F>>,
}

impl<F> ConstraintSystem<F>
where
    F: PrimeField,
{
    /// Number of primary input variables.
    pub fn num_inputs(&self) -> usize {
        self.primary_input_size
    }

    /// Number of variables, not counting the constant one.
    pub fn num_variables(&self) -> usize {
        self.primary_input_size + self.auxiliary_input_size
    }

    /// Number of constraints.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Appends a constraint. Unlike [`Protoboard::add_constraint`] this does
    /// not check it; use [`is_valid`](Self::is_valid) once the system is
    /// complete.
    pub fn add_constraint(&mut self, constraint: Rank1Constraint<F>) {
        self.constraints.push(constraint);
    }

    /// Returns `true` if every constraint only references variables of the
    /// system.
    pub fn is_valid(&self) -> bool {
        let bound = self.num_variables() + 1;
        self.constraints.iter().all(|c| c.is_valid(bound))
    }

    /// Returns `true` if the given inputs have the expected sizes and
    /// satisfy every constraint.
    pub fn is_satisfied(
        &self,
        primary_input: &[F],
        auxiliary_input: &[F],
    ) -> bool {
        if primary_input.len() != self.primary_input_size
            || auxiliary_input.len() != self.auxiliary_input_size
        {
            return false;
        }
        let assignment: Vec<F> = primary_input
            .iter()
            .chain(auxiliary_input)
            .copied()
            .collect();
        self.constraints
            .iter()
            .all(|constraint| constraint.is_satisfied(&assignment))
    }

    /// Writes the system as text: the primary input size, the auxiliary
    /// input size and the number of constraints, one per line, followed by
    /// every constraint.
    pub fn write_text<W>(&self, mut writer: W) -> Result<(), Error>
    where
        W: Write,
    {
        writeln!(writer, "{}", self.primary_input_size)?;
        writeln!(writer, "{}", self.auxiliary_input_size)?;
        writeln!(writer, "{}", self.constraints.len())?;
        for constraint in &self.constraints {
            constraint.write_text(&mut writer)?;
        }
        Ok(())
    }

    /// Reads a system written by [`write_text`](Self::write_text).
    /// Annotations are not part of the format and come back empty.
    pub fn read_text<R>(reader: R) -> Result<Self, Error>
    where
        R: BufRead,
    {
        let mut reader = TextReader::new(reader);
        let primary_input_size = reader.read_usize()?;
        let auxiliary_input_size = reader.read_usize()?;
        let num_constraints = reader.read_usize()?;
        let constraints = (0..num_constraints)
            .map(|_| Rank1Constraint::read_from(&mut reader))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            primary_input_size,
            auxiliary_input_size,
            constraints,
        })
    }
}

/// A constraint system together with a witness for it.
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub struct R1csExample<F>
where
    F: PrimeField,
{
    /// The constraints
    pub constraint_system: ConstraintSystem<F>,

    /// Public part of the witness
    pub primary_input: PrimaryInput<F>,

    /// Private part of the witness
    pub auxiliary_input: AuxiliaryInput<F>,
}

impl<F> R1csExample<F>
where
    F: PrimeField,
{
    /// Returns `true` if the witness satisfies the constraint system.
    pub fn is_satisfied(&self) -> bool {
        self.constraint_system
            .is_satisfied(&self.primary_input, &self.auxiliary_input)
    }

    /// Generates a satisfied example with `num_constraints` constraints and
    /// `num_inputs` primary inputs.
    ///
    /// The first `num_constraints - 1` constraints form a chain over two
    /// random seeds that alternates `(x_i + x_{i+1}) * 1 = x_{i+2}` with
    /// `x_i * x_{i+1} = x_{i+2}`. The last constraint squares the sum of all
    /// previous variables into a fresh one.
    ///
    /// # Panics
    ///
    /// Panics if `num_constraints` is zero or if `num_inputs` exceeds the
    /// `num_constraints + 2` variables of the example.
    pub fn random<R>(num_constraints: usize, num_inputs: usize, rng: &mut R) -> Self
    where
        R: RngCore + ?Sized,
    {
        assert!(num_constraints >= 1, "an example needs a constraint");
        let num_variables = num_constraints + 2;
        assert!(
            num_inputs <= num_variables,
            "{} inputs requested for {} variables",
            num_inputs,
            num_variables
        );

        let mut cs = ConstraintSystem {
            primary_input_size: num_inputs,
            auxiliary_input_size: num_variables - num_inputs,
            constraints: Vec::with_capacity(num_constraints),
        };

        let mut a = F::rand(rng);
        let mut b = F::rand(rng);
        let mut assignment = Vec::with_capacity(num_variables);
        assignment.push(a);
        assignment.push(b);

        for i in 0..num_constraints - 1 {
            let (x, y, z) = (Variable(i + 1), Variable(i + 2), Variable(i + 3));
            let next = if i % 2 == 1 {
                cs.add_constraint(Rank1Constraint::new(
                    x,
                    y,
                    z,
                    format!("x{} * x{}", x.index(), y.index()),
                ));
                a * b
            } else {
                cs.add_constraint(Rank1Constraint::new(
                    LinearCombination::from(x) + y,
                    LinearCombination::one(),
                    z,
                    format!("x{} + x{}", x.index(), y.index()),
                ));
                a + b
            };
            assignment.push(next);
            a = b;
            b = next;
        }

        let all: Vec<Variable> = (1..num_variables).map(Variable).collect();
        let total: F = assignment.iter().copied().sum();
        cs.add_constraint(Rank1Constraint::new(
            crate::sum::<F>(&all),
            crate::sum::<F>(&all),
            Variable(num_variables),
            "sum^2",
        ));
        assignment.push(total.square());

        let auxiliary_input = assignment.split_off(num_inputs);
        Self {
            constraint_system: cs,
            primary_input: assignment,
            auxiliary_input,
        }
    }
}

impl<F> Protoboard<F>
where
    F: PrimeField,
{
    /// The constraints of this protoboard as a detached system, with the
    /// first [`num_primary_inputs`](Protoboard::num_primary_inputs)
    /// variables as primary input.
    pub fn to_constraint_system(&self) -> ConstraintSystem<F> {
        ConstraintSystem {
            primary_input_size: self.num_primary_inputs(),
            auxiliary_input_size: self.num_variables()
                - self.num_primary_inputs(),
            constraints: self.constraints.clone(),
        }
    }

    /// Values of the primary input variables.
    pub fn primary_input(&self) -> PrimaryInput<F> {
        self.assignment[..self.num_primary_inputs()].to_vec()
    }

    /// Values of the auxiliary input variables.
    pub fn auxiliary_input(&self) -> AuxiliaryInput<F> {
        self.assignment[self.num_primary_inputs()..].to_vec()
    }

    /// The constraint system and the current assignment, split into its
    /// primary and auxiliary parts.
    pub fn to_r1cs_example(&self) -> R1csExample<F> {
        R1csExample {
            constraint_system: self.to_constraint_system(),
            primary_input: self.primary_input(),
            auxiliary_input: self.auxiliary_input(),
        }
    }
}
