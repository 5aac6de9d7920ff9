// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! A `Protoboard` is the circuit-builder every gadget writes to.
//!
//! It is the single source of truth for a circuit under construction: it
//! hands out fresh [`Variable`]s, accumulates [`Rank1Constraint`]s in order,
//! and stores the witness assignment as gadgets compute it.
//!
//! Two kinds of failure are kept apart. Referencing a variable the
//! protoboard never allocated is a malformed circuit and panics
//! immediately. A witness that violates a constraint is an ordinary outcome
//! which [`Protoboard::is_satisfied`] reports.

use super::{
    FieldType, LinearCombination, Rank1Constraint, UnsatisfiedConstraint,
    Variable, VariableArray,
};
use ark_ff::PrimeField;
use hashbrown::HashMap;
use num_traits::{One, Zero};

/// Diagnostics printed by [`Protoboard::is_satisfied_with`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrintOptions {
    /// Check silently.
    NoDbgPrint,
    /// Log the first unsatisfied constraint with its evaluated sides and the
    /// names of the variables it references.
    DbgPrintIfNotSatisfied,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::NoDbgPrint
    }
}

/// The Protoboard stores the variable universe, the ordered list of
/// constraints and the current witness assignment of one circuit.
///
/// Index `0` is the constant one; allocated variables start at `1` and
/// variable `i` is stored in assignment slot `i - 1`.
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub struct Protoboard<F>
where
    F: PrimeField,
{
    /// Regime used to select field-specific gadget variants
    field_type: FieldType,

    /// Next index handed out by [`Protoboard::allocate`]
    next_index: usize,

    /// Number of allocated variables, counted from index 1, that form the
    /// primary (public) input
    num_primary_inputs: usize,

    /// Constraints in insertion order
    pub(crate) constraints: Vec<Rank1Constraint<F>>,

    /// Witness values, one slot per allocated variable
    pub(crate) assignment: Vec<F>,

    /// Debug names of the allocated variables
    names: HashMap<usize, String>,
}

impl<F> Default for Protoboard<F>
where
    F: PrimeField,
{
    #[inline]
    fn default() -> Self {
        Self::new(FieldType::default())
    }
}

impl<F> Protoboard<F>
where
    F: PrimeField,
{
    /// Creates an empty protoboard for the given regime.
    pub fn new(field_type: FieldType) -> Self {
        Self::with_expected_size(field_type, 0)
    }

    /// Creates an empty protoboard with room for `expected_size` variables
    /// and constraints, avoiding reallocations while the circuit grows.
    pub fn with_expected_size(
        field_type: FieldType,
        expected_size: usize,
    ) -> Self {
        Self {
            field_type,
            next_index: 1,
            num_primary_inputs: 0,
            constraints: Vec::with_capacity(expected_size),
            assignment: Vec::with_capacity(expected_size),
            names: HashMap::with_capacity(expected_size),
        }
    }

    /// Regime of this protoboard.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Allocates a fresh variable. Indices are handed out sequentially, so
    /// the same sequence of allocations always yields the same variables.
    pub fn allocate(&mut self, name: impl Into<String>) -> Variable {
        let var = Variable(self.next_index);
        self.next_index += 1;
        self.assignment.push(F::zero());
        let name = name.into();
        tracing::trace!(index = var.index(), name = %name, "allocated variable");
        self.names.insert(var.index(), name);
        var
    }

    /// Allocates `len` fresh variables named `name[0]`, `name[1]`, ...
    pub fn allocate_array(&mut self, len: usize, name: &str) -> VariableArray {
        (0..len)
            .map(|i| self.allocate(format!("{}[{}]", name, i)))
            .collect()
    }

    /// Number of allocated variables, not counting the constant one.
    pub fn num_variables(&self) -> usize {
        self.next_index - 1
    }

    /// Index the next call to [`allocate`](Protoboard::allocate) returns.
    pub fn next_free_index(&self) -> usize {
        self.next_index
    }

    /// Number of constraints added so far.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// The constraints, in insertion order.
    pub fn constraints(&self) -> &[Rank1Constraint<F>] {
        &self.constraints
    }

    /// The witness assignment; slot `i - 1` holds the value of variable `i`.
    pub fn assignment(&self) -> &[F] {
        &self.assignment
    }

    /// Debug name given to `var` at allocation.
    pub fn variable_name(&self, var: Variable) -> Option<&str> {
        match var.index() {
            0 => Some("ONE"),
            i => self.names.get(&i).map(String::as_str),
        }
    }

    /// Adds the constraint `a * b = c`.
    ///
    /// # Panics
    ///
    /// Panics if any of the linear combinations references a variable this
    /// protoboard has not allocated.
    pub fn add_constraint<A, B, C>(
        &mut self,
        a: A,
        b: B,
        c: C,
        annotation: impl Into<String>,
    ) where
        A: Into<LinearCombination<F>>,
        B: Into<LinearCombination<F>>,
        C: Into<LinearCombination<F>>,
    {
        let constraint = Rank1Constraint::new(a, b, c, annotation);
        assert!(
            constraint.is_valid(self.next_index),
            "constraint '{}' references a variable that was not allocated \
             (next free index {})",
            constraint.annotation(),
            self.next_index
        );
        tracing::trace!(
            index = self.constraints.len(),
            annotation = constraint.annotation(),
            "added constraint"
        );
        self.constraints.push(constraint);
    }

    /// Adds the constraint `lc == 0`, encoded as `lc * 1 = 0`.
    pub fn add_unary_constraint<L>(
        &mut self,
        lc: L,
        annotation: impl Into<String>,
    ) where
        L: Into<LinearCombination<F>>,
    {
        self.add_constraint(
            lc,
            LinearCombination::one(),
            LinearCombination::zero(),
            annotation,
        );
    }

    /// Adds the boolean constraint `var * (1 - var) = 0`, forcing `var` to be
    /// either `0` or `1`.
    pub fn enforce_booleanity(&mut self, var: Variable) {
        let annotation = format!(
            "enforceBooleanity({})",
            self.variable_name(var).unwrap_or("?")
        );
        self.add_constraint(
            var,
            LinearCombination::one() - var,
            LinearCombination::zero(),
            annotation,
        );
    }

    /// Current value of `var`. Variables that were never assigned read as
    /// zero and the constant slot reads as one.
    ///
    /// # Panics
    ///
    /// Panics if `var` was not allocated by this protoboard.
    pub fn val(&self, var: Variable) -> F {
        match var.index() {
            0 => F::one(),
            i => *self.assignment.get(i - 1).unwrap_or_else(|| {
                panic!("variable x{} was not allocated on this protoboard", i)
            }),
        }
    }

    /// Assigns `value` to `var`.
    ///
    /// # Panics
    ///
    /// Panics for the constant slot and for variables this protoboard did
    /// not allocate.
    pub fn set_val(&mut self, var: Variable, value: F) {
        let index = var.index();
        assert!(index != 0, "the constant variable cannot be assigned");
        match self.assignment.get_mut(index - 1) {
            Some(slot) => *slot = value,
            None => panic!(
                "variable x{} was not allocated on this protoboard",
                index
            ),
        }
    }

    /// Evaluates `lc` against the current assignment.
    pub fn val_lc(&self, lc: &LinearCombination<F>) -> F {
        lc.evaluate(&self.assignment)
    }

    /// Declares the first `num_primary_inputs` allocated variables as the
    /// primary (public) input of the circuit.
    ///
    /// # Panics
    ///
    /// Panics if fewer variables have been allocated.
    pub fn set_num_primary_inputs(&mut self, num_primary_inputs: usize) {
        assert!(
            num_primary_inputs <= self.num_variables(),
            "cannot declare {} primary inputs with {} allocated variables",
            num_primary_inputs,
            self.num_variables()
        );
        self.num_primary_inputs = num_primary_inputs;
    }

    /// Number of primary input variables.
    pub fn num_primary_inputs(&self) -> usize {
        self.num_primary_inputs
    }

    /// Returns the first constraint the current assignment violates.
    pub fn first_unsatisfied(&self) -> Option<UnsatisfiedConstraint<F>> {
        self.constraints
            .iter()
            .enumerate()
            .find_map(|(index, constraint)| {
                let (a, b, c) = constraint.evaluate(&self.assignment);
                #[cfg(feature = "trace-print")]
                tracing::trace!(
                    index,
                    annotation = constraint.annotation(),
                    constraint = %constraint,
                    a = %a,
                    b = %b,
                    c = %c,
                    "evaluated constraint"
                );
                if a * b == c {
                    None
                } else {
                    Some(UnsatisfiedConstraint {
                        index,
                        annotation: constraint.annotation().to_owned(),
                        a,
                        b,
                        c,
                    })
                }
            })
    }

    /// Returns `true` if the current assignment satisfies every constraint.
    pub fn is_satisfied(&self) -> bool {
        self.is_satisfied_with(PrintOptions::NoDbgPrint)
    }

    /// Same as [`is_satisfied`](Protoboard::is_satisfied), optionally
    /// logging the first unsatisfied constraint.
    pub fn is_satisfied_with(&self, options: PrintOptions) -> bool {
        match self.first_unsatisfied() {
            None => true,
            Some(report) => {
                if options == PrintOptions::DbgPrintIfNotSatisfied {
                    let variables: Vec<String> = self.constraints
                        [report.index]
                        .support()
                        .into_iter()
                        .map(|i| {
                            let var = Variable(i);
                            format!(
                                "{} = {}",
                                self.variable_name(var).unwrap_or("?"),
                                self.val(var)
                            )
                        })
                        .collect();
                    tracing::warn!(
                        index = report.index,
                        annotation = %report.annotation,
                        a_times_b = %(report.a * report.b),
                        c = %report.c,
                        variables = ?variables,
                        "constraint not satisfied"
                    );
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::batch_test_field;
    use ark_bls12_377::Bls12_377;
    use ark_bls12_381::Bls12_381;

    fn test_allocation_is_sequential<F>()
    where
        F: PrimeField,
    {
        let mut pb = Protoboard::<F>::new(FieldType::R1P);
        let a = pb.allocate("a");
        let b = pb.allocate_array(3, "b");
        assert_eq!(a.index(), 1);
        assert_eq!(
            b.iter().map(|v| v.index()).collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
        assert_eq!(pb.num_variables(), 4);
        assert_eq!(pb.next_free_index(), 5);
        assert_eq!(pb.variable_name(b[1]), Some("b[1]"));
        assert_eq!(pb.variable_name(Variable::ONE), Some("ONE"));

        // A second protoboard replays the same indices.
        let mut other = Protoboard::<F>::new(FieldType::R1P);
        assert_eq!(other.allocate("a"), a);
    }

    fn test_values<F>()
    where
        F: PrimeField,
    {
        let mut pb = Protoboard::<F>::new(FieldType::R1P);
        let a = pb.allocate("a");
        let b = pb.allocate("b");
        assert_eq!(pb.val(a), F::zero());
        assert_eq!(pb.val(Variable::ONE), F::one());
        pb.set_val(a, F::from(3u64));
        pb.set_val(b, F::from(4u64));
        let lc = LinearCombination::from(a) + b * F::from(2u64);
        assert_eq!(pb.val_lc(&lc), F::from(11u64));
    }

    fn test_satisfaction<F>()
    where
        F: PrimeField,
    {
        let mut pb = Protoboard::<F>::new(FieldType::R1P);
        let a = pb.allocate("a");
        let b = pb.allocate("b");
        let c = pb.allocate("c");
        pb.add_constraint(a, b, c, "a * b = c");
        pb.enforce_booleanity(a);
        assert_eq!(pb.num_constraints(), 2);
        // All zero is a valid witness.
        assert!(pb.is_satisfied());

        pb.set_val(a, F::one());
        pb.set_val(b, F::from(5u64));
        assert!(!pb.is_satisfied_with(PrintOptions::DbgPrintIfNotSatisfied));
        let report = pb.first_unsatisfied().unwrap();
        assert_eq!(report.index, 0);
        assert_eq!(report.annotation, "a * b = c");
        assert_eq!(report.a * report.b, F::from(5u64));
        assert_eq!(report.c, F::zero());

        pb.set_val(c, F::from(5u64));
        assert!(pb.is_satisfied());

        pb.set_val(a, F::from(2u64));
        pb.set_val(c, F::from(10u64));
        let report = pb.first_unsatisfied().unwrap();
        assert_eq!(report.index, 1);
        assert_eq!(report.annotation, "enforceBooleanity(a)");
    }

    fn test_unary_constraint<F>()
    where
        F: PrimeField,
    {
        let mut pb = Protoboard::<F>::new(FieldType::R1P);
        let a = pb.allocate("a");
        pb.add_unary_constraint(
            LinearCombination::from(a) - LinearCombination::constant_int(7),
            "a == 7",
        );
        assert!(!pb.is_satisfied());
        pb.set_val(a, F::from(7u64));
        assert!(pb.is_satisfied());
    }

    fn test_constraint_on_unallocated_variable<F>()
    where
        F: PrimeField,
    {
        let mut pb = Protoboard::<F>::new(FieldType::R1P);
        let a = pb.allocate("a");
        pb.add_constraint(a, Variable(2), a, "bad");
    }

    fn test_read_foreign_variable<F>()
    where
        F: PrimeField,
    {
        let pb = Protoboard::<F>::new(FieldType::R1P);
        pb.val(Variable(1));
    }

    fn test_assign_constant<F>()
    where
        F: PrimeField,
    {
        let mut pb = Protoboard::<F>::new(FieldType::R1P);
        pb.set_val(Variable::ONE, F::zero());
    }

    batch_test_field!(
        [
            test_allocation_is_sequential,
            test_values,
            test_satisfaction,
            test_unary_constraint
        ],
        [
            test_constraint_on_unallocated_variable,
            test_read_foreign_variable,
            test_assign_constant
        ] => (Bls12_381)
    );

    batch_test_field!(
        [
            test_allocation_is_sequential,
            test_values,
            test_satisfaction,
            test_unary_constraint
        ],
        [
            test_constraint_on_unallocated_variable
        ] => (Bls12_377)
    );
}
