// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Rank-1 constraints.

use super::{LinearCombination, TextReader};
use crate::error::Error;
use ark_ff::Field;
use core::fmt;
use std::io::{BufRead, Write};

/// The constraint `A(x) * B(x) = C(x)` together with a human readable
/// annotation used in diagnostics.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rank1Constraint<F>
where
    F: Field,
{
    a: LinearCombination<F>,
    b: LinearCombination<F>,
    c: LinearCombination<F>,
    annotation: String,
}

impl<F> Rank1Constraint<F>
where
    F: Field,
{
    /// Creates a new constraint.
    pub fn new<A, B, C>(a: A, b: B, c: C, annotation: impl Into<String>) -> Self
    where
        A: Into<LinearCombination<F>>,
        B: Into<LinearCombination<F>>,
        C: Into<LinearCombination<F>>,
    {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
            annotation: annotation.into(),
        }
    }

    /// Left factor.
    pub fn a(&self) -> &LinearCombination<F> {
        &self.a
    }

    /// Right factor.
    pub fn b(&self) -> &LinearCombination<F> {
        &self.b
    }

    /// Product.
    pub fn c(&self) -> &LinearCombination<F> {
        &self.c
    }

    /// Annotation given when the constraint was added.
    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    /// Evaluates `(A(x), B(x), C(x))`.
    pub fn evaluate(&self, assignment: &[F]) -> (F, F, F) {
        (
            self.a.evaluate(assignment),
            self.b.evaluate(assignment),
            self.c.evaluate(assignment),
        )
    }

    /// Returns `true` if `A(x) * B(x) == C(x)`.
    pub fn is_satisfied(&self, assignment: &[F]) -> bool {
        let (a, b, c) = self.evaluate(assignment);
        a * b == c
    }

    /// Checks that the three linear combinations only reference indices
    /// below `num_variables`.
    pub fn is_valid(&self, num_variables: usize) -> bool {
        self.a.is_valid(num_variables)
            && self.b.is_valid(num_variables)
            && self.c.is_valid(num_variables)
    }

    /// Every variable index referenced by the constraint, sorted and
    /// deduplicated.
    pub fn support(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .a
            .terms()
            .iter()
            .chain(self.b.terms())
            .chain(self.c.terms())
            .map(|term| term.index())
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    /// Writes `A`, `B` and `C` in the linear combination text format. The
    /// annotation is not part of the format.
    pub fn write_text<W>(&self, mut writer: W) -> Result<(), Error>
    where
        W: Write,
    {
        self.a.write_text(&mut writer)?;
        self.b.write_text(&mut writer)?;
        self.c.write_text(&mut writer)
    }

    /// Reads a constraint written by
    /// [`write_text`](Rank1Constraint::write_text).
    pub fn read_text<R>(reader: R) -> Result<Self, Error>
    where
        R: BufRead,
    {
        Self::read_from(&mut TextReader::new(reader))
    }

    pub(crate) fn read_from<R>(
        reader: &mut TextReader<R>,
    ) -> Result<Self, Error>
    where
        R: BufRead,
    {
        let a = LinearCombination::read_from(reader)?;
        let b = LinearCombination::read_from(reader)?;
        let c = LinearCombination::read_from(reader)?;
        Ok(Self::new(a, b, c, String::new()))
    }
}

impl<F> fmt::Display for Rank1Constraint<F>
where
    F: Field,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) * ({}) = {}", self.a, self.b, self.c)
    }
}

/// Report for the first constraint a witness fails.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnsatisfiedConstraint<F>
where
    F: Field,
{
    /// Position of the constraint on the protoboard.
    pub index: usize,
    /// Annotation of the constraint.
    pub annotation: String,
    /// `A(x)`
    pub a: F,
    /// `B(x)`
    pub b: F,
    /// `C(x)`
    pub c: F,
}

impl<F> fmt::Display for UnsatisfiedConstraint<F>
where
    F: Field,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "constraint #{} '{}' not satisfied: A * B = {}, C = {}",
            self.index,
            self.annotation,
            self.a * self.b,
            self.c
        )
    }
}
