// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Sparse affine expressions over the variables of a protoboard.
//!
//! A [`LinearCombination`] always keeps its terms strictly sorted by
//! variable index, with at most one term per index. Every constructor
//! normalizes, and addition / subtraction merge two sorted term lists in a
//! single pass, so the invariant never has to be re-established by sorting.

use super::{TextReader, Variable};
use crate::{error::Error, util::from_i64};
use ark_ff::Field;
use ark_serialize::CanonicalSerialize;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FromIterator;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::io::{BufRead, Write};

/// A scaled variable reference `coeff * x_index`.
///
/// Zero coefficients are kept as-is.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct LinearTerm<F>
where
    F: Field,
{
    pub(crate) index: usize,
    pub(crate) coeff: F,
}

impl<F> LinearTerm<F>
where
    F: Field,
{
    /// Creates the term `coeff * var`.
    pub fn new(var: Variable, coeff: F) -> Self {
        Self {
            index: var.index(),
            coeff,
        }
    }

    /// Index of the referenced variable.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The referenced variable.
    pub fn variable(&self) -> Variable {
        Variable(self.index)
    }

    /// Coefficient of the term.
    pub fn coeff(&self) -> F {
        self.coeff
    }

    /// Evaluates the term against an assignment in which slot `i - 1` holds
    /// the value of variable `i`. Missing slots read as zero.
    pub fn evaluate(&self, assignment: &[F]) -> F {
        self.coeff * value_at(assignment, self.index)
    }
}

impl<F> From<Variable> for LinearTerm<F>
where
    F: Field,
{
    fn from(var: Variable) -> Self {
        Self::new(var, F::one())
    }
}

impl<F> Neg for LinearTerm<F>
where
    F: Field,
{
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            index: self.index,
            coeff: -self.coeff,
        }
    }
}

impl<F> Mul<F> for LinearTerm<F>
where
    F: Field,
{
    type Output = Self;

    fn mul(self, coeff: F) -> Self {
        Self {
            index: self.index,
            coeff: self.coeff * coeff,
        }
    }
}

impl<F> Mul<F> for Variable
where
    F: Field,
{
    type Output = LinearTerm<F>;

    fn mul(self, coeff: F) -> LinearTerm<F> {
        LinearTerm::new(self, coeff)
    }
}

/// A normalized sum of [`LinearTerm`]s.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct LinearCombination<F>
where
    F: Field,
{
    terms: Vec<LinearTerm<F>>,
}

impl<F> Default for LinearCombination<F>
where
    F: Field,
{
    fn default() -> Self {
        Self::zero()
    }
}

impl<F> LinearCombination<F>
where
    F: Field,
{
    /// The empty combination, evaluating to zero.
    pub fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    /// The constant `1`.
    pub fn one() -> Self {
        Self::constant(F::one())
    }

    /// The constant `value`, stored as a term on the constant-one slot.
    pub fn constant(value: F) -> Self {
        Self {
            terms: vec![LinearTerm::new(Variable::ONE, value)],
        }
    }

    /// The constant `value` given as a signed integer.
    pub fn constant_int(value: i64) -> Self {
        Self::constant(from_i64(value))
    }

    /// Builds a combination from an arbitrary term list, sorting it and
    /// merging terms that share an index.
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = LinearTerm<F>>,
    {
        let mut terms: Vec<_> = terms.into_iter().collect();
        // Stable, so merged coefficients are summed in insertion order.
        terms.sort_by_key(|term| term.index);
        terms.dedup_by(|next, kept| {
            if next.index == kept.index {
                kept.coeff += next.coeff;
                true
            } else {
                false
            }
        });
        Self { terms }
    }

    /// The normalized terms.
    pub fn terms(&self) -> &[LinearTerm<F>] {
        &self.terms
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the combination has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Adds `coeff * var`, merging with an existing term on the same index.
    pub fn add_term(&mut self, var: Variable, coeff: F) {
        let index = var.index();
        match self.terms.binary_search_by_key(&index, |term| term.index) {
            Ok(pos) => self.terms[pos].coeff += coeff,
            Err(pos) => self.terms.insert(pos, LinearTerm { index, coeff }),
        }
    }

    /// Evaluates the combination against an assignment in which slot
    /// `i - 1` holds the value of variable `i`.
    pub fn evaluate(&self, assignment: &[F]) -> F {
        self.terms
            .iter()
            .map(|term| term.evaluate(assignment))
            .sum()
    }

    /// Checks that every index is below `num_variables` and that the terms
    /// are strictly sorted.
    pub fn is_valid(&self, num_variables: usize) -> bool {
        self.terms.iter().all(|term| term.index < num_variables)
            && self.terms.windows(2).all(|w| w[0].index < w[1].index)
    }

    /// Multiplies every coefficient by `coeff`.
    pub fn scale(&self, coeff: F) -> Self {
        Self {
            terms: self.terms.iter().map(|term| *term * coeff).collect(),
        }
    }

    /// Multiplies every coefficient by a signed integer.
    pub fn scale_int(&self, coeff: i64) -> Self {
        self.scale(from_i64(coeff))
    }

    /// Writes the combination as text: the number of terms, then the index
    /// and the hex-encoded canonical coefficient of each term, one field per
    /// line.
    pub fn write_text<W>(&self, mut writer: W) -> Result<(), Error>
    where
        W: Write,
    {
        writeln!(writer, "{}", self.terms.len())?;
        for term in &self.terms {
            writeln!(writer, "{}", term.index)?;
            let mut bytes = Vec::new();
            term.coeff.serialize(&mut bytes)?;
            writeln!(writer, "{}", hex::encode(bytes))?;
        }
        Ok(())
    }

    /// Reads a combination written by
    /// [`write_text`](LinearCombination::write_text).
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
        // The count is untrusted, so terms are read before anything is
        // reserved for them.
        let len = reader.read_usize()?;
        let mut terms = Vec::new();
        for _ in 0..len {
            let index = reader.read_usize()?;
            let coeff = reader.read_field::<F>()?;
            terms.push(LinearTerm { index, coeff });
        }
        Ok(Self::from_terms(terms))
    }
}

/// Value of variable `index` under `assignment`; index `0` is the constant
/// one and missing slots read as zero.
#[inline]
fn value_at<F>(assignment: &[F], index: usize) -> F
where
    F: Field,
{
    match index {
        0 => F::one(),
        i => assignment.get(i - 1).copied().unwrap_or_else(F::zero),
    }
}

/// Two-pointer merge of two sorted term lists. `map_rhs` is applied to every
/// coefficient taken from `rhs`.
fn merge<F, M>(
    lhs: &[LinearTerm<F>],
    rhs: &[LinearTerm<F>],
    map_rhs: M,
) -> Vec<LinearTerm<F>>
where
    F: Field,
    M: Fn(F) -> F,
{
    let mut merged = Vec::with_capacity(lhs.len() + rhs.len());
    let (mut i, mut j) = (0, 0);
    while i < lhs.len() && j < rhs.len() {
        match lhs[i].index.cmp(&rhs[j].index) {
            Ordering::Less => {
                merged.push(lhs[i]);
                i += 1;
            }
            Ordering::Greater => {
                merged.push(LinearTerm {
                    index: rhs[j].index,
                    coeff: map_rhs(rhs[j].coeff),
                });
                j += 1;
            }
            Ordering::Equal => {
                merged.push(LinearTerm {
                    index: lhs[i].index,
                    coeff: lhs[i].coeff + map_rhs(rhs[j].coeff),
                });
                i += 1;
                j += 1;
            }
        }
    }
    merged.extend_from_slice(&lhs[i..]);
    merged.extend(rhs[j..].iter().map(|term| LinearTerm {
        index: term.index,
        coeff: map_rhs(term.coeff),
    }));
    merged
}

impl<F> From<Variable> for LinearCombination<F>
where
    F: Field,
{
    fn from(var: Variable) -> Self {
        Self {
            terms: vec![LinearTerm::from(var)],
        }
    }
}

impl<F> From<LinearTerm<F>> for LinearCombination<F>
where
    F: Field,
{
    fn from(term: LinearTerm<F>) -> Self {
        Self { terms: vec![term] }
    }
}

impl<F> From<&LinearCombination<F>> for LinearCombination<F>
where
    F: Field,
{
    fn from(lc: &LinearCombination<F>) -> Self {
        lc.clone()
    }
}

impl<F> FromIterator<LinearTerm<F>> for LinearCombination<F>
where
    F: Field,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = LinearTerm<F>>,
    {
        Self::from_terms(iter)
    }
}

impl<'a, F> Add<&'a LinearCombination<F>> for &'a LinearCombination<F>
where
    F: Field,
{
    type Output = LinearCombination<F>;

    fn add(self, rhs: &'a LinearCombination<F>) -> LinearCombination<F> {
        LinearCombination {
            terms: merge(&self.terms, &rhs.terms, |c| c),
        }
    }
}

impl<'a, F> Sub<&'a LinearCombination<F>> for &'a LinearCombination<F>
where
    F: Field,
{
    type Output = LinearCombination<F>;

    fn sub(self, rhs: &'a LinearCombination<F>) -> LinearCombination<F> {
        LinearCombination {
            terms: merge(&self.terms, &rhs.terms, |c| -c),
        }
    }
}

impl<F, T> Add<T> for LinearCombination<F>
where
    F: Field,
    T: Into<LinearCombination<F>>,
{
    type Output = Self;

    fn add(self, rhs: T) -> Self {
        let rhs: LinearCombination<F> = rhs.into();
        &self + &rhs
    }
}

impl<F, T> Sub<T> for LinearCombination<F>
where
    F: Field,
    T: Into<LinearCombination<F>>,
{
    type Output = Self;

    fn sub(self, rhs: T) -> Self {
        let rhs: LinearCombination<F> = rhs.into();
        &self - &rhs
    }
}

impl<F, T> AddAssign<T> for LinearCombination<F>
where
    F: Field,
    T: Into<LinearCombination<F>>,
{
    fn add_assign(&mut self, rhs: T) {
        self.terms = merge(&self.terms, &rhs.into().terms, |c| c);
    }
}

impl<F, T> SubAssign<T> for LinearCombination<F>
where
    F: Field,
    T: Into<LinearCombination<F>>,
{
    fn sub_assign(&mut self, rhs: T) {
        self.terms = merge(&self.terms, &rhs.into().terms, |c| -c);
    }
}

impl<F> Neg for LinearCombination<F>
where
    F: Field,
{
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            terms: self.terms.into_iter().map(Neg::neg).collect(),
        }
    }
}

impl<F> Mul<F> for LinearCombination<F>
where
    F: Field,
{
    type Output = Self;

    fn mul(self, coeff: F) -> Self {
        self.scale(coeff)
    }
}

impl<F> MulAssign<F> for LinearCombination<F>
where
    F: Field,
{
    fn mul_assign(&mut self, coeff: F) {
        self.terms.iter_mut().for_each(|term| term.coeff *= coeff);
    }
}

impl<F> fmt::Display for LinearCombination<F>
where
    F: Field,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            match term.index {
                0 => write!(f, "{}", term.coeff)?,
                index => write!(f, "{} * x{}", term.coeff, index)?,
            }
        }
        Ok(())
    }
}
