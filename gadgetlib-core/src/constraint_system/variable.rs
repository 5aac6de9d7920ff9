// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Formal variables of a [`Protoboard`](super::Protoboard).

/// The value is a reference to a slot of the witness assignment held by the
/// protoboard that allocated it.
///
/// Index `0` is reserved for the constant `1`. Variables allocated by a
/// protoboard start at index `1`, and variable `i` reads assignment slot
/// `i - 1`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Variable(pub(crate) usize);

impl Variable {
    /// The reserved variable that always evaluates to one.
    pub const ONE: Variable = Variable(0);

    /// Index of the variable in the protoboard's universe.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    /// Returns `true` for the reserved constant-one slot.
    #[inline]
    pub fn is_constant(self) -> bool {
        self.0 == 0
    }
}

/// A variable meant to hold `0` or `1`.
///
/// This is only a naming convention. Booleanity has to be enforced with
/// [`Protoboard::enforce_booleanity`](super::Protoboard::enforce_booleanity).
pub type FlagVariable = Variable;

/// An ordered collection of variables.
pub type VariableArray = Vec<Variable>;

/// An ordered collection of flag variables.
pub type FlagVariableArray = Vec<FlagVariable>;
