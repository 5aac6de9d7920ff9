// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! The constraint system module stores the [`Protoboard`] together with the
//! value types it is built from: variables, linear combinations, rank-1
//! constraints and the packed / unpacked word variables.

mod constraint;
mod field_type;
mod linear_combination;
mod protoboard;
mod text;
mod variable;
mod word;

pub use constraint::{Rank1Constraint, UnsatisfiedConstraint};
pub use field_type::{multipacked_size, FieldType};
pub use linear_combination::{LinearCombination, LinearTerm};
pub use protoboard::{PrintOptions, Protoboard};
pub use variable::{FlagVariable, FlagVariableArray, Variable, VariableArray};
pub use word::{DualWord, DualWordArray, MultiPackedWord, UnpackedWord};

pub(crate) use text::TextReader;
