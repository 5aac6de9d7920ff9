// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! # gadgetlib-core
//!
//! _Rank-1 constraint systems built from composable gadgets._
//!
//! The crate is organised bottom-up:
//!
//! - [`constraint_system`] holds the value algebra ([`Variable`],
//!   [`LinearTerm`], [`LinearCombination`]), the [`Rank1Constraint`] and the
//!   [`Protoboard`], which owns the variables, the constraints and the
//!   witness assignment of one circuit.
//! - [`gadget`] defines the two-phase gadget protocol: constraints first,
//!   then the witness.
//! - [`gadgets`] implements the packing, dual-word and logic gadgets every
//!   other circuit builds on.
//! - [`r1cs`] exports a finished protoboard as a constraint system plus its
//!   primary / auxiliary input split, ready for a proof system.
//!
//! All algebra is generic over an arkworks [`PrimeField`](ark_ff::PrimeField).
//!
//! [`Variable`]: constraint_system::Variable
//! [`LinearTerm`]: constraint_system::LinearTerm
//! [`LinearCombination`]: constraint_system::LinearCombination
//! [`Rank1Constraint`]: constraint_system::Rank1Constraint
//! [`Protoboard`]: constraint_system::Protoboard

// Variables have always the same names in respect to the constraint triple.
#![allow(clippy::many_single_char_names)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

mod util;

pub mod constraint_system;
pub mod error;
pub mod gadget;
pub mod gadgets;
pub mod prelude;
pub mod r1cs;

pub use util::{field_bit, is_boolean, powers_of, sum};
