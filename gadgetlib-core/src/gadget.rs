// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! The two-phase gadget protocol.
//!
//! A gadget is a reusable circuit fragment. Building one happens in two
//! steps: a [`GadgetBuilder`] value records the formal parameters (the
//! variables the gadget reads and writes), then [`create`] runs
//! [`GadgetBuilder::init`] against the protoboard, which allocates the
//! internal variables, picks the field-specific variant and wires the
//! sub-gadgets. Only an initialized gadget is ever handed out.
//!
//! Once created, [`Gadget::generate_constraints`] is called exactly once,
//! before [`Gadget::generate_witness`]. Both recurse into the sub-gadgets the
//! gadget owns. Gadgets only ever append to the protoboard; the variables
//! they reference are plain indices, so they share no other state.
//!
//! # Example
//!
//! ```rust
//! use ark_bls12_381::Fr;
//! use gadgetlib_core::prelude::*;
//!
//! # fn main() -> Result<(), Error> {
//! let mut pb = Protoboard::<Fr>::new(FieldType::R1P);
//! let word = DualWord::new(&mut pb, 8, "word");
//! let unpack = DualWordGadget::create(&mut pb, word.clone(), PackingMode::Unpack);
//! unpack.generate_constraints(&mut pb);
//!
//! pb.set_val(word.multipacked()[0], Fr::from(0b1010_0101u64));
//! unpack.generate_witness(&mut pb)?;
//! assert!(pb.is_satisfied());
//! assert_eq!(pb.val(word.bit(2)), Fr::from(1u64));
//! # Ok(())
//! # }
//! ```

use crate::{constraint_system::Protoboard, error::Error};
use ark_ff::PrimeField;

/// A circuit fragment that can describe its constraints and compute its
/// witness on a [`Protoboard`].
pub trait Gadget<F>
where
    F: PrimeField,
{
    /// Adds the constraints of the gadget and of every sub-gadget to `pb`.
    fn generate_constraints(&self, pb: &mut Protoboard<F>);

    /// Assigns every output and internal variable of the gadget, assuming
    /// its inputs are already assigned.
    ///
    /// Witness-quality problems, such as a bit that should be boolean but
    /// is not, are returned as an [`Error`] only after every value has been
    /// assigned, so that [`Protoboard::is_satisfied`] can still be queried.
    fn generate_witness(&self, pb: &mut Protoboard<F>) -> Result<(), Error>;
}

/// Type-erased gadget, for sub-gadgets whose concrete type is only known
/// at runtime.
pub type GadgetPtr<F> = Box<dyn Gadget<F>>;

impl<F, G> Gadget<F> for Box<G>
where
    F: PrimeField,
    G: Gadget<F> + ?Sized,
{
    fn generate_constraints(&self, pb: &mut Protoboard<F>) {
        (**self).generate_constraints(pb)
    }

    fn generate_witness(&self, pb: &mut Protoboard<F>) -> Result<(), Error> {
        (**self).generate_witness(pb)
    }
}

/// Formal parameters of a gadget, before its internal variables exist.
pub trait GadgetBuilder<F>
where
    F: PrimeField,
{
    /// The initialized gadget.
    type Gadget: Gadget<F>;

    /// Name used in diagnostics.
    const NAME: &'static str;

    /// Allocates internal variables, selects the field-specific variant and
    /// creates sub-gadgets.
    fn init(self, pb: &mut Protoboard<F>) -> Self::Gadget;
}

/// Initializes the gadget described by `builder` on `pb`.
pub fn create<F, B>(pb: &mut Protoboard<F>, builder: B) -> B::Gadget
where
    F: PrimeField,
    B: GadgetBuilder<F>,
{
    tracing::debug!(
        gadget = B::NAME,
        field_type = ?pb.field_type(),
        next_index = pb.next_free_index(),
        "creating gadget"
    );
    builder.init(pb)
}

/// Runs both phases on a freshly created gadget: constraints, then witness.
pub fn generate_all<F, G>(pb: &mut Protoboard<F>, gadget: &G) -> Result<(), Error>
where
    F: PrimeField,
    G: Gadget<F> + ?Sized,
{
    gadget.generate_constraints(pb);
    gadget.generate_witness(pb)
}
