// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! # gadgetlib
//!
//! _A pure Rust library for building rank-1 constraint systems out of
//! composable gadgets._
//!
//! A [`Protoboard`](prelude::Protoboard) collects the variables, the
//! constraints and the witness of one circuit. Gadgets are created against
//! it, describe their constraints once, and then fill in the witness from
//! their assigned inputs. The finished circuit is exported as a
//! [`ConstraintSystem`](prelude::ConstraintSystem) plus its primary and
//! auxiliary inputs, which is what an R1CS proof system consumes.
//!
//! Everything is generic over an [arkworks](https://github.com/arkworks-rs)
//! prime field.
//!
//! ```rust
//! use ark_bls12_381::Fr;
//! use gadgetlib::prelude::*;
//!
//! # fn main() -> Result<(), Error> {
//! let mut pb = Protoboard::<Fr>::new(FieldType::R1P);
//! let inputs = pb.allocate_array(3, "inputs");
//! let output = pb.allocate("output");
//! let nand = NandGadget::create(&mut pb, &inputs, output);
//! nand.generate_constraints(&mut pb);
//!
//! for input in &inputs {
//!     pb.set_val(*input, Fr::from(1u64));
//! }
//! nand.generate_witness(&mut pb)?;
//! assert!(pb.is_satisfied());
//! assert_eq!(pb.val(output), Fr::from(0u64));
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

pub mod prelude;

pub use gadgetlib_core::{
    constraint_system, error, field_bit, gadget, gadgets, is_boolean,
    powers_of, r1cs, sum,
};

/// Circuits composed from the core gadgets.
pub mod circuits {
    pub use gadgetlib_circuits::*;
}
