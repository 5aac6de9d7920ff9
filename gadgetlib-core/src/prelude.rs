// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Collection of types and traits needed to build circuits out of gadgets.
//!
//! Use this as the only import that you need to interact with the principal
//! data structures of the gadget library.

pub use crate::{
    constraint_system::{
        DualWord, DualWordArray, FieldType, FlagVariable, FlagVariableArray,
        LinearCombination, LinearTerm, MultiPackedWord, PrintOptions,
        Protoboard, Rank1Constraint, UnpackedWord, Variable, VariableArray,
    },
    error::Error,
    gadget::{self, Gadget, GadgetBuilder, GadgetPtr},
    gadgets::{
        AndGadget, BitPackingGadget, DualWordArrayGadget, DualWordGadget,
        OrGadget, PackingMode,
    },
    r1cs::{ConstraintSystem, R1csExample},
};
