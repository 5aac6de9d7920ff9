// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Basic gadgets every larger circuit is built from.

mod dual_word;
mod logic;
mod packing;

pub use dual_word::{DualWordArrayGadget, DualWordGadget};
pub use logic::{
    AndBuilder, AndGadget, OrBuilder, OrGadget, R1pAndGadget, R1pOrGadget,
};
pub use packing::{
    BitPackingBuilder, BitPackingGadget, PackingMode, R1pBitPackingGadget,
};

use crate::constraint_system::FieldType;

/// Panics for a regime that has no implementation of the gadget `name`.
///
/// Factories of field-specific gadgets call this from the fallback arm of
/// their match on [`Protoboard::field_type`](crate::constraint_system::Protoboard::field_type).
pub fn unsupported_field_type(name: &str, field_type: FieldType) -> ! {
    panic!(
        "attempted to create a {} gadget on a protoboard of type {:?}",
        name, field_type
    )
}
