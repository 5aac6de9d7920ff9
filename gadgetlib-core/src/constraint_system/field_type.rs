// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

/// Algebraic regime a protoboard is built for.
///
/// Gadgets with field-specific implementations pick their variant from the
/// protoboard's tag when they are created.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FieldType {
    /// No regime selected. Only field-agnostic gadgets can be created.
    Agnostic,
    /// Rank-1 constraints over a prime field of large characteristic.
    R1P,
}

impl Default for FieldType {
    fn default() -> Self {
        Self::R1P
    }
}

/// Number of variables needed to hold a packed word of `num_bits` bits.
///
/// # Panics
///
/// Panics for [`FieldType::Agnostic`], which has no packing rule.
pub fn multipacked_size(_num_bits: usize, field_type: FieldType) -> usize {
    match field_type {
        // The capacity of the concrete field is checked by the packing
        // gadget.
        FieldType::R1P => 1,
        FieldType::Agnostic => {
            panic!("Unknown field type for packed variable: {:?}", field_type)
        }
    }
}
