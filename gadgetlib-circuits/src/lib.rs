// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! # gadgetlib-circuits
//!
//! Circuits composed from the gadgets of [`gadgetlib_core`]. Each one shows
//! a different aspect of the gadget protocol:
//!
//! - [`NandGadget`] wires a sub-gadget and adds its own constraints on top,
//!   including the booleanity checks its sub-gadget relies on.
//! - [`HashDifficultyGadget`] receives a packed word and unpacks it to
//!   constrain individual bits.
//! - [`TransactionAmountsGadget`] selects a field-specific implementation
//!   from the protoboard's regime.

#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

pub mod difficulty;
pub mod nand;
pub mod transaction;

pub use difficulty::HashDifficultyGadget;
pub use nand::NandGadget;
pub use transaction::{
    R1pTransactionAmountsGadget, TransactionAmountsBuilder,
    TransactionAmountsGadget,
};
