// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! A collection of all recoverable errors encountered while building
//! circuits.
//!
//! Structural misuse of the API (a constraint over an unallocated variable,
//! a packing gadget with the wrong number of packed variables, ...) is a
//! programming error and panics instead.

use ark_serialize::SerializationError;
use thiserror::Error;

/// Defines all recoverable errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A gadget read a witness value that should have been `0` or `1`.
    ///
    /// The gadget still assigns every value it owns before returning this
    /// error, so the resulting assignment can be checked with
    /// [`Protoboard::is_satisfied`](crate::constraint_system::Protoboard::is_satisfied).
    #[error("{gadget}: input[{index}] = {value}, expected a boolean value")]
    NonBooleanWitness {
        /// Name of the gadget reporting the value
        gadget: &'static str,
        /// Position of the offending variable among the gadget inputs
        index: usize,
        /// Offending value
        value: String,
    },

    /// The textual form of a constraint object could not be parsed.
    #[error("malformed input at line {line}: {reason}")]
    MalformedText {
        /// 1-based line number
        line: usize,
        /// What was expected
        reason: String,
    },

    /// A field element could not be (de)serialized.
    #[error("field element serialization failed: {0}")]
    Serialization(String),

    /// Underlying reader or writer failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<SerializationError> for Error {
    fn from(error: SerializationError) -> Self {
        Self::Serialization(format!("{:?}", error))
    }
}
