// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Line reader shared by the textual constraint formats.

use crate::error::Error;
use ark_ff::Field;
use ark_serialize::CanonicalDeserialize;
use std::io::BufRead;

/// Reads one value per line, tracking the line number for error reports.
pub(crate) struct TextReader<R> {
    inner: R,
    line: usize,
    buffer: String,
}

impl<R> TextReader<R>
where
    R: BufRead,
{
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            line: 0,
            buffer: String::new(),
        }
    }

    fn next_line(&mut self) -> Result<&str, Error> {
        self.line += 1;
        self.buffer.clear();
        if self.inner.read_line(&mut self.buffer)? == 0 {
            return Err(self.malformed("unexpected end of input"));
        }
        Ok(self.buffer.trim())
    }

    fn malformed(&self, reason: &str) -> Error {
        Error::MalformedText {
            line: self.line,
            reason: reason.to_owned(),
        }
    }

    pub(crate) fn read_usize(&mut self) -> Result<usize, Error> {
        let parsed = self.next_line()?.parse::<usize>();
        parsed.map_err(|_| self.malformed("expected an unsigned integer"))
    }

    pub(crate) fn read_field<F>(&mut self) -> Result<F, Error>
    where
        F: Field,
    {
        let bytes = hex::decode(self.next_line()?)
            .map_err(|_| self.malformed("expected a hex-encoded field element"))?;
        let mut rest = bytes.as_slice();
        let value = F::deserialize(&mut rest)
            .map_err(|_| self.malformed("not a canonical field element"))?;
        if !rest.is_empty() {
            return Err(self.malformed("trailing bytes after field element"));
        }
        Ok(value)
    }
}
