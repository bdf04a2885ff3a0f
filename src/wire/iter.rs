// modest-dbus-client, a Rust client for the Modest D-Bus interface.
// Copyright (C) 2022  soywod <clement.douin@posteo.net>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Field iterator module.
//!
//! This module contains the cursor used by record decoders to walk
//! the fields of one wire struct, together with the traits records
//! implement to be decoded from (and encoded to) the wire.

use std::result;
use thiserror::Error;

use super::{WireType, WireValue};

#[derive(Debug, Error, Eq, PartialEq)]
pub enum DecodeError {
    #[error("cannot decode {record}: expected a struct, got {found}")]
    NotAStructError { record: &'static str, found: WireType },
    #[error("cannot decode field {position}: expected type {expected}, got {found}")]
    TypeMismatchError {
        position: usize,
        expected: WireType,
        found: WireType,
    },
    #[error("cannot decode field {0}: field is missing")]
    MissingFieldError(usize),
    #[error("cannot decode record: {0} trailing field(s) left")]
    TrailingFieldsError(usize),
}

pub type Result<T> = result::Result<T, DecodeError>;

/// Represents a cursor over the fields of one wire struct.
#[derive(Debug, Clone)]
pub struct FieldIter<'a> {
    fields: &'a [WireValue],
    position: usize,
}

impl<'a> FieldIter<'a> {
    pub fn new(fields: &'a [WireValue]) -> Self {
        Self {
            fields,
            position: 0,
        }
    }

    /// Builds an iterator over the fields of the given value, which
    /// must be a struct.
    pub fn from_struct(value: &'a WireValue, record: &'static str) -> Result<Self> {
        match value {
            WireValue::Struct(fields) => Ok(Self::new(fields)),
            value => Err(DecodeError::NotAStructError {
                record,
                found: value.wire_type(),
            }),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<&'a WireValue> {
        self.fields.get(self.position)
    }

    pub fn current_type(&self) -> Option<WireType> {
        self.current().map(WireValue::wire_type)
    }

    pub fn has_next(&self) -> bool {
        self.position + 1 < self.fields.len()
    }

    /// Moves to the next field. Fails when there is none.
    pub fn next_field(&mut self) -> Result<()> {
        if !self.has_next() {
            return Err(DecodeError::MissingFieldError(self.position + 1));
        }
        self.position += 1;
        Ok(())
    }

    /// Checks that the current field is the last one.
    pub fn finish(&self) -> Result<()> {
        let left = self.fields.len().saturating_sub(self.position + 1);
        if left > 0 {
            return Err(DecodeError::TrailingFieldsError(left));
        }
        Ok(())
    }

    fn expect(&self, expected: WireType) -> Result<&'a WireValue> {
        let value = self
            .current()
            .ok_or(DecodeError::MissingFieldError(self.position))?;
        let found = value.wire_type();
        if found != expected {
            return Err(DecodeError::TypeMismatchError {
                position: self.position,
                expected,
                found,
            });
        }
        Ok(value)
    }

    pub fn read_string(&self) -> Result<Option<String>> {
        Ok(self.expect(WireType::String)?.as_opt_string())
    }

    pub fn read_bool(&self) -> Result<bool> {
        Ok(self
            .expect(WireType::Boolean)?
            .as_bool()
            .unwrap_or_default())
    }

    pub fn read_u64(&self) -> Result<u64> {
        Ok(self.expect(WireType::Uint64)?.as_u64().unwrap_or_default())
    }

    pub fn read_i64(&self) -> Result<i64> {
        Ok(self.expect(WireType::Int64)?.as_i64().unwrap_or_default())
    }
}

/// Decodes a record from one wire struct.
pub trait FromWire: Sized {
    /// Represents the D-Bus signature of the struct.
    const SIGNATURE: &'static str;

    fn from_wire(fields: &mut FieldIter) -> Result<Self>;

    fn from_wire_value(value: &WireValue) -> Result<Self> {
        let mut fields = FieldIter::from_struct(value, Self::SIGNATURE)?;
        Self::from_wire(&mut fields)
    }
}

/// Encodes a record into one wire struct.
pub trait ToWire {
    fn to_wire(&self) -> WireValue;
}
