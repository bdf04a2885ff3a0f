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

//! Wire value module.
//!
//! This module contains the representation of the values carried by
//! D-Bus method calls and replies.

use std::fmt;

/// Represents the wire type of a value, using the D-Bus signature
/// code as display.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum WireType {
    String,
    Boolean,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Struct,
    Array,
    Other,
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let code = match self {
            Self::String => "s",
            Self::Boolean => "b",
            Self::Int32 => "i",
            Self::Uint32 => "u",
            Self::Int64 => "x",
            Self::Uint64 => "t",
            Self::Struct => "()",
            Self::Array => "a",
            Self::Other => "?",
        };
        write!(f, "{}", code)
    }
}

/// Represents a value received from the bus.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum WireValue {
    String(String),
    Boolean(bool),
    Int32(i32),
    Uint32(u32),
    Int64(i64),
    Uint64(u64),
    Struct(Vec<WireValue>),
    Array(Vec<WireValue>),
    /// Represents a value of a type this client never expects. The
    /// inner string is the D-Bus signature of the value.
    Other(String),
}

impl WireValue {
    pub fn wire_type(&self) -> WireType {
        match self {
            Self::String(_) => WireType::String,
            Self::Boolean(_) => WireType::Boolean,
            Self::Int32(_) => WireType::Int32,
            Self::Uint32(_) => WireType::Uint32,
            Self::Int64(_) => WireType::Int64,
            Self::Uint64(_) => WireType::Uint64,
            Self::Struct(_) => WireType::Struct,
            Self::Array(_) => WireType::Array,
            Self::Other(_) => WireType::Other,
        }
    }

    /// Reads the value as an optional string. Empty strings are
    /// considered absent.
    pub fn as_opt_string(&self) -> Option<String> {
        match self {
            Self::String(s) if !s.is_empty() => Some(s.to_owned()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Uint64(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(n) => Some(*n),
            _ => None,
        }
    }

    /// Builds a string value, encoding an absent string as the empty
    /// string.
    pub fn opt_string<S: AsRef<str>>(s: Option<S>) -> Self {
        Self::String(s.map(|s| s.as_ref().to_owned()).unwrap_or_default())
    }
}

/// Represents a positional argument of a method call.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Arg {
    String(String),
    Boolean(bool),
    Int32(i32),
    Uint32(u32),
    Int64(i64),
    Uint64(u64),
}

impl Arg {
    pub fn wire_type(&self) -> WireType {
        match self {
            Self::String(_) => WireType::String,
            Self::Boolean(_) => WireType::Boolean,
            Self::Int32(_) => WireType::Int32,
            Self::Uint32(_) => WireType::Uint32,
            Self::Int64(_) => WireType::Int64,
            Self::Uint64(_) => WireType::Uint64,
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i32> for Arg {
    fn from(n: i32) -> Self {
        Self::Int32(n)
    }
}

impl From<u32> for Arg {
    fn from(n: u32) -> Self {
        Self::Uint32(n)
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Self::Int64(n)
    }
}

impl From<u64> for Arg {
    fn from(n: u64) -> Self {
        Self::Uint64(n)
    }
}

impl From<Arg> for WireValue {
    fn from(arg: Arg) -> Self {
        match arg {
            Arg::String(s) => Self::String(s),
            Arg::Boolean(b) => Self::Boolean(b),
            Arg::Int32(n) => Self::Int32(n),
            Arg::Uint32(n) => Self::Uint32(n),
            Arg::Int64(n) => Self::Int64(n),
            Arg::Uint64(n) => Self::Uint64(n),
        }
    }
}
