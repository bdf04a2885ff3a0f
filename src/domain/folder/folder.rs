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

//! Folder module.
//!
//! This module contains the representation of a folder as returned
//! by the `GetFolders` method, and its wire decoder.

use log::trace;
use serde::Serialize;
use std::fmt;

use crate::wire::{self, FieldIter, FromWire, ToWire, WireValue};

/// Represents the folder.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FolderResult {
    /// Represents the folder name.
    pub folder_name: Option<String>,
    /// Represents the folder URI.
    pub folder_uri: Option<String>,
}

impl fmt::Display for FolderResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.folder_name.as_deref().unwrap_or_default())
    }
}

impl FromWire for FolderResult {
    const SIGNATURE: &'static str = "(ss)";

    fn from_wire(fields: &mut FieldIter) -> wire::iter::Result<Self> {
        let folder_name = fields.read_string()?;
        fields.next_field()?;
        let folder_uri = fields.read_string()?;
        fields.finish()?;

        let folder = Self {
            folder_name,
            folder_uri,
        };
        trace!("decoded folder: {:?}", folder);
        Ok(folder)
    }
}

impl ToWire for FolderResult {
    fn to_wire(&self) -> WireValue {
        WireValue::Struct(vec![
            WireValue::opt_string(self.folder_name.as_ref()),
            WireValue::opt_string(self.folder_uri.as_ref()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use crate::wire::{DecodeError, WireType};

    use super::*;

    fn tuple(fields: Vec<WireValue>) -> WireValue {
        WireValue::Struct(fields)
    }

    #[test]
    fn decode_folder() {
        let value = tuple(vec![
            WireValue::String("INBOX".into()),
            WireValue::String("pop://a@b/INBOX".into()),
        ]);

        let folder = FolderResult::from_wire_value(&value).unwrap();
        assert_eq!(Some("INBOX"), folder.folder_name.as_deref());
        assert_eq!(Some("pop://a@b/INBOX"), folder.folder_uri.as_deref());
        assert_eq!("INBOX", folder.to_string());
        assert_eq!(value, folder.to_wire());
    }

    #[test]
    fn decode_folder_with_empty_uri() {
        let value = tuple(vec![
            WireValue::String("Outbox".into()),
            WireValue::String("".into()),
        ]);

        let folder = FolderResult::from_wire_value(&value).unwrap();
        assert_eq!(None, folder.folder_uri);
    }

    #[test]
    fn decode_folder_fails() {
        // Checks that a folder with a missing uri is rejected
        let value = tuple(vec![WireValue::String("INBOX".into())]);
        assert_eq!(
            Err(DecodeError::MissingFieldError(1)),
            FolderResult::from_wire_value(&value)
        );

        // Checks that a folder with a wrongly typed uri is rejected
        let value = tuple(vec![
            WireValue::String("INBOX".into()),
            WireValue::Uint32(1),
        ]);
        assert_eq!(
            Err(DecodeError::TypeMismatchError {
                position: 1,
                expected: WireType::String,
                found: WireType::Uint32,
            }),
            FolderResult::from_wire_value(&value)
        );

        // Checks that trailing fields are rejected too
        let value = tuple(vec![
            WireValue::String("INBOX".into()),
            WireValue::String("uri".into()),
            WireValue::String("extra".into()),
        ]);
        assert_eq!(
            Err(DecodeError::TrailingFieldsError(1)),
            FolderResult::from_wire_value(&value)
        );
    }
}
