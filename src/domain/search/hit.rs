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

//! Search hit module.
//!
//! This module contains the representation of one message matching a
//! search, as returned by the `Search` method, and its wire decoder.

use chrono::{DateTime, Local, NaiveDateTime};
use log::trace;
use serde::Serialize;

use crate::wire::{self, FieldIter, FromWire, ToWire, WireValue};

/// Represents a message matching a search.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Represents the message identifier (URI).
    pub msgid: Option<String>,
    /// Represents the Subject header.
    pub subject: Option<String>,
    /// Represents the name (not the URI) of the folder holding the
    /// message.
    pub folder: Option<String>,
    /// Represents the sender.
    pub sender: Option<String>,
    /// Represents the message size, in bytes.
    pub size: u64,
    pub has_attachment: bool,
    pub is_unread: bool,
    /// Represents the message date, as a UNIX timestamp.
    pub timestamp: i64,
}

impl SearchHit {
    /// Gets the message date in the local timezone.
    pub fn date(&self) -> Option<DateTime<Local>> {
        NaiveDateTime::from_timestamp_opt(self.timestamp, 0)
            .and_then(|date| date.and_local_timezone(Local).earliest())
    }
}

impl FromWire for SearchHit {
    const SIGNATURE: &'static str = "(sssstbbx)";

    fn from_wire(fields: &mut FieldIter) -> wire::iter::Result<Self> {
        let msgid = fields.read_string()?;
        fields.next_field()?;
        let subject = fields.read_string()?;
        fields.next_field()?;
        let folder = fields.read_string()?;
        fields.next_field()?;
        let sender = fields.read_string()?;
        fields.next_field()?;
        let size = fields.read_u64()?;
        fields.next_field()?;
        let has_attachment = fields.read_bool()?;
        fields.next_field()?;
        let is_unread = fields.read_bool()?;
        fields.next_field()?;
        let timestamp = fields.read_i64()?;
        fields.finish()?;

        let hit = Self {
            msgid,
            subject,
            folder,
            sender,
            size,
            has_attachment,
            is_unread,
            timestamp,
        };
        trace!("decoded search hit: {:?}", hit);
        Ok(hit)
    }
}

impl ToWire for SearchHit {
    fn to_wire(&self) -> WireValue {
        WireValue::Struct(vec![
            WireValue::opt_string(self.msgid.as_ref()),
            WireValue::opt_string(self.subject.as_ref()),
            WireValue::opt_string(self.folder.as_ref()),
            WireValue::opt_string(self.sender.as_ref()),
            WireValue::Uint64(self.size),
            WireValue::Boolean(self.has_attachment),
            WireValue::Boolean(self.is_unread),
            WireValue::Int64(self.timestamp),
        ])
    }
}
