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

//! Search query module.
//!
//! This module contains the representation of the criteria sent
//! along with the `Search` method.

use bitflags::bitflags;
use chrono::{DateTime, Local};

use crate::wire::Arg;

bitflags! {
    /// Represents the message parts the query is matched against.
    #[derive(Default)]
    pub struct SearchFlags: u32 {
        const SUBJECT = 1 << 0;
        const SENDER = 1 << 1;
        const RECIPIENT = 1 << 2;
        const SIZE = 1 << 3;
        const BODY = 1 << 6;
    }
}

/// Represents the search criteria.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Represents the text to look for.
    pub query: String,
    /// Restricts the search to the given folder. Searches every
    /// folder when absent.
    pub folder: Option<String>,
    /// Ignores messages older than this date.
    pub start_date: Option<DateTime<Local>>,
    /// Ignores messages newer than this date.
    pub end_date: Option<DateTime<Local>>,
    /// Ignores messages smaller than this size, in bytes. Only used
    /// with [`SearchFlags::SIZE`].
    pub min_size: u32,
    pub flags: SearchFlags,
}

impl SearchQuery {
    pub fn new<Q: ToString>(query: Q, flags: SearchFlags) -> Self {
        Self {
            query: query.to_string(),
            flags,
            ..Self::default()
        }
    }

    pub fn folder<F: ToString>(mut self, folder: F) -> Self {
        self.folder = Some(folder.to_string());
        self
    }

    pub fn between(
        mut self,
        start_date: Option<DateTime<Local>>,
        end_date: Option<DateTime<Local>>,
    ) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    pub fn min_size(mut self, min_size: u32) -> Self {
        self.min_size = min_size;
        self.flags |= SearchFlags::SIZE;
        self
    }

    /// Builds the positional arguments of the `Search` method: query,
    /// folder, start date, end date, flags and minimum size.
    pub fn to_args(&self) -> Vec<Arg> {
        let timestamp = |date: &Option<DateTime<Local>>| {
            date.as_ref().map(DateTime::timestamp).unwrap_or_default()
        };

        vec![
            Arg::from(self.query.as_str()),
            Arg::from(self.folder.clone().unwrap_or_default()),
            Arg::Int64(timestamp(&self.start_date)),
            Arg::Int64(timestamp(&self.end_date)),
            Arg::Int32(self.flags.bits() as i32),
            Arg::Uint32(self.min_size),
        ]
    }
}
