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

//! Search hits module.
//!
//! This module contains the representation of the messages matching
//! a search.

use std::ops;

use serde::Serialize;

use crate::SearchHit;

/// Represents the list of search hits, in reply order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHits(pub Vec<SearchHit>);

impl ops::Deref for SearchHits {
    type Target = Vec<SearchHit>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ops::DerefMut for SearchHits {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<SearchHit>> for SearchHits {
    fn from(hits: Vec<SearchHit>) -> Self {
        Self(hits)
    }
}

impl IntoIterator for SearchHits {
    type Item = SearchHit;
    type IntoIter = std::vec::IntoIter<SearchHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
