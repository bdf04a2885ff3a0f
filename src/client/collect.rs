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

//! Result collector module.
//!
//! This module turns the array-of-structs argument of a reply into a
//! list of records.

use log::{debug, warn};

use crate::wire::{FromWire, WireValue};

/// Decodes every element of the array, in order. Elements that fail
/// to decode are dropped. Returns `None` when the value is not an
/// array.
pub fn collect_records<R: FromWire>(value: &WireValue) -> Option<Vec<R>> {
    let elements = match value {
        WireValue::Array(elements) => elements,
        _ => return None,
    };

    let records: Vec<R> = elements
        .iter()
        .enumerate()
        .filter_map(|(i, element)| match R::from_wire_value(element) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("skipping element {} of {} reply: {}", i, R::SIGNATURE, err);
                None
            }
        })
        .collect();

    debug!(
        "collected {} record(s) out of {} element(s)",
        records.len(),
        elements.len()
    );
    Some(records)
}

#[cfg(test)]
mod tests {
    use crate::{FolderResult, SearchHit};

    use super::*;

    fn folder(name: &str) -> WireValue {
        WireValue::Struct(vec![
            WireValue::String(name.into()),
            WireValue::String(format!("local://{}", name)),
        ])
    }

    #[test]
    fn collect_keeps_reply_order() {
        let reply = WireValue::Array(vec![folder("INBOX"), folder("Drafts"), folder("Sent")]);

        let names: Vec<_> = collect_records::<FolderResult>(&reply)
            .unwrap()
            .into_iter()
            .map(|folder| folder.folder_name.unwrap())
            .collect();
        assert_eq!(vec!["INBOX", "Drafts", "Sent"], names);
    }

    #[test]
    fn collect_drops_malformed_elements() {
        let reply = WireValue::Array(vec![
            folder("INBOX"),
            WireValue::Struct(vec![WireValue::String("broken".into())]),
            WireValue::String("not a struct".into()),
            folder("Sent"),
        ]);

        let folders = collect_records::<FolderResult>(&reply).unwrap();
        assert_eq!(2, folders.len());
        assert_eq!(Some("Sent"), folders[1].folder_name.as_deref());
    }

    #[test]
    fn collect_empty_array() {
        let hits = collect_records::<SearchHit>(&WireValue::Array(vec![])).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn collect_requires_array() {
        assert_eq!(None, collect_records::<SearchHit>(&WireValue::Boolean(true)));
    }
}
