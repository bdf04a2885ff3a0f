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

//! Simple client module.
//!
//! This module wraps every operation of the [`Client`] into a
//! function that only reports whether the operation happened. Errors
//! are logged then swallowed. List operations fill the given list on
//! success only, and leave it untouched otherwise.

use log::warn;

use super::{Client, Result};
use crate::{transport::Transport, FolderResults, MailDraft, SearchHits, SearchQuery};

fn succeeded<T>(op: &str, res: Result<T>) -> Option<T> {
    match res {
        Ok(out) => Some(out),
        Err(err) => {
            warn!("cannot {}: {}", op, err);
            None
        }
    }
}

pub fn send_mail<T: Transport>(client: &Client<T>, draft: &MailDraft) -> bool {
    succeeded("send mail", client.send_mail(draft)).is_some()
}

pub fn mail_to<T: Transport>(client: &Client<T>, url: &str) -> bool {
    succeeded("open mailto url", client.mail_to(url)).is_some()
}

pub fn compose_mail<T: Transport>(client: &Client<T>, draft: &MailDraft) -> bool {
    succeeded("compose mail", client.compose_mail(draft)).is_some()
}

pub fn open_message<T: Transport>(client: &Client<T>, uri: &str) -> bool {
    succeeded("open message", client.open_message(uri)).is_some()
}

pub fn delete_message<T: Transport>(client: &Client<T>, uri: &str) -> bool {
    succeeded("delete message", client.delete_message(uri)).is_some()
}

pub fn send_receive<T: Transport>(client: &Client<T>) -> bool {
    succeeded("send and receive", client.send_receive()).is_some()
}

pub fn open_default_inbox<T: Transport>(client: &Client<T>) -> bool {
    succeeded("open default inbox", client.open_default_inbox()).is_some()
}

pub fn open_account<T: Transport>(client: &Client<T>, account_id: &str) -> bool {
    succeeded("open account", client.open_account(account_id)).is_some()
}

pub fn open_edit_accounts_dialog<T: Transport>(client: &Client<T>) -> bool {
    succeeded(
        "open edit accounts dialog",
        client.open_edit_accounts_dialog(),
    )
    .is_some()
}

pub fn search<T: Transport>(client: &Client<T>, query: &SearchQuery, hits: &mut SearchHits) -> bool {
    match succeeded("search messages", client.search(query)) {
        Some(found) => {
            *hits = found;
            true
        }
        None => false,
    }
}

pub fn get_folders<T: Transport>(client: &Client<T>, folders: &mut FolderResults) -> bool {
    match succeeded("get folders", client.get_folders()) {
        Some(found) => {
            *folders = found;
            true
        }
        None => false,
    }
}
