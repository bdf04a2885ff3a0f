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

//! Method module.
//!
//! This module contains the remote operations exposed by the Modest
//! service.

use std::fmt;

use crate::config::OperationKind;

/// Represents a remote operation of the Modest service.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Method {
    SendMail,
    MailTo,
    ComposeMail,
    OpenMessage,
    DeleteMessage,
    SendReceive,
    OpenDefaultInbox,
    OpenAccount,
    OpenEditAccountsDialog,
    Search,
    GetFolders,
}

impl Method {
    /// Gets the D-Bus member name of the method.
    pub fn member(&self) -> &'static str {
        match self {
            Self::SendMail => "SendMail",
            Self::MailTo => "MailTo",
            Self::ComposeMail => "ComposeMail",
            Self::OpenMessage => "OpenMessage",
            Self::DeleteMessage => "DeleteMessage",
            Self::SendReceive => "SendReceive",
            Self::OpenDefaultInbox => "OpenDefaultInbox",
            Self::OpenAccount => "OpenAccount",
            Self::OpenEditAccountsDialog => "OpenEditAccountsDialog",
            Self::Search => "Search",
            Self::GetFolders => "GetFolders",
        }
    }

    /// Gets the kind of the operation, which selects its timeout.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Search | Self::GetFolders => OperationKind::Remote,
            _ => OperationKind::Local,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.member())
    }
}
