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

//! Client module.
//!
//! This module contains the client of the Modest service. Every
//! operation is a blocking call bounded by the timeout of its kind.

use log::debug;
use std::result;
use thiserror::Error;

use super::{collect_records, Method};
use crate::{
    config::ClientConfig,
    transport::{self, MethodCall, Reply, Transport},
    wire::{Arg, FromWire, WireType, WireValue},
    FolderResults, MailDraft, SearchHits, SearchQuery,
};

#[cfg(feature = "dbus-transport")]
use crate::transport::DbusTransport;

#[derive(Debug, Error)]
pub enum Error {
    #[error("method {method} failed with {name}: {}", message.as_deref().unwrap_or("no message"))]
    RemoteError {
        method: Method,
        name: String,
        message: Option<String>,
    },
    #[error("cannot handle reply of method {0}: unexpected {1} message")]
    UnexpectedReplyError(Method, String),
    #[error("cannot handle reply of method {0}: expected an array, got {1}")]
    UnexpectedReplyBodyError(Method, String),

    #[error(transparent)]
    TransportError(#[from] transport::Error),
}

pub type Result<T> = result::Result<T, Error>;

/// Represents the client of the Modest service.
#[derive(Debug)]
pub struct Client<T: Transport> {
    config: ClientConfig,
    transport: T,
}

#[cfg(feature = "dbus-transport")]
impl Client<DbusTransport> {
    /// Builds a client talking to the bus described by the config.
    pub fn new(config: ClientConfig) -> Self {
        let transport = DbusTransport::new(config.bus);
        Self::with_transport(config, transport)
    }
}

#[cfg(feature = "dbus-transport")]
impl Default for Client<DbusTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn method_call(&self, method: Method, args: Vec<Arg>) -> MethodCall {
        MethodCall {
            destination: self.config.service.clone(),
            path: self.config.object_path.clone(),
            interface: self.config.interface.clone(),
            member: method.member().to_owned(),
            args,
        }
    }

    /// Performs the call and returns the arguments of the reply.
    fn call(&self, method: Method, args: Vec<Arg>) -> Result<Vec<WireValue>> {
        let call = self.method_call(method, args);
        let timeout = self.config.timeout_for(method.kind());
        debug!("calling {} with timeout {:?}", call.name(), timeout);

        match self.transport.call(&call, timeout)? {
            Reply::Return(args) => Ok(args),
            Reply::Error { name, message } => {
                debug!("method {} replied with error {}: {:?}", method, name, message);
                Err(Error::RemoteError {
                    method,
                    name,
                    message,
                })
            }
            Reply::Other(kind) => Err(Error::UnexpectedReplyError(method, kind)),
        }
    }

    fn call_unit(&self, method: Method, args: Vec<Arg>) -> Result<()> {
        self.call(method, args)?;
        Ok(())
    }

    fn call_list<R: FromWire>(&self, method: Method, args: Vec<Arg>) -> Result<Vec<R>> {
        let reply = self.call(method, args)?;
        let list = reply.first().ok_or_else(|| {
            Error::UnexpectedReplyBodyError(method, String::from("no argument"))
        })?;
        collect_records(list).ok_or_else(|| {
            let found = match list.wire_type() {
                WireType::Other => format!("{:?}", list),
                ty => format!("type {}", ty),
            };
            Error::UnexpectedReplyBodyError(method, found)
        })
    }

    /// Asks the service to send the draft right away.
    pub fn send_mail(&self, draft: &MailDraft) -> Result<()> {
        self.call_unit(Method::SendMail, draft.to_send_args())
    }

    /// Opens the editor on a `mailto:` URL.
    pub fn mail_to(&self, url: &str) -> Result<()> {
        self.call_unit(Method::MailTo, vec![Arg::from(url)])
    }

    /// Opens the editor prefilled with the draft.
    pub fn compose_mail(&self, draft: &MailDraft) -> Result<()> {
        self.call_unit(Method::ComposeMail, draft.to_compose_args())
    }

    pub fn open_message(&self, uri: &str) -> Result<()> {
        self.call_unit(Method::OpenMessage, vec![Arg::from(uri)])
    }

    pub fn delete_message(&self, uri: &str) -> Result<()> {
        self.call_unit(Method::DeleteMessage, vec![Arg::from(uri)])
    }

    pub fn send_receive(&self) -> Result<()> {
        self.call_unit(Method::SendReceive, vec![])
    }

    pub fn open_default_inbox(&self) -> Result<()> {
        self.call_unit(Method::OpenDefaultInbox, vec![])
    }

    pub fn open_account(&self, account_id: &str) -> Result<()> {
        self.call_unit(Method::OpenAccount, vec![Arg::from(account_id)])
    }

    pub fn open_edit_accounts_dialog(&self) -> Result<()> {
        self.call_unit(Method::OpenEditAccountsDialog, vec![])
    }

    /// Searches messages matching the query. Hits that cannot be
    /// decoded are left out of the result.
    pub fn search(&self, query: &SearchQuery) -> Result<SearchHits> {
        self.call_list(Method::Search, query.to_args())
            .map(SearchHits::from)
    }

    pub fn get_folders(&self) -> Result<FolderResults> {
        self.call_list(Method::GetFolders, vec![])
            .map(FolderResults::from)
    }
}
