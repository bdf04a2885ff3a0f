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

//! Rust client for the D-Bus interface of the Modest email client.
//!
//! The [`Client`] performs blocking calls against the service:
//! sending or composing mail, opening messages, searching, listing
//! folders… Each call waits for the reply at most the timeout of its
//! kind, see [`TimeoutPolicy`].

pub mod config;
pub use config::{BusKind, ClientConfig, OperationKind, TimeoutPolicy};

pub mod wire;

pub mod domain;
pub use domain::*;

pub mod transport;
pub use transport::{MethodCall, Reply, Transport};
#[cfg(feature = "dbus-transport")]
pub use transport::DbusTransport;

pub mod client;
pub use client::{simple, Client, Method};
