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

//! D-Bus transport module.
//!
//! This module contains the transport implementation backed by the
//! blocking API of zbus.

use log::{debug, trace};
use std::{sync::Mutex, time::Duration};
use zbus::{
    blocking::Connection,
    zvariant::{Structure, StructureBuilder, Value},
};

use super::{call_with_timeout, Error, MethodCall, Reply, Result, Transport};
use crate::{
    config::BusKind,
    wire::{Arg, WireValue},
};

fn arg_to_value(arg: &Arg) -> Value<'static> {
    match arg {
        Arg::String(s) => Value::from(s.clone()),
        Arg::Boolean(b) => Value::Bool(*b),
        Arg::Int32(n) => Value::I32(*n),
        Arg::Uint32(n) => Value::U32(*n),
        Arg::Int64(n) => Value::I64(*n),
        Arg::Uint64(n) => Value::U64(*n),
    }
}

fn value_to_wire(value: &Value) -> WireValue {
    match value {
        Value::Str(s) => WireValue::String(s.as_str().to_owned()),
        Value::Bool(b) => WireValue::Boolean(*b),
        Value::I32(n) => WireValue::Int32(*n),
        Value::U32(n) => WireValue::Uint32(*n),
        Value::I64(n) => WireValue::Int64(*n),
        Value::U64(n) => WireValue::Uint64(*n),
        Value::Structure(s) => WireValue::Struct(s.fields().iter().map(value_to_wire).collect()),
        Value::Array(a) => WireValue::Array(a.get().iter().map(value_to_wire).collect()),
        Value::Value(inner) => value_to_wire(inner),
        value => WireValue::Other(value.value_signature().to_string()),
    }
}

/// Represents the transport over a D-Bus connection. The connection
/// is opened on first use then reused by every call.
#[derive(Debug)]
pub struct DbusTransport {
    bus: BusKind,
    conn: Mutex<Option<Connection>>,
}

impl DbusTransport {
    pub fn new(bus: BusKind) -> Self {
        Self {
            bus,
            conn: Mutex::new(None),
        }
    }

    /// Builds a transport around an already opened connection.
    pub fn from_connection(bus: BusKind, conn: Connection) -> Self {
        Self {
            bus,
            conn: Mutex::new(Some(conn)),
        }
    }

    fn connection(&self) -> Result<Connection> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|err| Error::ConnectionUnavailableError(err.to_string()))?;

        if let Some(conn) = conn.as_ref() {
            return Ok(conn.clone());
        }

        debug!("opening {:?} bus connection", self.bus);
        let new_conn = match self.bus {
            BusKind::Session => Connection::session(),
            BusKind::System => Connection::system(),
        }
        .map_err(|err| Error::ConnectionUnavailableError(err.to_string()))?;

        *conn = Some(new_conn.clone());
        Ok(new_conn)
    }
}

impl Default for DbusTransport {
    fn default() -> Self {
        Self::new(BusKind::default())
    }
}

fn send(conn: Connection, call: MethodCall) -> Result<Reply> {
    let name = call.name();
    let destination = Some(call.destination.as_str());
    let path = call.path.as_str();
    let interface = Some(call.interface.as_str());
    let member = call.member.as_str();

    // zbus leaves service auto-start enabled on method calls
    let res = if call.args.is_empty() {
        conn.call_method(destination, path, interface, member, &())
    } else {
        let body = call
            .args
            .iter()
            .fold(StructureBuilder::new(), |body, arg| {
                body.append_field(arg_to_value(arg))
            })
            .build();
        conn.call_method(destination, path, interface, member, &body)
    };

    match res {
        Ok(msg) => {
            let has_body = msg
                .body_signature()
                .map(|sig| !sig.as_str().is_empty())
                .unwrap_or(false);
            if !has_body {
                trace!("method call {} returned no argument", name);
                return Ok(Reply::Return(vec![]));
            }

            let body = msg
                .body::<Structure>()
                .map_err(|err| Error::SendError(name.clone(), err.to_string()))?;
            let args: Vec<WireValue> = body.fields().iter().map(value_to_wire).collect();
            trace!("method call {} returned {:?}", name, args);
            Ok(Reply::Return(args))
        }
        Err(zbus::Error::MethodError(err_name, message, _)) => Ok(Reply::Error {
            name: err_name.to_string(),
            message,
        }),
        Err(zbus::Error::InvalidReply) => Ok(Reply::Other("invalid reply".into())),
        Err(err @ zbus::Error::Variant(_)) => Err(Error::BuildMessageError(name, err.to_string())),
        Err(err) => Err(Error::SendError(name, err.to_string())),
    }
}

impl Transport for DbusTransport {
    fn call(&self, call: &MethodCall, timeout: Duration) -> Result<Reply> {
        let conn = self.connection()?;
        let call = call.clone();
        call_with_timeout(call.name(), timeout, move || send(conn, call))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_to_zvariant() {
        assert_eq!(Value::from("uri"), arg_to_value(&Arg::from("uri")));
        assert_eq!(Value::I64(-5), arg_to_value(&Arg::Int64(-5)));
        assert_eq!(Value::U32(5), arg_to_value(&Arg::Uint32(5)));
    }

    #[test]
    fn zvariant_to_wire() {
        let folder = StructureBuilder::new()
            .add_field("INBOX")
            .add_field("pop://a@b/INBOX")
            .build();

        assert_eq!(
            WireValue::Struct(vec![
                WireValue::String("INBOX".into()),
                WireValue::String("pop://a@b/INBOX".into()),
            ]),
            value_to_wire(&Value::from(folder))
        );
        assert_eq!(
            WireValue::Array(vec![
                WireValue::String("INBOX".into()),
                WireValue::String("Drafts".into()),
            ]),
            value_to_wire(&Value::from(vec!["INBOX", "Drafts"]))
        );
        assert_eq!(WireValue::Other("d".into()), value_to_wire(&Value::F64(1.5)));
    }
}
