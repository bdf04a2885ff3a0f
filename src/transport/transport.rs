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

//! Transport module.
//!
//! This module exposes the transport trait, which performs one
//! blocking request/reply call against the bus. It can be used to
//! plug custom transports into the client.

use log::debug;
use std::{result, sync::mpsc, thread, time::Duration};
use thiserror::Error;

use crate::wire::{Arg, WireValue};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot get bus connection: {0}")]
    ConnectionUnavailableError(String),
    #[error("cannot build method call {0}: {1}")]
    BuildMessageError(String, String),
    #[error("cannot send method call {0}: {1}")]
    SendError(String, String),
    #[error("method call {0} timed out after {1:?}")]
    TimeoutError(String, Duration),
    #[error("method call {0} was dropped before replying")]
    WorkerLostError(String),
}

pub type Result<T> = result::Result<T, Error>;

/// Represents one method call: the four-part address of the remote
/// operation and its positional arguments. Each call owns its own
/// context, nothing is shared between calls.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MethodCall {
    pub destination: String,
    pub path: String,
    pub interface: String,
    pub member: String,
    pub args: Vec<Arg>,
}

impl MethodCall {
    /// Gets the fully qualified method name, used in logs and errors.
    pub fn name(&self) -> String {
        format!("{}.{}", self.interface, self.member)
    }
}

/// Represents the reply of a method call.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Reply {
    /// Represents a successful reply with its arguments.
    Return(Vec<WireValue>),
    /// Represents an error reply.
    Error {
        name: String,
        message: Option<String>,
    },
    /// Represents any other kind of message.
    Other(String),
}

pub trait Transport {
    /// Sends the method call and blocks until the reply arrives or
    /// the timeout elapses.
    fn call(&self, call: &MethodCall, timeout: Duration) -> Result<Reply>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn call(&self, call: &MethodCall, timeout: Duration) -> Result<Reply> {
        (**self).call(call, timeout)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn call(&self, call: &MethodCall, timeout: Duration) -> Result<Reply> {
        (**self).call(call, timeout)
    }
}

/// Runs the given blocking call on a worker thread and waits for its
/// result at most `timeout`. On timeout the worker is detached: its
/// result is discarded whenever it comes.
pub fn call_with_timeout<F>(name: String, timeout: Duration, call: F) -> Result<Reply>
where
    F: FnOnce() -> Result<Reply> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    thread::Builder::new()
        .name(format!("dbus-call {}", name))
        .spawn(move || {
            // the receiver is gone when the caller already timed out
            let _ = tx.send(call());
        })
        .map_err(|err| Error::SendError(name.clone(), err.to_string()))?;

    match rx.recv_timeout(timeout) {
        Ok(reply) => reply,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            debug!("method call {} timed out after {:?}", name, timeout);
            Err(Error::TimeoutError(name, timeout))
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(Error::WorkerLostError(name)),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn call_returns_before_timeout() {
        let reply = call_with_timeout("test.Fast".into(), Duration::from_secs(5), || {
            Ok(Reply::Return(vec![]))
        })
        .unwrap();

        assert_eq!(Reply::Return(vec![]), reply);
    }

    #[test]
    fn call_times_out() {
        let timeout = Duration::from_millis(50);
        let start = Instant::now();

        let res = call_with_timeout("test.Slow".into(), timeout, || {
            thread::sleep(Duration::from_secs(5));
            Ok(Reply::Return(vec![]))
        });

        assert!(matches!(res, Err(Error::TimeoutError(_, t)) if t == timeout));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn call_error_is_propagated() {
        let res = call_with_timeout("test.Broken".into(), Duration::from_secs(5), || {
            Err(Error::ConnectionUnavailableError("no bus".into()))
        });

        assert!(matches!(res, Err(Error::ConnectionUnavailableError(_))));
    }

    #[test]
    fn worker_panic_is_reported() {
        let res = call_with_timeout("test.Panic".into(), Duration::from_secs(5), || {
            panic!("worker died")
        });

        assert!(matches!(res, Err(Error::WorkerLostError(_))));
    }
}
