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

//! Config module.
//!
//! This module contains the configuration of the client: where the
//! Modest service lives on the bus, and how long calls may block.

use log::debug;
use serde::{Deserialize, Deserializer};
use std::{env, fs, io, path::PathBuf, result, time::Duration};
use thiserror::Error;

pub const DEFAULT_SERVICE: &str = "com.nokia.modest";
pub const DEFAULT_OBJECT_PATH: &str = "/com/nokia/modest";
pub const DEFAULT_INTERFACE: &str = "com.nokia.modest";

/// Matches the default timeout of libdbus.
pub const DEFAULT_LOCAL_TIMEOUT: Duration = Duration::from_secs(25);
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(120);

pub const CONFIG_PATH_ENV: &str = "MODEST_DBUS_CLIENT_CONFIG";

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot expand config path {1}")]
    ExpandPathError(#[source] shellexpand::LookupError<env::VarError>, String),
    #[error("cannot read config file {1}")]
    ReadFileError(#[source] io::Error, PathBuf),
    #[error("cannot parse config")]
    ParseError(#[source] toml::de::Error),
    #[error("cannot find user config directory")]
    FindConfigDirError,
}

pub type Result<T> = result::Result<T, Error>;

/// Represents the bus the Modest service is registered on.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusKind {
    #[default]
    Session,
    System,
}

/// Represents how long an operation is allowed to take.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OperationKind {
    /// Operations handled by the service on its own.
    Local,
    /// Operations that may trigger network I/O on the service side,
    /// like searching or listing folders.
    Remote,
}

fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> result::Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

/// Represents the timeout policy, keyed by operation kind.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TimeoutPolicy {
    #[serde(rename = "local-ms", deserialize_with = "millis")]
    pub local: Duration,
    #[serde(rename = "remote-ms", deserialize_with = "millis")]
    pub remote: Duration,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            local: DEFAULT_LOCAL_TIMEOUT,
            remote: DEFAULT_REMOTE_TIMEOUT,
        }
    }
}

impl TimeoutPolicy {
    pub fn timeout_for(&self, kind: OperationKind) -> Duration {
        match kind {
            OperationKind::Local => self.local,
            OperationKind::Remote => self.remote,
        }
    }
}

/// Represents the client configuration.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ClientConfig {
    pub bus: BusKind,
    /// Represents the well-known bus name of the service.
    pub service: String,
    pub object_path: String,
    pub interface: String,
    pub timeouts: TimeoutPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            bus: BusKind::default(),
            service: DEFAULT_SERVICE.into(),
            object_path: DEFAULT_OBJECT_PATH.into(),
            interface: DEFAULT_INTERFACE.into(),
            timeouts: TimeoutPolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(Error::ParseError)
    }

    /// Reads the config from the given TOML file. The path is shell
    /// expanded first.
    pub fn from_path(path: &str) -> Result<Self> {
        let path = shellexpand::full(path)
            .map_err(|err| Error::ExpandPathError(err, path.to_owned()))?;
        let path = PathBuf::from(path.into_owned());
        debug!("reading client config from {:?}", path);

        let content =
            fs::read_to_string(&path).map_err(|err| Error::ReadFileError(err, path.clone()))?;
        Self::from_toml_str(&content)
    }

    /// Gets the default config file path: the one pointed by
    /// `$MODEST_DBUS_CLIENT_CONFIG` if set, otherwise
    /// `<config dir>/modest/dbus-client.toml`.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            let path = shellexpand::full(&path)
                .map_err(|err| Error::ExpandPathError(err, path.clone()))?;
            return Ok(PathBuf::from(path.into_owned()));
        }

        dirs::config_dir()
            .map(|dir| dir.join("modest").join("dbus-client.toml"))
            .ok_or(Error::FindConfigDirError)
    }

    /// Reads the config from the default path, or falls back to the
    /// default config when there is no file there.
    pub fn from_default_path() -> Result<Self> {
        let path = Self::default_path()?;
        if !path.is_file() {
            debug!("no client config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::from_path(&path.to_string_lossy())
    }

    pub fn timeout_for(&self, kind: OperationKind) -> Duration {
        self.timeouts.timeout_for(kind)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_config_targets_modest() {
        let config = ClientConfig::default();

        assert_eq!(BusKind::Session, config.bus);
        assert_eq!("com.nokia.modest", config.service);
        assert_eq!("/com/nokia/modest", config.object_path);
        assert_eq!(
            Duration::from_secs(120),
            config.timeout_for(OperationKind::Remote)
        );
        assert_eq!(
            Duration::from_secs(25),
            config.timeout_for(OperationKind::Local)
        );
    }

    #[test]
    fn parse_partial_config() {
        let config = ClientConfig::from_toml_str(
            r#"
            bus = "system"
            service = "org.example.Mail"

            [timeouts]
            remote-ms = 5000
            "#,
        )
        .unwrap();

        assert_eq!(BusKind::System, config.bus);
        assert_eq!("org.example.Mail", config.service);
        assert_eq!(DEFAULT_INTERFACE, config.interface);
        assert_eq!(Duration::from_secs(5), config.timeouts.remote);
        assert_eq!(DEFAULT_LOCAL_TIMEOUT, config.timeouts.local);
    }

    #[test]
    fn parse_invalid_config() {
        assert!(matches!(
            ClientConfig::from_toml_str("bus = \"usb\""),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn read_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "object-path = \"/org/example/Mail\"").unwrap();

        let config = ClientConfig::from_path(&file.path().to_string_lossy()).unwrap();
        assert_eq!("/org/example/Mail", config.object_path);

        assert!(matches!(
            ClientConfig::from_path("/this/file/does/not/exist.toml"),
            Err(Error::ReadFileError(_, _))
        ));
    }
}
