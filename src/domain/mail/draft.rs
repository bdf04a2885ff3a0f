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

//! Mail draft module.
//!
//! This module contains the representation of a message handed over
//! to the Modest service, either to be sent right away or to be
//! opened in its editor.

use crate::wire::Arg;

/// Represents a message to send or to compose.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MailDraft {
    /// Represents the To header, as a comma-separated list.
    pub to: String,
    /// Represents the Cc header, as a comma-separated list.
    pub cc: String,
    /// Represents the Bcc header, as a comma-separated list.
    pub bcc: String,
    pub subject: String,
    pub body: String,
    /// Represents the URIs of the files to attach. Only used when
    /// composing.
    pub attachments: Vec<String>,
}

impl MailDraft {
    fn headers_and_body(&self) -> Vec<Arg> {
        vec![
            Arg::from(self.to.as_str()),
            Arg::from(self.cc.as_str()),
            Arg::from(self.bcc.as_str()),
            Arg::from(self.subject.as_str()),
            Arg::from(self.body.as_str()),
        ]
    }

    /// Builds the arguments of the `SendMail` method.
    pub fn to_send_args(&self) -> Vec<Arg> {
        self.headers_and_body()
    }

    /// Builds the arguments of the `ComposeMail` method. Attachments
    /// are joined into one comma-separated string.
    pub fn to_compose_args(&self) -> Vec<Arg> {
        let mut args = self.headers_and_body();
        args.push(Arg::from(self.attachments.join(",")));
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_args_join_attachments() {
        let draft = MailDraft {
            to: "a@b.com".into(),
            subject: "Hi".into(),
            attachments: vec!["file:///tmp/a.txt".into(), "file:///tmp/b.png".into()],
            ..MailDraft::default()
        };

        assert_eq!(5, draft.to_send_args().len());

        let args = draft.to_compose_args();
        assert_eq!(6, args.len());
        assert_eq!(Arg::String("a@b.com".into()), args[0]);
        assert_eq!(Arg::String("".into()), args[1]);
        assert_eq!(Arg::String("Hi".into()), args[3]);
        assert_eq!(
            Arg::String("file:///tmp/a.txt,file:///tmp/b.png".into()),
            args[5]
        );
    }
}
