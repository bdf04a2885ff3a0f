use std::{cell::RefCell, collections::VecDeque, time::Duration};

use modest_dbus_client::{
    client,
    transport::{self, MethodCall, Reply, Transport},
    wire::{Arg, ToWire, WireValue},
    Client, ClientConfig, FolderResult, SearchFlags, SearchHit, SearchQuery,
};

/// Replies to calls with the given replies, in order.
#[derive(Default)]
struct ScriptedTransport {
    replies: RefCell<VecDeque<Reply>>,
    calls: RefCell<Vec<MethodCall>>,
}

impl ScriptedTransport {
    fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            ..Self::default()
        }
    }
}

impl Transport for ScriptedTransport {
    fn call(&self, call: &MethodCall, _timeout: Duration) -> transport::Result<Reply> {
        self.calls.borrow_mut().push(call.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| transport::Error::SendError(call.name(), "no more replies".into()))
    }
}

fn raw_hit(
    msgid: &str,
    subject: &str,
    folder: &str,
    sender: &str,
    size: u64,
    has_attachment: bool,
    is_unread: bool,
    timestamp: i64,
) -> WireValue {
    WireValue::Struct(vec![
        WireValue::String(msgid.into()),
        WireValue::String(subject.into()),
        WireValue::String(folder.into()),
        WireValue::String(sender.into()),
        WireValue::Uint64(size),
        WireValue::Boolean(has_attachment),
        WireValue::Boolean(is_unread),
        WireValue::Int64(timestamp),
    ])
}

#[test]
fn test_search() {
    let _ = env_logger::builder().is_test(true).try_init();

    let reply = Reply::Return(vec![WireValue::Array(vec![
        raw_hit("m1", "Hello", "INBOX", "a@b.com", 100, false, true, 1000),
        raw_hit("m2", "", "Drafts", "c@d.com", 0, true, false, 2000),
    ])]);
    let client = Client::with_transport(ClientConfig::default(), ScriptedTransport::new(vec![reply]));

    let query = SearchQuery::new("hello", SearchFlags::SUBJECT).folder("INBOX");
    let hits = client.search(&query).unwrap();

    // checking that both hits are decoded, in reply order
    assert_eq!(2, hits.len());
    assert_eq!(
        SearchHit {
            msgid: Some("m1".into()),
            subject: Some("Hello".into()),
            folder: Some("INBOX".into()),
            sender: Some("a@b.com".into()),
            size: 100,
            has_attachment: false,
            is_unread: true,
            timestamp: 1000,
        },
        hits[0]
    );
    assert_eq!(Some("m2"), hits[1].msgid.as_deref());
    assert_eq!(None, hits[1].subject);
    assert_eq!(Some("Drafts"), hits[1].folder.as_deref());
    assert!(hits[1].has_attachment);
    assert!(!hits[1].is_unread);
    assert_eq!(2000, hits[1].timestamp);

    // checking the arguments sent along with the search
    let calls = client.transport().calls.borrow();
    assert_eq!("Search", calls[0].member);
    assert_eq!(
        vec![
            Arg::from("hello"),
            Arg::from("INBOX"),
            Arg::Int64(0),
            Arg::Int64(0),
            Arg::Int32(1),
            Arg::Uint32(0),
        ],
        calls[0].args
    );
}

#[test]
fn test_search_drops_malformed_hit() {
    let good: Vec<SearchHit> = (0..3)
        .map(|i| SearchHit {
            msgid: Some(format!("m{}", i)),
            subject: Some(format!("subject {}", i)),
            size: i * 10,
            timestamp: i as i64,
            ..SearchHit::default()
        })
        .collect();

    let mut elements: Vec<WireValue> = good.iter().map(ToWire::to_wire).collect();
    // a hit missing its timestamp
    elements.push(WireValue::Struct(vec![
        WireValue::String("m3".into()),
        WireValue::String("broken".into()),
        WireValue::String("INBOX".into()),
        WireValue::String("a@b.com".into()),
        WireValue::Uint64(1),
        WireValue::Boolean(false),
        WireValue::Boolean(false),
    ]));

    let reply = Reply::Return(vec![WireValue::Array(elements)]);
    let client = Client::with_transport(ClientConfig::default(), ScriptedTransport::new(vec![reply]));

    let hits = client.search(&SearchQuery::default()).unwrap();
    assert_eq!(good, hits.0);
}

#[test]
fn test_get_folders() {
    let folders = vec![
        FolderResult {
            folder_name: Some("INBOX".into()),
            folder_uri: Some("imap://a@b/INBOX".into()),
        },
        FolderResult {
            folder_name: Some("Outbox".into()),
            folder_uri: None,
        },
    ];
    let reply = Reply::Return(vec![WireValue::Array(
        folders.iter().map(ToWire::to_wire).collect(),
    )]);
    let client = Client::with_transport(ClientConfig::default(), ScriptedTransport::new(vec![reply]));

    assert_eq!(folders, client.get_folders().unwrap().0);
}

#[test]
fn test_get_no_folders() {
    let reply = Reply::Return(vec![WireValue::Array(vec![])]);
    let client = Client::with_transport(ClientConfig::default(), ScriptedTransport::new(vec![reply]));

    let folders = client.get_folders().unwrap();
    assert!(folders.is_empty());
}

#[test]
fn test_search_with_unexpected_body() {
    let client = Client::with_transport(
        ClientConfig::default(),
        ScriptedTransport::new(vec![
            Reply::Return(vec![]),
            Reply::Return(vec![WireValue::String("INBOX".into())]),
        ]),
    );

    assert!(matches!(
        client.search(&SearchQuery::default()),
        Err(client::Error::UnexpectedReplyBodyError(..))
    ));
    assert!(matches!(
        client.get_folders(),
        Err(client::Error::UnexpectedReplyBodyError(..))
    ));
}

#[test]
fn test_search_error_reply() {
    let reply = Reply::Error {
        name: "com.nokia.modest.Error.Search".into(),
        message: Some("account offline".into()),
    };
    let client = Client::with_transport(ClientConfig::default(), ScriptedTransport::new(vec![reply]));

    match client.search(&SearchQuery::default()) {
        Err(client::Error::RemoteError { name, message, .. }) => {
            assert_eq!("com.nokia.modest.Error.Search", name);
            assert_eq!(Some("account offline".into()), message);
        }
        res => panic!("unexpected result {:?}", res),
    }
}
