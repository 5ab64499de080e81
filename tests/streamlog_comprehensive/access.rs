//! Access Control Tests
//!
//! Restricted streams, privileged writers and predicates that call back
//! into the log.

use crate::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use streamlog::{AccessPredicate, EventRecorder, LogError, LogEvent};

#[test]
fn test_open_stream_accepts_any_writer() {
    let (log, s) = log_with_open_streams(1);
    for name in ["alice", "bob", ""] {
        assert!(log
            .append(&WriterId::from(name), root(name).to_streams([s[0]]))
            .is_ok());
    }
}

#[test]
fn test_denied_append_changes_nothing_then_succeeds_once_allowed() {
    let log = StreamLog::new();
    let allow = Arc::new(AllowList::new());
    let s1 = log
        .create_stream(AccessControl::shared(allow.clone()))
        .unwrap();
    let alice = WriterId::from("alice");
    let request = root("a").to_streams([s1]);

    let err = log.append(&alice, request.clone()).unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(log.num_entries(), 0);
    assert!(log.indices_of(s1).unwrap().is_empty());

    allow.grant("alice");
    assert_eq!(log.append(&alice, request.clone()).unwrap(), 0);

    allow.revoke(&alice);
    assert!(log.append(&alice, request).unwrap_err().is_unauthorized());
    assert_eq!(log.num_entries(), 1);
}

#[test]
fn test_one_denying_stream_blocks_the_whole_append() {
    let log = StreamLog::new();
    let open = log.create_stream(AccessControl::Open).unwrap();
    let closed = log.create_stream(AccessControl::restricted(DenyAll)).unwrap();

    let err = log
        .append(&writer(), root("a").to_streams([open, closed]))
        .unwrap_err();
    assert_eq!(
        err.as_log_error(),
        Some(&LogError::Unauthorized {
            stream: closed,
            writer: writer(),
        })
    );
    assert!(log.indices_of(open).unwrap().is_empty());
}

#[test]
fn test_closure_predicate_sees_writer_and_stream() {
    let log = StreamLog::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let s1 = log
        .create_stream(AccessControl::restricted(
            move |writer: &WriterId, stream: StreamId| {
                sink.lock().unwrap().push((writer.clone(), stream));
                writer.as_str().starts_with("svc-")
            },
        ))
        .unwrap();

    assert!(log
        .append(&WriterId::from("svc-billing"), root("a").to_streams([s1]))
        .is_ok());
    assert!(log
        .append(&WriterId::from("intruder"), root("b").to_streams([s1]))
        .is_err());
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            (WriterId::from("svc-billing"), s1),
            (WriterId::from("intruder"), s1),
        ]
    );
}

#[test]
fn test_privileged_writer_skips_predicate() {
    let log = StreamLog::builder()
        .privileged_writer("operator")
        .build()
        .unwrap();
    let allow = Arc::new(AllowList::new());
    let s1 = log
        .create_stream(AccessControl::shared(allow.clone()))
        .unwrap();

    assert!(log
        .append(&WriterId::from("operator"), root("a").to_streams([s1]))
        .is_ok());
    assert_eq!(allow.checks(), 0);
}

/// Predicate holding a handle to the log it guards
struct Reentrant {
    log: Mutex<Option<StreamLog>>,
    tried: AtomicBool,
    nested: Mutex<Vec<LogError>>,
}

impl AccessPredicate for Reentrant {
    fn can_append(&self, _writer: &WriterId, stream: StreamId) -> bool {
        let Some(log) = self.log.lock().unwrap().clone() else {
            return false;
        };
        // Reads are allowed while authorizing
        assert!(log.stream_info(stream).is_ok());
        self.tried.store(true, Ordering::SeqCst);

        let mut nested = self.nested.lock().unwrap();
        if let Err(e) = log.append(&WriterId::from("inner"), AppendRequest::data(b"n".to_vec())) {
            nested.push(e.as_log_error().cloned().unwrap());
        }
        if let Err(e) = log.create_stream(AccessControl::Open) {
            nested.push(e.as_log_error().cloned().unwrap());
        }
        true
    }
}

#[test]
fn test_predicate_cannot_mutate_the_log() {
    let log = StreamLog::new();
    let predicate = Arc::new(Reentrant {
        log: Mutex::new(None),
        tried: AtomicBool::new(false),
        nested: Mutex::new(Vec::new()),
    });
    let s1 = log
        .create_stream(AccessControl::shared(predicate.clone()))
        .unwrap();
    *predicate.log.lock().unwrap() = Some(log.clone());

    let position = log.append(&writer(), root("outer").to_streams([s1])).unwrap();
    assert!(predicate.tried.load(Ordering::SeqCst));
    assert_eq!(
        *predicate.nested.lock().unwrap(),
        vec![LogError::ReentrantMutation, LogError::ReentrantMutation]
    );

    // Only the outer append landed
    assert_eq!(position, 0);
    assert_eq!(log.num_entries(), 1);
    assert_eq!(log.num_streams(), 1);

    // Break the cycle so the log can drop
    predicate.log.lock().unwrap().take();
}

#[test]
fn test_stream_created_notifications() {
    let recorder = Arc::new(EventRecorder::new());
    let log = StreamLog::builder()
        .observer(recorder.clone())
        .build()
        .unwrap();

    let s1 = log.create_stream(AccessControl::Open).unwrap();
    let s2 = log.create_stream(AccessControl::restricted(DenyAll)).unwrap();
    log.append(&writer(), root("a").to_streams([s1])).unwrap();

    assert_eq!(
        recorder.take(),
        vec![
            LogEvent::StreamCreated { id: s1 },
            LogEvent::StreamCreated { id: s2 },
        ]
    );
}
