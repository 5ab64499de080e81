//! Append Tests
//!
//! Positions, indices, validation order and payload rules.

use crate::*;
use streamlog::{DuplicateStreamPolicy, LogError, PayloadSchema};

fn log_error(err: Error) -> LogError {
    err.as_log_error().cloned().unwrap()
}

// =============================================================================
// POSITIONS AND INDICES
// =============================================================================

#[test]
fn test_position_equals_prior_entry_count() {
    let (log, s) = log_with_open_streams(2);
    for i in 0..20u64 {
        let before = log.num_entries();
        let request = root(&i.to_string()).to_streams([s[(i % 2) as usize]]);
        let position = log.append(&writer(), request).unwrap();
        assert_eq!(position, before);
        assert_eq!(log.num_entries(), before + 1);
    }
}

#[test]
fn test_every_listed_stream_indexes_position_once() {
    let (log, s) = log_with_open_streams(3);
    let position = log
        .append(&writer(), root("a").to_streams([s[0], s[2]]))
        .unwrap();

    assert_eq!(log.indices_of(s[0]).unwrap(), vec![position]);
    assert!(log.indices_of(s[1]).unwrap().is_empty());
    assert_eq!(log.indices_of(s[2]).unwrap(), vec![position]);
}

#[test]
fn test_entry_round_trips_fields() {
    let (log, s) = log_with_open_streams(1);
    let position = log
        .append(
            &writer(),
            AppendRequest::commitment(DataRoot::digest(b"blob"), 7).to_streams([s[0]]),
        )
        .unwrap();

    let entry = log.get_entry(position).unwrap();
    assert_eq!(entry.position, position);
    assert_eq!(entry.stream_ids, vec![s[0]]);
    assert!(entry.data.is_empty());
    assert_eq!(entry.data_root, DataRoot::digest(b"blob"));
    assert_eq!(entry.num_chunks, 7);
}

#[test]
fn test_default_append_goes_to_stream_zero() {
    let log = StreamLog::new();
    log.append(&writer(), AppendRequest::data(b"hello".to_vec())).unwrap();
    log.append(&writer(), AppendRequest::data(b"world".to_vec())).unwrap();

    assert_eq!(log.indices_of(StreamId::DEFAULT).unwrap(), vec![0, 1]);
    let page = log.scan(&[StreamId::DEFAULT], 0, 10).unwrap();
    assert_eq!(page.entries[1].data, b"world".to_vec());
}

#[test]
fn test_explicit_empty_stream_list() {
    let log = StreamLog::new();
    let position = log
        .append(&writer(), AppendRequest::data(b"x".to_vec()).to_streams(Vec::<StreamId>::new()))
        .unwrap();

    assert!(log.get_entry(position).unwrap().stream_ids.is_empty());
    assert!(log.indices_of(StreamId::DEFAULT).unwrap().is_empty());
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_limits_at_and_over_the_edge() {
    let log = StreamLog::new();
    let ids: Vec<StreamId> = (0..11)
        .map(|_| log.create_stream(AccessControl::Open).unwrap())
        .collect();

    assert!(log
        .append(&writer(), root("ten").to_streams(ids[..10].to_vec()))
        .is_ok());
    let err = log
        .append(&writer(), root("eleven").to_streams(ids.clone()))
        .unwrap_err();
    assert_eq!(log_error(err), LogError::TooManyStreams { count: 11, limit: 10 });

    assert!(log
        .append(&writer(), AppendRequest::data(vec![7u8; 200]))
        .is_ok());
    let err = log
        .append(&writer(), AppendRequest::data(vec![7u8; 201]))
        .unwrap_err();
    assert_eq!(log_error(err), LogError::PayloadTooLarge { len: 201, limit: 200 });
    assert_eq!(log.num_entries(), 2);
}

#[test]
fn test_payload_spec_rules() {
    let log = StreamLog::new();
    let neither = log.append(&writer(), AppendRequest::default()).unwrap_err();
    assert!(neither.is_validation());

    let both = AppendRequest::data(b"x".to_vec()).with_data_root(DataRoot::digest(b"x"));
    assert!(log.append(&writer(), both).unwrap_err().is_validation());

    let chunks_without_root = AppendRequest::data(b"x".to_vec()).with_num_chunks(2);
    assert!(log
        .append(&writer(), chunks_without_root)
        .unwrap_err()
        .is_validation());
    assert_eq!(log.num_entries(), 0);
}

#[test]
fn test_data_only_schema() {
    let log = StreamLog::builder()
        .payload_schema(PayloadSchema::DataOnly)
        .build()
        .unwrap();
    assert!(log.append(&writer(), AppendRequest::default()).is_ok());
    assert!(log.append(&writer(), root("r")).unwrap_err().is_validation());
}

#[test]
fn test_unknown_stream_rejected_without_side_effects() {
    let (log, s) = log_with_open_streams(1);
    let err = log
        .append(&writer(), root("a").to_streams([s[0], StreamId::new(42)]))
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(log.num_entries(), 0);
    assert!(log.indices_of(s[0]).unwrap().is_empty());
}

#[test]
fn test_validation_precedes_existence_check() {
    let log = StreamLog::new();
    let err = log
        .append(&writer(), AppendRequest::data(vec![0u8; 500]).to_streams([StreamId::new(9)]))
        .unwrap_err();
    assert!(matches!(log_error(err), LogError::PayloadTooLarge { .. }));
}

// =============================================================================
// DUPLICATE STREAM POLICIES
// =============================================================================

#[test]
fn test_duplicates_deduplicated_by_default() {
    let (log, s) = log_with_open_streams(2);
    let position = log
        .append(&writer(), root("a").to_streams([s[1], s[0], s[1]]))
        .unwrap();
    assert_eq!(log.get_entry(position).unwrap().stream_ids, vec![s[1], s[0]]);
    assert_eq!(log.indices_of(s[1]).unwrap(), vec![position]);
}

#[test]
fn test_duplicates_rejected() {
    let log = StreamLog::builder()
        .duplicate_streams(DuplicateStreamPolicy::Reject)
        .build()
        .unwrap();
    let s1 = log.create_stream(AccessControl::Open).unwrap();
    let err = log
        .append(&writer(), root("a").to_streams([s1, s1]))
        .unwrap_err();
    assert_eq!(log_error(err), LogError::DuplicateStream(s1));
    assert_eq!(log.num_entries(), 0);
}

#[test]
fn test_duplicates_repeated() {
    let log = StreamLog::builder()
        .duplicate_streams(DuplicateStreamPolicy::Repeat)
        .build()
        .unwrap();
    let s1 = log.create_stream(AccessControl::Open).unwrap();
    let position = log
        .append(&writer(), root("a").to_streams([s1, s1]))
        .unwrap();
    assert_eq!(log.get_entry(position).unwrap().stream_ids, vec![s1, s1]);
    assert_eq!(log.indices_of(s1).unwrap(), vec![position]);
}

// =============================================================================
// READS
// =============================================================================

#[test]
fn test_get_entry_out_of_range() {
    let (log, s) = log_with_open_streams(1);
    log.append(&writer(), root("a").to_streams([s[0]])).unwrap();

    let err = log.get_entry(log.num_entries()).unwrap_err();
    assert_eq!(log_error(err), LogError::OutOfRange { position: 1, len: 1 });
}

#[test]
fn test_get_range_clamps() {
    let (log, s) = log_with_open_streams(1);
    for i in 0..5 {
        log.append(&writer(), root(&i.to_string()).to_streams([s[0]]))
            .unwrap();
    }
    assert_eq!(positions(&log.get_range(3, 10)), vec![3, 4]);
    assert_eq!(positions(&log.get_range(1, 2)), vec![1, 2]);
    assert!(log.get_range(5, 3).is_empty());
    assert!(log.get_range(99, 3).is_empty());
    assert!(log.get_range(0, 0).is_empty());
}

#[test]
fn test_stream_info() {
    let (log, s) = log_with_open_streams(2);
    log.append(&writer(), root("a").to_streams([s[0]])).unwrap();
    log.append(&writer(), root("b").to_streams([s[1]])).unwrap();
    log.append(&writer(), root("c").to_streams([s[0]])).unwrap();

    let info = log.stream_info(s[0]).unwrap();
    assert_eq!(info.id, s[0]);
    assert!(info.open);
    assert_eq!(info.count, 2);
    assert_eq!(info.first_position, Some(0));
    assert_eq!(info.last_position, Some(2));

    let empty = log.stream_info(StreamId::DEFAULT).unwrap();
    assert_eq!(empty.count, 0);
    assert_eq!(empty.first_position, None);
    assert!(log.stream_info(StreamId::new(3)).unwrap_err().is_not_found());
}

#[test]
fn test_stream_ids_are_sequential() {
    let (log, s) = log_with_open_streams(3);
    assert_eq!(s, vec![StreamId::new(1), StreamId::new(2), StreamId::new(3)]);
    assert_eq!(log.num_streams(), 3);
    assert_eq!(
        log.streams(),
        vec![StreamId::DEFAULT, StreamId::new(1), StreamId::new(2), StreamId::new(3)]
    );
}

#[test]
fn test_clones_share_one_engine() {
    let log = StreamLog::new();
    let other = log.clone();
    other.append(&writer(), root("a")).unwrap();

    assert!(std::sync::Arc::ptr_eq(log.engine(), other.engine()));
    assert_eq!(log.engine().num_entries(), 1);
    assert_eq!(log.num_entries(), 1);
}
