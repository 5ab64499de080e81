//! Property Tests
//!
//! Randomized workloads checked against the log's invariants.

use crate::*;
use proptest::prelude::*;

const STREAMS: u64 = 4;

/// One append: stream memberships as indices into 1..=STREAMS
fn workload() -> impl Strategy<Value = Vec<Vec<u64>>> {
    prop::collection::vec(prop::collection::vec(1..=STREAMS, 0..4), 0..80)
}

fn build(workload: &[Vec<u64>]) -> StreamLog {
    let (log, _) = log_with_open_streams(STREAMS);
    for (i, members) in workload.iter().enumerate() {
        let request = AppendRequest::data(vec![i as u8]).to_streams(members.clone());
        log.append(&writer(), request).unwrap();
    }
    log
}

fn query() -> impl Strategy<Value = Vec<StreamId>> {
    prop::collection::vec((0..=STREAMS).prop_map(StreamId::new), 1..5)
}

proptest! {
    #[test]
    fn prop_indices_ascending_and_complete(workload in workload()) {
        let log = build(&workload);
        prop_assert_eq!(log.num_entries(), workload.len() as u64);

        for id in 1..=STREAMS {
            let stream = StreamId::new(id);
            let indices = log.indices_of(stream).unwrap();
            prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));

            let expected: Vec<Position> = workload
                .iter()
                .enumerate()
                .filter(|(_, members)| members.contains(&id))
                .map(|(i, _)| i as Position)
                .collect();
            prop_assert_eq!(indices, expected);
        }
    }

    #[test]
    fn prop_scan_and_merge_agree(workload in workload(), query in query()) {
        let log = build(&workload);
        let scanned = log.scan(&query, 0, usize::MAX).unwrap();
        let merged = log
            .merge_scan(&query, &vec![0; query.len()], usize::MAX)
            .unwrap();

        prop_assert!(positions(&scanned.entries).windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(scanned.entries, merged.entries);
    }

    #[test]
    fn prop_scan_pagination_is_lossless(
        workload in workload(),
        query in query(),
        page_size in 1usize..10,
    ) {
        let log = build(&workload);
        let whole = log.scan(&query, 0, usize::MAX).unwrap();

        let mut from = 0;
        let mut paged = Vec::new();
        loop {
            let page = log.scan(&query, from, page_size).unwrap();
            prop_assert!(page.next_position >= from);
            from = page.next_position;
            if page.count() == 0 {
                break;
            }
            paged.extend(page.entries);
        }
        prop_assert_eq!(positions(&paged), positions(&whole.entries));
    }
}
