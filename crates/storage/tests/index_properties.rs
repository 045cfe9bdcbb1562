//! Property tests for OrderedIndex ordering and removal.

use proptest::prelude::*;
use std::collections::BTreeMap;
use storekit_storage::OrderedIndex;

fn entries() -> impl Strategy<Value = Vec<(u8, i64)>> {
    // Small timestamp range so buckets get shared
    prop::collection::vec((any::<u8>(), 0i64..20), 0..64)
}

/// Dedup by key, last write wins, like a table would hold them
fn unique(entries: &[(u8, i64)]) -> BTreeMap<String, i64> {
    entries
        .iter()
        .map(|(k, ts)| (format!("/ns/{}", k), *ts))
        .collect()
}

proptest! {
    #[test]
    fn ascending_is_sorted_by_timestamp(raw in entries()) {
        let records = unique(&raw);
        let index = OrderedIndex::with_growth(2, 1, 4);
        for (key, ts) in &records {
            index.insert(key.clone(), *ts);
        }

        let keys: Vec<String> = index.ascending().collect();
        prop_assert_eq!(keys.len(), records.len());
        let stamps: Vec<i64> = keys.iter().map(|k| records[k]).collect();
        prop_assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn descending_reverses_ascending(raw in entries()) {
        let index = OrderedIndex::new();
        for (key, ts) in unique(&raw) {
            index.insert(key, ts);
        }
        let mut asc: Vec<String> = index.ascending().collect();
        asc.reverse();
        let desc: Vec<String> = index.descending().collect();
        prop_assert_eq!(asc, desc);
    }

    #[test]
    fn buckets_strictly_increase(raw in entries()) {
        let index = OrderedIndex::new();
        for (key, ts) in unique(&raw) {
            index.insert(key, ts);
        }
        let buckets = index.buckets();
        prop_assert!(buckets.windows(2).all(|w| w[0].timestamp() < w[1].timestamp()));
        prop_assert!(buckets.iter().all(|b| !b.keys().is_empty()));
    }

    #[test]
    fn remove_drops_exactly_one(raw in entries(), pick in any::<prop::sample::Index>()) {
        let records = unique(&raw);
        prop_assume!(!records.is_empty());
        let index = OrderedIndex::new();
        for (key, ts) in &records {
            index.insert(key.clone(), *ts);
        }

        let (victim, ts) = records.iter().nth(pick.index(records.len())).unwrap();
        prop_assert!(index.remove(victim, *ts));
        prop_assert!(!index.contains(victim, *ts));
        prop_assert_eq!(index.len(), records.len() - 1);
        // Second removal is a no-op
        prop_assert!(!index.remove(victim, *ts));
    }
}
