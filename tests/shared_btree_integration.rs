//! Integration tests for the shared (externally locked) B-tree handle.
//!
//! These tests verify that writers and readers on different threads see a
//! consistent tree when every operation goes through `SharedBTree`.

use std::sync::Arc;
use std::sync::Barrier;
use std::thread;

use btree_index::SharedBTree;

/// Test concurrent writers inserting disjoint key ranges.
#[test]
fn test_concurrent_writers() {
    let index: SharedBTree<u64, u64> = SharedBTree::new(3).unwrap();
    let mut handles = vec![];

    for t in 0..4u64 {
        let index = index.clone();
        handles.push(thread::spawn(move || {
            for j in 0..250 {
                let key = t * 1000 + j;
                index.insert(key, key * 2);
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(index.len(), 1000);
    index.read().validate().unwrap();
    for t in 0..4u64 {
        for j in 0..250 {
            let key = t * 1000 + j;
            assert_eq!(index.get(&key), Some(key * 2));
        }
    }
}

/// Test readers always observe a sorted, valid tree while a writer runs.
#[test]
fn test_readers_see_consistent_snapshots() {
    let index: SharedBTree<i64, i64> = SharedBTree::new(2).unwrap();
    let barrier = Arc::new(Barrier::new(3));

    let writer = {
        let index = index.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for k in (0..500).rev() {
                index.insert(k, -k);
            }
        })
    };

    let readers: Vec<_> = (0..2)
        .map(|_| {
            let index = index.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..50 {
                    let entries = index.entries();
                    assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
                    assert!(entries.iter().all(|(k, v)| *v == -*k));
                    index.read().validate().unwrap();
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }

    assert_eq!(index.len(), 500);
}

/// Test stats accuracy under concurrent lookups.
#[test]
fn test_stats_accuracy() {
    let index: SharedBTree<i64, ()> = SharedBTree::new(4).unwrap();
    for k in 0..100 {
        index.insert(k, ());
    }

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let index = index.clone();
            thread::spawn(move || {
                for k in 0..200 {
                    index.get(&k);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let stats = index.stats();
    assert_eq!(stats.inserts, 100);
    assert_eq!(stats.searches, 800);
    assert_eq!(stats.search_hits, 400);
    assert_eq!(stats.hit_rate(), 0.5);
}
