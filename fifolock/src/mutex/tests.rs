// Copyright 2024 tison <wander4096@gmail.com>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread::JoinHandle;

use super::*;

/// Spins until `mutex` has handed out `end` tickets.
fn wait_for_end(mutex: &FifoMutex, end: u64) {
    while mutex.snapshot().end() < end {
        std::thread::yield_now();
    }
}

#[test]
fn test_new_mutex_is_unlocked() {
    let mutex = FifoMutex::default();
    assert!(!mutex.is_locked());
    assert_eq!(mutex.snapshot(), Snapshot { current: 0, end: 0 });
}

#[test]
fn test_fast_path_issues_one_ticket() {
    let mutex = FifoMutex::new();
    mutex.lock();
    assert!(mutex.is_locked());
    assert_eq!(mutex.snapshot(), Snapshot { current: 0, end: 1 });

    mutex.unlock();
    assert!(!mutex.is_locked());
    assert_eq!(mutex.snapshot(), Snapshot { current: 1, end: 1 });
}

#[test]
fn test_counters_track_lock_and_unlock() {
    let mutex = FifoMutex::new();
    for i in 1..=10 {
        mutex.lock();
        assert_eq!(mutex.snapshot().end(), i);
        assert_eq!(mutex.snapshot().current(), i - 1);
        mutex.unlock();
        assert_eq!(mutex.snapshot().current(), i);
    }
}

#[test]
fn test_relock_uncontended_takes_new_ticket() {
    let mutex = FifoMutex::new();
    mutex.lock();
    mutex.relock();
    assert!(mutex.is_locked());
    assert_eq!(mutex.snapshot(), Snapshot { current: 1, end: 2 });
    mutex.unlock();
    assert_eq!(mutex.snapshot(), Snapshot { current: 2, end: 2 });
}

#[test]
fn test_acquire_in_ticket_order() {
    let mutex = Arc::new(FifoMutex::new());
    let order = Arc::new(Mutex::new(Vec::new()));

    mutex.lock();

    let mut handles: Vec<JoinHandle<()>> = Vec::new();
    for i in 0..3 {
        let mutex_clone = mutex.clone();
        let order = order.clone();
        handles.push(std::thread::spawn(move || {
            mutex_clone.lock();
            order.lock().unwrap().push(i);
            mutex_clone.unlock();
        }));
        // thread `i` holds ticket `i + 1` before the next one is spawned
        wait_for_end(&mutex, i + 2);
    }

    assert_eq!(mutex.snapshot().queued(), 4);
    mutex.unlock();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    assert_eq!(mutex.snapshot(), Snapshot { current: 4, end: 4 });
}

#[test]
fn test_relock_lets_waiter_go_first() {
    let mutex = Arc::new(FifoMutex::new());
    let order = Arc::new(Mutex::new(Vec::new()));

    mutex.lock();

    let waiter = {
        let mutex = mutex.clone();
        let order = order.clone();
        std::thread::spawn(move || {
            mutex.lock();
            order.lock().unwrap().push("waiter");
            mutex.unlock();
        })
    };
    wait_for_end(&mutex, 2);

    mutex.relock();
    order.lock().unwrap().push("holder");
    mutex.unlock();

    waiter.join().unwrap();
    assert_eq!(*order.lock().unwrap(), vec!["waiter", "holder"]);
    assert_eq!(mutex.snapshot(), Snapshot { current: 3, end: 3 });
}

#[test]
fn test_mutual_exclusion() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 200;

    let mutex = Arc::new(FifoMutex::new());
    let inside = Arc::new(AtomicUsize::new(0));
    let total = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let mutex = mutex.clone();
            let inside = inside.clone();
            let total = total.clone();
            std::thread::spawn(move || {
                for round in 0..ROUNDS {
                    mutex.lock();
                    assert_eq!(inside.fetch_add(1, Ordering::SeqCst), 0);
                    total.fetch_add(1, Ordering::Relaxed);
                    if round % 10 == 0 {
                        std::thread::yield_now();
                    }
                    inside.fetch_sub(1, Ordering::SeqCst);
                    if round % 3 == 0 {
                        mutex.relock();
                        assert_eq!(inside.load(Ordering::SeqCst), 0);
                    }
                    mutex.unlock();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(total.load(Ordering::Relaxed), THREADS * ROUNDS);
    let snapshot = mutex.snapshot();
    assert_eq!(snapshot.current(), snapshot.end());
    assert!(!mutex.is_locked());
}

#[test]
fn test_snapshot_display() {
    let mutex = FifoMutex::new();
    mutex.lock();
    assert_eq!(mutex.snapshot().to_string(), "current: 0, end: 1");
    assert_eq!(
        format!("{mutex:?}"),
        "FifoMutex { current: 0, end: 1 }"
    );
    mutex.debug("test");
    mutex.unlock();
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "ticket invariant broken")]
fn test_unlock_without_lock_is_caught() {
    let mutex = FifoMutex::new();
    mutex.unlock();
}
