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

//! A mutual exclusion primitive that grants the lock in strict request order.
//!
//! Every call to [`FifoMutex::lock`] draws a ticket. Tickets are served one at a time, in the
//! order they were drawn, so a thread can never be overtaken by a later arrival. An ordinary
//! mutex makes no such promise.
//!
//! The mutex does not protect any data by itself and does not track which thread holds it. Pair
//! it with a [`ScopedGuard`] to tie ownership to a scope.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use fifolock::mutex::FifoMutex;
//!
//! let mutex = Arc::new(FifoMutex::new());
//! let mut handles = Vec::new();
//!
//! for _ in 0..3 {
//!     let mutex = mutex.clone();
//!     handles.push(std::thread::spawn(move || {
//!         let _guard = mutex.scoped();
//!         // critical section
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! let snapshot = mutex.snapshot();
//! assert_eq!(snapshot.current(), 3);
//! assert_eq!(snapshot.end(), 3);
//! ```
//!
//! [`ScopedGuard`]: crate::guard::ScopedGuard

use std::fmt;
use std::sync::Arc;

use crate::guard::OwnedScopedGuard;
use crate::guard::ScopedGuard;
use crate::internal::Monitor;

#[cfg(test)]
mod tests;

/// A ticket-based mutex that is always fair.
///
/// See the [module level documentation](self) for more.
pub struct FifoMutex {
    tickets: Monitor<Tickets>,
}

#[derive(Debug)]
struct Tickets {
    /// The ticket entitled to hold the lock.
    current: u64,
    /// The next ticket to hand out.
    end: u64,
}

impl Tickets {
    fn issue(&mut self) -> u64 {
        let ticket = self.end;
        self.end += 1;
        debug_assert!(self.current <= self.end, "ticket invariant broken: {self:?}");
        ticket
    }

    fn serve_next(&mut self) {
        self.current += 1;
        debug_assert!(self.current <= self.end, "ticket invariant broken: {self:?}");
    }
}

impl Default for FifoMutex {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FifoMutex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("FifoMutex")
            .field("current", &snapshot.current)
            .field("end", &snapshot.end)
            .finish()
    }
}

impl FifoMutex {
    /// Creates a new mutex in an unlocked state ready for use.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifolock::mutex::FifoMutex;
    ///
    /// static MUTEX: FifoMutex = FifoMutex::new();
    /// assert!(!MUTEX.is_locked());
    /// ```
    pub const fn new() -> Self {
        Self {
            tickets: Monitor::new(Tickets { current: 0, end: 0 }),
        }
    }

    /// Acquires the lock, blocking the current thread until every earlier ticket has been served.
    ///
    /// If no ticket is outstanding the call returns immediately. Otherwise the thread sleeps
    /// until its own ticket becomes current. There is no way to abandon a drawn ticket.
    ///
    /// Every `lock` must be paired with exactly one [`unlock`](Self::unlock).
    pub fn lock(&self) {
        let ticket = self.tickets.with_wait(
            |tickets| {
                let ticket = tickets.issue();
                tracing::trace!(
                    ticket,
                    current = tickets.current,
                    end = tickets.end,
                    fast_path = tickets.current == ticket,
                    "ticket issued"
                );
                ticket
            },
            |tickets, ticket| tickets.current != *ticket,
        );
        tracing::trace!(ticket, "lock granted");
    }

    /// Releases the lock and lets the next ticket in line proceed.
    ///
    /// The caller must currently hold the lock. This is not checked: no owner is recorded, and
    /// releasing a lock that is not held breaks the ticket bookkeeping for every other user of
    /// this mutex. Prefer a [`ScopedGuard`], which never releases more than once.
    pub fn unlock(&self) {
        let current = self.tickets.with_notify_all(|tickets| {
            tickets.serve_next();
            tickets.current
        });
        tracing::trace!(current, "lock released");
    }

    /// Releases the lock and immediately queues up for it again with a fresh ticket.
    ///
    /// This is a yield point: every thread that was already waiting is served before the caller
    /// gets the lock back. If nobody is waiting, the caller reacquires without blocking.
    ///
    /// The caller must currently hold the lock, as for [`unlock`](Self::unlock).
    pub fn relock(&self) {
        tracing::trace!("relock");
        self.unlock();
        self.lock();
    }

    /// Writes the current ticket counters, prefixed by `label`, to standard error.
    pub fn debug(&self, label: &str) {
        eprintln!("{label}, {}", self.snapshot());
    }

    /// Returns a consistent copy of the ticket counters.
    pub fn snapshot(&self) -> Snapshot {
        self.tickets.with(|tickets| Snapshot {
            current: tickets.current,
            end: tickets.end,
        })
    }

    /// Returns `true` if some thread holds the lock.
    ///
    /// The answer may be stale by the time it is observed. This method is meant for debugging
    /// and testing.
    pub fn is_locked(&self) -> bool {
        self.snapshot().queued() != 0
    }

    /// Acquires the lock and returns a guard that releases it when dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifolock::mutex::FifoMutex;
    ///
    /// let mutex = FifoMutex::new();
    /// let guard = mutex.scoped();
    /// assert!(guard.is_locked());
    /// drop(guard);
    /// assert!(!mutex.is_locked());
    /// ```
    pub fn scoped(&self) -> ScopedGuard<'_> {
        ScopedGuard::new(Some(self))
    }

    /// Acquires the lock and returns a guard that keeps the mutex alive and releases the lock
    /// when dropped.
    ///
    /// Unlike [`scoped`](Self::scoped), the returned guard has no lifetime and can be moved into
    /// another thread.
    pub fn scoped_owned(self: &Arc<Self>) -> OwnedScopedGuard {
        OwnedScopedGuard::new(Some(self.clone()))
    }
}

/// A point-in-time copy of the ticket counters of a [`FifoMutex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    current: u64,
    end: u64,
}

impl Snapshot {
    /// The ticket entitled to hold the lock.
    pub fn current(&self) -> u64 {
        self.current
    }

    /// The next ticket to be handed out.
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of outstanding tickets, the holder included.
    pub fn queued(&self) -> u64 {
        self.end.saturating_sub(self.current)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "current: {}, end: {}", self.current, self.end)
    }
}
