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

//! Scope-bound ownership of a [`FifoMutex`].
//!
//! A guard acquires the mutex when it is constructed and releases it when it goes out of scope.
//! In between, the lock can be given up and taken back with [`ScopedGuard::unlock`],
//! [`ScopedGuard::lock`] and [`ScopedGuard::relock`]. The guard remembers whether it holds the
//! lock, so the mutex is released at most once per acquisition no matter how those calls are
//! mixed.
//!
//! A guard built without a mutex is *unbound*: every operation is a no-op and it never reports
//! being locked.
//!
//! # Examples
//!
//! ```
//! use fifolock::guard::ScopedGuard;
//! use fifolock::mutex::FifoMutex;
//!
//! let mutex = FifoMutex::new();
//! {
//!     let mut guard = ScopedGuard::new(Some(&mutex));
//!     assert!(guard.is_locked());
//!
//!     guard.unlock();
//!     assert!(!mutex.is_locked());
//!
//!     guard.lock();
//!     assert!(mutex.is_locked());
//! }
//! assert!(!mutex.is_locked());
//! ```

use std::fmt;

use crate::mutex::FifoMutex;

mod owned;
pub use owned::OwnedScopedGuard;


/// An RAII implementation of a "scoped lock" of a [`FifoMutex`].
///
/// See the [module level documentation](self) for more.
#[must_use = "if unused the FifoMutex will immediately unlock"]
pub struct ScopedGuard<'a> {
    target: Option<&'a FifoMutex>,
    held: bool,
}

impl<'a> ScopedGuard<'a> {
    /// Creates a guard over `mutex`, blocking until the lock is acquired.
    ///
    /// With `None` the guard is unbound and nothing is acquired.
    pub fn new(mutex: Option<&'a FifoMutex>) -> Self {
        let mut guard = Self {
            target: mutex,
            held: false,
        };
        guard.lock();
        guard
    }

    /// Creates a guard that is not bound to any mutex.
    pub const fn unbound() -> Self {
        Self {
            target: None,
            held: false,
        }
    }

    /// Returns the mutex this guard is bound to.
    pub fn mutex(&self) -> Option<&'a FifoMutex> {
        self.target
    }

    /// Returns `true` if this guard currently holds the lock.
    pub fn is_locked(&self) -> bool {
        self.held
    }

    /// Reacquires the lock after an [`unlock`](Self::unlock).
    ///
    /// Does nothing if the lock is already held or the guard is unbound.
    pub fn lock(&mut self) {
        if let Some(mutex) = self.target {
            if !self.held {
                mutex.lock();
                self.held = true;
            }
        }
    }

    /// Releases the lock early.
    ///
    /// Does nothing if the lock is not held or the guard is unbound.
    pub fn unlock(&mut self) {
        if let Some(mutex) = self.target {
            if self.held {
                self.held = false;
                mutex.unlock();
            }
        }
    }

    /// Releases the lock and queues up for it again, letting every waiting thread go first.
    ///
    /// If the lock is not held this behaves like [`lock`](Self::lock). Does nothing if the guard
    /// is unbound.
    pub fn relock(&mut self) {
        if let Some(mutex) = self.target {
            if self.held {
                mutex.relock();
            } else {
                mutex.lock();
                self.held = true;
            }
        }
    }
}

impl Drop for ScopedGuard<'_> {
    fn drop(&mut self) {
        self.unlock();
        self.target = None;
    }
}

impl fmt::Debug for ScopedGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedGuard")
            .field("bound", &self.target.is_some())
            .field("locked", &self.held)
            .finish()
    }
}
