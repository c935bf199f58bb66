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

use std::fmt;
use std::sync::Arc;

use crate::mutex::FifoMutex;

/// An owned handle to a held [`FifoMutex`].
///
/// Behaves like [`ScopedGuard`] but keeps the mutex alive through an [`Arc`], so the guard is
/// `'static` and can be moved freely between threads.
///
/// [`ScopedGuard`]: crate::guard::ScopedGuard
#[must_use = "if unused the FifoMutex will immediately unlock"]
pub struct OwnedScopedGuard {
    target: Option<Arc<FifoMutex>>,
    held: bool,
}

impl OwnedScopedGuard {
    /// Creates a guard over `mutex`, blocking until the lock is acquired.
    ///
    /// With `None` the guard is unbound and nothing is acquired.
    pub fn new(mutex: Option<Arc<FifoMutex>>) -> Self {
        let mut guard = Self {
            target: mutex,
            held: false,
        };
        guard.lock();
        guard
    }

    /// Returns the mutex this guard is bound to.
    pub fn mutex(&self) -> Option<&Arc<FifoMutex>> {
        self.target.as_ref()
    }

    pub fn is_locked(&self) -> bool {
        self.held
    }

    pub fn lock(&mut self) {
        if let Some(mutex) = &self.target {
            if !self.held {
                mutex.lock();
                self.held = true;
            }
        }
    }

    pub fn unlock(&mut self) {
        if let Some(mutex) = &self.target {
            if self.held {
                self.held = false;
                mutex.unlock();
            }
        }
    }

    pub fn relock(&mut self) {
        if let Some(mutex) = &self.target {
            if self.held {
                mutex.relock();
            } else {
                mutex.lock();
                self.held = true;
            }
        }
    }
}

impl Drop for OwnedScopedGuard {
    fn drop(&mut self) {
        self.unlock();
        self.target = None;
    }
}

impl fmt::Debug for OwnedScopedGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedScopedGuard")
            .field("bound", &self.target.is_some())
            .field("locked", &self.held)
            .finish()
    }
}
