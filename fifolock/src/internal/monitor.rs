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

/// An exclusive-access scope paired with a condition that waiters can block on.
///
/// All reads and writes of the protected state go through [`Monitor::with`] or
/// [`Monitor::with_wait`].
pub(crate) struct Monitor<T> {
    state: imp::Mutex<T>,
    cond: imp::Condvar,
}

impl<T> Monitor<T> {
    pub(crate) const fn new(t: T) -> Self {
        Self {
            state: imp::Mutex::new(t),
            cond: imp::Condvar::new(),
        }
    }

    /// Runs `f` inside the exclusive-access scope.
    pub(crate) fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut state = imp::lock(&self.state);
        f(&mut state)
    }

    /// Runs `f` inside the exclusive-access scope, then wakes up every waiter so each of them can
    /// re-check its predicate.
    pub(crate) fn with_notify_all<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let r = self.with(f);
        self.cond.notify_all();
        r
    }

    /// Runs `f` inside the exclusive-access scope, then blocks the current thread for as long as
    /// `blocked` returns `true`.
    ///
    /// `f` and the first evaluation of `blocked` happen in the same scope. `blocked` is
    /// re-evaluated after every wakeup, spurious or not.
    pub(crate) fn with_wait<F, P, R>(&self, f: F, mut blocked: P) -> R
    where
        F: FnOnce(&mut T) -> R,
        P: FnMut(&T, &R) -> bool,
    {
        let mut state = imp::lock(&self.state);
        let r = f(&mut state);
        while blocked(&state, &r) {
            state = imp::wait(&self.cond, state);
        }
        r
    }
}

#[cfg(feature = "parking_lot")]
mod imp {
    pub(super) use parking_lot::Condvar;
    pub(super) use parking_lot::Mutex;
    use parking_lot::MutexGuard;

    pub(super) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock()
    }

    pub(super) fn wait<'a, T>(cond: &Condvar, mut guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
        cond.wait(&mut guard);
        guard
    }
}

#[cfg(not(feature = "parking_lot"))]
mod imp {
    pub(super) use std::sync::Condvar;
    pub(super) use std::sync::Mutex;
    use std::sync::MutexGuard;
    use std::sync::PoisonError;

    pub(super) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn wait<'a, T>(cond: &Condvar, guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
        cond.wait(guard).unwrap_or_else(PoisonError::into_inner)
    }
}
