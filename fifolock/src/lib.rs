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

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! A mutual exclusion lock that is granted in strict first-in first-out order, together with a
//! scope-bound guard.
//!
//! [`FifoMutex`] hands out a ticket to every caller of [`lock`](FifoMutex::lock) and serves the
//! tickets in order. [`ScopedGuard`] acquires the mutex on construction, releases it on drop, and
//! can give the lock up and take it back in between.
//!
//! # Examples
//!
//! ```
//! use fifolock::FifoMutex;
//! use fifolock::ScopedGuard;
//!
//! let mutex = FifoMutex::new();
//!
//! for i in 0..5 {
//!     let mut guard = ScopedGuard::new(Some(&mutex));
//!     println!("loop: {i}, is_locked: {}", guard.is_locked());
//!     mutex.debug("\tmutex");
//!     guard.relock();
//!     mutex.debug("\trelock");
//! }
//!
//! assert!(!mutex.is_locked());
//! ```
//!
//! # Features
//!
//! * `parking_lot`: use `parking_lot` instead of `std::sync` for the internal bookkeeping lock.

mod internal;

pub mod guard;
pub mod mutex;

pub use guard::OwnedScopedGuard;
pub use guard::ScopedGuard;
pub use mutex::FifoMutex;
pub use mutex::Snapshot;
