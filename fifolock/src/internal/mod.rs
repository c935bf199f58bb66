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

//! Synchronized primitives for internal usage.
//!
//! The ticket counters are only ever touched inside a [`Monitor`] scope. Those scopes never run
//! caller code, so they are held for a handful of instructions and can never deadlock.

mod monitor;

pub(crate) use monitor::Monitor;
