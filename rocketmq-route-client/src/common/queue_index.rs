// Copyright 2023 The RocketMQ Rust Authors
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
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

/// Round-robin cursor shared by every caller of one publish info.
///
/// Each call to [`QueueIndex::increment_and_get`] observes a distinct value,
/// whatever the number of concurrent callers.
#[derive(Default)]
pub struct QueueIndex {
    index: AtomicU64,
}

impl QueueIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_and_get(&self) -> u64 {
        self.index.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
    }

    pub fn get(&self) -> u64 {
        self.index.load(Ordering::Acquire)
    }
}

impl fmt::Display for QueueIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueueIndex {{ index={} }}", self.get())
    }
}

impl fmt::Debug for QueueIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
