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

/// Queue permission bits carried by a route's queue data.
///
/// Always test a permission with the predicates below; a queue may carry
/// several bits at once.
pub struct PermName;

impl PermName {
    pub const INDEX_PERM_INHERIT: u32 = 0;
    pub const INDEX_PERM_PRIORITY: u32 = 3;
    pub const INDEX_PERM_READ: u32 = 2;
    pub const INDEX_PERM_WRITE: u32 = 1;
    pub const PERM_INHERIT: u32 = 0x1 << Self::INDEX_PERM_INHERIT;
    pub const PERM_PRIORITY: u32 = 0x1 << Self::INDEX_PERM_PRIORITY;
    pub const PERM_READ: u32 = 0x1 << Self::INDEX_PERM_READ;
    pub const PERM_WRITE: u32 = 0x1 << Self::INDEX_PERM_WRITE;

    #[inline]
    pub fn perm_to_string(perm: u32) -> String {
        let mut s = ['-', '-', '-'];
        if Self::is_readable(perm) {
            s[0] = 'R';
        }
        if Self::is_writeable(perm) {
            s[1] = 'W';
        }
        if Self::is_inherited(perm) {
            s[2] = 'X';
        }
        s.iter().collect()
    }

    #[inline]
    pub fn is_readable(perm: u32) -> bool {
        (perm & Self::PERM_READ) == Self::PERM_READ
    }

    #[inline]
    pub fn is_writeable(perm: u32) -> bool {
        (perm & Self::PERM_WRITE) == Self::PERM_WRITE
    }

    #[inline]
    pub fn is_inherited(perm: u32) -> bool {
        (perm & Self::PERM_INHERIT) == Self::PERM_INHERIT
    }

    #[inline]
    pub fn is_priority(perm: u32) -> bool {
        (perm & Self::PERM_PRIORITY) == Self::PERM_PRIORITY
    }
}
