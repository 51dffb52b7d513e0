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

use std::collections::HashMap;

use cheetah_string::CheetahString;

pub trait CommandCustomHeader {
    /// Converts the header into the string map carried as the command's ext fields.
    ///
    /// Returns `None` when the header carries nothing.
    fn to_map(&self) -> Option<HashMap<CheetahString, CheetahString>>;
}

pub trait FromMap {
    type Target;

    /// Rebuilds a header from ext fields; `None` if a required field is missing.
    fn from(map: &HashMap<CheetahString, CheetahString>) -> Option<Self::Target>;
}
