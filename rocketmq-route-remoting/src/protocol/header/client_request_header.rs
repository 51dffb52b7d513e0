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
use serde::Deserialize;
use serde::Serialize;

use crate::protocol::command_custom_header::CommandCustomHeader;
use crate::protocol::command_custom_header::FromMap;

/// Header of a "get route info by topic" request.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GetRouteInfoRequestHeader {
    pub topic: CheetahString,

    #[serde(rename = "acceptStandardJsonOnly")]
    pub accept_standard_json_only: Option<bool>,
}

impl GetRouteInfoRequestHeader {
    const ACCEPT_STANDARD_JSON_ONLY: &'static str = "acceptStandardJsonOnly";
    const TOPIC: &'static str = "topic";

    pub fn new(topic: impl Into<CheetahString>, accept_standard_json_only: Option<bool>) -> Self {
        GetRouteInfoRequestHeader {
            topic: topic.into(),
            accept_standard_json_only,
        }
    }
}

impl CommandCustomHeader for GetRouteInfoRequestHeader {
    fn to_map(&self) -> Option<HashMap<CheetahString, CheetahString>> {
        let mut map = HashMap::new();
        map.insert(CheetahString::from_static_str(Self::TOPIC), self.topic.clone());
        if let Some(value) = self.accept_standard_json_only {
            map.insert(
                CheetahString::from_static_str(Self::ACCEPT_STANDARD_JSON_ONLY),
                CheetahString::from_string(value.to_string()),
            );
        }
        Some(map)
    }
}

impl FromMap for GetRouteInfoRequestHeader {
    type Target = GetRouteInfoRequestHeader;

    fn from(map: &HashMap<CheetahString, CheetahString>) -> Option<Self::Target> {
        Some(GetRouteInfoRequestHeader {
            topic: map.get(&CheetahString::from_static_str(Self::TOPIC)).cloned()?,
            accept_standard_json_only: map
                .get(&CheetahString::from_static_str(Self::ACCEPT_STANDARD_JSON_ONLY))
                .and_then(|value| value.as_str().parse::<bool>().ok()),
        })
    }
}
