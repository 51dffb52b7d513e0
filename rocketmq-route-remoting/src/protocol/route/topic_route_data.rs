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

use cheetah_string::CheetahString;
use rocketmq_route_error::RouteResult;
use rocketmq_route_error::SerializationError;
use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

use crate::protocol::route::route_data_view::BrokerData;
use crate::protocol::route::route_data_view::QueueData;

/// Route snapshot of one topic as answered by the name server.
#[derive(Debug, Serialize, Deserialize, Clone, Default, Eq, PartialEq)]
pub struct TopicRouteData {
    #[serde(rename = "orderTopicConf", default, skip_serializing_if = "Option::is_none")]
    pub order_topic_conf: Option<String>,
    #[serde(rename = "queueDatas", default)]
    pub queue_datas: Vec<QueueData>,
    #[serde(rename = "brokerDatas", default)]
    pub broker_datas: Vec<BrokerData>,
}

impl TopicRouteData {
    pub fn new() -> Self {
        TopicRouteData::default()
    }

    /// Decodes a route document from its JSON body.
    pub fn decode(body: &[u8]) -> RouteResult<TopicRouteData> {
        serde_json::from_slice::<TopicRouteData>(body)
            .map_err(|e| SerializationError::decode_failed("json", e.to_string()).into())
    }

    pub fn encode(&self) -> RouteResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| SerializationError::encode_failed("json", e.to_string()).into())
    }

    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.order_topic_conf.as_deref().is_some_and(|conf| !conf.is_empty())
    }

    /// Broker name and write queue count of each `brokerName:count` entry of
    /// the ordered-topic configuration, in document order.
    ///
    /// Entries without a `:` or with a non-numeric count are skipped.
    pub fn order_topic_entries(&self) -> Vec<(CheetahString, u32)> {
        let Some(conf) = self.order_topic_conf.as_deref() else {
            return Vec::new();
        };
        conf.split(';')
            .filter(|entry| !entry.trim().is_empty())
            .filter_map(|entry| {
                let Some((broker_name, nums)) = entry.split_once(':') else {
                    warn!("skip malformed order topic entry: {}", entry);
                    return None;
                };
                match nums.trim().parse::<u32>() {
                    Ok(nums) => Some((CheetahString::from_string(broker_name.trim().to_string()), nums)),
                    Err(_) => {
                        warn!("skip order topic entry with invalid queue count: {}", entry);
                        None
                    }
                }
            })
            .collect()
    }

    pub fn find_broker_data(&self, broker_name: &str) -> Option<&BrokerData> {
        self.broker_datas
            .iter()
            .find(|broker_data| broker_data.broker_name() == broker_name)
    }

    /// Whether `self` differs from the previously cached snapshot.
    ///
    /// Both snapshots are compared after sorting their queue and broker lists
    /// by broker name, so list order alone never counts as a change.
    pub fn topic_route_data_changed(&self, old_data: Option<&TopicRouteData>) -> bool {
        match old_data {
            None => true,
            Some(old) => self.normalized() != old.normalized(),
        }
    }

    fn normalized(&self) -> TopicRouteData {
        let mut data = self.clone();
        data.queue_datas.sort_by(|a, b| b.broker_name.cmp(&a.broker_name));
        data.broker_datas.sort_by(|a, b| b.broker_name().cmp(a.broker_name()));
        data
    }
}

/// True when either snapshot is missing or the two differ after normalization.
pub fn topic_route_data_differs(old_data: Option<&TopicRouteData>, new_data: Option<&TopicRouteData>) -> bool {
    match new_data {
        None => true,
        Some(new_data) => new_data.topic_route_data_changed(old_data),
    }
}
