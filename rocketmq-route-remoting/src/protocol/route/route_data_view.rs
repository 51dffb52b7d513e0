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

use std::collections::BTreeMap;
use std::fmt::Write;

use cheetah_string::CheetahString;
use rocketmq_route_common::common::mix_all;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

/// One broker group serving a topic: its cluster, name and replica addresses.
///
/// On the wire `brokerAddrs` is a string holding a map literal such as
/// `{0:"127.0.0.1:10911",1:"127.0.0.1:10921"}`. A native JSON object is
/// accepted as well.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BrokerData {
    cluster: CheetahString,
    #[serde(rename = "brokerName")]
    broker_name: CheetahString,
    #[serde(
        rename = "brokerAddrs",
        default,
        serialize_with = "serialize_broker_addrs",
        deserialize_with = "deserialize_broker_addrs"
    )]
    broker_addrs: BTreeMap<u64 /* broker id */, CheetahString /* broker ip */>,
}

impl BrokerData {
    pub fn new(
        cluster: impl Into<CheetahString>,
        broker_name: impl Into<CheetahString>,
        broker_addrs: BTreeMap<u64, CheetahString>,
    ) -> BrokerData {
        BrokerData {
            cluster: cluster.into(),
            broker_name: broker_name.into(),
            broker_addrs,
        }
    }

    #[inline]
    pub fn cluster(&self) -> &CheetahString {
        &self.cluster
    }

    #[inline]
    pub fn broker_name(&self) -> &CheetahString {
        &self.broker_name
    }

    #[inline]
    pub fn broker_addrs(&self) -> &BTreeMap<u64, CheetahString> {
        &self.broker_addrs
    }

    #[inline]
    pub fn master_addr(&self) -> Option<&CheetahString> {
        self.broker_addrs.get(&mix_all::MASTER_ID)
    }

    /// Master address if recorded, otherwise the first non-empty replica address.
    pub fn select_broker_addr(&self) -> Option<CheetahString> {
        self.master_addr()
            .filter(|addr| !addr.is_empty())
            .or_else(|| self.broker_addrs.values().find(|addr| !addr.is_empty()))
            .cloned()
    }

    /// Parses a broker address map literal.
    ///
    /// Braces are stripped, entries are split on `,` and each entry on its
    /// first `:`. Quotes are removed from ids and addresses. Entries without a
    /// `:` or with a non-numeric id are skipped.
    pub fn parse_broker_addrs(literal: &str) -> BTreeMap<u64, CheetahString> {
        let trimmed = literal.trim();
        let inner = trimmed
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .unwrap_or(trimmed);

        let mut broker_addrs = BTreeMap::new();
        for entry in inner.split(',') {
            let Some((id, addr)) = entry.split_once(':') else {
                continue;
            };
            let Ok(id) = id.trim().trim_matches('"').trim().parse::<u64>() else {
                continue;
            };
            let addr: String = addr.trim().chars().filter(|c| *c != '"').collect();
            broker_addrs.insert(id, CheetahString::from_string(addr));
        }
        broker_addrs
    }

    /// Renders the address map back into the literal form `parse_broker_addrs` reads.
    pub fn encode_broker_addrs(broker_addrs: &BTreeMap<u64, CheetahString>) -> String {
        let mut literal = String::from("{");
        for (index, (id, addr)) in broker_addrs.iter().enumerate() {
            if index > 0 {
                literal.push(',');
            }
            let _ = write!(literal, "{id}:\"{addr}\"");
        }
        literal.push('}');
        literal
    }
}

fn serialize_broker_addrs<S>(broker_addrs: &BTreeMap<u64, CheetahString>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(BrokerData::encode_broker_addrs(broker_addrs).as_str())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BrokerAddrsRepr {
    Literal(String),
    Table(BTreeMap<String, Option<String>>),
}

fn deserialize_broker_addrs<'de, D>(deserializer: D) -> Result<BTreeMap<u64, CheetahString>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<BrokerAddrsRepr>::deserialize(deserializer)?;
    Ok(match repr {
        None => BTreeMap::new(),
        Some(BrokerAddrsRepr::Literal(literal)) => BrokerData::parse_broker_addrs(literal.as_str()),
        Some(BrokerAddrsRepr::Table(table)) => table
            .into_iter()
            .filter_map(|(id, addr)| {
                let id = id.trim().parse::<u64>().ok()?;
                Some((id, CheetahString::from_string(addr.unwrap_or_default())))
            })
            .collect(),
    })
}

/// Queue layout of a topic on one broker.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct QueueData {
    #[serde(rename = "brokerName")]
    pub broker_name: CheetahString,
    #[serde(rename = "readQueueNums")]
    pub read_queue_nums: u32,
    #[serde(rename = "writeQueueNums")]
    pub write_queue_nums: u32,
    pub perm: u32,
    /// Reserved, carried through unchanged.
    #[serde(rename = "topicSynFlag", alias = "topicSysFlag", default)]
    pub topic_syn_flag: u32,
}

impl QueueData {
    pub fn new(
        broker_name: impl Into<CheetahString>,
        read_queue_nums: u32,
        write_queue_nums: u32,
        perm: u32,
        topic_syn_flag: u32,
    ) -> Self {
        Self {
            broker_name: broker_name.into(),
            read_queue_nums,
            write_queue_nums,
            perm,
            topic_syn_flag,
        }
    }

    #[inline]
    pub fn broker_name(&self) -> &CheetahString {
        &self.broker_name
    }

    #[inline]
    pub fn read_queue_nums(&self) -> u32 {
        self.read_queue_nums
    }

    #[inline]
    pub fn write_queue_nums(&self) -> u32 {
        self.write_queue_nums
    }

    #[inline]
    pub fn perm(&self) -> u32 {
        self.perm
    }

    #[inline]
    pub fn topic_syn_flag(&self) -> u32 {
        self.topic_syn_flag
    }
}
