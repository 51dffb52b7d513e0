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

//! Type definitions for the RouteDirectory tables
//!
//! Values are published behind an `Arc` and replaced as a whole; a reader
//! holding a value never observes a later update half applied.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use rocketmq_route_common::RocketMQTokioMutex;
use rocketmq_route_remoting::protocol::route::topic_route_data::TopicRouteData;

use crate::producer::producer_impl::topic_publish_info::TopicPublishInfo;
use crate::types::BrokerAddr;
use crate::types::BrokerName;
use crate::types::TopicName;

// ===== Table Type Aliases =====

/// Topic routing information table.
/// Maps topic name to the last route snapshot accepted for it.
pub type TopicRouteTable = Arc<DashMap<TopicName, Arc<TopicRouteData>>>;

/// Topic publish information table.
/// Maps topic name to the queues a producer may write to.
pub type TopicPublishInfoTable = Arc<DashMap<TopicName, Arc<TopicPublishInfo>>>;

/// Broker address table.
/// Maps broker name to a mapping of broker ID to broker address.
/// Broker ID 0 is master, others are slaves.
pub type BrokerAddrTable = Arc<DashMap<BrokerName, Arc<BTreeMap<u64, BrokerAddr>>>>;

/// Broker version table.
/// Maps broker name to a mapping of broker address to version code.
pub type BrokerVersionTable = Arc<DashMap<BrokerName, HashMap<BrokerAddr, i32>>>;

/// Per-topic refresh locks, created on first refresh of a topic.
pub type TopicRefreshLockTable = Arc<DashMap<TopicName, Arc<RocketMQTokioMutex<()>>>>;
