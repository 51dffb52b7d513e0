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

//! Topic route resolution for a RocketMQ client.
//!
//! [`RouteDirectory`] fetches topic routes from a name server through a
//! [`RemotingClient`](rocketmq_route_remoting::clients::RemotingClient), keeps
//! the route, publish-info and broker-address tables current, and answers
//! broker address lookups. [`TopicPublishInfo`] selects write queues
//! round-robin.

pub use crate::base::client_config::ClientConfig;
pub use crate::factory::route_directory::RouteDirectory;
pub use crate::implementation::find_broker_result::FindBrokerResult;
pub use crate::producer::producer_impl::topic_publish_info::TopicPublishInfo;

pub mod base;
pub mod common;
pub mod factory;
pub mod implementation;
pub mod producer;
pub mod types;
