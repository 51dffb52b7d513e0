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

use rocketmq_route_common::common::message::message_queue::MessageQueue;

/// Eligibility predicate for queue selection.
pub trait QueueFilter: Send + Sync + 'static {
    /// Returns `true` if `mq` may be selected.
    fn filter(&self, mq: &MessageQueue) -> bool;
}

/// Any matching closure is a `QueueFilter`.
impl<F> QueueFilter for F
where
    F: Fn(&MessageQueue) -> bool + Send + Sync + 'static,
{
    fn filter(&self, mq: &MessageQueue) -> bool {
        self(mq)
    }
}

/// Rejects queues hosted on one broker.
pub struct ExcludeBrokerFilter {
    broker_name: String,
}

impl ExcludeBrokerFilter {
    pub fn new(broker_name: impl Into<String>) -> Self {
        Self {
            broker_name: broker_name.into(),
        }
    }
}

impl QueueFilter for ExcludeBrokerFilter {
    fn filter(&self, mq: &MessageQueue) -> bool {
        mq.get_broker_name().as_str() != self.broker_name
    }
}
