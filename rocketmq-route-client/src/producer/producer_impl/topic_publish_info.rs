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

use std::sync::Arc;

use cheetah_string::CheetahString;
use rocketmq_route_common::common::message::message_queue::MessageQueue;
use rocketmq_route_error::RouteError;
use rocketmq_route_error::RouteResult;
use rocketmq_route_remoting::protocol::route::topic_route_data::TopicRouteData;

use crate::common::queue_index::QueueIndex;
use crate::producer::producer_impl::queue_filter::QueueFilter;

/// Write-side view of a topic: the queues a producer may target, in
/// selection order.
///
/// Published into the route directory behind an `Arc` and never mutated
/// afterwards, except for the `send_which_queue` cursor.
#[derive(Default, Debug)]
pub struct TopicPublishInfo {
    pub topic: CheetahString,
    pub order_topic: bool,
    pub have_topic_router_info: bool,
    pub message_queue_list: Vec<MessageQueue>,
    pub send_which_queue: QueueIndex,
    pub topic_route_data: Option<Arc<TopicRouteData>>,
}

impl TopicPublishInfo {
    pub fn new() -> Self {
        TopicPublishInfo::default()
    }

    /// True iff at least one queue can be selected.
    #[inline]
    pub fn ok(&self) -> bool {
        !self.message_queue_list.is_empty()
    }

    /// Advances the cursor and returns the selected position in
    /// `message_queue_list`.
    ///
    /// Fails with [`RouteError::RouteUnavailable`] when the list is empty.
    pub fn next_index(&self) -> RouteResult<usize> {
        let len = self.message_queue_list.len();
        if len == 0 {
            return Err(RouteError::route_unavailable(self.topic.as_str()));
        }
        Ok((self.send_which_queue.increment_and_get() % len as u64) as usize)
    }

    #[inline]
    pub fn select_one_message_queue(&self) -> Option<MessageQueue> {
        let index = self.next_index().ok()?;
        Some(self.message_queue_list[index].clone())
    }

    /// Round-robin selection that avoids `last_broker_name` while another
    /// broker is available.
    pub fn select_one_message_queue_by_broker(&self, last_broker_name: Option<&CheetahString>) -> Option<MessageQueue> {
        let Some(last_broker_name) = last_broker_name else {
            return self.select_one_message_queue();
        };
        for _ in 0..self.message_queue_list.len() {
            let index = self.next_index().ok()?;
            let mq = &self.message_queue_list[index];
            if mq.get_broker_name() != last_broker_name {
                return Some(mq.clone());
            }
        }
        self.select_one_message_queue()
    }

    /// Round-robin selection restricted to queues every filter accepts.
    ///
    /// Tries each queue at most once; `None` if none qualifies.
    pub fn select_one_message_queue_with_filters(&self, filters: &[&dyn QueueFilter]) -> Option<MessageQueue> {
        if filters.is_empty() {
            return self.select_one_message_queue();
        }
        for _ in 0..self.message_queue_list.len() {
            let index = self.next_index().ok()?;
            let mq = &self.message_queue_list[index];
            if filters.iter().all(|filter| filter.filter(mq)) {
                return Some(mq.clone());
            }
        }
        None
    }

    pub fn get_queue_id_by_broker(&self, broker_name: &str) -> Option<u32> {
        let route = self.topic_route_data.as_ref()?;
        route
            .queue_datas
            .iter()
            .find(|queue_data| queue_data.broker_name.as_str() == broker_name)
            .map(|queue_data| queue_data.write_queue_nums)
    }
}
