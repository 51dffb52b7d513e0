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
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use cheetah_string::CheetahString;
use rand::seq::IndexedRandom;
use rocketmq_route_common::common::constant::PermName;
use rocketmq_route_common::common::message::message_queue::MessageQueue;
use rocketmq_route_common::common::mix_all;
use rocketmq_route_common::RocketMQTokioMutex;
use rocketmq_route_common::RocketMQTokioRwLock;
use rocketmq_route_error::RouteResult;
use rocketmq_route_remoting::clients::NameServerAddressProvider;
use rocketmq_route_remoting::clients::RemotingClient;
use rocketmq_route_remoting::protocol::route::topic_route_data::TopicRouteData;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::base::client_config::ClientConfig;
use crate::factory::client_tables::BrokerAddrTable;
use crate::factory::client_tables::BrokerVersionTable;
use crate::factory::client_tables::TopicPublishInfoTable;
use crate::factory::client_tables::TopicRefreshLockTable;
use crate::factory::client_tables::TopicRouteTable;
use crate::implementation::find_broker_result::FindBrokerResult;
use crate::implementation::mq_client_api_impl::MQClientAPIImpl;
use crate::producer::producer_impl::topic_publish_info::TopicPublishInfo;

/// Process-local topic route cache.
///
/// All writes go through the refresh path, which for one topic at a time
/// fetches the route from the name server, compares it with the cached
/// snapshot and swaps in the derived tables. Lookups read the tables without
/// waiting on refreshes. Cloning yields another handle onto the same tables.
pub struct RouteDirectory<C> {
    client_config: Arc<ClientConfig>,
    mq_client_api_impl: Arc<MQClientAPIImpl<C>>,
    topic_route_table: TopicRouteTable,
    topic_publish_info_table: TopicPublishInfoTable,
    broker_addr_table: BrokerAddrTable,
    broker_version_table: BrokerVersionTable,
    topic_refresh_locks: TopicRefreshLockTable,
    // shared by cache swaps, exclusive for offline broker cleanup
    table_lock: Arc<RocketMQTokioRwLock<()>>,
    shutdown_token: CancellationToken,
}

impl<C> Clone for RouteDirectory<C> {
    fn clone(&self) -> Self {
        RouteDirectory {
            client_config: self.client_config.clone(),
            mq_client_api_impl: self.mq_client_api_impl.clone(),
            topic_route_table: self.topic_route_table.clone(),
            topic_publish_info_table: self.topic_publish_info_table.clone(),
            broker_addr_table: self.broker_addr_table.clone(),
            broker_version_table: self.broker_version_table.clone(),
            topic_refresh_locks: self.topic_refresh_locks.clone(),
            table_lock: self.table_lock.clone(),
            shutdown_token: self.shutdown_token.clone(),
        }
    }
}

impl<C> RouteDirectory<C>
where
    C: RemotingClient,
{
    /// Creates a directory that sends route requests to `client_config.namesrv_addr`.
    pub fn new(client_config: ClientConfig, remoting_client: C) -> Self {
        let client_config = Arc::new(client_config);
        let provider: Arc<dyn NameServerAddressProvider> = client_config.clone();
        Self::with_client_config(client_config, remoting_client, provider)
    }

    pub fn with_name_server_address_provider(
        client_config: ClientConfig,
        remoting_client: C,
        name_server_address_provider: Arc<dyn NameServerAddressProvider>,
    ) -> Self {
        Self::with_client_config(Arc::new(client_config), remoting_client, name_server_address_provider)
    }

    fn with_client_config(
        client_config: Arc<ClientConfig>,
        remoting_client: C,
        name_server_address_provider: Arc<dyn NameServerAddressProvider>,
    ) -> Self {
        RouteDirectory {
            client_config,
            mq_client_api_impl: Arc::new(MQClientAPIImpl::new(remoting_client, name_server_address_provider)),
            topic_route_table: Arc::new(Default::default()),
            topic_publish_info_table: Arc::new(Default::default()),
            broker_addr_table: Arc::new(Default::default()),
            broker_version_table: Arc::new(Default::default()),
            topic_refresh_locks: Arc::new(Default::default()),
            table_lock: Arc::new(RocketMQTokioRwLock::new(())),
            shutdown_token: CancellationToken::new(),
        }
    }

    #[inline]
    pub fn client_config(&self) -> &ClientConfig {
        &self.client_config
    }

    #[inline]
    pub fn mq_client_api_impl(&self) -> &MQClientAPIImpl<C> {
        &self.mq_client_api_impl
    }

    /// Refreshes the route of `topic` from the name server.
    ///
    /// Returns `true` if the cached tables were replaced. Fetch failures,
    /// including an unknown topic, leave the caches untouched.
    pub async fn update_topic_route_info_from_name_server_topic(&self, topic: &CheetahString) -> bool {
        self.update_topic_route_info(topic, false).await
    }

    /// Refreshes `topic` from the route of the auto-create key topic.
    ///
    /// Each queue descriptor gets `max(default_topic_queue_nums, read_queue_nums)`
    /// read and write queues.
    pub async fn update_topic_route_info_from_name_server_default(&self, topic: &CheetahString) -> bool {
        self.update_topic_route_info(topic, true).await
    }

    /// Refreshes every topic with a cached route or publish info.
    pub async fn update_topic_route_info_from_name_server(&self) {
        for topic in self.topic_list() {
            self.update_topic_route_info_from_name_server_topic(&topic).await;
        }
    }

    async fn update_topic_route_info(&self, topic: &CheetahString, is_default: bool) -> bool {
        if topic.is_empty() {
            return false;
        }
        let lock = self.topic_refresh_lock(topic);
        let lock_timeout = Duration::from_millis(self.client_config.lock_timeout_millis);
        let Some(_guard) = lock.try_lock_timeout(lock_timeout).await else {
            warn!("try to lock name server for topic[{}], but failed", topic);
            return false;
        };

        let timeout_millis = self.client_config.mq_client_api_timeout;
        let result = if is_default {
            self.mq_client_api_impl
                .get_topic_route_info_from_name_server(mix_all::AUTO_CREATE_TOPIC_KEY_TOPIC, timeout_millis)
                .await
                .map(|mut topic_route_data| {
                    for data in topic_route_data.queue_datas.iter_mut() {
                        let queue_nums = self.client_config.default_topic_queue_nums.max(data.read_queue_nums);
                        data.read_queue_nums = queue_nums;
                        data.write_queue_nums = queue_nums;
                    }
                    topic_route_data
                })
        } else {
            self.mq_client_api_impl
                .get_topic_route_info_from_name_server(topic, timeout_millis)
                .await
        };
        let topic_route_data = match result {
            Ok(topic_route_data) => topic_route_data,
            Err(e) if e.is_topic_not_exist() => {
                warn!(
                    "updateTopicRouteInfoFromNameServer, topic[{}] does not exist on name server: {}",
                    topic, e
                );
                return false;
            }
            Err(e) => {
                error!("updateTopicRouteInfoFromNameServer failed, topic: {}, error: {}", topic, e);
                return false;
            }
        };

        let _table_guard = self.table_lock.read().await;
        let old = self.topic_route_table.get(topic).map(|entry| entry.value().clone());
        let mut changed = topic_route_data.topic_route_data_changed(old.as_deref());
        if !changed {
            changed = self.is_publish_topic_need_update(topic);
        } else {
            info!(
                "the topic[{}] route info changed, old[{:?}] ,new[{:?}]",
                topic, old, topic_route_data
            );
        }
        if !changed {
            return false;
        }

        let topic_route_data = Arc::new(topic_route_data);
        for bd in topic_route_data.broker_datas.iter() {
            self.broker_addr_table
                .insert(bd.broker_name().clone(), Arc::new(bd.broker_addrs().clone()));
        }

        let mut publish_info = topic_route_data2topic_publish_info(topic, topic_route_data.clone());
        publish_info.have_topic_router_info = true;
        if self
            .topic_publish_info_table
            .insert(topic.clone(), Arc::new(publish_info))
            .is_some()
        {
            info!("updateTopicPublishInfo prev is not null, topic[{}]", topic);
        }

        self.topic_route_table.insert(topic.clone(), topic_route_data);
        true
    }

    fn topic_refresh_lock(&self, topic: &CheetahString) -> Arc<RocketMQTokioMutex<()>> {
        self.topic_refresh_locks
            .entry(topic.clone())
            .or_insert_with(|| Arc::new(RocketMQTokioMutex::new(())))
            .value()
            .clone()
    }

    fn is_publish_topic_need_update(&self, topic: &CheetahString) -> bool {
        self.topic_publish_info_table
            .get(topic)
            .is_none_or(|publish_info| !publish_info.ok())
    }

    /// Fetches the readable queues of `topic` directly from the name server.
    ///
    /// The caches are neither read nor written. Fetch errors, including
    /// [`RouteError::TopicNotExist`](rocketmq_route_error::RouteError::TopicNotExist),
    /// are returned as-is.
    pub async fn fetch_subscribe_message_queues(&self, topic: &CheetahString) -> RouteResult<Vec<MessageQueue>> {
        let topic_route_data = self
            .mq_client_api_impl
            .get_topic_route_info_from_name_server_detail(topic, self.client_config.subscribe_fetch_timeout, true)
            .await?;
        Ok(topic_route_data2topic_subscribe_info(topic, &topic_route_data))
    }

    /// Cached publish info of `topic`, refreshing it once when it is missing
    /// or has no queue.
    ///
    /// Falls back to the default-topic route when the topic itself has no
    /// route.
    pub async fn try_to_find_topic_publish_info(&self, topic: &CheetahString) -> Option<Arc<TopicPublishInfo>> {
        if let Some(publish_info) = self.topic_publish_info(topic) {
            if publish_info.ok() {
                return Some(publish_info);
            }
        }

        self.update_topic_route_info_from_name_server_topic(topic).await;
        let publish_info = self.topic_publish_info(topic);
        if publish_info
            .as_ref()
            .is_some_and(|publish_info| publish_info.have_topic_router_info || publish_info.ok())
        {
            return publish_info;
        }

        self.update_topic_route_info_from_name_server_default(topic).await;
        self.topic_publish_info(topic)
    }

    /// Master address of `broker_name`; `None` when the master is missing or
    /// registered with an empty address.
    pub fn find_broker_address_in_publish(&self, broker_name: &str) -> Option<CheetahString> {
        if broker_name.is_empty() {
            return None;
        }
        self.broker_addr_table
            .get(broker_name)
            .and_then(|broker_addrs| broker_addrs.get(&mix_all::MASTER_ID).cloned())
            .filter(|addr| !addr.is_empty())
    }

    /// Picks an address of `broker_name` for reading: the first non-empty
    /// address in ascending replica id order, master or slave.
    ///
    /// `broker_id` and `only_this_broker` are accepted for replica affinity
    /// but do not influence the choice yet. The result is flagged as slave
    /// when the chosen id is not the master id.
    pub fn find_broker_address_in_subscribe(
        &self,
        broker_name: &str,
        _broker_id: u64,
        _only_this_broker: bool,
    ) -> Option<FindBrokerResult> {
        if broker_name.is_empty() {
            return None;
        }
        let broker_addrs = self.broker_addr_table.get(broker_name)?.value().clone();
        let (id, addr) = broker_addrs.iter().find(|(_, addr)| !addr.is_empty())?;

        let broker_version = self.find_broker_version(broker_name, addr.as_str());
        Some(FindBrokerResult::new(addr.clone(), *id, broker_version))
    }

    /// Records the protocol version reported by a broker.
    pub fn update_broker_version(&self, broker_name: &CheetahString, broker_addr: &CheetahString, version: i32) {
        self.broker_version_table
            .entry(broker_name.clone())
            .or_default()
            .insert(broker_addr.clone(), version);
    }

    pub fn find_broker_version(&self, broker_name: &str, broker_addr: &str) -> i32 {
        if let Some(map) = self.broker_version_table.get(broker_name) {
            if let Some(version) = map.value().get(broker_addr) {
                return *version;
            }
        }
        0
    }

    /// Address of a random broker serving `topic`, master preferred.
    pub fn find_broker_addr_by_topic(&self, topic: &str) -> Option<CheetahString> {
        let topic_route_data = self.topic_route_data(topic)?;
        topic_route_data
            .broker_datas
            .choose(&mut rand::rng())
            .and_then(|bd| bd.select_broker_addr())
    }

    /// Drops broker addresses no cached route refers to any more.
    ///
    /// Brokers left without an address are removed from the table, as are the
    /// refresh locks of topics with neither a route nor publish info.
    pub async fn clean_offline_broker(&self) {
        let lock_timeout = Duration::from_millis(self.client_config.lock_timeout_millis);
        let Some(_table_guard) = self.table_lock.try_write_timeout(lock_timeout).await else {
            warn!("lock route tables for offline broker cleanup, but failed");
            return;
        };

        let live_addrs: HashSet<CheetahString> = self
            .topic_route_table
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .broker_datas
                    .iter()
                    .flat_map(|bd| bd.broker_addrs().values().cloned())
                    .collect::<Vec<_>>()
            })
            .collect();

        let mut updated_table = HashMap::new();
        let mut offline_brokers = Vec::new();
        for entry in self.broker_addr_table.iter() {
            let (broker_name, broker_addrs) = entry.pair();
            if broker_addrs.values().all(|addr| live_addrs.contains(addr)) {
                continue;
            }
            let retained = broker_addrs
                .iter()
                .filter(|(_, addr)| live_addrs.contains(*addr))
                .map(|(id, addr)| (*id, addr.clone()))
                .collect::<BTreeMap<_, _>>();
            if retained.is_empty() {
                offline_brokers.push(broker_name.clone());
            } else {
                updated_table.insert(broker_name.clone(), retained);
            }
        }

        for broker_name in offline_brokers {
            info!("the broker[{}] name's host is offline, remove it", broker_name);
            self.broker_addr_table.remove(&broker_name);
        }
        for (broker_name, broker_addrs) in updated_table {
            self.broker_addr_table.insert(broker_name, Arc::new(broker_addrs));
        }

        // a lock still referenced elsewhere belongs to a refresh in flight
        self.topic_refresh_locks.retain(|topic, lock| {
            Arc::strong_count(lock) > 1
                || self.topic_route_table.contains_key(topic)
                || self.topic_publish_info_table.contains_key(topic)
        });
    }

    // ========================================================================
    // Cache reads
    // ========================================================================

    pub fn topic_route_data(&self, topic: &str) -> Option<Arc<TopicRouteData>> {
        self.topic_route_table.get(topic).map(|entry| entry.value().clone())
    }

    pub fn topic_publish_info(&self, topic: &str) -> Option<Arc<TopicPublishInfo>> {
        self.topic_publish_info_table.get(topic).map(|entry| entry.value().clone())
    }

    pub fn broker_addrs(&self, broker_name: &str) -> Option<Arc<BTreeMap<u64, CheetahString>>> {
        self.broker_addr_table.get(broker_name).map(|entry| entry.value().clone())
    }

    /// Topics known to the directory, in ascending order.
    pub fn topic_list(&self) -> Vec<CheetahString> {
        let topics: BTreeSet<CheetahString> = self
            .topic_route_table
            .iter()
            .map(|entry| entry.key().clone())
            .chain(self.topic_publish_info_table.iter().map(|entry| entry.key().clone()))
            .collect();
        topics.into_iter().collect()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Spawns a task refreshing all known topics and cleaning offline brokers
    /// every `interval` until [`shutdown`](Self::shutdown) is called.
    pub fn start_route_refresh_task(&self, interval: Duration) -> JoinHandle<()>
    where
        C: 'static,
    {
        let directory = self.clone();
        let token = self.shutdown_token.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        info!("route refresh task stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        directory.update_topic_route_info_from_name_server().await;
                        directory.clean_offline_broker().await;
                    }
                }
            }
        })
    }

    pub fn shutdown(&self) {
        self.shutdown_token.cancel();
    }

    #[inline]
    pub fn is_shutdown(&self) -> bool {
        self.shutdown_token.is_cancelled()
    }
}

/// Builds the publish info of `topic` from its route snapshot.
///
/// An ordered topic yields `count` queues per `broker:count` entry of the
/// order configuration, in declared order. Otherwise every writable queue
/// descriptor whose broker has a non-empty master address yields `write_queue_nums`
/// queues, following the descriptor order.
pub fn topic_route_data2topic_publish_info(topic: &str, route: Arc<TopicRouteData>) -> TopicPublishInfo {
    let mut info = TopicPublishInfo {
        topic: CheetahString::from_slice(topic),
        ..Default::default()
    };
    if route.is_ordered() {
        for (broker_name, queue_nums) in route.order_topic_entries() {
            for i in 0..queue_nums {
                let mq = MessageQueue::from_parts(topic, broker_name.clone(), i as i32);
                info.message_queue_list.push(mq);
            }
        }
        info.order_topic = true;
    } else {
        for queue_data in route.queue_datas.iter() {
            if !PermName::is_writeable(queue_data.perm) {
                continue;
            }
            let Some(broker_data) = route.find_broker_data(queue_data.broker_name.as_str()) else {
                continue;
            };
            if !broker_data.master_addr().is_some_and(|addr| !addr.is_empty()) {
                continue;
            }
            for i in 0..queue_data.write_queue_nums {
                let mq = MessageQueue::from_parts(topic, queue_data.broker_name.as_str(), i as i32);
                info.message_queue_list.push(mq);
            }
        }
    }
    info.topic_route_data = Some(route);
    info
}

/// One queue per read index of every readable queue descriptor, in snapshot order.
pub fn topic_route_data2topic_subscribe_info(topic: &str, route: &TopicRouteData) -> Vec<MessageQueue> {
    let mut mq_list = Vec::new();
    for qd in &route.queue_datas {
        if PermName::is_readable(qd.perm) {
            for i in 0..qd.read_queue_nums {
                mq_list.push(MessageQueue::from_parts(topic, qd.broker_name.as_str(), i as i32));
            }
        }
    }
    mq_list
}
