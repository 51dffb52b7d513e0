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
use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use cheetah_string::CheetahString;
use rocketmq_route_client::base::client_config::ClientConfig;
use rocketmq_route_client::RouteDirectory;
use rocketmq_route_common::common::constant::PermName;
use rocketmq_route_common::common::message::message_queue::MessageQueue;
use rocketmq_route_common::common::mix_all;
use rocketmq_route_error::NetworkError;
use rocketmq_route_error::RouteError;
use rocketmq_route_error::RouteResult;
use rocketmq_route_remoting::clients::RemotingClient;
use rocketmq_route_remoting::code::response_code::ResponseCode;
use rocketmq_route_remoting::protocol::remoting_command::RemotingCommand;
use rocketmq_route_remoting::protocol::route::route_data_view::BrokerData;
use rocketmq_route_remoting::protocol::route::route_data_view::QueueData;
use rocketmq_route_remoting::protocol::route::topic_route_data::TopicRouteData;
use serde_json::json;

const RW: u32 = PermName::PERM_READ | PermName::PERM_WRITE;

#[derive(Clone)]
enum Reply {
    Route(TopicRouteData),
    Raw(Vec<u8>),
    NotExist,
    Status(ResponseCode, &'static str),
    Transport,
}

#[derive(Default)]
struct Script {
    replies: Mutex<HashMap<String, Reply>>,
    calls: AtomicUsize,
    delay: Mutex<Option<Duration>>,
}

/// Name server double answering from a per-topic script.
#[derive(Clone, Default)]
struct ScriptedClient {
    script: Arc<Script>,
}

impl ScriptedClient {
    fn reply(&self, topic: &str, reply: Reply) {
        self.script.replies.lock().unwrap().insert(topic.to_string(), reply);
    }

    fn route(&self, topic: &str, route: TopicRouteData) {
        self.reply(topic, Reply::Route(route));
    }

    fn delay(&self, delay: Duration) {
        *self.script.delay.lock().unwrap() = Some(delay);
    }

    fn calls(&self) -> usize {
        self.script.calls.load(Ordering::SeqCst)
    }
}

impl RemotingClient for ScriptedClient {
    async fn invoke_request(
        &self,
        addr: &CheetahString,
        request: RemotingCommand,
        _timeout_millis: u64,
    ) -> RouteResult<RemotingCommand> {
        self.script.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.script.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let topic = request
            .ext_fields()
            .and_then(|fields| fields.get(&CheetahString::from_static_str("topic")))
            .map(|topic| topic.to_string())
            .unwrap_or_default();
        let reply = self.script.replies.lock().unwrap().get(&topic).cloned();
        let response = match reply {
            Some(Reply::Route(route)) => {
                RemotingCommand::create_response_command().set_body(Some(route.encode().unwrap()))
            }
            Some(Reply::Raw(body)) => RemotingCommand::create_response_command().set_body(Some(body)),
            Some(Reply::Status(code, remark)) => {
                RemotingCommand::create_response_command_with_code_remark(code, remark)
            }
            Some(Reply::Transport) => {
                return Err(NetworkError::connection_failed(addr.as_str(), "connection refused").into())
            }
            Some(Reply::NotExist) | None => RemotingCommand::create_response_command_with_code_remark(
                ResponseCode::TopicNotExist,
                format!("No topic route info in name server for the topic: {topic}"),
            ),
        };
        Ok(response.set_opaque(request.opaque()))
    }
}

fn broker(name: &str, pairs: &[(u64, &str)]) -> BrokerData {
    let addrs: BTreeMap<u64, CheetahString> = pairs
        .iter()
        .map(|(id, addr)| (*id, CheetahString::from_string(addr.to_string())))
        .collect();
    BrokerData::new("DefaultCluster", name, addrs)
}

fn two_broker_route() -> TopicRouteData {
    TopicRouteData {
        order_topic_conf: None,
        queue_datas: vec![QueueData::new("broker-a", 4, 4, RW, 0), QueueData::new("broker-b", 2, 2, RW, 0)],
        broker_datas: vec![
            broker("broker-a", &[(0, "10.0.0.1:10911"), (1, "10.0.0.2:10911")]),
            broker("broker-b", &[(0, "10.0.0.3:10911")]),
        ],
    }
}

fn config() -> ClientConfig {
    ClientConfig::builder()
        .namesrv_addr("127.0.0.1:9876")
        .build()
        .unwrap()
}

fn directory() -> (RouteDirectory<ScriptedClient>, ScriptedClient) {
    directory_with(config())
}

fn directory_with(config: ClientConfig) -> (RouteDirectory<ScriptedClient>, ScriptedClient) {
    let client = ScriptedClient::default();
    (RouteDirectory::new(config, client.clone()), client)
}

fn topic(name: &'static str) -> CheetahString {
    CheetahString::from_static_str(name)
}

#[tokio::test]
async fn refresh_populates_all_tables() {
    let (directory, client) = directory();
    client.route("TopicTest", two_broker_route());

    assert!(directory.update_topic_route_info_from_name_server_topic(&topic("TopicTest")).await);

    let route = directory.topic_route_data("TopicTest").unwrap();
    assert_eq!(*route, two_broker_route());

    let publish_info = directory.topic_publish_info("TopicTest").unwrap();
    assert!(publish_info.ok());
    assert!(publish_info.have_topic_router_info);
    assert_eq!(publish_info.message_queue_list.len(), 6);
    assert_eq!(
        publish_info.message_queue_list[4],
        MessageQueue::from_parts("TopicTest", "broker-b", 0)
    );

    assert_eq!(
        directory.find_broker_address_in_publish("broker-a").unwrap(),
        "10.0.0.1:10911"
    );
    assert_eq!(
        directory.find_broker_address_in_publish("broker-b").unwrap(),
        "10.0.0.3:10911"
    );
    assert!(directory.find_broker_address_in_publish("broker-c").is_none());
    assert_eq!(directory.topic_list(), vec![topic("TopicTest")]);

    let addr = directory.find_broker_addr_by_topic("TopicTest").unwrap();
    assert!(addr == "10.0.0.1:10911" || addr == "10.0.0.3:10911");
}

#[tokio::test]
async fn unchanged_route_is_a_noop() {
    let (directory, client) = directory();
    client.route("TopicTest", two_broker_route());
    assert!(directory.update_topic_route_info_from_name_server_topic(&topic("TopicTest")).await);
    let publish_info = directory.topic_publish_info("TopicTest").unwrap();
    let route = directory.topic_route_data("TopicTest").unwrap();

    let mut reordered = two_broker_route();
    reordered.queue_datas.reverse();
    reordered.broker_datas.reverse();
    client.route("TopicTest", reordered);

    assert!(!directory.update_topic_route_info_from_name_server_topic(&topic("TopicTest")).await);
    assert!(Arc::ptr_eq(&publish_info, &directory.topic_publish_info("TopicTest").unwrap()));
    assert!(Arc::ptr_eq(&route, &directory.topic_route_data("TopicTest").unwrap()));
    assert_eq!(client.calls(), 2);
}

#[tokio::test]
async fn changed_route_replaces_tables() {
    let (directory, client) = directory();
    client.route("TopicTest", two_broker_route());
    assert!(directory.update_topic_route_info_from_name_server_topic(&topic("TopicTest")).await);
    let old_publish_info = directory.topic_publish_info("TopicTest").unwrap();

    let mut changed = two_broker_route();
    changed.queue_datas[1].perm = PermName::PERM_READ;
    changed.broker_datas[0] = broker("broker-a", &[(0, "10.0.0.9:10911")]);
    client.route("TopicTest", changed.clone());

    assert!(directory.update_topic_route_info_from_name_server_topic(&topic("TopicTest")).await);
    let publish_info = directory.topic_publish_info("TopicTest").unwrap();
    assert!(!Arc::ptr_eq(&old_publish_info, &publish_info));
    assert_eq!(publish_info.message_queue_list.len(), 4);
    assert_eq!(*directory.topic_route_data("TopicTest").unwrap(), changed);

    // the whole address set of a broker is replaced, never merged
    let broker_addrs = directory.broker_addrs("broker-a").unwrap();
    assert_eq!(broker_addrs.len(), 1);
    assert_eq!(broker_addrs.get(&mix_all::MASTER_ID).unwrap(), "10.0.0.9:10911");
}

#[tokio::test]
async fn failed_refresh_leaves_tables_untouched() {
    let (directory, client) = directory();
    client.route("TopicTest", two_broker_route());
    assert!(directory.update_topic_route_info_from_name_server_topic(&topic("TopicTest")).await);
    let publish_info = directory.topic_publish_info("TopicTest").unwrap();
    let route = directory.topic_route_data("TopicTest").unwrap();

    for reply in [
        Reply::NotExist,
        Reply::Transport,
        Reply::Status(ResponseCode::SystemBusy, "busy"),
        Reply::Raw(b"{\"queueDatas\": [".to_vec()),
        Reply::Raw(Vec::new()),
    ] {
        client.reply("TopicTest", reply);
        assert!(!directory.update_topic_route_info_from_name_server_topic(&topic("TopicTest")).await);
        assert!(Arc::ptr_eq(&publish_info, &directory.topic_publish_info("TopicTest").unwrap()));
        assert!(Arc::ptr_eq(&route, &directory.topic_route_data("TopicTest").unwrap()));
        assert_eq!(
            directory.find_broker_address_in_publish("broker-a").unwrap(),
            "10.0.0.1:10911"
        );
    }
}

#[tokio::test]
async fn unknown_topic_creates_nothing() {
    let (directory, _client) = directory();
    assert!(!directory.update_topic_route_info_from_name_server_topic(&topic("Missing")).await);
    assert!(directory.topic_route_data("Missing").is_none());
    assert!(directory.topic_publish_info("Missing").is_none());
    assert!(directory.topic_list().is_empty());
    assert!(!directory.update_topic_route_info_from_name_server_topic(&topic("")).await);
}

#[tokio::test]
async fn unusable_publish_info_forces_update() {
    let (directory, client) = directory();
    let slave_only = TopicRouteData {
        order_topic_conf: None,
        queue_datas: vec![QueueData::new("broker-a", 4, 4, RW, 0)],
        broker_datas: vec![broker("broker-a", &[(1, "10.0.0.2:10911")])],
    };
    client.route("TopicTest", slave_only.clone());

    assert!(directory.update_topic_route_info_from_name_server_topic(&topic("TopicTest")).await);
    let first = directory.topic_publish_info("TopicTest").unwrap();
    assert!(!first.ok());
    assert!(first.have_topic_router_info);
    assert!(first.next_index().is_err());

    assert!(directory.update_topic_route_info_from_name_server_topic(&topic("TopicTest")).await);
    let second = directory.topic_publish_info("TopicTest").unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn ordered_topic_route() {
    let (directory, client) = directory();
    let body = json!({
        "orderTopicConf": "b1:2;b2:3",
        "queueDatas": [
            {"brokerName": "b1", "readQueueNums": 2, "writeQueueNums": 2, "perm": 6, "topicSynFlag": 0},
            {"brokerName": "b2", "readQueueNums": 3, "writeQueueNums": 3, "perm": 6, "topicSynFlag": 0}
        ],
        "brokerDatas": [
            {"cluster": "c", "brokerName": "b1", "brokerAddrs": "{0:\"10.0.0.1:10911\"}"},
            {"cluster": "c", "brokerName": "b2", "brokerAddrs": "{0:\"10.0.0.2:10911\"}"}
        ]
    });
    client.reply("OrderTopic", Reply::Raw(serde_json::to_vec(&body).unwrap()));

    assert!(directory.update_topic_route_info_from_name_server_topic(&topic("OrderTopic")).await);
    let publish_info = directory.topic_publish_info("OrderTopic").unwrap();
    assert!(publish_info.order_topic);
    let queues: Vec<(String, i32)> = publish_info
        .message_queue_list
        .iter()
        .map(|mq| (mq.get_broker_name().to_string(), mq.get_queue_id()))
        .collect();
    assert_eq!(
        queues,
        vec![
            ("b1".to_string(), 0),
            ("b1".to_string(), 1),
            ("b2".to_string(), 0),
            ("b2".to_string(), 1),
            ("b2".to_string(), 2),
        ]
    );
}

#[tokio::test]
async fn default_topic_route_applies_default_queue_nums() {
    let (directory, client) = directory_with(
        ClientConfig::builder()
            .namesrv_addr("127.0.0.1:9876")
            .default_topic_queue_nums(4)
            .build()
            .unwrap(),
    );
    client.route(
        mix_all::AUTO_CREATE_TOPIC_KEY_TOPIC,
        TopicRouteData {
            order_topic_conf: None,
            queue_datas: vec![QueueData::new("broker-a", 2, 8, RW, 0), QueueData::new("broker-b", 6, 8, RW, 0)],
            broker_datas: vec![
                broker("broker-a", &[(0, "10.0.0.1:10911")]),
                broker("broker-b", &[(0, "10.0.0.2:10911")]),
            ],
        },
    );

    assert!(directory.update_topic_route_info_from_name_server_default(&topic("NewTopic")).await);
    let route = directory.topic_route_data("NewTopic").unwrap();
    assert_eq!(route.queue_datas[0].read_queue_nums, 4);
    assert_eq!(route.queue_datas[0].write_queue_nums, 4);
    assert_eq!(route.queue_datas[1].read_queue_nums, 6);
    assert_eq!(route.queue_datas[1].write_queue_nums, 6);

    let publish_info = directory.topic_publish_info("NewTopic").unwrap();
    assert_eq!(publish_info.message_queue_list.len(), 10);
    assert!(publish_info
        .message_queue_list
        .iter()
        .all(|mq| mq.get_topic() == "NewTopic"));
    assert!(directory.topic_route_data(mix_all::AUTO_CREATE_TOPIC_KEY_TOPIC).is_none());
}

#[tokio::test]
async fn try_to_find_topic_publish_info_uses_cache_then_default_route() {
    let (directory, client) = directory();
    client.route("TopicTest", two_broker_route());

    let publish_info = directory.try_to_find_topic_publish_info(&topic("TopicTest")).await.unwrap();
    assert!(publish_info.ok());
    assert_eq!(client.calls(), 1);

    let cached = directory.try_to_find_topic_publish_info(&topic("TopicTest")).await.unwrap();
    assert!(Arc::ptr_eq(&publish_info, &cached));
    assert_eq!(client.calls(), 1);

    assert!(directory.try_to_find_topic_publish_info(&topic("NewTopic")).await.is_none());
    assert_eq!(client.calls(), 3);

    client.route(mix_all::AUTO_CREATE_TOPIC_KEY_TOPIC, two_broker_route());
    let from_default = directory.try_to_find_topic_publish_info(&topic("NewTopic")).await.unwrap();
    assert!(from_default.ok());
}

#[tokio::test]
async fn fetch_subscribe_message_queues_bypasses_caches() {
    let (directory, client) = directory();
    let mut route = two_broker_route();
    route.queue_datas.push(QueueData::new("broker-w", 3, 3, PermName::PERM_WRITE, 0));
    client.route("TopicTest", route);

    let mqs = directory.fetch_subscribe_message_queues(&topic("TopicTest")).await.unwrap();
    assert_eq!(mqs.len(), 6);
    assert_eq!(mqs[0], MessageQueue::from_parts("TopicTest", "broker-a", 0));
    assert_eq!(mqs[5], MessageQueue::from_parts("TopicTest", "broker-b", 1));
    assert!(directory.topic_route_data("TopicTest").is_none());
    assert!(directory.topic_publish_info("TopicTest").is_none());

    directory.fetch_subscribe_message_queues(&topic("TopicTest")).await.unwrap();
    assert_eq!(client.calls(), 2);
}

#[tokio::test]
async fn fetch_subscribe_message_queues_propagates_errors() {
    let (directory, client) = directory();

    let err = directory.fetch_subscribe_message_queues(&topic("Missing")).await.unwrap_err();
    assert!(err.is_topic_not_exist());

    client.reply("TopicTest", Reply::Transport);
    let err = directory.fetch_subscribe_message_queues(&topic("TopicTest")).await.unwrap_err();
    assert!(matches!(err, RouteError::Network(NetworkError::ConnectionFailed { .. })));

    client.reply("TopicTest", Reply::Raw(b"[]".to_vec()));
    let err = directory.fetch_subscribe_message_queues(&topic("TopicTest")).await.unwrap_err();
    assert!(matches!(err, RouteError::Serialization(_)));
}

#[tokio::test]
async fn find_broker_address_in_subscribe() {
    let (directory, client) = directory();
    let route = TopicRouteData {
        order_topic_conf: None,
        queue_datas: vec![
            QueueData::new("with-master", 4, 4, RW, 0),
            QueueData::new("slave-only", 4, 4, RW, 0),
            QueueData::new("blank", 4, 4, RW, 0),
        ],
        broker_datas: vec![
            broker("with-master", &[(0, "10.0.0.1:10911"), (1, "10.0.0.2:10911")]),
            broker("slave-only", &[(1, ""), (2, "10.0.0.5:10911")]),
            broker("blank", &[(0, "")]),
        ],
    };
    client.route("TopicTest", route);
    assert!(directory.update_topic_route_info_from_name_server_topic(&topic("TopicTest")).await);

    let master = directory
        .find_broker_address_in_subscribe("with-master", mix_all::MASTER_ID, false)
        .unwrap();
    assert_eq!(master.broker_addr, "10.0.0.1:10911");
    assert!(!master.slave);
    assert_eq!(master.broker_version, 0);

    let slave = directory
        .find_broker_address_in_subscribe("slave-only", mix_all::MASTER_ID, false)
        .unwrap();
    assert_eq!(slave.broker_addr, "10.0.0.5:10911");
    assert!(slave.slave);

    // the requested replica id and the only-this-broker flag do not change the choice
    let requested_slave = directory.find_broker_address_in_subscribe("with-master", 1, true).unwrap();
    assert_eq!(requested_slave, master);
    let only_this_slave = directory
        .find_broker_address_in_subscribe("slave-only", mix_all::MASTER_ID, true)
        .unwrap();
    assert_eq!(only_this_slave, slave);
    assert!(directory
        .find_broker_address_in_subscribe("blank", mix_all::MASTER_ID, false)
        .is_none());
    assert!(directory.find_broker_address_in_subscribe("unknown", 0, false).is_none());
    assert!(directory.find_broker_address_in_publish("slave-only").is_none());
    assert!(directory.find_broker_address_in_publish("blank").is_none());

    let publish_info = directory.topic_publish_info("TopicTest").unwrap();
    assert_eq!(publish_info.message_queue_list.len(), 4);
    assert!(publish_info
        .message_queue_list
        .iter()
        .all(|mq| mq.get_broker_name().as_str() == "with-master"));

    directory.update_broker_version(&topic("with-master"), &CheetahString::from_static_str("10.0.0.1:10911"), 453);
    let master = directory
        .find_broker_address_in_subscribe("with-master", mix_all::MASTER_ID, false)
        .unwrap();
    assert_eq!(master.broker_version, 453);
    assert_eq!(directory.find_broker_version("with-master", "10.0.0.2:10911"), 0);
}

#[tokio::test]
async fn clean_offline_broker_removes_unreferenced_addresses() {
    let (directory, client) = directory();
    client.route("TopicTest", two_broker_route());
    assert!(directory.update_topic_route_info_from_name_server_topic(&topic("TopicTest")).await);

    let mut moved = two_broker_route();
    moved.queue_datas[1] = QueueData::new("broker-c", 2, 2, RW, 0);
    moved.broker_datas[1] = broker("broker-c", &[(0, "10.0.0.7:10911")]);
    client.route("TopicTest", moved);
    assert!(directory.update_topic_route_info_from_name_server_topic(&topic("TopicTest")).await);
    assert!(directory.find_broker_address_in_publish("broker-b").is_some());

    directory.clean_offline_broker().await;

    assert!(directory.find_broker_address_in_publish("broker-b").is_none());
    assert_eq!(directory.broker_addrs("broker-a").unwrap().len(), 2);
    assert_eq!(
        directory.find_broker_address_in_publish("broker-c").unwrap(),
        "10.0.0.7:10911"
    );
}

#[tokio::test]
async fn next_index_distribution_on_published_info() {
    let (directory, client) = directory();
    client.route("TopicTest", two_broker_route());
    assert!(directory.update_topic_route_info_from_name_server_topic(&topic("TopicTest")).await);
    let publish_info = directory.topic_publish_info("TopicTest").unwrap();

    let mut counts = vec![0usize; publish_info.message_queue_list.len()];
    for _ in 0..600 {
        counts[publish_info.next_index().unwrap()] += 1;
    }
    assert!(counts.iter().all(|count| *count == 100));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_selection_stays_even() {
    let (directory, client) = directory();
    client.route("TopicTest", two_broker_route());
    assert!(directory.update_topic_route_info_from_name_server_topic(&topic("TopicTest")).await);
    let publish_info = directory.topic_publish_info("TopicTest").unwrap();

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let publish_info = publish_info.clone();
            tokio::spawn(async move {
                let mut counts = vec![0usize; 6];
                for _ in 0..1200 {
                    counts[publish_info.next_index().unwrap()] += 1;
                }
                counts
            })
        })
        .collect();

    let mut total = vec![0usize; 6];
    for handle in handles {
        for (i, count) in handle.await.unwrap().into_iter().enumerate() {
            total[i] += count;
        }
    }
    assert!(total.iter().all(|count| *count == 1200));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_refreshes_of_one_topic_update_once() {
    let (directory, client) = directory();
    client.route("TopicTest", two_broker_route());
    client.delay(Duration::from_millis(10));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let directory = directory.clone();
            tokio::spawn(async move {
                directory
                    .update_topic_route_info_from_name_server_topic(&topic("TopicTest"))
                    .await
            })
        })
        .collect();

    let mut updated = 0;
    for handle in handles {
        if handle.await.unwrap() {
            updated += 1;
        }
    }
    assert_eq!(updated, 1);
    assert_eq!(client.calls(), 8);
    assert!(directory.topic_publish_info("TopicTest").unwrap().ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_refreshes_of_different_topics() {
    let (directory, client) = directory();
    let topics = ["T0", "T1", "T2", "T3", "T4", "T5"];
    for name in topics {
        client.route(name, two_broker_route());
    }

    let handles: Vec<_> = topics
        .iter()
        .map(|name| {
            let directory = directory.clone();
            let name = CheetahString::from_static_str(name);
            tokio::spawn(async move { directory.update_topic_route_info_from_name_server_topic(&name).await })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap());
    }
    assert_eq!(directory.topic_list().len(), topics.len());
}

#[tokio::test]
async fn refresh_gives_up_when_topic_lock_is_busy() {
    let (directory, client) = directory_with(
        ClientConfig::builder()
            .namesrv_addr("127.0.0.1:9876")
            .lock_timeout_millis(100)
            .build()
            .unwrap(),
    );
    client.route("TopicTest", two_broker_route());
    client.delay(Duration::from_millis(500));

    let slow = {
        let directory = directory.clone();
        tokio::spawn(async move {
            directory
                .update_topic_route_info_from_name_server_topic(&topic("TopicTest"))
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(!directory.update_topic_route_info_from_name_server_topic(&topic("TopicTest")).await);
    assert_eq!(client.calls(), 1);
    assert!(slow.await.unwrap());
}

#[tokio::test]
async fn slow_name_server_times_out() {
    let (directory, client) = directory_with(
        ClientConfig::builder()
            .namesrv_addr("127.0.0.1:9876")
            .mq_client_api_timeout(100)
            .subscribe_fetch_timeout(100)
            .build()
            .unwrap(),
    );
    client.route("TopicTest", two_broker_route());
    client.delay(Duration::from_millis(500));

    assert!(!directory.update_topic_route_info_from_name_server_topic(&topic("TopicTest")).await);
    assert!(directory.topic_route_data("TopicTest").is_none());

    let err = directory.fetch_subscribe_message_queues(&topic("TopicTest")).await.unwrap_err();
    assert!(err.is_timeout());
}

#[tokio::test]
async fn refresh_task_runs_until_shutdown() {
    rocketmq_route_common::log::init_logger();
    let (directory, client) = directory();
    client.route("TopicTest", two_broker_route());
    assert!(directory.update_topic_route_info_from_name_server_topic(&topic("TopicTest")).await);

    let mut changed = two_broker_route();
    changed.queue_datas.pop();
    changed.broker_datas.pop();
    client.route("TopicTest", changed.clone());

    let handle = directory.start_route_refresh_task(Duration::from_millis(20));
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(*directory.topic_route_data("TopicTest").unwrap(), changed);

    directory.shutdown();
    assert!(directory.is_shutdown());
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .unwrap()
        .unwrap();
}
