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

use std::env;
use std::path::Path;
use std::time::Duration;

use cheetah_string::CheetahString;
use config::Config;
use rocketmq_route_common::common::mix_all;
use rocketmq_route_error::RouteError;
use rocketmq_route_error::RouteResult;
use rocketmq_route_remoting::clients::NameServerAddressProvider;
use serde::Deserialize;
use tracing::info;

use super::client_config_builder::ClientConfigBuilder;
use super::client_config_validation::ClientConfigValidator;

/// Settings of the route directory and the name server calls it makes.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub namesrv_addr: Option<CheetahString>,
    /// Timeout of a route refresh call in milliseconds
    pub mq_client_api_timeout: u64,
    /// Timeout of the route fetch behind subscribe queue lookups in milliseconds
    pub subscribe_fetch_timeout: u64,
    /// How long a refresh waits for the per-topic refresh lock in milliseconds
    pub lock_timeout_millis: u64,
    pub poll_name_server_interval: u32,
    pub default_topic_queue_nums: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfig {
    pub const NAMESRV_ADDR_ENV: &'static str = "NAMESRV_ADDR";

    pub fn new() -> Self {
        ClientConfig {
            namesrv_addr: env::var(Self::NAMESRV_ADDR_ENV)
                .ok()
                .filter(|addr| !addr.is_empty())
                .map(CheetahString::from_string),
            mq_client_api_timeout: Duration::from_secs(3).as_millis() as u64,
            subscribe_fetch_timeout: Duration::from_secs(3).as_millis() as u64,
            lock_timeout_millis: Duration::from_secs(3).as_millis() as u64,
            poll_name_server_interval: Duration::from_secs(30).as_millis() as u32,
            default_topic_queue_nums: mix_all::DEFAULT_TOPIC_QUEUE_NUMS,
        }
    }

    #[inline]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Reads a configuration file (format chosen by extension) and validates it.
    /// Keys missing from the file keep their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> RouteResult<ClientConfig> {
        let path = path.as_ref();
        let client_config = Config::builder()
            .add_source(config::File::with_name(path.to_string_lossy().into_owned().as_str()))
            .build()
            .and_then(|result| result.try_deserialize::<ClientConfig>())
            .map_err(|e| RouteError::ConfigLoad(format!("{}: {}", path.display(), e)))?;
        ClientConfigValidator::validate(&client_config)?;
        info!("rocketmq route client config: {:?}", client_config);
        Ok(client_config)
    }

    #[inline]
    pub fn get_namesrv_addr(&self) -> Option<&CheetahString> {
        self.namesrv_addr.as_ref()
    }

    #[inline]
    pub fn set_namesrv_addr(&mut self, namesrv_addr: CheetahString) {
        self.namesrv_addr = Some(namesrv_addr);
    }

    #[inline]
    pub fn get_mq_client_api_timeout(&self) -> u64 {
        self.mq_client_api_timeout
    }

    #[inline]
    pub fn set_mq_client_api_timeout(&mut self, mq_client_api_timeout: u64) {
        self.mq_client_api_timeout = mq_client_api_timeout;
    }

    #[inline]
    pub fn get_subscribe_fetch_timeout(&self) -> u64 {
        self.subscribe_fetch_timeout
    }

    #[inline]
    pub fn set_subscribe_fetch_timeout(&mut self, subscribe_fetch_timeout: u64) {
        self.subscribe_fetch_timeout = subscribe_fetch_timeout;
    }

    #[inline]
    pub fn get_lock_timeout_millis(&self) -> u64 {
        self.lock_timeout_millis
    }

    #[inline]
    pub fn set_lock_timeout_millis(&mut self, lock_timeout_millis: u64) {
        self.lock_timeout_millis = lock_timeout_millis;
    }

    #[inline]
    pub fn get_poll_name_server_interval(&self) -> u32 {
        self.poll_name_server_interval
    }

    #[inline]
    pub fn set_poll_name_server_interval(&mut self, poll_name_server_interval: u32) {
        self.poll_name_server_interval = poll_name_server_interval;
    }

    #[inline]
    pub fn get_default_topic_queue_nums(&self) -> u32 {
        self.default_topic_queue_nums
    }

    #[inline]
    pub fn set_default_topic_queue_nums(&mut self, default_topic_queue_nums: u32) {
        self.default_topic_queue_nums = default_topic_queue_nums;
    }
}

impl NameServerAddressProvider for ClientConfig {
    fn name_server_address(&self) -> Option<CheetahString> {
        self.namesrv_addr.clone().filter(|addr| !addr.is_empty())
    }
}
