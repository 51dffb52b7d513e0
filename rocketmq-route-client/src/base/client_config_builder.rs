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

//! ClientConfig builder module
//!
//! Fluent construction of [`ClientConfig`] with validation on `build()`.

use cheetah_string::CheetahString;
use rocketmq_route_error::RouteResult;

use super::client_config::ClientConfig;
use super::client_config_validation::ClientConfigValidator;

/// Builder for creating [`ClientConfig`] instances with a fluent API
///
/// # Example
///
/// ```rust
/// use rocketmq_route_client::base::client_config::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .namesrv_addr("localhost:9876")
///     .mq_client_api_timeout(5_000)
///     .poll_name_server_interval(60_000)
///     .build()
///     .unwrap();
/// assert_eq!(config.get_mq_client_api_timeout(), 5_000);
/// ```
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfigBuilder {
    /// Creates a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ClientConfig::new(),
        }
    }

    // ========================================================================
    // Name server configuration
    // ========================================================================

    /// Sets the name server address
    pub fn namesrv_addr(mut self, addr: impl Into<CheetahString>) -> Self {
        self.config.set_namesrv_addr(addr.into());
        self
    }

    /// Sets the name server polling interval in milliseconds
    pub fn poll_name_server_interval(mut self, interval: u32) -> Self {
        self.config.set_poll_name_server_interval(interval);
        self
    }

    // ========================================================================
    // Timeouts
    // ========================================================================

    /// Sets the route refresh timeout in milliseconds
    pub fn mq_client_api_timeout(mut self, timeout: u64) -> Self {
        self.config.set_mq_client_api_timeout(timeout);
        self
    }

    /// Sets the subscribe route fetch timeout in milliseconds
    pub fn subscribe_fetch_timeout(mut self, timeout: u64) -> Self {
        self.config.set_subscribe_fetch_timeout(timeout);
        self
    }

    /// Sets how long a refresh waits for the topic refresh lock
    pub fn lock_timeout_millis(mut self, timeout: u64) -> Self {
        self.config.set_lock_timeout_millis(timeout);
        self
    }

    // ========================================================================
    // Default topic
    // ========================================================================

    pub fn default_topic_queue_nums(mut self, nums: u32) -> Self {
        self.config.set_default_topic_queue_nums(nums);
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Builds the ClientConfig, validating all values
    pub fn build(self) -> RouteResult<ClientConfig> {
        ClientConfigValidator::validate(&self.config)?;
        Ok(self.config)
    }

    /// Builds the ClientConfig without validation
    #[doc(hidden)]
    pub fn build_unvalidated(self) -> ClientConfig {
        self.config
    }
}
