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

//! Client configuration validation module
//!
//! Range checks applied to [`ClientConfig`] before it is handed to a route
//! directory.

use rocketmq_route_error::RouteError;
use rocketmq_route_error::RouteResult;

use super::client_config::ClientConfig;

/// Validator for ClientConfig fields
pub struct ClientConfigValidator;

impl ClientConfigValidator {
    // =========================================================================
    // Validation Constants
    // =========================================================================

    /// Minimum poll name server interval (10 seconds)
    pub const MIN_POLL_NAME_SERVER_INTERVAL: u32 = 10_000;

    /// Maximum poll name server interval (10 minutes)
    pub const MAX_POLL_NAME_SERVER_INTERVAL: u32 = 600_000;

    /// Minimum MQ client API timeout (100ms)
    pub const MIN_MQ_CLIENT_API_TIMEOUT: u64 = 100;

    /// Maximum MQ client API timeout (60 seconds)
    pub const MAX_MQ_CLIENT_API_TIMEOUT: u64 = 60_000;

    /// Minimum queue count used for default-topic routes
    pub const MIN_DEFAULT_TOPIC_QUEUE_NUMS: u32 = 1;

    // =========================================================================
    // Validation Methods
    // =========================================================================

    /// Validate every field of `config`
    pub fn validate(config: &ClientConfig) -> RouteResult<()> {
        Self::validate_poll_name_server_interval(config.poll_name_server_interval)?;
        Self::validate_mq_client_api_timeout("mq_client_api_timeout", config.mq_client_api_timeout)?;
        Self::validate_mq_client_api_timeout("subscribe_fetch_timeout", config.subscribe_fetch_timeout)?;
        Self::validate_mq_client_api_timeout("lock_timeout_millis", config.lock_timeout_millis)?;
        Self::validate_default_topic_queue_nums(config.default_topic_queue_nums)?;
        Ok(())
    }

    /// Ensures the interval is between 10 seconds and 10 minutes.
    pub fn validate_poll_name_server_interval(interval: u32) -> RouteResult<()> {
        if !(Self::MIN_POLL_NAME_SERVER_INTERVAL..=Self::MAX_POLL_NAME_SERVER_INTERVAL).contains(&interval) {
            return Err(RouteError::config_invalid_value(
                "poll_name_server_interval",
                interval,
                format!(
                    "must be between {} and {} milliseconds",
                    Self::MIN_POLL_NAME_SERVER_INTERVAL,
                    Self::MAX_POLL_NAME_SERVER_INTERVAL
                ),
            ));
        }
        Ok(())
    }

    /// Ensures a timeout is between 100ms and 60 seconds.
    pub fn validate_mq_client_api_timeout(key: &'static str, timeout: u64) -> RouteResult<()> {
        if !(Self::MIN_MQ_CLIENT_API_TIMEOUT..=Self::MAX_MQ_CLIENT_API_TIMEOUT).contains(&timeout) {
            return Err(RouteError::config_invalid_value(
                key,
                timeout,
                format!(
                    "must be between {} and {} milliseconds",
                    Self::MIN_MQ_CLIENT_API_TIMEOUT,
                    Self::MAX_MQ_CLIENT_API_TIMEOUT
                ),
            ));
        }
        Ok(())
    }

    pub fn validate_default_topic_queue_nums(nums: u32) -> RouteResult<()> {
        if nums < Self::MIN_DEFAULT_TOPIC_QUEUE_NUMS {
            return Err(RouteError::config_invalid_value(
                "default_topic_queue_nums",
                nums,
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}
