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

//! Unified error type for the topic route core

mod network;
mod serialization;

pub use network::NetworkError;
pub use serialization::SerializationError;
use thiserror::Error;

/// Main error type for route fetching, decoding and selection.
///
/// Lookups that simply find nothing return `None` instead of an error; this
/// enum is reserved for failures the caller has to react to.
#[derive(Debug, Error)]
pub enum RouteError {
    // ============================================================================
    // Network Errors
    // ============================================================================
    /// Remoting call failed or timed out
    #[error(transparent)]
    Network(#[from] NetworkError),

    // ============================================================================
    // Serialization Errors
    // ============================================================================
    /// Malformed route document
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    // ============================================================================
    // Route Errors
    // ============================================================================
    /// Topic does not exist on the name server
    #[error("Topic '{topic}' does not exist")]
    TopicNotExist { topic: String },

    /// Name server answered with a non-success status, or with success and no body
    #[error("Name server response failed: code={code}, remark={remark}")]
    NameServerResponse { code: i32, remark: String },

    /// No usable queue is known for the topic
    #[error("No route available for topic '{topic}'")]
    RouteUnavailable { topic: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {value} ({reason})")]
    ConfigInvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// Configuration source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),
}

/// Result alias used across the route crates
pub type RouteResult<T> = std::result::Result<T, RouteError>;

impl RouteError {
    #[inline]
    pub fn topic_not_exist(topic: impl Into<String>) -> Self {
        Self::TopicNotExist { topic: topic.into() }
    }

    #[inline]
    pub fn name_server_response(code: i32, remark: impl Into<String>) -> Self {
        Self::NameServerResponse {
            code,
            remark: remark.into(),
        }
    }

    #[inline]
    pub fn route_unavailable(topic: impl Into<String>) -> Self {
        Self::RouteUnavailable { topic: topic.into() }
    }

    #[inline]
    pub fn config_invalid_value(key: &'static str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::ConfigInvalidValue {
            key,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// True for the distinguished "topic not exist" answer
    #[inline]
    pub fn is_topic_not_exist(&self) -> bool {
        matches!(self, Self::TopicNotExist { .. })
    }

    /// True when the remoting call ran out of time
    #[inline]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network(NetworkError::RequestTimeout { .. }))
    }
}
