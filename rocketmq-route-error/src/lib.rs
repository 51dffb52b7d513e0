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

//! # Topic route error handling
//!
//! Every fallible operation of the route core returns [`RouteResult`]. Errors
//! are grouped the same way the lookup and refresh paths need to tell them
//! apart:
//!
//! - **NotFound**: [`RouteError::TopicNotExist`], the name server does not know the topic
//! - **Timeout/Transport**: [`RouteError::Network`]
//! - **Decode**: [`RouteError::Serialization`]
//! - **Unavailable**: [`RouteError::RouteUnavailable`], no usable queue for a topic
//!
//! ```rust
//! use rocketmq_route_error::RouteError;
//! use rocketmq_route_error::RouteResult;
//!
//! fn lookup(topic: &str) -> RouteResult<()> {
//!     if topic.is_empty() {
//!         return Err(RouteError::topic_not_exist(topic));
//!     }
//!     Ok(())
//! }
//! # lookup("TopicTest").unwrap();
//! ```

pub mod unified;

pub use unified::NetworkError;
pub use unified::RouteError;
pub use unified::RouteResult;
pub use unified::SerializationError;
