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

use cheetah_string::CheetahString;
use rocketmq_route_error::RouteResult;

use crate::protocol::remoting_command::RemotingCommand;

/// Request/response transport towards a name server.
///
/// Implementations own connection handling. A call that does not complete
/// within `timeout_millis` should fail with
/// [`NetworkError::RequestTimeout`](rocketmq_route_error::NetworkError::RequestTimeout).
#[trait_variant::make(RemotingClient: Send)]
pub trait LocalRemotingClient: Sync {
    /// Sends `request` to `addr` and waits for its response command.
    async fn invoke_request(
        &self,
        addr: &CheetahString,
        request: RemotingCommand,
        timeout_millis: u64,
    ) -> RouteResult<RemotingCommand>;
}

/// Source of the name server address route requests are sent to.
pub trait NameServerAddressProvider: Send + Sync {
    fn name_server_address(&self) -> Option<CheetahString>;
}

/// Provider that always answers the same address.
#[derive(Debug, Clone)]
pub struct StaticNameServerAddress {
    addr: CheetahString,
}

impl StaticNameServerAddress {
    pub fn new(addr: impl Into<CheetahString>) -> Self {
        Self { addr: addr.into() }
    }
}

impl NameServerAddressProvider for StaticNameServerAddress {
    fn name_server_address(&self) -> Option<CheetahString> {
        if self.addr.is_empty() {
            None
        } else {
            Some(self.addr.clone())
        }
    }
}
