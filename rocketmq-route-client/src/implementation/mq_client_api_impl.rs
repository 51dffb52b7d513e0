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
use std::time::Duration;

use cheetah_string::CheetahString;
use rocketmq_route_error::NetworkError;
use rocketmq_route_error::RouteError;
use rocketmq_route_error::RouteResult;
use rocketmq_route_remoting::clients::NameServerAddressProvider;
use rocketmq_route_remoting::clients::RemotingClient;
use rocketmq_route_remoting::code::request_code::RequestCode;
use rocketmq_route_remoting::code::response_code::ResponseCode;
use rocketmq_route_remoting::protocol::header::client_request_header::GetRouteInfoRequestHeader;
use rocketmq_route_remoting::protocol::remoting_command::RemotingCommand;
use rocketmq_route_remoting::protocol::route::topic_route_data::TopicRouteData;
use tracing::warn;

/// Name server calls made by the route directory.
pub struct MQClientAPIImpl<C> {
    remoting_client: C,
    name_server_address_provider: Arc<dyn NameServerAddressProvider>,
}

impl<C> MQClientAPIImpl<C>
where
    C: RemotingClient,
{
    pub fn new(remoting_client: C, name_server_address_provider: Arc<dyn NameServerAddressProvider>) -> Self {
        MQClientAPIImpl {
            remoting_client,
            name_server_address_provider,
        }
    }

    #[inline]
    pub fn remoting_client(&self) -> &C {
        &self.remoting_client
    }

    pub async fn get_topic_route_info_from_name_server(
        &self,
        topic: &str,
        timeout_millis: u64,
    ) -> RouteResult<TopicRouteData> {
        self.get_topic_route_info_from_name_server_detail(topic, timeout_millis, true)
            .await
    }

    /// Fetches the route of `topic`.
    ///
    /// A success status with an empty body fails with the response remark. The
    /// "topic not exist" status maps to [`RouteError::TopicNotExist`] and is
    /// logged when `allow_topic_not_exist` is set.
    pub async fn get_topic_route_info_from_name_server_detail(
        &self,
        topic: &str,
        timeout_millis: u64,
        allow_topic_not_exist: bool,
    ) -> RouteResult<TopicRouteData> {
        let addr = self
            .name_server_address_provider
            .name_server_address()
            .ok_or(NetworkError::NoNameServerAddress)?;
        let request_header = GetRouteInfoRequestHeader::new(CheetahString::from_slice(topic), None);
        let request = RemotingCommand::create_request_command(RequestCode::GetRouteinfoByTopic, request_header);

        let mut response = tokio::time::timeout(
            Duration::from_millis(timeout_millis),
            self.remoting_client.invoke_request(&addr, request, timeout_millis),
        )
        .await
        .map_err(|_| NetworkError::request_timeout(addr.as_str(), timeout_millis))??;

        let code = response.code();
        let remark = response.remark().map(|remark| remark.to_string()).unwrap_or_default();
        match ResponseCode::from(code) {
            ResponseCode::Success => match response.take_body() {
                Some(body) if !body.is_empty() => TopicRouteData::decode(body.as_ref()),
                _ => Err(RouteError::name_server_response(code, remark)),
            },
            ResponseCode::TopicNotExist => {
                if allow_topic_not_exist {
                    warn!("get Topic [{}] RouteInfoFromNameServer is not exist value", topic);
                }
                Err(RouteError::topic_not_exist(topic))
            }
            _ => Err(RouteError::name_server_response(code, remark)),
        }
    }
}
