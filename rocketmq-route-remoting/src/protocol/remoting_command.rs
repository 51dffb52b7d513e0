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

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::AtomicI32;
use std::sync::atomic::Ordering;

use bytes::Bytes;
use cheetah_string::CheetahString;
use lazy_static::lazy_static;

use crate::code::response_code::ResponseCode;
use crate::protocol::command_custom_header::CommandCustomHeader;

lazy_static! {
    static ref REQUEST_ID: AtomicI32 = AtomicI32::new(0);
}

/// A request or response exchanged with the name server.
///
/// The custom header is flattened into `ext_fields` when the request is
/// created; the transport never sees the typed header.
#[derive(Clone, Debug)]
pub struct RemotingCommand {
    code: i32,
    opaque: i32,

    /// flag -> bit: 00
    /// The lowest bit of the flag indicates whether it is a response command.
    /// Non-zero indicates a response command, while 0 indicates a request command.
    flag: i32,
    remark: Option<CheetahString>,
    ext_fields: Option<HashMap<CheetahString, CheetahString>>,
    body: Option<Bytes>,
}

impl Default for RemotingCommand {
    fn default() -> Self {
        RemotingCommand {
            code: 0,
            opaque: REQUEST_ID.fetch_add(1, Ordering::AcqRel),
            flag: 0,
            remark: None,
            ext_fields: None,
            body: None,
        }
    }
}

impl fmt::Display for RemotingCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "RemotingCommand [code={}, opaque={}, flag(B)={:b}, remark={}, extFields={:?}]",
            self.code,
            self.opaque,
            self.flag,
            self.remark.as_deref().unwrap_or(""),
            self.ext_fields
        )
    }
}

impl RemotingCommand {
    const RPC_TYPE: i32 = 0;

    pub fn create_request_command<T>(code: impl Into<i32>, header: T) -> Self
    where
        T: CommandCustomHeader,
    {
        let mut command = Self::default().set_code(code);
        command.ext_fields = header.to_map();
        command
    }

    pub fn create_response_command_with_code(code: impl Into<i32>) -> Self {
        Self::default().set_code(code).mark_response_type()
    }

    pub fn create_response_command_with_code_remark(code: impl Into<i32>, remark: impl Into<CheetahString>) -> Self {
        Self::create_response_command_with_code(code).set_remark(Some(remark.into()))
    }

    pub fn create_response_command() -> Self {
        Self::create_response_command_with_code(ResponseCode::Success)
    }

    pub fn set_code(mut self, code: impl Into<i32>) -> Self {
        self.code = code.into();
        self
    }

    pub fn set_opaque(mut self, opaque: i32) -> Self {
        self.opaque = opaque;
        self
    }

    pub fn set_remark(mut self, remark: Option<CheetahString>) -> Self {
        self.remark = remark;
        self
    }

    pub fn set_body(mut self, body: Option<impl Into<Bytes>>) -> Self {
        self.body = body.map(Into::into);
        self
    }

    pub fn mark_response_type(mut self) -> Self {
        let bits = 1 << Self::RPC_TYPE;
        self.flag |= bits;
        self
    }

    #[inline]
    pub fn is_response_type(&self) -> bool {
        let bits = 1 << Self::RPC_TYPE;
        (self.flag & bits) == bits
    }

    #[inline]
    pub fn code(&self) -> i32 {
        self.code
    }

    #[inline]
    pub fn opaque(&self) -> i32 {
        self.opaque
    }

    #[inline]
    pub fn flag(&self) -> i32 {
        self.flag
    }

    #[inline]
    pub fn remark(&self) -> Option<&CheetahString> {
        self.remark.as_ref()
    }

    #[inline]
    pub fn ext_fields(&self) -> Option<&HashMap<CheetahString, CheetahString>> {
        self.ext_fields.as_ref()
    }

    #[inline]
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    #[inline]
    pub fn take_body(&mut self) -> Option<Bytes> {
        self.body.take()
    }
}
