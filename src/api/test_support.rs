// Copyright 2025 dentsusoken
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

use crate::error::Result;
use crate::transport::{
    HeaderMap, HttpConnection, HttpConnections, RequestHeaders, ResourceRef, header_map,
};
use mockall::mock;
use std::io::{Cursor, Read};

mock! {
    pub Connections {}

    impl HttpConnections for Connections {
        fn head(&self, target: &ResourceRef, headers: &RequestHeaders)
        -> Result<Box<dyn HttpConnection>>;

        fn get(&self, target: &ResourceRef, headers: &RequestHeaders)
        -> Result<Box<dyn HttpConnection>>;
    }
}

/// A canned response.
pub struct FakeConnection {
    status: u16,
    headers: HeaderMap,
    body: Cursor<Vec<u8>>,
}

impl FakeConnection {
    pub fn new(status: u16, headers: &[(&str, &str)], body: &str) -> Self {
        Self {
            status,
            headers: header_map(headers.iter().copied()),
            body: Cursor::new(body.as_bytes().to_vec()),
        }
    }

    pub fn boxed(status: u16, headers: &[(&str, &str)], body: &str) -> Box<dyn HttpConnection> {
        Box::new(Self::new(status, headers, body))
    }
}

impl Read for FakeConnection {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.body.read(buf)
    }
}

impl HttpConnection for FakeConnection {
    fn status(&self) -> u16 {
        self.status
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Connections whose HEAD probe reports `remaining` calls left.
pub fn probed_connections(remaining: &'static str) -> MockConnections {
    let mut connections = MockConnections::new();
    connections
        .expect_head()
        .times(1)
        .returning(move |_, _| {
            Ok(FakeConnection::boxed(
                200,
                &[("X-RateLimit-Remaining", remaining)],
                "",
            ))
        });
    connections
}

/// Expect exactly one GET whose URL ends with `path`.
pub fn expect_get(
    connections: &mut MockConnections,
    path: &'static str,
    status: u16,
    headers: &'static [(&'static str, &'static str)],
    body: &'static str,
) {
    connections
        .expect_get()
        .withf(move |target, _| target.url().ends_with(path))
        .times(1)
        .returning(move |_, _| Ok(FakeConnection::boxed(status, headers, body)));
}
