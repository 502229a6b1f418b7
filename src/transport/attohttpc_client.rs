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

use crate::error::{AdoptError, Result};
use crate::transport::{HeaderMap, HttpConnection, HttpConnections, RequestHeaders, ResourceRef};
use attohttpc::{RequestBuilder, Response, Session};
use log::debug;
use std::io::{self, Read};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct AttohttpcConnections {
    session: Session,
    timeout: Duration,
}

impl AttohttpcConnections {
    pub fn new() -> Self {
        let mut session = Session::new();
        session.proxy_settings(attohttpc::ProxySettings::from_env());

        Self {
            session,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn send(
        &self,
        method: &str,
        mut request: RequestBuilder,
        target: &ResourceRef,
        headers: &RequestHeaders,
    ) -> Result<Box<dyn HttpConnection>> {
        request = request.timeout(self.timeout).follow_redirects(false);
        for (name, value) in target.params() {
            request = request.param(name.as_str(), value);
        }
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        debug!("{method} {target}");
        let response = request.send().map_err(|e| {
            AdoptError::transport_with_source(format!("{method} {target} failed: {e}"), e)
        })?;

        Ok(Box::new(AttohttpcConnection::new(response)))
    }
}

impl Default for AttohttpcConnections {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpConnections for AttohttpcConnections {
    fn head(
        &self,
        target: &ResourceRef,
        headers: &RequestHeaders,
    ) -> Result<Box<dyn HttpConnection>> {
        self.send("HEAD", self.session.head(target.url()), target, headers)
    }

    fn get(
        &self,
        target: &ResourceRef,
        headers: &RequestHeaders,
    ) -> Result<Box<dyn HttpConnection>> {
        self.send("GET", self.session.get(target.url()), target, headers)
    }
}

struct AttohttpcConnection {
    status: u16,
    headers: HeaderMap,
    response: Response,
}

impl AttohttpcConnection {
    fn new(response: Response) -> Self {
        let mut headers = HeaderMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers
                    .entry(name.as_str().to_ascii_lowercase())
                    .or_default()
                    .push(value.to_string());
            }
        }

        Self {
            status: response.status().as_u16(),
            headers,
            response,
        }
    }
}

impl Read for AttohttpcConnection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.response.read(buf)
    }
}

impl HttpConnection for AttohttpcConnection {
    fn status(&self) -> u16 {
        self.status
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
