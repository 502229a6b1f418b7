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
use crate::parser::parse_json;
use crate::rate_limit::{RateLimit, RateLimiter};
use crate::transport::{HttpConnection, HttpConnections, ResourceRef, header_value};
use log::debug;
use serde::de::DeserializeOwned;

/// Runs calls against one API root under a shared rate limit.
pub struct RequestExecutor {
    connections: Box<dyn HttpConnections>,
    limiter: RateLimiter,
    base_url: String,
    headers: Vec<(&'static str, String)>,
}

impl RequestExecutor {
    /// Probe the API root with a HEAD request to learn the current rate limit.
    pub fn open(
        connections: Box<dyn HttpConnections>,
        base_url: &str,
        user_agent: String,
    ) -> Result<Self> {
        let headers = vec![
            ("User-Agent", user_agent),
            ("Accept", "application/json".to_string()),
        ];

        let probe = ResourceRef::new(base_url, "");
        debug!("Probing rate limit at {probe}");
        let limiter = {
            let connection = connections.head(&probe, &headers)?;
            RateLimiter::from_headers(connection.headers())
        };

        Ok(Self {
            connections,
            limiter,
            base_url: base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn resource(&self, path: &str) -> ResourceRef {
        ResourceRef::new(&self.base_url, path)
    }

    pub fn rate_limit(&self) -> RateLimit {
        self.limiter.snapshot()
    }

    /// Perform one GET of `target` and hand the open response to `decode`.
    ///
    /// The rate limit is checked before the call and replaced from the
    /// response headers before `decode` sees the body, so a body that later
    /// fails to decode still counts against the limit.
    pub fn fetch<T, D>(&self, target: &ResourceRef, decode: D) -> Result<T>
    where
        D: FnOnce(&str, &mut dyn HttpConnection) -> Result<T>,
    {
        let mut connection = {
            let mut permit = self.limiter.acquire();
            permit.check()?;

            debug!("API Request: {target}");
            let connection = self.connections.get(target, &self.headers)?;
            permit.update(connection.headers());
            connection
        };

        decode(&target.to_string(), connection.as_mut())
    }
}

/// Fail with a `TransportFailure` unless the response status is 2xx.
pub fn ensure_success(target: &str, connection: &dyn HttpConnection) -> Result<()> {
    let status = connection.status();
    if (200..300).contains(&status) {
        return Ok(());
    }

    let message = match status {
        404 => format!("The requested resource {target} was not found (HTTP 404)"),
        429 => format!("Too many requests to {target} (HTTP 429)"),
        400 => format!("Bad request for {target} (HTTP 400)"),
        500..=599 => format!("Server error from {target} (HTTP {status})"),
        _ => format!("Unexpected HTTP status {status} from {target}"),
    };
    Err(AdoptError::transport(message))
}

/// Decode a successful JSON response.
pub fn decode_json<T: DeserializeOwned>(
    target: &str,
    mut connection: &mut dyn HttpConnection,
) -> Result<T> {
    ensure_success(target, connection)?;
    parse_json(target, &mut connection)
}

/// The redirect target of a 3xx response.
pub fn decode_redirect(target: &str, connection: &dyn HttpConnection) -> Result<String> {
    let status = connection.status();
    if (300..400).contains(&status) {
        return header_value(connection.headers(), "Location")
            .map(str::to_string)
            .ok_or_else(|| {
                AdoptError::malformed(target, format!("HTTP {status} without a Location header"))
            });
    }

    ensure_success(target, connection)?;
    Err(AdoptError::malformed(
        target,
        format!("expected a redirect, got HTTP {status}"),
    ))
}
