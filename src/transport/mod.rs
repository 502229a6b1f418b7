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

mod attohttpc_client;

pub use attohttpc_client::AttohttpcConnections;

use crate::error::Result;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;

/// Response headers, keyed by lower-cased header name.
pub type HeaderMap = HashMap<String, Vec<String>>;

/// Request headers sent with every call.
pub type RequestHeaders = [(&'static str, String)];

/// First value of the header `name`, compared case-insensitively.
pub fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first())
        .map(String::as_str)
}

/// Builds a [`HeaderMap`] from name/value pairs, lower-casing the names.
pub fn header_map<'a, I>(pairs: I) -> HeaderMap
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        headers
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(value.to_string());
    }
    headers
}

/// A fully resolved remote resource: an absolute URL plus ordered query
/// parameters. The transport is responsible for encoding the parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    url: String,
    params: Vec<(String, String)>,
}

impl ResourceRef {
    pub fn new(base_url: &str, path: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Self {
            url: format!("{base}/{path}"),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    pub fn param_opt<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)?;
        for (index, (name, value)) in self.params.iter().enumerate() {
            let separator = if index == 0 { '?' } else { '&' };
            write!(f, "{separator}{name}={value}")?;
        }
        Ok(())
    }
}

/// Opens connections to the remote API.
///
/// Failures to connect, send or receive are reported as
/// [`AdoptError::TransportFailure`](crate::error::AdoptError::TransportFailure).
/// Redirects are not followed, and a non-success status is not an error at
/// this level.
pub trait HttpConnections: Send + Sync {
    /// Issue a body-less probe of `target`.
    fn head(&self, target: &ResourceRef, headers: &RequestHeaders)
    -> Result<Box<dyn HttpConnection>>;

    fn get(&self, target: &ResourceRef, headers: &RequestHeaders)
    -> Result<Box<dyn HttpConnection>>;
}

/// An open response. Reading yields the body; dropping it releases the
/// underlying connection.
pub trait HttpConnection: Read + Send {
    fn status(&self) -> u16;

    fn headers(&self) -> &HeaderMap;
}
