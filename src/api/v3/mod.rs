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

//! The version 3 API: build a query, then execute the request it yields.

pub mod query;
pub mod request;

pub use query::{
    AssetsForLatestQuery, AssetsForReleaseQuery, AvailableReleasesQuery, BinaryCoordinatesQuery,
    BinaryForLatestQuery, BinaryForReleaseQuery, ErrorChannel, ReleaseInfoQuery, ReleaseNamesQuery,
    ReleaseVersionsQuery, collect_errors,
};
pub use request::{
    AssetsForLatestRequest, AssetsForReleaseRequest, AvailableReleasesRequest, BinaryCoordinates,
    BinaryForLatestRequest, BinaryForReleaseRequest, ReleaseInfoParams, ReleaseNamesRequest,
    ReleaseVersionsRequest, V3Request,
};

use super::executor::RequestExecutor;
use crate::config::Settings;
use crate::error::Result;
use crate::rate_limit::RateLimit;
use crate::transport::{AttohttpcConnections, HttpConnections};

pub const API_VERSION: u32 = 3;

pub struct V3Requests {
    executor: RequestExecutor,
}

impl V3Requests {
    pub fn open(settings: &Settings) -> Result<Self> {
        let connections = AttohttpcConnections::new().with_timeout(settings.timeout());
        Self::open_with(Box::new(connections), settings)
    }

    pub fn open_with(connections: Box<dyn HttpConnections>, settings: &Settings) -> Result<Self> {
        let executor = RequestExecutor::open(
            connections,
            &settings.base_url,
            settings.user_agent_for(API_VERSION),
        )?;
        Ok(Self { executor })
    }

    pub fn rate_limit(&self) -> RateLimit {
        self.executor.rate_limit()
    }

    pub fn rate_limit_remaining(&self) -> u32 {
        self.rate_limit().remaining
    }

    /// Run a request built by one of the queries.
    pub fn execute<R: V3Request>(&self, request: &R) -> Result<R::Output> {
        let target = request.resource(self.executor.base_url());
        self.executor
            .fetch(&target, |target, connection| request.decode(target, connection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{MockConnections, expect_get, probed_connections};
    use crate::error::AdoptError;
    use crate::models::v3::{OperatingSystem, Vendor};

    fn open(connections: MockConnections) -> V3Requests {
        let settings = Settings::default().with_base_url("https://api.adoptopenjdk.net");
        V3Requests::open_with(Box::new(connections), &settings).unwrap()
    }

    #[test]
    fn test_invalid_query_never_reaches_network() {
        let mut connections = probed_connections("10");
        connections.expect_get().never();
        let requests = open(connections);

        let mut errors = Vec::new();
        let built = ReleaseNamesQuery::new(-1, 10).build(&mut |e| errors.push(e));

        assert!(built.is_none());
        assert_eq!(errors.len(), 1);
        assert_eq!(requests.rate_limit_remaining(), 10);
    }

    #[test]
    fn test_execute_release_names() {
        let mut connections = probed_connections("10");
        expect_get(
            &mut connections,
            "/v3/info/release_names",
            200,
            &[("X-RateLimit-Remaining", "9")],
            r#"{"releases": ["jdk-11.0.8+10", "jdk-11.0.7+10"]}"#,
        );
        let requests = open(connections);

        let request = collect_errors(|channel| {
            ReleaseNamesQuery::new(0, 10)
                .vendor(Vendor::AdoptOpenJdk)
                .build(channel)
        })
        .unwrap();
        let names = requests.execute(&request).unwrap();

        assert_eq!(names.releases, vec!["jdk-11.0.8+10", "jdk-11.0.7+10"]);
        assert_eq!(requests.rate_limit_remaining(), 9);
    }

    #[test]
    fn test_execute_sends_query_params() {
        let mut connections = probed_connections("10");
        connections
            .expect_get()
            .withf(|target, headers| {
                target.to_string()
                    == "https://api.adoptopenjdk.net/v3/assets/feature_releases/11/ga?os=linux&page=0&page_size=10"
                    && headers.iter().any(|(name, _)| *name == "User-Agent")
            })
            .times(1)
            .returning(|_, _| {
                Ok(crate::api::test_support::FakeConnection::boxed(
                    200,
                    &[("X-RateLimit-Remaining", "8")],
                    "[]",
                ))
            });
        let requests = open(connections);

        let request = collect_errors(|channel| {
            AssetsForReleaseQuery::new(11, "ga", 0, 10)
                .operating_system(OperatingSystem::Linux)
                .build(channel)
        })
        .unwrap();
        let assets = requests.execute(&request).unwrap();
        assert!(assets.is_empty());
    }

    #[test]
    fn test_execute_is_gated_by_rate_limit() {
        let mut connections = probed_connections("10");
        expect_get(
            &mut connections,
            "/v3/info/available_releases",
            200,
            &[("X-RateLimit-Remaining", "0"), ("Retry-After", "45")],
            r#"{"available_releases": [8, 11, 14], "available_lts_releases": [8, 11], "most_recent_lts": 11, "most_recent_feature_release": 14}"#,
        );
        let requests = open(connections);

        let request = AvailableReleasesQuery::new().build(&mut |_| {}).unwrap();
        let available = requests.execute(&request).unwrap();
        assert_eq!(available.most_recent_lts, 11);

        let err = requests.execute(&request).unwrap_err();
        assert!(matches!(
            err,
            AdoptError::RateLimitExceeded {
                retry_after_seconds: 45
            }
        ));
    }
}
