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

//! Requests against the first generation of the API.

use super::executor::{RequestExecutor, ensure_success};
use super::validate_path_segment;
use crate::config::Settings;
use crate::error::Result;
use crate::filter::filter_releases;
use crate::models::{Release, Variant};
use crate::parser::{JsonResponseParser, ResponseParser};
use crate::rate_limit::RateLimit;
use crate::transport::{AttohttpcConnections, HttpConnections};
use log::debug;

pub const API_VERSION: u32 = 1;

/// Anything that can list the releases of a variant.
pub trait ReleaseListing {
    fn releases_for_variant(&self, variant: &Variant) -> Result<Vec<Release>>;
}

/// Releases of `variant` narrowed to binaries for `os` and `architecture`.
pub fn releases_for_variant_with<L: ReleaseListing + ?Sized>(
    listing: &L,
    variant: &Variant,
    os: Option<&str>,
    architecture: Option<&str>,
) -> Result<Vec<Release>> {
    let releases = listing.releases_for_variant(variant)?;
    Ok(filter_releases(&releases, os, architecture))
}

pub struct V1Requests {
    executor: RequestExecutor,
    parser: Box<dyn ResponseParser>,
}

impl V1Requests {
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
        Ok(Self {
            executor,
            parser: Box::new(JsonResponseParser::new()),
        })
    }

    pub fn with_parser(mut self, parser: Box<dyn ResponseParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn rate_limit(&self) -> RateLimit {
        self.executor.rate_limit()
    }

    pub fn rate_limit_remaining(&self) -> u32 {
        self.rate_limit().remaining
    }

    pub fn variants(&self) -> Result<Vec<Variant>> {
        let target = self.executor.resource("variants");
        let parser = self.parser.as_ref();
        self.executor.fetch(&target, |target, mut connection| {
            ensure_success(target, connection)?;
            parser.parse_variants(target, &mut connection)
        })
    }

    pub fn nightly_builds_for_variant(&self, variant: &Variant) -> Result<Vec<Release>> {
        self.list(variant, "nightly")
    }

    pub fn releases_for_variant_with(
        &self,
        variant: &Variant,
        os: Option<&str>,
        architecture: Option<&str>,
    ) -> Result<Vec<Release>> {
        releases_for_variant_with(self, variant, os, architecture)
    }

    pub fn nightly_builds_for_variant_with(
        &self,
        variant: &Variant,
        os: Option<&str>,
        architecture: Option<&str>,
    ) -> Result<Vec<Release>> {
        let releases = self.nightly_builds_for_variant(variant)?;
        Ok(filter_releases(&releases, os, architecture))
    }

    fn list(&self, variant: &Variant, listing: &str) -> Result<Vec<Release>> {
        validate_path_segment("variant", variant.as_str())?;

        let target = self.executor.resource(&format!("{variant}/{listing}"));
        let parser = self.parser.as_ref();
        let releases = self.executor.fetch(&target, |target, mut connection| {
            ensure_success(target, connection)?;
            parser.parse_releases(target, &mut connection)
        })?;

        debug!("Received {} {listing} entries for {variant}", releases.len());
        Ok(releases)
    }
}

impl ReleaseListing for V1Requests {
    fn releases_for_variant(&self, variant: &Variant) -> Result<Vec<Release>> {
        self.list(variant, "releases")
    }
}
