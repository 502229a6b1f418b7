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

use super::v1::{self, V1Requests};
use super::v3::{self, V3Requests};
use crate::config::Settings;
use crate::error::{AdoptError, Result};
use crate::rate_limit::RateLimit;
use log::debug;
use std::collections::BTreeMap;

/// A client for one generation of the API.
pub trait ApiRequests: Send + Sync {
    fn api_version(&self) -> u32;

    fn rate_limit(&self) -> RateLimit;

    fn rate_limit_remaining(&self) -> u32 {
        self.rate_limit().remaining
    }

    fn as_v1(&self) -> Option<&V1Requests> {
        None
    }

    fn as_v3(&self) -> Option<&V3Requests> {
        None
    }
}

impl ApiRequests for V1Requests {
    fn api_version(&self) -> u32 {
        v1::API_VERSION
    }

    fn rate_limit(&self) -> RateLimit {
        V1Requests::rate_limit(self)
    }

    fn as_v1(&self) -> Option<&V1Requests> {
        Some(self)
    }
}

impl ApiRequests for V3Requests {
    fn api_version(&self) -> u32 {
        v3::API_VERSION
    }

    fn rate_limit(&self) -> RateLimit {
        V3Requests::rate_limit(self)
    }

    fn as_v3(&self) -> Option<&V3Requests> {
        Some(self)
    }
}

pub type ApiFactory = fn(&Settings) -> Result<Box<dyn ApiRequests>>;

fn open_v1(settings: &Settings) -> Result<Box<dyn ApiRequests>> {
    Ok(Box::new(V1Requests::open(settings)?))
}

fn open_v3(settings: &Settings) -> Result<Box<dyn ApiRequests>> {
    Ok(Box::new(V3Requests::open(settings)?))
}

/// Maps API major versions to the factories that open them.
#[derive(Clone, Default)]
pub struct ApiRegistry {
    factories: BTreeMap<u32, ApiFactory>,
}

impl ApiRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry knowing every generation this crate implements.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(v1::API_VERSION, open_v1);
        registry.register(v3::API_VERSION, open_v3);
        registry
    }

    /// Register `factory` for `version`, replacing any earlier one.
    pub fn register(&mut self, version: u32, factory: ApiFactory) {
        self.factories.insert(version, factory);
    }

    pub fn supported_versions(&self) -> Vec<u32> {
        self.factories.keys().copied().collect()
    }

    pub fn create(&self, version: u32, settings: &Settings) -> Result<Box<dyn ApiRequests>> {
        let factory = self
            .factories
            .get(&version)
            .ok_or(AdoptError::UnsupportedApiVersion(version))?;
        debug!("Opening API version {version} at {}", settings.base_url);
        factory(settings)
    }

    /// Open the version named by `settings.api_version`.
    pub fn create_default(&self, settings: &Settings) -> Result<Box<dyn ApiRequests>> {
        self.create(settings.api_version, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::probed_connections;

    fn open_fake_v3(settings: &Settings) -> Result<Box<dyn ApiRequests>> {
        let requests = V3Requests::open_with(Box::new(probed_connections("7")), settings)?;
        Ok(Box::new(requests))
    }

    fn open_fake_v1(settings: &Settings) -> Result<Box<dyn ApiRequests>> {
        let requests = V1Requests::open_with(Box::new(probed_connections("4")), settings)?;
        Ok(Box::new(requests))
    }

    #[test]
    fn test_defaults_register_v1_and_v3() {
        let registry = ApiRegistry::with_defaults();
        assert_eq!(registry.supported_versions(), vec![1, 3]);
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let registry = ApiRegistry::with_defaults();
        let result = registry.create(2, &Settings::default());
        assert!(matches!(result, Err(AdoptError::UnsupportedApiVersion(2))));

        let empty = ApiRegistry::new();
        assert!(matches!(
            empty.create(3, &Settings::default()),
            Err(AdoptError::UnsupportedApiVersion(3))
        ));
    }

    #[test]
    fn test_create_uses_registered_factory() {
        let mut registry = ApiRegistry::new();
        registry.register(3, open_fake_v3);
        registry.register(1, open_fake_v1);

        let v3 = registry.create(3, &Settings::default()).unwrap();
        assert_eq!(v3.api_version(), 3);
        assert_eq!(v3.rate_limit_remaining(), 7);
        assert!(v3.as_v3().is_some());
        assert!(v3.as_v1().is_none());

        let settings = Settings::default().with_api_version(1);
        let v1 = registry.create_default(&settings).unwrap();
        assert_eq!(v1.api_version(), 1);
        assert_eq!(v1.rate_limit_remaining(), 4);
        assert!(v1.as_v1().is_some());
    }

    #[test]
    fn test_register_replaces_factory() {
        let mut registry = ApiRegistry::with_defaults();
        registry.register(3, open_fake_v3);
        assert_eq!(registry.supported_versions(), vec![1, 3]);
        let requests = registry.create(3, &Settings::default()).unwrap();
        assert_eq!(requests.rate_limit_remaining(), 7);
    }
}
