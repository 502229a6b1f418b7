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

//! Validated version 3 requests.
//!
//! Values here are only produced by the query builders, so every field has
//! already been checked and rendering the target never fails.

use crate::api::executor::{decode_json, decode_redirect};
use crate::error::Result;
use crate::filter::filter_releases;
use crate::models::v3::{
    Architecture, AvailableReleases, BinaryLocation, HeapSize, ImageKind, JvmImplementation,
    LatestAsset, OperatingSystem, ReleaseKind, ReleaseNames, ReleaseVersions, SortOrder,
    V3Release, Vendor, VersionRange,
};
use crate::transport::{HttpConnection, ResourceRef};

/// A request that can be run against a version 3 API root.
pub trait V3Request {
    type Output;

    /// The fully resolved target under `base_url`.
    fn resource(&self, base_url: &str) -> ResourceRef;

    fn decode(&self, target: &str, connection: &mut dyn HttpConnection) -> Result<Self::Output>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableReleasesRequest;

impl V3Request for AvailableReleasesRequest {
    type Output = AvailableReleases;

    fn resource(&self, base_url: &str) -> ResourceRef {
        ResourceRef::new(base_url, "v3/info/available_releases")
    }

    fn decode(&self, target: &str, connection: &mut dyn HttpConnection) -> Result<Self::Output> {
        decode_json(target, connection)
    }
}

/// Paging and filters shared by the release information listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfoParams {
    pub page: u64,
    pub page_size: u64,
    pub release_kind: Option<ReleaseKind>,
    pub sort_order: Option<SortOrder>,
    pub vendor: Option<Vendor>,
    pub version_range: Option<VersionRange>,
}

impl ReleaseInfoParams {
    fn apply(&self, target: ResourceRef) -> ResourceRef {
        target
            .param("page", self.page)
            .param("page_size", self.page_size)
            .param_opt("release_type", self.release_kind)
            .param_opt("sort_order", self.sort_order)
            .param_opt("vendor", self.vendor)
            .param_opt("version", self.version_range.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNamesRequest {
    pub params: ReleaseInfoParams,
}

impl V3Request for ReleaseNamesRequest {
    type Output = ReleaseNames;

    fn resource(&self, base_url: &str) -> ResourceRef {
        self.params
            .apply(ResourceRef::new(base_url, "v3/info/release_names"))
    }

    fn decode(&self, target: &str, connection: &mut dyn HttpConnection) -> Result<Self::Output> {
        decode_json(target, connection)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersionsRequest {
    pub params: ReleaseInfoParams,
}

impl V3Request for ReleaseVersionsRequest {
    type Output = ReleaseVersions;

    fn resource(&self, base_url: &str) -> ResourceRef {
        self.params
            .apply(ResourceRef::new(base_url, "v3/info/release_versions"))
    }

    fn decode(&self, target: &str, connection: &mut dyn HttpConnection) -> Result<Self::Output> {
        decode_json(target, connection)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetsForReleaseRequest {
    pub feature_version: u32,
    pub release_kind: ReleaseKind,
    pub page: u64,
    pub page_size: u64,
    pub architecture: Option<Architecture>,
    pub heap_size: Option<HeapSize>,
    pub image_kind: Option<ImageKind>,
    pub jvm_implementation: Option<JvmImplementation>,
    pub operating_system: Option<OperatingSystem>,
    pub project: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub vendor: Option<Vendor>,
}

impl V3Request for AssetsForReleaseRequest {
    type Output = Vec<V3Release>;

    fn resource(&self, base_url: &str) -> ResourceRef {
        let path = format!(
            "v3/assets/feature_releases/{}/{}",
            self.feature_version, self.release_kind
        );
        ResourceRef::new(base_url, &path)
            .param_opt("architecture", self.architecture)
            .param_opt("heap_size", self.heap_size)
            .param_opt("image_type", self.image_kind)
            .param_opt("jvm_impl", self.jvm_implementation)
            .param_opt("os", self.operating_system)
            .param("page", self.page)
            .param("page_size", self.page_size)
            .param_opt("project", self.project.as_ref())
            .param_opt("sort_order", self.sort_order)
            .param_opt("vendor", self.vendor)
    }

    /// The server may return binaries for other platforms alongside the
    /// requested ones, so the assets are narrowed locally as well.
    fn decode(&self, target: &str, connection: &mut dyn HttpConnection) -> Result<Self::Output> {
        let releases: Vec<V3Release> = decode_json(target, connection)?;
        if self.operating_system.is_none() && self.architecture.is_none() {
            return Ok(releases);
        }
        Ok(filter_releases(
            &releases,
            self.operating_system.map(|os| os.as_wire()),
            self.architecture.map(|arch| arch.as_wire()),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetsForLatestRequest {
    pub feature_version: u32,
    pub jvm_implementation: JvmImplementation,
}

impl V3Request for AssetsForLatestRequest {
    type Output = Vec<LatestAsset>;

    fn resource(&self, base_url: &str) -> ResourceRef {
        let path = format!(
            "v3/assets/latest/{}/{}",
            self.feature_version, self.jvm_implementation
        );
        ResourceRef::new(base_url, &path)
    }

    fn decode(&self, target: &str, connection: &mut dyn HttpConnection) -> Result<Self::Output> {
        decode_json(target, connection)
    }
}

/// The platform coordinates that select a single binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryCoordinates {
    pub operating_system: OperatingSystem,
    pub architecture: Architecture,
    pub image_kind: ImageKind,
    pub jvm_implementation: JvmImplementation,
    pub heap_size: HeapSize,
    pub vendor: Vendor,
}

impl BinaryCoordinates {
    fn path(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}/{}",
            self.operating_system,
            self.architecture,
            self.image_kind,
            self.jvm_implementation,
            self.heap_size,
            self.vendor
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryForLatestRequest {
    pub feature_version: u32,
    pub release_kind: ReleaseKind,
    pub coordinates: BinaryCoordinates,
    pub project: Option<String>,
}

impl V3Request for BinaryForLatestRequest {
    type Output = BinaryLocation;

    fn resource(&self, base_url: &str) -> ResourceRef {
        let path = format!(
            "v3/binary/latest/{}/{}/{}",
            self.feature_version,
            self.release_kind,
            self.coordinates.path()
        );
        ResourceRef::new(base_url, &path).param_opt("project", self.project.as_ref())
    }

    fn decode(&self, target: &str, connection: &mut dyn HttpConnection) -> Result<Self::Output> {
        decode_redirect(target, connection).map(|uri| BinaryLocation { uri })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryForReleaseRequest {
    pub release_name: String,
    pub coordinates: BinaryCoordinates,
    pub project: Option<String>,
}

impl V3Request for BinaryForReleaseRequest {
    type Output = BinaryLocation;

    fn resource(&self, base_url: &str) -> ResourceRef {
        let path = format!(
            "v3/binary/version/{}/{}",
            self.release_name,
            self.coordinates.path()
        );
        ResourceRef::new(base_url, &path).param_opt("project", self.project.as_ref())
    }

    fn decode(&self, target: &str, connection: &mut dyn HttpConnection) -> Result<Self::Output> {
        decode_redirect(target, connection).map(|uri| BinaryLocation { uri })
    }
}
