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

//! Parameter sets for the version 3 API.
//!
//! Every query is checked as a whole by `build`: each problem is reported
//! through the caller's error channel as its own `InvalidParameter`, and a
//! request is only produced when nothing was reported. Building never
//! touches the network.

use super::request::{
    AssetsForLatestRequest, AssetsForReleaseRequest, AvailableReleasesRequest,
    BinaryCoordinates, BinaryForLatestRequest, BinaryForReleaseRequest, ReleaseInfoParams,
    ReleaseNamesRequest, ReleaseVersionsRequest,
};
use crate::api::validate_path_segment;
use crate::error::{AdoptError, Result};
use crate::models::v3::{
    Architecture, HeapSize, ImageKind, JvmImplementation, OperatingSystem, ReleaseKind,
    SortOrder, Vendor, VersionRange,
};
use std::str::FromStr;

/// The channel through which `build` reports parameter errors.
pub type ErrorChannel<'a> = &'a mut dyn FnMut(AdoptError);

/// Run `build` and gather everything it reports.
pub fn collect_errors<T, F>(build: F) -> std::result::Result<T, Vec<AdoptError>>
where
    F: FnOnce(&mut dyn FnMut(AdoptError)) -> Option<T>,
{
    let mut errors = Vec::new();
    let built = build(&mut |error| errors.push(error));
    match built {
        Some(request) if errors.is_empty() => Ok(request),
        _ => Err(errors),
    }
}

/// Forwards problems to the channel and turns each checked value into an
/// `Option` that is `None` exactly when something was reported.
struct Validation<'a> {
    errors: ErrorChannel<'a>,
}

impl<'a> Validation<'a> {
    fn new(errors: ErrorChannel<'a>) -> Self {
        Self { errors }
    }

    fn check<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                (self.errors)(error);
                None
            }
        }
    }

    fn non_negative(&mut self, parameter: &'static str, value: i64) -> Option<u64> {
        let result = u64::try_from(value).map_err(|_| {
            AdoptError::invalid_parameter(parameter, format!("must not be negative, got {value}"))
        });
        self.check(result)
    }

    fn positive(&mut self, parameter: &'static str, value: i64) -> Option<u32> {
        let result = u32::try_from(value)
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| {
                AdoptError::invalid_parameter(parameter, format!("must be positive, got {value}"))
            });
        self.check(result)
    }

    fn required<T>(&mut self, parameter: &'static str, value: Option<&str>) -> Option<T>
    where
        T: FromStr<Err = AdoptError>,
    {
        let result = value
            .ok_or_else(|| AdoptError::invalid_parameter(parameter, "is required"))
            .and_then(T::from_str);
        self.check(result)
    }

    fn optional<T>(&mut self, value: Option<&str>) -> Option<Option<T>>
    where
        T: FromStr<Err = AdoptError>,
    {
        match value {
            None => Some(None),
            Some(text) => self.check(T::from_str(text)).map(Some),
        }
    }

    fn project(&mut self, value: Option<&str>) -> Option<Option<String>> {
        match value.map(str::trim) {
            None => Some(None),
            Some("") => self.check(Err(AdoptError::invalid_parameter(
                "project",
                "must not be empty",
            ))),
            Some(project) => Some(Some(project.to_string())),
        }
    }

    fn path_segment(&mut self, parameter: &'static str, value: &str) -> Option<String> {
        self.check(validate_path_segment(parameter, value).map(|()| value.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct AvailableReleasesQuery;

impl AvailableReleasesQuery {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, _errors: ErrorChannel<'_>) -> Option<AvailableReleasesRequest> {
        Some(AvailableReleasesRequest)
    }
}

/// Paging and filters of the release information listings.
#[derive(Debug, Clone, Default)]
pub struct ReleaseInfoQuery {
    pub page: i64,
    pub page_size: i64,
    pub release_kind: Option<String>,
    pub sort_order: Option<String>,
    pub vendor: Option<String>,
    pub version_range: Option<String>,
}

impl ReleaseInfoQuery {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page,
            page_size,
            ..Default::default()
        }
    }

    pub fn release_kind(mut self, release_kind: impl ToString) -> Self {
        self.release_kind = Some(release_kind.to_string());
        self
    }

    pub fn sort_order(mut self, sort_order: impl ToString) -> Self {
        self.sort_order = Some(sort_order.to_string());
        self
    }

    pub fn vendor(mut self, vendor: impl ToString) -> Self {
        self.vendor = Some(vendor.to_string());
        self
    }

    pub fn version_range(mut self, version_range: impl ToString) -> Self {
        self.version_range = Some(version_range.to_string());
        self
    }

    fn validate(&self, errors: ErrorChannel<'_>) -> Option<ReleaseInfoParams> {
        let mut v = Validation::new(errors);
        let page = v.non_negative("page", self.page);
        let page_size = v.non_negative("page_size", self.page_size);
        let release_kind = v.optional::<ReleaseKind>(self.release_kind.as_deref());
        let sort_order = v.optional::<SortOrder>(self.sort_order.as_deref());
        let vendor = v.optional::<Vendor>(self.vendor.as_deref());
        let version_range = v.optional::<VersionRange>(self.version_range.as_deref());

        let (
            Some(page),
            Some(page_size),
            Some(release_kind),
            Some(sort_order),
            Some(vendor),
            Some(version_range),
        ) = (page, page_size, release_kind, sort_order, vendor, version_range)
        else {
            return None;
        };

        Some(ReleaseInfoParams {
            page,
            page_size,
            release_kind,
            sort_order,
            vendor,
            version_range,
        })
    }
}

/// Query for `/v3/info/release_names`.
#[derive(Debug, Clone, Default)]
pub struct ReleaseNamesQuery(pub ReleaseInfoQuery);

impl ReleaseNamesQuery {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self(ReleaseInfoQuery::new(page, page_size))
    }

    pub fn release_kind(self, release_kind: impl ToString) -> Self {
        Self(self.0.release_kind(release_kind))
    }

    pub fn sort_order(self, sort_order: impl ToString) -> Self {
        Self(self.0.sort_order(sort_order))
    }

    pub fn vendor(self, vendor: impl ToString) -> Self {
        Self(self.0.vendor(vendor))
    }

    pub fn version_range(self, version_range: impl ToString) -> Self {
        Self(self.0.version_range(version_range))
    }

    pub fn build(&self, errors: ErrorChannel<'_>) -> Option<ReleaseNamesRequest> {
        self.0
            .validate(errors)
            .map(|params| ReleaseNamesRequest { params })
    }
}

/// Query for `/v3/info/release_versions`.
#[derive(Debug, Clone, Default)]
pub struct ReleaseVersionsQuery(pub ReleaseInfoQuery);

impl ReleaseVersionsQuery {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self(ReleaseInfoQuery::new(page, page_size))
    }

    pub fn release_kind(self, release_kind: impl ToString) -> Self {
        Self(self.0.release_kind(release_kind))
    }

    pub fn sort_order(self, sort_order: impl ToString) -> Self {
        Self(self.0.sort_order(sort_order))
    }

    pub fn vendor(self, vendor: impl ToString) -> Self {
        Self(self.0.vendor(vendor))
    }

    pub fn version_range(self, version_range: impl ToString) -> Self {
        Self(self.0.version_range(version_range))
    }

    pub fn build(&self, errors: ErrorChannel<'_>) -> Option<ReleaseVersionsRequest> {
        self.0
            .validate(errors)
            .map(|params| ReleaseVersionsRequest { params })
    }
}

#[derive(Debug, Clone)]
pub struct AssetsForReleaseQuery {
    pub feature_version: i64,
    pub release_kind: String,
    pub page: i64,
    pub page_size: i64,
    pub architecture: Option<String>,
    pub heap_size: Option<String>,
    pub image_kind: Option<String>,
    pub jvm_implementation: Option<String>,
    pub operating_system: Option<String>,
    pub project: Option<String>,
    pub sort_order: Option<String>,
    pub vendor: Option<String>,
}

impl AssetsForReleaseQuery {
    pub fn new(feature_version: i64, release_kind: impl ToString, page: i64, page_size: i64) -> Self {
        Self {
            feature_version,
            release_kind: release_kind.to_string(),
            page,
            page_size,
            architecture: None,
            heap_size: None,
            image_kind: None,
            jvm_implementation: None,
            operating_system: None,
            project: None,
            sort_order: None,
            vendor: None,
        }
    }

    pub fn architecture(mut self, architecture: impl ToString) -> Self {
        self.architecture = Some(architecture.to_string());
        self
    }

    pub fn heap_size(mut self, heap_size: impl ToString) -> Self {
        self.heap_size = Some(heap_size.to_string());
        self
    }

    pub fn image_kind(mut self, image_kind: impl ToString) -> Self {
        self.image_kind = Some(image_kind.to_string());
        self
    }

    pub fn jvm_implementation(mut self, jvm_implementation: impl ToString) -> Self {
        self.jvm_implementation = Some(jvm_implementation.to_string());
        self
    }

    pub fn operating_system(mut self, operating_system: impl ToString) -> Self {
        self.operating_system = Some(operating_system.to_string());
        self
    }

    pub fn project(mut self, project: impl ToString) -> Self {
        self.project = Some(project.to_string());
        self
    }

    pub fn sort_order(mut self, sort_order: impl ToString) -> Self {
        self.sort_order = Some(sort_order.to_string());
        self
    }

    pub fn vendor(mut self, vendor: impl ToString) -> Self {
        self.vendor = Some(vendor.to_string());
        self
    }

    pub fn build(&self, errors: ErrorChannel<'_>) -> Option<AssetsForReleaseRequest> {
        let mut v = Validation::new(errors);
        let feature_version = v.positive("version", self.feature_version);
        let release_kind = v.required::<ReleaseKind>("release_type", Some(self.release_kind.as_str()));
        let page = v.non_negative("page", self.page);
        let page_size = v.non_negative("page_size", self.page_size);
        let architecture = v.optional::<Architecture>(self.architecture.as_deref());
        let heap_size = v.optional::<HeapSize>(self.heap_size.as_deref());
        let image_kind = v.optional::<ImageKind>(self.image_kind.as_deref());
        let jvm_implementation = v.optional::<JvmImplementation>(self.jvm_implementation.as_deref());
        let operating_system = v.optional::<OperatingSystem>(self.operating_system.as_deref());
        let project = v.project(self.project.as_deref());
        let sort_order = v.optional::<SortOrder>(self.sort_order.as_deref());
        let vendor = v.optional::<Vendor>(self.vendor.as_deref());

        let (
            Some(feature_version),
            Some(release_kind),
            Some(page),
            Some(page_size),
            Some(architecture),
            Some(heap_size),
            Some(image_kind),
            Some(jvm_implementation),
            Some(operating_system),
            Some(project),
            Some(sort_order),
            Some(vendor),
        ) = (
            feature_version,
            release_kind,
            page,
            page_size,
            architecture,
            heap_size,
            image_kind,
            jvm_implementation,
            operating_system,
            project,
            sort_order,
            vendor,
        )
        else {
            return None;
        };

        Some(AssetsForReleaseRequest {
            feature_version,
            release_kind,
            page,
            page_size,
            architecture,
            heap_size,
            image_kind,
            jvm_implementation,
            operating_system,
            project,
            sort_order,
            vendor,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AssetsForLatestQuery {
    pub feature_version: i64,
    pub jvm_implementation: String,
}

impl AssetsForLatestQuery {
    pub fn new(feature_version: i64, jvm_implementation: impl ToString) -> Self {
        Self {
            feature_version,
            jvm_implementation: jvm_implementation.to_string(),
        }
    }

    pub fn build(&self, errors: ErrorChannel<'_>) -> Option<AssetsForLatestRequest> {
        let mut v = Validation::new(errors);
        let feature_version = v.positive("version", self.feature_version);
        let jvm_implementation =
            v.required::<JvmImplementation>("jvm_impl", Some(self.jvm_implementation.as_str()));

        let (Some(feature_version), Some(jvm_implementation)) =
            (feature_version, jvm_implementation)
        else {
            return None;
        };

        Some(AssetsForLatestRequest {
            feature_version,
            jvm_implementation,
        })
    }
}

/// Platform values naming one binary. All of them must be set.
#[derive(Debug, Clone, Default)]
pub struct BinaryCoordinatesQuery {
    pub operating_system: Option<String>,
    pub architecture: Option<String>,
    pub image_kind: Option<String>,
    pub jvm_implementation: Option<String>,
    pub heap_size: Option<String>,
    pub vendor: Option<String>,
}

impl BinaryCoordinatesQuery {
    fn validate(&self, v: &mut Validation<'_>) -> Option<BinaryCoordinates> {
        let operating_system =
            v.required::<OperatingSystem>("os", self.operating_system.as_deref());
        let architecture = v.required::<Architecture>("architecture", self.architecture.as_deref());
        let image_kind = v.required::<ImageKind>("image_type", self.image_kind.as_deref());
        let jvm_implementation =
            v.required::<JvmImplementation>("jvm_impl", self.jvm_implementation.as_deref());
        let heap_size = v.required::<HeapSize>("heap_size", self.heap_size.as_deref());
        let vendor = v.required::<Vendor>("vendor", self.vendor.as_deref());

        Some(BinaryCoordinates {
            operating_system: operating_system?,
            architecture: architecture?,
            image_kind: image_kind?,
            jvm_implementation: jvm_implementation?,
            heap_size: heap_size?,
            vendor: vendor?,
        })
    }
}

macro_rules! coordinate_setters {
    ($query:ty) => {
        impl $query {
            pub fn operating_system(mut self, operating_system: impl ToString) -> Self {
                self.coordinates.operating_system = Some(operating_system.to_string());
                self
            }

            pub fn architecture(mut self, architecture: impl ToString) -> Self {
                self.coordinates.architecture = Some(architecture.to_string());
                self
            }

            pub fn image_kind(mut self, image_kind: impl ToString) -> Self {
                self.coordinates.image_kind = Some(image_kind.to_string());
                self
            }

            pub fn jvm_implementation(mut self, jvm_implementation: impl ToString) -> Self {
                self.coordinates.jvm_implementation = Some(jvm_implementation.to_string());
                self
            }

            pub fn heap_size(mut self, heap_size: impl ToString) -> Self {
                self.coordinates.heap_size = Some(heap_size.to_string());
                self
            }

            pub fn vendor(mut self, vendor: impl ToString) -> Self {
                self.coordinates.vendor = Some(vendor.to_string());
                self
            }

            pub fn project(mut self, project: impl ToString) -> Self {
                self.project = Some(project.to_string());
                self
            }
        }
    };
}

#[derive(Debug, Clone)]
pub struct BinaryForLatestQuery {
    pub feature_version: i64,
    pub release_kind: String,
    pub coordinates: BinaryCoordinatesQuery,
    pub project: Option<String>,
}

impl BinaryForLatestQuery {
    pub fn new(feature_version: i64, release_kind: impl ToString) -> Self {
        Self {
            feature_version,
            release_kind: release_kind.to_string(),
            coordinates: BinaryCoordinatesQuery::default(),
            project: None,
        }
    }

    pub fn build(&self, errors: ErrorChannel<'_>) -> Option<BinaryForLatestRequest> {
        let mut v = Validation::new(errors);
        let feature_version = v.positive("version", self.feature_version);
        let release_kind = v.required::<ReleaseKind>("release_type", Some(self.release_kind.as_str()));
        let coordinates = self.coordinates.validate(&mut v);
        let project = v.project(self.project.as_deref());

        Some(BinaryForLatestRequest {
            feature_version: feature_version?,
            release_kind: release_kind?,
            coordinates: coordinates?,
            project: project?,
        })
    }
}

coordinate_setters!(BinaryForLatestQuery);

#[derive(Debug, Clone)]
pub struct BinaryForReleaseQuery {
    pub release_name: String,
    pub coordinates: BinaryCoordinatesQuery,
    pub project: Option<String>,
}

impl BinaryForReleaseQuery {
    pub fn new(release_name: impl Into<String>) -> Self {
        Self {
            release_name: release_name.into(),
            coordinates: BinaryCoordinatesQuery::default(),
            project: None,
        }
    }

    pub fn build(&self, errors: ErrorChannel<'_>) -> Option<BinaryForReleaseRequest> {
        let mut v = Validation::new(errors);
        let release_name = v.path_segment("release_name", self.release_name.trim());
        let coordinates = self.coordinates.validate(&mut v);
        let project = v.project(self.project.as_deref());

        Some(BinaryForReleaseRequest {
            release_name: release_name?,
            coordinates: coordinates?,
            project: project?,
        })
    }
}

coordinate_setters!(BinaryForReleaseQuery);
