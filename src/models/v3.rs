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

//! Query vocabulary and response records of the version 3 API.

use crate::error::{AdoptError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a closed set of values with a fixed wire spelling.
///
/// Parsing is case-insensitive and accepts the listed aliases; `Display`
/// always renders the wire spelling.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $parameter:literal {
            $($variant:ident => $wire:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_wire(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl FromStr for $name {
            type Err = AdoptError;

            fn from_str(s: &str) -> Result<Self> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($wire) $(|| s.eq_ignore_ascii_case($alias))* {
                        return Ok($name::$variant);
                    }
                )+
                Err(AdoptError::invalid_parameter(
                    $parameter,
                    format!("unknown value '{s}'"),
                ))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_wire())
            }
        }
    };
}

wire_enum! {
    Architecture, "architecture" {
        X64 => "x64" | "amd64" | "x86_64",
        X32 => "x32" | "x86" | "i386" | "i686",
        Ppc64 => "ppc64",
        Ppc64le => "ppc64le",
        S390x => "s390x",
        Aarch64 => "aarch64" | "arm64",
        Arm => "arm" | "arm32",
        Sparcv9 => "sparcv9",
        Riscv64 => "riscv64",
    }
}

wire_enum! {
    OperatingSystem, "os" {
        Linux => "linux",
        Windows => "windows" | "win",
        Mac => "mac" | "macos" | "darwin",
        Solaris => "solaris",
        Aix => "aix",
        AlpineLinux => "alpine-linux" | "alpine",
    }
}

wire_enum! {
    HeapSize, "heap_size" {
        Normal => "normal",
        Large => "large",
    }
}

wire_enum! {
    ImageKind, "image_type" {
        Jdk => "jdk",
        Jre => "jre",
        TestImage => "testimage",
        DebugImage => "debugimage",
        StaticLibs => "staticlibs",
    }
}

wire_enum! {
    JvmImplementation, "jvm_impl" {
        Hotspot => "hotspot",
        OpenJ9 => "openj9",
    }
}

wire_enum! {
    /// General availability or early access.
    ReleaseKind, "release_type" {
        Ga => "ga",
        Ea => "ea",
    }
}

wire_enum! {
    SortOrder, "sort_order" {
        Ascending => "ASC",
        Descending => "DESC",
    }
}

wire_enum! {
    Vendor, "vendor" {
        AdoptOpenJdk => "adoptopenjdk",
        OpenJdk => "openjdk",
        Eclipse => "eclipse",
        Alibaba => "alibaba",
        Ibm => "ibm",
    }
}

/// A Maven-style version range (`[11,12)`) or a single version (`11.0.4+11`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionRange(String);

impl VersionRange {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for VersionRange {
    type Err = AdoptError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = |why: &str| AdoptError::invalid_parameter("version", format!("{why}: '{s}'"));

        if s.is_empty() {
            return Err(invalid("empty version range"));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(invalid("whitespace in version range"));
        }

        let opens = s.starts_with('[') || s.starts_with('(');
        let closes = s.ends_with(']') || s.ends_with(')');
        match (opens, closes) {
            (true, true) => {
                let inner = &s[1..s.len() - 1];
                let bounds: Vec<&str> = inner.split(',').collect();
                if bounds.len() > 2 || bounds.iter().all(|b| b.is_empty()) {
                    return Err(invalid("malformed range bounds"));
                }
                Ok(Self(s.to_string()))
            }
            (false, false) if !s.contains(',') => Ok(Self(s.to_string())),
            _ => Err(invalid("unbalanced range brackets")),
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableReleases {
    pub available_releases: Vec<u32>,
    pub available_lts_releases: Vec<u32>,
    pub most_recent_lts: u32,
    pub most_recent_feature_release: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_recent_feature_version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip_version: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseNames {
    pub releases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseVersions {
    pub versions: Vec<VersionData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionData {
    pub major: u32,
    #[serde(default)]
    pub minor: u32,
    #[serde(default)]
    pub security: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adopt_build_number: Option<u32>,
    pub semver: String,
    pub openjdk_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct V3Binary {
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub architecture: Option<String>,
    #[serde(default)]
    pub image_type: Option<String>,
    #[serde(default)]
    pub jvm_impl: Option<String>,
    #[serde(default)]
    pub heap_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<Package>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installer: Option<Package>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scm_ref: Option<String>,
}

/// One entry of the `assets/feature_releases` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct V3Release {
    pub id: String,
    pub release_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_count: Option<u64>,
    #[serde(default)]
    pub binaries: Vec<V3Binary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_data: Option<VersionData>,
}

/// One entry of the `assets/latest` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestAsset {
    pub binary: V3Binary,
    pub release_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionData>,
}

/// Where a `binary/...` endpoint redirects to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryLocation {
    pub uri: String,
}
