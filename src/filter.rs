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

//! Narrowing releases to the binaries built for a given platform.
//!
//! Every function here is pure: inputs are borrowed and results are new
//! values, so a release shared with other callers is never altered. Absent
//! criteria match everything; a supplied criterion must equal the binary's
//! field exactly, and a binary whose field is unknown never matches it.

use crate::models::v3::{V3Binary, V3Release};
use crate::models::{Binary, Release};

/// A binary that may declare the platform it was built for.
pub trait PlatformBinary {
    fn operating_system(&self) -> Option<&str>;
    fn architecture(&self) -> Option<&str>;
}

/// A release made of an ordered list of binaries.
pub trait BinaryRelease {
    type Binary: PlatformBinary + Clone;

    fn binaries(&self) -> &[Self::Binary];

    /// A copy of this release carrying `binaries` instead of its own.
    fn with_binaries(&self, binaries: Vec<Self::Binary>) -> Self;
}

pub fn matches<B: PlatformBinary + ?Sized>(
    binary: &B,
    os: Option<&str>,
    architecture: Option<&str>,
) -> bool {
    let os_ok = os.is_none_or(|wanted| binary.operating_system() == Some(wanted));
    let arch_ok = architecture.is_none_or(|wanted| binary.architecture() == Some(wanted));
    os_ok && arch_ok
}

pub fn release_has_match<R: BinaryRelease>(
    release: &R,
    os: Option<&str>,
    architecture: Option<&str>,
) -> bool {
    release
        .binaries()
        .iter()
        .any(|binary| matches(binary, os, architecture))
}

/// Returns `release` with only the matching binaries, in their original
/// order. The result may have no binaries at all.
pub fn filter_release<R: BinaryRelease>(
    release: &R,
    os: Option<&str>,
    architecture: Option<&str>,
) -> R {
    let binaries = release
        .binaries()
        .iter()
        .filter(|binary| matches(*binary, os, architecture))
        .cloned()
        .collect();
    release.with_binaries(binaries)
}

/// Drops releases without a matching binary and narrows the rest.
pub fn filter_releases<R: BinaryRelease>(
    releases: &[R],
    os: Option<&str>,
    architecture: Option<&str>,
) -> Vec<R> {
    releases
        .iter()
        .filter(|release| release_has_match(*release, os, architecture))
        .map(|release| filter_release(release, os, architecture))
        .collect()
}

impl PlatformBinary for Binary {
    fn operating_system(&self) -> Option<&str> {
        self.os.as_deref()
    }

    fn architecture(&self) -> Option<&str> {
        self.architecture.as_deref()
    }
}

impl BinaryRelease for Release {
    type Binary = Binary;

    fn binaries(&self) -> &[Binary] {
        &self.binaries
    }

    fn with_binaries(&self, binaries: Vec<Binary>) -> Self {
        Release {
            release_name: self.release_name.clone(),
            release_link: self.release_link.clone(),
            vendor: self.vendor.clone(),
            timestamp: self.timestamp,
            binaries,
        }
    }
}

impl PlatformBinary for V3Binary {
    fn operating_system(&self) -> Option<&str> {
        self.os.as_deref()
    }

    fn architecture(&self) -> Option<&str> {
        self.architecture.as_deref()
    }
}

impl BinaryRelease for V3Release {
    type Binary = V3Binary;

    fn binaries(&self) -> &[V3Binary] {
        &self.binaries
    }

    fn with_binaries(&self, binaries: Vec<V3Binary>) -> Self {
        V3Release {
            binaries,
            ..self.clone()
        }
    }
}
