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

//! Clients for the generations of the AdoptOpenJDK catalog API.

pub mod executor;
pub mod registry;
pub mod v1;
pub mod v3;

#[cfg(test)]
pub(crate) mod test_support;

pub use executor::RequestExecutor;
pub use registry::{ApiFactory, ApiRegistry, ApiRequests};
pub use v1::{ReleaseListing, V1Requests};
pub use v3::V3Requests;

use crate::error::{AdoptError, Result};

/// Check a value that is substituted into a URL path.
pub(crate) fn validate_path_segment(parameter: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AdoptError::invalid_parameter(parameter, "must not be empty"));
    }
    if value == "." || value == ".." {
        return Err(AdoptError::invalid_parameter(
            parameter,
            format!("'{value}' is not a valid path segment"),
        ));
    }
    if let Some(c) = value
        .chars()
        .find(|c| matches!(c, '/' | '?' | '#' | '%' | '\\') || c.is_whitespace())
    {
        return Err(AdoptError::invalid_parameter(
            parameter,
            format!("'{value}' contains the character '{c}'"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path_segment() {
        assert!(validate_path_segment("variant", "openjdk8").is_ok());
        assert!(validate_path_segment("release_name", "jdk-11.0.8+10").is_ok());
        assert!(validate_path_segment("variant", "openjdk8..x").is_ok());

        for bad in [
            "",
            "openjdk8/releases",
            "a?b",
            "a#b",
            "open jdk",
            ".",
            "..",
            "%2e%2e",
            "a\\b",
        ] {
            match validate_path_segment("variant", bad) {
                Err(AdoptError::InvalidParameter { parameter, .. }) => {
                    assert_eq!(parameter, "variant")
                }
                other => panic!("expected InvalidParameter for {bad:?}, got {other:?}"),
            }
        }
    }
}
