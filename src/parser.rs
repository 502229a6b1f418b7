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
use crate::models::{Release, Variant};
use log::{debug, trace};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::io::Read;

/// Turns response bodies of the version 1 API into domain values.
pub trait ResponseParser: Send + Sync {
    fn parse_variants(&self, target: &str, body: &mut dyn Read) -> Result<Vec<Variant>>;

    fn parse_releases(&self, target: &str, body: &mut dyn Read) -> Result<Vec<Release>>;
}

#[derive(Debug, Default, Clone)]
pub struct JsonResponseParser;

impl JsonResponseParser {
    pub fn new() -> Self {
        Self
    }
}

// The variants listing has been served both as bare names and as objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum VariantEntry {
    Name(String),
    Described {
        #[serde(rename = "searchableName", alias = "name")]
        name: String,
    },
}

impl ResponseParser for JsonResponseParser {
    fn parse_variants(&self, target: &str, body: &mut dyn Read) -> Result<Vec<Variant>> {
        let entries: Vec<VariantEntry> = parse_json(target, body)?;
        Ok(entries
            .into_iter()
            .map(|entry| match entry {
                VariantEntry::Name(name) | VariantEntry::Described { name } => Variant::new(name),
            })
            .collect())
    }

    fn parse_releases(&self, target: &str, body: &mut dyn Read) -> Result<Vec<Release>> {
        parse_json(target, body)
    }
}

/// Read the whole body and decode it as JSON.
pub fn parse_json<T: DeserializeOwned>(target: &str, body: &mut dyn Read) -> Result<T> {
    let mut text = String::new();
    body.read_to_string(&mut text).map_err(|e| {
        AdoptError::transport_with_source(format!("Failed to read response body from {target}"), e)
    })?;

    serde_json::from_str::<T>(&text).map_err(|e| {
        debug!("Failed to parse response from {target}: {e}");
        trace!("Response body: {text}");
        AdoptError::malformed(target, e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_variant_names() {
        let parser = JsonResponseParser::new();
        let mut body = Cursor::new(r#"["openjdk8", "openjdk11"]"#);
        let variants = parser.parse_variants("variants", &mut body).unwrap();
        assert_eq!(
            variants,
            vec![Variant::new("openjdk8"), Variant::new("openjdk11")]
        );
    }

    #[test]
    fn test_parse_variant_objects() {
        let parser = JsonResponseParser::new();
        let mut body = Cursor::new(
            r#"[
                {"searchableName": "openjdk8", "officialName": "OpenJDK 8 with Hotspot", "jvm": "Hotspot"},
                {"name": "openjdk11-openj9"}
            ]"#,
        );
        let variants = parser.parse_variants("variants", &mut body).unwrap();
        assert_eq!(variants[0], Variant::new("openjdk8"));
        assert_eq!(variants[1], Variant::new("openjdk11-openj9"));
    }

    #[test]
    fn test_parse_releases_preserves_order() {
        let parser = JsonResponseParser::new();
        let mut body = Cursor::new(
            r#"[
                {"release_name": "b", "binaries": []},
                {"release_name": "a", "binaries": []}
            ]"#,
        );
        let releases = parser.parse_releases("releases", &mut body).unwrap();
        let names: Vec<&str> = releases.iter().map(|r| r.release_name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_malformed_body() {
        let parser = JsonResponseParser::new();
        let mut body = Cursor::new("<html>Service Unavailable</html>");
        let err = parser
            .parse_releases("https://api.adoptopenjdk.net/openjdk8/releases", &mut body)
            .unwrap_err();
        match err {
            AdoptError::MalformedResponse { target, .. } => {
                assert_eq!(target, "https://api.adoptopenjdk.net/openjdk8/releases")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let mut body = Cursor::new(r#"{"releases": "not-a-list"}"#);
        let result: Result<crate::models::v3::ReleaseNames> = parse_json("names", &mut body);
        assert!(matches!(result, Err(AdoptError::MalformedResponse { .. })));
    }
}
