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

use super::print_json;
use crate::api::V1Requests;
use crate::config::Settings;
use crate::error::Result;
use crate::models::{Binary, Release, Variant};
use comfy_table::{Cell, Table};
use log::debug;

pub struct ReleasesCommand {
    requests: V1Requests,
}

impl ReleasesCommand {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            requests: V1Requests::open(settings)?,
        })
    }

    pub fn execute(
        &self,
        variant: &str,
        nightly: bool,
        os: Option<&str>,
        architecture: Option<&str>,
        json: bool,
    ) -> Result<()> {
        let variant = Variant::new(variant);
        let releases = if nightly {
            self.requests
                .nightly_builds_for_variant_with(&variant, os, architecture)?
        } else {
            self.requests
                .releases_for_variant_with(&variant, os, architecture)?
        };
        debug!("{} releases after filtering", releases.len());

        if json {
            return print_json(&releases);
        }

        if releases.is_empty() {
            println!("No releases found for {variant}");
            return Ok(());
        }

        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
        table.set_header(vec![
            Cell::new("Release"),
            Cell::new("Published"),
            Cell::new("Binaries"),
            Cell::new("OS/Arch"),
        ]);

        for release in &releases {
            table.add_row(vec![
                Cell::new(&release.release_name),
                Cell::new(
                    release
                        .timestamp
                        .map(|t| t.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Cell::new(release.binaries.len()),
                Cell::new(platforms(release)),
            ]);
        }

        println!("{table}");
        println!(
            "{} release{} of {variant}",
            releases.len(),
            if releases.len() == 1 { "" } else { "s" }
        );
        Ok(())
    }
}

fn platform(binary: &Binary) -> String {
    format!(
        "{}/{}",
        binary.os.as_deref().unwrap_or("?"),
        binary.architecture.as_deref().unwrap_or("?")
    )
}

/// Distinct platforms of a release in order of first appearance.
fn platforms(release: &Release) -> String {
    let mut seen: Vec<String> = Vec::new();
    for binary in &release.binaries {
        let platform = platform(binary);
        if !seen.contains(&platform) {
            seen.push(platform);
        }
    }
    seen.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platforms_are_distinct_and_ordered() {
        let release: Release = serde_json::from_str(
            r#"{
                "release_name": "jdk8u262-b10",
                "binaries": [
                    {"os": "linux", "architecture": "x64", "image_type": "jdk", "binary_name": "a", "binary_link": "l"},
                    {"os": "linux", "architecture": "x64", "image_type": "jre", "binary_name": "b", "binary_link": "l"},
                    {"os": "mac", "binary_name": "c", "binary_link": "l"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(platforms(&release), "linux/x64, mac/?");
    }
}
