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

//! Subcommands backed by the version 3 API.
//!
//! Each query is built before the API is contacted, so parameter errors are
//! reported without any network traffic.

use super::{print_json, rejected};
use crate::api::v3::{
    AssetsForLatestQuery, AssetsForReleaseQuery, AvailableReleasesQuery, BinaryCoordinatesQuery,
    BinaryForLatestQuery, BinaryForReleaseQuery, ReleaseInfoQuery, ReleaseNamesQuery,
    ReleaseVersionsQuery, V3Request, V3Requests, collect_errors,
};
use crate::config::Settings;
use crate::error::{AdoptError, Result};
use crate::models::v3::{LatestAsset, V3Binary, V3Release};
use clap::{Args, Subcommand};
use colored::*;
use comfy_table::{Cell, Table};

#[derive(Args, Debug, Clone)]
pub struct InfoArgs {
    /// Page to fetch, starting at 0
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    page: i64,
    /// Entries per page
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    page_size: i64,
    /// Release type (ga, ea)
    #[arg(long)]
    release_type: Option<String>,
    /// Sort order (asc, desc)
    #[arg(long)]
    sort_order: Option<String>,
    /// Vendor (e.g. adoptopenjdk)
    #[arg(long)]
    vendor: Option<String>,
    /// Version range, e.g. "[11,12)"
    #[arg(long)]
    version_range: Option<String>,
}

impl InfoArgs {
    fn query(&self) -> ReleaseInfoQuery {
        ReleaseInfoQuery {
            page: self.page,
            page_size: self.page_size,
            release_kind: self.release_type.clone(),
            sort_order: self.sort_order.clone(),
            vendor: self.vendor.clone(),
            version_range: self.version_range.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CoordinateArgs {
    /// Operating system (e.g. linux, windows, mac)
    #[arg(long)]
    os: Option<String>,
    /// Architecture (e.g. x64, aarch64)
    #[arg(long)]
    arch: Option<String>,
    /// Image type (jdk, jre, testimage, debugimage, staticlibs)
    #[arg(long, default_value = "jdk")]
    image_type: String,
    /// JVM implementation (hotspot, openj9)
    #[arg(long, default_value = "hotspot")]
    jvm_impl: String,
    /// Heap size (normal, large)
    #[arg(long, default_value = "normal")]
    heap_size: String,
    /// Vendor
    #[arg(long, default_value = "adoptopenjdk")]
    vendor: String,
    /// Project (e.g. jdk, valhalla)
    #[arg(long)]
    project: Option<String>,
}

impl CoordinateArgs {
    fn into_query(self) -> (BinaryCoordinatesQuery, Option<String>) {
        let coordinates = BinaryCoordinatesQuery {
            operating_system: self.os,
            architecture: self.arch,
            image_kind: Some(self.image_type),
            jvm_implementation: Some(self.jvm_impl),
            heap_size: Some(self.heap_size),
            vendor: Some(self.vendor),
        };
        (coordinates, self.project)
    }
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// Show the feature releases known to the API
    AvailableReleases {
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
    /// List release names
    ReleaseNames {
        #[command(flatten)]
        info: InfoArgs,
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
    /// List release versions
    ReleaseVersions {
        #[command(flatten)]
        info: InfoArgs,
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the assets of a feature release
    Assets {
        /// Feature version (e.g. 11)
        #[arg(allow_negative_numbers = true)]
        version: i64,
        /// Release type (ga, ea)
        #[arg(long, default_value = "ga")]
        release_type: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        page: i64,
        #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
        page_size: i64,
        #[arg(long)]
        os: Option<String>,
        #[arg(long)]
        arch: Option<String>,
        #[arg(long)]
        image_type: Option<String>,
        #[arg(long)]
        jvm_impl: Option<String>,
        #[arg(long)]
        heap_size: Option<String>,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        sort_order: Option<String>,
        #[arg(long)]
        vendor: Option<String>,
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the latest assets of a feature version
    Latest {
        /// Feature version (e.g. 11)
        #[arg(allow_negative_numbers = true)]
        version: i64,
        /// JVM implementation (hotspot, openj9)
        #[arg(long, default_value = "hotspot")]
        jvm_impl: String,
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve the download link of the latest binary
    BinaryLatest {
        /// Feature version (e.g. 11)
        #[arg(allow_negative_numbers = true)]
        version: i64,
        /// Release type (ga, ea)
        #[arg(long, default_value = "ga")]
        release_type: String,
        #[command(flatten)]
        coordinates: CoordinateArgs,
    },
    /// Resolve the download link of a binary of a named release
    BinaryRelease {
        /// Release name (e.g. jdk8u262-b10)
        release_name: String,
        #[command(flatten)]
        coordinates: CoordinateArgs,
    },
}

impl CatalogCommand {
    pub fn execute(self, settings: &Settings) -> Result<()> {
        match self {
            CatalogCommand::AvailableReleases { json } => {
                let request = build(|c| AvailableReleasesQuery::new().build(c))?;
                let available = open(settings)?.execute(&request)?;
                if json {
                    return print_json(&available);
                }
                println!(
                    "Available releases: {}",
                    join(&available.available_releases)
                );
                println!(
                    "LTS releases: {}",
                    join(&available.available_lts_releases)
                );
                println!(
                    "Most recent LTS: {}",
                    available.most_recent_lts.to_string().cyan()
                );
                println!(
                    "Most recent feature release: {}",
                    available.most_recent_feature_release.to_string().cyan()
                );
                Ok(())
            }
            CatalogCommand::ReleaseNames { info, json } => {
                let request = build(|c| ReleaseNamesQuery(info.query()).build(c))?;
                let names = open(settings)?.execute(&request)?;
                if json {
                    return print_json(&names);
                }
                for name in &names.releases {
                    println!("{name}");
                }
                Ok(())
            }
            CatalogCommand::ReleaseVersions { info, json } => {
                let request = build(|c| ReleaseVersionsQuery(info.query()).build(c))?;
                let versions = open(settings)?.execute(&request)?;
                if json {
                    return print_json(&versions);
                }
                let mut table = Table::new();
                table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
                table.set_header(vec![Cell::new("Semver"), Cell::new("OpenJDK version")]);
                for version in &versions.versions {
                    table.add_row(vec![
                        Cell::new(&version.semver),
                        Cell::new(&version.openjdk_version),
                    ]);
                }
                println!("{table}");
                Ok(())
            }
            CatalogCommand::Assets {
                version,
                release_type,
                page,
                page_size,
                os,
                arch,
                image_type,
                jvm_impl,
                heap_size,
                project,
                sort_order,
                vendor,
                json,
            } => {
                let query = AssetsForReleaseQuery {
                    feature_version: version,
                    release_kind: release_type,
                    page,
                    page_size,
                    architecture: arch,
                    heap_size,
                    image_kind: image_type,
                    jvm_implementation: jvm_impl,
                    operating_system: os,
                    project,
                    sort_order,
                    vendor,
                };
                let request = build(|c| query.build(c))?;
                let releases = open(settings)?.execute(&request)?;
                if json {
                    return print_json(&releases);
                }
                print_assets(&releases);
                Ok(())
            }
            CatalogCommand::Latest {
                version,
                jvm_impl,
                json,
            } => {
                let request = build(|c| AssetsForLatestQuery::new(version, jvm_impl).build(c))?;
                let assets = open(settings)?.execute(&request)?;
                if json {
                    return print_json(&assets);
                }
                print_latest(&assets);
                Ok(())
            }
            CatalogCommand::BinaryLatest {
                version,
                release_type,
                coordinates,
            } => {
                let (coordinates, project) = coordinates.into_query();
                let query = BinaryForLatestQuery {
                    feature_version: version,
                    release_kind: release_type,
                    coordinates,
                    project,
                };
                resolve_binary(settings, &build(|c| query.build(c))?)
            }
            CatalogCommand::BinaryRelease {
                release_name,
                coordinates,
            } => {
                let (coordinates, project) = coordinates.into_query();
                let query = BinaryForReleaseQuery {
                    release_name,
                    coordinates,
                    project,
                };
                resolve_binary(settings, &build(|c| query.build(c))?)
            }
        }
    }
}

fn build<T, F>(build: F) -> Result<T>
where
    F: FnOnce(&mut dyn FnMut(AdoptError)) -> Option<T>,
{
    collect_errors(build).map_err(rejected)
}

fn open(settings: &Settings) -> Result<V3Requests> {
    V3Requests::open(settings)
}

fn resolve_binary<R>(settings: &Settings, request: &R) -> Result<()>
where
    R: V3Request<Output = crate::models::v3::BinaryLocation>,
{
    let location = open(settings)?.execute(request)?;
    println!("{}", location.uri);
    Ok(())
}

fn join(versions: &[u32]) -> String {
    versions
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_binary(binary: &V3Binary) -> [String; 4] {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    [
        format!("{}/{}", field(&binary.os), field(&binary.architecture)),
        field(&binary.image_type),
        field(&binary.jvm_impl),
        binary
            .package
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "-".to_string()),
    ]
}

fn print_assets(releases: &[V3Release]) {
    if releases.is_empty() {
        println!("No assets found");
        return;
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec![
        Cell::new("Release"),
        Cell::new("OS/Arch"),
        Cell::new("Image"),
        Cell::new("JVM"),
        Cell::new("Package"),
    ]);
    for release in releases {
        for binary in &release.binaries {
            let [platform, image, jvm, package] = describe_binary(binary);
            table.add_row(vec![
                Cell::new(&release.release_name),
                Cell::new(platform),
                Cell::new(image),
                Cell::new(jvm),
                Cell::new(package),
            ]);
        }
    }
    println!("{table}");
}

fn print_latest(assets: &[LatestAsset]) {
    if assets.is_empty() {
        println!("No assets found");
        return;
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec![
        Cell::new("Release"),
        Cell::new("OS/Arch"),
        Cell::new("Image"),
        Cell::new("JVM"),
        Cell::new("Package"),
    ]);
    for asset in assets {
        let [platform, image, jvm, package] = describe_binary(&asset.binary);
        table.add_row(vec![
            Cell::new(&asset.release_name),
            Cell::new(platform),
            Cell::new(image),
            Cell::new(jvm),
            Cell::new(package),
        ]);
    }
    println!("{table}");
}
