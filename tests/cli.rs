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

use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

fn adoptapi(temp_dir: &TempDir) -> Command {
    let mut command = Command::cargo_bin("adoptapi").unwrap();
    command
        .env_remove("ADOPTAPI_API_VERSION")
        .env_remove("ADOPTAPI_BASE_URL")
        .env_remove("ADOPTAPI_TIMEOUT_SECS")
        .env_remove("ADOPTAPI_USER_AGENT")
        .arg("--config")
        .arg(temp_dir.path().join("config.toml"));
    command
}

#[test]
fn test_help_lists_subcommands() {
    let temp_dir = TempDir::new().unwrap();
    adoptapi(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("variants"))
        .stdout(contains("release-names"))
        .stdout(contains("binary-latest"))
        .stdout(contains("rate-limit"));
}

#[test]
fn test_negative_page_is_rejected_without_network() {
    let temp_dir = TempDir::new().unwrap();
    adoptapi(&temp_dir)
        .args(["--base-url", "http://127.0.0.1:1", "release-names", "--page", "-1"])
        .assert()
        .code(2)
        .stderr(contains("Invalid parameter 'page'"));
}

#[test]
fn test_every_invalid_parameter_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    adoptapi(&temp_dir)
        .args([
            "--base-url",
            "http://127.0.0.1:1",
            "assets",
            "11",
            "--page",
            "-1",
            "--page-size",
            "-1",
            "--os",
            "beos",
        ])
        .assert()
        .code(2)
        .stderr(contains("'page'"))
        .stderr(contains("'page_size'"))
        .stderr(contains("'os'"));
}

#[test]
fn test_unreachable_server_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    adoptapi(&temp_dir)
        .args(["--base-url", "http://127.0.0.1:1", "rate-limit"])
        .assert()
        .code(20);
}

#[test]
fn test_invalid_config_file_value() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        "base_url = \"ftp://example.com\"\n",
    )
    .unwrap();

    adoptapi(&temp_dir)
        .arg("variants")
        .assert()
        .code(2)
        .stderr(contains("base_url"));
}

#[test]
fn test_unsupported_api_version() {
    let temp_dir = TempDir::new().unwrap();
    adoptapi(&temp_dir)
        .args(["--api-version", "2", "rate-limit"])
        .assert()
        .code(2)
        .stderr(contains("API version 2 is not supported"));
}
