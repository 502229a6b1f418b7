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

//! Client settings.
//!
//! Values are layered: built-in defaults, then `config.toml` in the user's
//! configuration directory (or an explicit file), then `ADOPTAPI_*`
//! environment variables.

use crate::error::{AdoptError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.adoptopenjdk.net";
pub const DEFAULT_API_VERSION: u32 = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONFIG_DIR_NAME: &str = "adoptapi";
const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "ADOPTAPI";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub api_version: u32,
    pub base_url: String,
    pub timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path().as_deref())
    }

    /// Load settings from `config_file` (if it exists) and the environment.
    pub fn load_from(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("api_version", i64::from(DEFAULT_API_VERSION))?
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?;

        if let Some(path) = config_file {
            log::debug!("Reading settings from {path:?}");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn with_api_version(mut self, api_version: u32) -> Self {
        self.api_version = api_version;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The User-Agent to send, honouring an explicit override.
    pub fn user_agent_for(&self, api_version: u32) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| crate::user_agent::api_client(api_version))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(AdoptError::ConfigError(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(AdoptError::ConfigError(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn clear_env() {
        // SAFETY: tests touching the environment are serialised
        unsafe {
            env::remove_var("ADOPTAPI_API_VERSION");
            env::remove_var("ADOPTAPI_BASE_URL");
            env::remove_var("ADOPTAPI_TIMEOUT_SECS");
            env::remove_var("ADOPTAPI_USER_AGENT");
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from(Some(&temp_dir.path().join("missing.toml"))).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    #[serial]
    fn test_file_overrides_defaults() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
api_version = 1
base_url = "https://mirror.example.com"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.api_version, 1);
        assert_eq!(settings.base_url, "https://mirror.example.com");
        assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "timeout_secs = 10\n").unwrap();

        unsafe {
            env::set_var("ADOPTAPI_TIMEOUT_SECS", "90");
            env::set_var("ADOPTAPI_USER_AGENT", "custom-agent/1.0");
        }
        let settings = Settings::load_from(Some(&path)).unwrap();
        clear_env();

        assert_eq!(settings.timeout_secs, 90);
        assert_eq!(settings.user_agent_for(3), "custom-agent/1.0");
    }

    #[test]
    #[serial]
    fn test_invalid_base_url_rejected() {
        clear_env();
        unsafe {
            env::set_var("ADOPTAPI_BASE_URL", "ftp://example.com");
        }
        let result = Settings::load_from(None);
        clear_env();

        assert!(matches!(result, Err(AdoptError::ConfigError(_))));
    }

    #[test]
    fn test_builder_methods() {
        let settings = Settings::default()
            .with_api_version(1)
            .with_base_url("http://localhost:8080")
            .with_timeout_secs(5);
        assert_eq!(settings.api_version, 1);
        assert_eq!(settings.base_url, "http://localhost:8080");
        assert_eq!(settings.timeout(), Duration::from_secs(5));
        assert_eq!(
            settings.user_agent_for(1),
            crate::user_agent::api_client(1)
        );
    }
}
