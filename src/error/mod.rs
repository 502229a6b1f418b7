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

mod context;
mod exit_codes;
mod format;
#[cfg(test)]
mod tests;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::{format_error_chain, format_error_with_color};

use thiserror::Error;

pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum AdoptError {
    #[error("API rate limit exceeded; retry in {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: u32 },

    #[error("Transport failure: {message}")]
    TransportFailure {
        message: String,
        #[source]
        source: Option<BoxedCause>,
    },

    #[error("Malformed response from {target}: {message}")]
    MalformedResponse { target: String, message: String },

    #[error("Invalid parameter '{parameter}': {message}")]
    InvalidParameter {
        parameter: &'static str,
        message: String,
    },

    #[error("API version {0} is not supported")]
    UnsupportedApiVersion(u32),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AdoptError {
    pub fn transport(message: impl Into<String>) -> Self {
        AdoptError::TransportFailure {
            message: message.into(),
            source: None,
        }
    }

    pub fn transport_with_source(
        message: impl Into<String>,
        source: impl Into<BoxedCause>,
    ) -> Self {
        AdoptError::TransportFailure {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn malformed(target: impl Into<String>, message: impl Into<String>) -> Self {
        AdoptError::MalformedResponse {
            target: target.into(),
            message: message.into(),
        }
    }

    pub fn invalid_parameter(parameter: &'static str, message: impl Into<String>) -> Self {
        AdoptError::InvalidParameter {
            parameter,
            message: message.into(),
        }
    }

    /// Seconds the caller should wait before calling again, if throttled.
    pub fn retry_after(&self) -> Option<u32> {
        match self {
            AdoptError::RateLimitExceeded {
                retry_after_seconds,
            } => Some(*retry_after_seconds),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for AdoptError {
    fn from(error: config::ConfigError) -> Self {
        AdoptError::ConfigError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AdoptError>;
