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

use crate::error::AdoptError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a AdoptError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a AdoptError) -> Self {
        let (suggestion, details) = match error {
            AdoptError::RateLimitExceeded {
                retry_after_seconds,
            } => {
                let suggestion = Some(format!(
                    "Wait {retry_after_seconds} seconds before calling the API again."
                ));
                let details = Some(
                    "The server reported that no calls remain in the current rate-limit window."
                        .to_string(),
                );
                (suggestion, details)
            }
            AdoptError::TransportFailure { source, .. } => {
                let suggestion = Some(
                    "Check your internet connection and proxy settings, or raise the timeout \
                     with ADOPTAPI_TIMEOUT_SECS."
                        .to_string(),
                );
                let details = source.as_ref().map(|cause| format!("Caused by: {cause}"));
                (suggestion, details)
            }
            AdoptError::MalformedResponse { target, .. } => {
                let suggestion = Some(
                    "The server may have changed its response format. Try a different API \
                     version with --api-version."
                        .to_string(),
                );
                let details = Some(format!("Unreadable response body from {target}"));
                (suggestion, details)
            }
            AdoptError::InvalidParameter { parameter, .. } => {
                let suggestion = Some(format!(
                    "Correct the value given for '{parameter}' and try again."
                ));
                (suggestion, None)
            }
            AdoptError::UnsupportedApiVersion(_) => {
                let suggestion = Some("Supported API versions: 1, 3.".to_string());
                (suggestion, None)
            }
            AdoptError::ConfigError(msg) => {
                let suggestion = Some(
                    "Check config.toml and the ADOPTAPI_* environment variables.".to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            AdoptError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    std::io::ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    _ => None,
                };
                let details = Some(format!("I/O error: {io_err}"));
                (suggestion, details)
            }
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
