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

use crate::api::{ApiRegistry, ApiRequests};
use crate::config::Settings;
use crate::error::Result;
use crate::rate_limit::RateLimit;
use colored::*;

pub struct RateLimitCommand {
    requests: Box<dyn ApiRequests>,
}

impl RateLimitCommand {
    pub fn new(settings: &Settings) -> Result<Self> {
        let requests = ApiRegistry::with_defaults().create_default(settings)?;
        Ok(Self { requests })
    }

    pub fn execute(&self) -> Result<()> {
        let limit = self.requests.rate_limit();
        println!(
            "API v{}: {}",
            self.requests.api_version(),
            describe(&limit)
        );
        Ok(())
    }
}

fn describe(limit: &RateLimit) -> String {
    if limit.is_unbounded() {
        format!("{} (no limit reported)", "✓".green().bold())
    } else if limit.is_exhausted() {
        format!(
            "{} no calls remaining, retry in {} seconds",
            "✗".red().bold(),
            limit.retry_after_seconds.to_string().cyan()
        )
    } else {
        format!(
            "{} {} calls remaining",
            "✓".green().bold(),
            limit.remaining.to_string().cyan()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_describe() {
        colored::control::set_override(false);

        assert_eq!(describe(&RateLimit::unbounded()), "✓ (no limit reported)");
        assert_eq!(
            describe(&RateLimit {
                remaining: 0,
                retry_after_seconds: 60
            }),
            "✗ no calls remaining, retry in 60 seconds"
        );
        assert_eq!(
            describe(&RateLimit {
                remaining: 12,
                retry_after_seconds: 3600
            }),
            "✓ 12 calls remaining"
        );

        colored::control::unset_override();
    }
}
