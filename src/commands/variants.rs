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

pub struct VariantsCommand {
    requests: V1Requests,
}

impl VariantsCommand {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            requests: V1Requests::open(settings)?,
        })
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        let variants = self.requests.variants()?;

        if json {
            return print_json(&variants);
        }

        if variants.is_empty() {
            println!("No variants available");
            return Ok(());
        }
        for variant in &variants {
            println!("{variant}");
        }
        Ok(())
    }
}
