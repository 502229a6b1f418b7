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

pub mod catalog;
pub mod rate_limit;
pub mod releases;
pub mod variants;

use crate::error::{AdoptError, Result, format_error_chain};
use serde::Serialize;

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

/// Turn the problems reported while building a query into one error.
///
/// All but the last problem are printed here; the last is returned so the
/// caller reports it and exits with its code.
pub(crate) fn rejected(mut errors: Vec<AdoptError>) -> AdoptError {
    let last = errors.pop().unwrap_or_else(|| {
        AdoptError::invalid_parameter("query", "the query was rejected")
    });
    for error in &errors {
        eprintln!("{}", format_error_chain(error));
    }
    last
}
