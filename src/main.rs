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

use adoptapi::commands::catalog::CatalogCommand;
use adoptapi::commands::rate_limit::RateLimitCommand;
use adoptapi::commands::releases::ReleasesCommand;
use adoptapi::commands::variants::VariantsCommand;
use adoptapi::config::Settings;
use adoptapi::error::{AdoptError, Result, format_error_with_color, get_exit_code};
use adoptapi::logging;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "adoptapi")]
#[command(author, version, about = "Query the AdoptOpenJDK release catalog", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// API version to use where either generation could answer
    #[arg(long, global = true, value_name = "VERSION")]
    api_version: Option<u32>,

    /// Root URL of the API
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Read settings from this file instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the release variants (e.g. openjdk8, openjdk11-openj9)
    Variants {
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the releases of a variant
    Releases {
        /// Variant name (e.g. "openjdk11")
        variant: String,
        /// Only keep binaries for this operating system
        #[arg(long)]
        os: Option<String>,
        /// Only keep binaries for this architecture
        #[arg(long)]
        arch: Option<String>,
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the nightly builds of a variant
    Nightly {
        /// Variant name (e.g. "openjdk11")
        variant: String,
        /// Only keep binaries for this operating system
        #[arg(long)]
        os: Option<String>,
        /// Only keep binaries for this architecture
        #[arg(long)]
        arch: Option<String>,
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    #[command(flatten)]
    Catalog(CatalogCommand),

    /// Show how many API calls remain before the server throttles
    RateLimit,
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(Some(path))?,
        None => Settings::load()?,
    };

    if let Some(api_version) = cli.api_version {
        settings = settings.with_api_version(api_version);
    }
    if let Some(base_url) = &cli.base_url {
        settings = settings.with_base_url(base_url);
    }
    settings.validate()?;
    Ok(settings)
}

fn report(error: &AdoptError) -> ! {
    eprint!(
        "{}",
        format_error_with_color(error, std::io::stderr().is_terminal())
    );
    std::process::exit(get_exit_code(error));
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => report(&e),
    };

    let result: Result<()> = (|| match cli.command {
        Commands::Variants { json } => {
            let command = VariantsCommand::new(&settings)?;
            command.execute(json)
        }
        Commands::Releases {
            variant,
            os,
            arch,
            json,
        } => {
            let command = ReleasesCommand::new(&settings)?;
            command.execute(&variant, false, os.as_deref(), arch.as_deref(), json)
        }
        Commands::Nightly {
            variant,
            os,
            arch,
            json,
        } => {
            let command = ReleasesCommand::new(&settings)?;
            command.execute(&variant, true, os.as_deref(), arch.as_deref(), json)
        }
        Commands::Catalog(command) => command.execute(&settings),
        Commands::RateLimit => {
            let command = RateLimitCommand::new(&settings)?;
            command.execute()
        }
    })();

    if let Err(e) = result {
        report(&e);
    }
}
