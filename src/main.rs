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

use clap::{Parser, Subcommand};
use gover::commands::info::InfoCommand;
use gover::commands::install::InstallCommand;
use gover::commands::list::ListCommand;
use gover::commands::set::SetCommand;
use gover::commands::uninstall::UninstallCommand;
use gover::commands::use_version::UseCommand;
use gover::config::GoverConfig;
use gover::env;
use gover::error::{GoverError, Result, format_error_chain, get_exit_code};
use gover::logging;
use gover::platform::Platform;

#[derive(Parser)]
#[command(name = "gover")]
#[command(author, version, about = "Go toolchain version management tool", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable progress indicators
    #[arg(long, global = true)]
    no_progress: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all go versions
    #[command(visible_alias = "ls")]
    List,

    /// Install go versions
    #[command(visible_alias = "i")]
    Install {
        /// Versions to install (e.g., "1.17", "1.9.2")
        #[arg(required = true)]
        versions: Vec<String>,
    },

    /// Uninstall go versions
    #[command(visible_alias = "u", alias = "remove")]
    Uninstall {
        /// Versions to uninstall
        #[arg(required = true)]
        versions: Vec<String>,
    },

    /// Set the active go version in the persistent environment
    Set {
        /// Version to activate (e.g., "1.9.2")
        version: String,
    },

    /// Write a source-able script selecting a go version for this shell
    Use {
        /// Version to select (e.g., "1.9.2")
        version: String,
    },

    /// Show the go environment
    Info,
}

fn exit_with(error: &GoverError) -> ! {
    eprintln!("{}", format_error_chain(error));
    std::process::exit(get_exit_code(error));
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);

    let platform = match Platform::current() {
        Ok(platform) => platform,
        Err(e) => exit_with(&e),
    };

    // Load configuration once at startup
    let config = match GoverConfig::load(platform) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let result: Result<()> = (|| {
        env::ensure_initialized(platform)?;

        match cli.command {
            Commands::List => ListCommand::new(&config, platform)?.execute(),
            Commands::Install { versions } => {
                InstallCommand::new(&config, platform, cli.no_progress)?.execute(&versions)
            }
            Commands::Uninstall { versions } => {
                UninstallCommand::new(&config, platform)?.execute(&versions)
            }
            Commands::Set { version } => {
                SetCommand::new(&config, platform, cli.no_progress)?.execute(&version)
            }
            Commands::Use { version } => {
                UseCommand::new(&config, platform, cli.no_progress)?.execute(&version)
            }
            Commands::Info => InfoCommand::new(&config, platform)?.execute(),
        }
    })();

    if let Err(e) = result {
        exit_with(&e);
    }
}
