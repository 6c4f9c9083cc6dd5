//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Oxchain.
//! The Oxchain project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! Command-line calculator built on Oxchain pipelines.
//!
//! Usage:
//!   oxcalc -add 1 2 -                  - Print 3
//!   oxcalc --dry-run -add -neg 1 2 -   - Print the call tree
//!   oxcalc --list                      - List operators
//!   oxcalc --show round                - Show one operator

use std::path::Path;

use anyhow::{bail, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};

use oxchain::app::OxCApp;
use oxchain::calc;
use oxchain::config::OxCConfig;
use oxchain::log::OxCLogger;
use oxchain::report;

fn command() -> Command {
    Command::new("oxcalc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Chain calculator operators on the command line")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list")
                .long("list")
                .help("List all available operators")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("show")
                .long("show")
                .value_name("OPERATOR")
                .help("Show the help information for the given operator"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Build the pipeline and print its call tree without running it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("JSON or YAML configuration file"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (TRACE, DEBUG, INFO, WARNING, ERROR)"),
        )
        .arg(
            Arg::new("pipeline")
                .help("Operator tokens, inputs and output destinations")
                .num_args(1..)
                .allow_hyphen_values(true)
                .trailing_var_arg(true),
        )
}

fn main() {
    let matches = command().get_matches();
    if let Err(e) = run(&matches) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => OxCConfig::from_file(Path::new(path))
            .with_context(|| format!("failed to load config `{}`", path))?,
        None => OxCConfig::default(),
    };
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.log.default_level = level.clone();
    }
    OxCLogger::init(config.log.clone());

    let mut app = OxCApp::new(config)?;
    calc::install(&mut app)?;

    if matches.get_flag("list") {
        print!("{}", app.list());
        return Ok(());
    }
    if let Some(name) = matches.get_one::<String>("show") {
        print!("{}", app.show(name)?);
        return Ok(());
    }

    let args: Vec<String> = matches
        .get_many::<String>("pipeline")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    if matches.get_flag("dry-run") {
        match app.dry_run(&args) {
            Ok(tree) => println!("{}", tree),
            Err(e) => bail!("{}", report::render_error(&e, &args)),
        }
        return Ok(());
    }

    if let Err(e) = app.run(&args) {
        bail!("{}", report::render_error(&e, &args));
    }
    Ok(())
}
