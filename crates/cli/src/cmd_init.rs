// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Implementation of the `repo-preflight init` command.

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::InitArgs;
use crate::config::CONFIG_FILE_NAME;
use crate::error::{Error, ExitCode};
use crate::policy::{Profile, RulePack, template};

/// Write a config template into `args.path`.
///
/// Returns the written path, or `None` when the file exists and
/// `--force` was not given.
pub fn write_template(args: &InitArgs) -> Result<Option<PathBuf>> {
    let profile = match &args.profile {
        Some(name) => name.parse::<Profile>().map_err(Error::Argument)?,
        None => Profile::default(),
    };
    let rule_pack = args
        .rule_pack
        .as_deref()
        .map(str::parse::<RulePack>)
        .transpose()
        .map_err(Error::Argument)?;

    if !args.path.is_dir() {
        return Err(Error::Argument(format!(
            "path is not a directory: {}",
            args.path.display()
        ))
        .into());
    }

    let config_path = args.path.join(CONFIG_FILE_NAME);
    if config_path.exists() && !args.force {
        return Ok(None);
    }

    std::fs::write(&config_path, template::render(profile, rule_pack)).map_err(|source| {
        Error::Io {
            path: config_path.clone(),
            source,
        }
    })?;
    Ok(Some(config_path))
}

/// Run the `init` command.
pub fn run(args: &InitArgs) -> Result<ExitCode> {
    match write_template(args)? {
        Some(path) => {
            println!("Created {}", path.display());
            Ok(ExitCode::Success)
        }
        None => {
            eprintln!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
            Ok(ExitCode::ConfigError)
        }
    }
}

#[cfg(test)]
#[path = "cmd_init_tests.rs"]
mod tests;
