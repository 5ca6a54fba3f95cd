// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Secret scanning via the external `gitleaks` binary.
//!
//! Scanner output is captured and discarded: it may contain secrets.

use std::io::ErrorKind;
use std::process::{Command, Stdio};

use tracing::debug;

use super::{open_repo, skipped_outside_repo};
use crate::check::{Check, CheckContext, Outcome};
use crate::error::{Error, Result};
use crate::registry::ids;

/// Arguments passed to the scanner.
pub const GITLEAKS_ARGS: &[&str] = &["git", "--redact", "--no-banner"];

pub struct GitleaksScan {
    program: String,
}

impl Default for GitleaksScan {
    fn default() -> Self {
        Self::with_program("gitleaks")
    }
}

impl GitleaksScan {
    /// Use a different scanner executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run the scanner and interpret its exit status.
    fn scan(&self, ctx: &CheckContext) -> Result<Outcome> {
        debug!(program = %self.program, "running secret scanner");
        let output = Command::new(&self.program)
            .args(GITLEAKS_ARGS)
            .current_dir(ctx.root)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::scanner(format!("{} is not installed", self.program)),
                _ => Error::scanner(format!("could not run {}: {e}", self.program)),
            })?;

        match output.status.code() {
            Some(0) => Ok(Outcome::pass("gitleaks found no secrets")),
            Some(1) => Ok(Outcome::fail("gitleaks reported potential secret leaks").with_fix(
                "Run `gitleaks git --redact` locally, remove and rotate the secrets, then re-run.",
            )),
            Some(code) => Err(Error::scanner(format!(
                "{} exited with status {code}",
                self.program
            ))),
            None => Err(Error::scanner(format!(
                "{} was terminated by a signal",
                self.program
            ))),
        }
    }
}

impl Check for GitleaksScan {
    fn id(&self) -> &'static str {
        ids::GITLEAKS_SCAN
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        if open_repo(ctx.root).is_none() {
            return Ok(skipped_outside_repo());
        }
        match self.scan(ctx) {
            Err(Error::Scanner { message }) => Ok(Outcome::warn(message)
                .with_fix("Install gitleaks (https://github.com/gitleaks/gitleaks) or run it manually.")),
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "secrets_tests.rs"]
mod tests;
