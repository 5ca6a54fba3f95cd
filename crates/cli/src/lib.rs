// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Repository publish-readiness and diff-aware hygiene checks.

pub mod aggregate;
pub mod check;
pub mod checks;
pub mod cli;
pub mod cmd_init;
pub mod color;
pub mod config;
pub mod diff;
pub mod discovery;
pub mod env;
pub mod error;
pub mod git;
pub mod output;
pub mod policy;
pub mod preflight;
pub mod registry;
pub mod runner;
pub mod severity;

pub use check::{Check, CheckContext, CheckResult, Outcome};
pub use cli::{CheckArgs, Cli, Command, InitArgs};
pub use error::{Error, ExitCode, Result};
pub use policy::EffectivePolicy;
pub use registry::CheckRegistry;
pub use severity::Severity;

#[cfg(test)]
pub mod test_utils;
