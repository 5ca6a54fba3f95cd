// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check severities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Outcome severity of a check, ordered `pass < warn < fail`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Pass,
    Warn,
    Fail,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Pass => "pass",
            Severity::Warn => "warn",
            Severity::Fail => "fail",
        }
    }

    /// Upper-case label used in human output.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Pass => "PASS",
            Severity::Warn => "WARN",
            Severity::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity as written in configuration, including `disabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfiguredSeverity {
    Level(Severity),
    /// Exclude the check entirely.
    Disabled,
}

impl ConfiguredSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfiguredSeverity::Level(s) => s.as_str(),
            ConfiguredSeverity::Disabled => "disabled",
        }
    }
}

impl From<Severity> for ConfiguredSeverity {
    fn from(s: Severity) -> Self {
        ConfiguredSeverity::Level(s)
    }
}

impl FromStr for ConfiguredSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass" => Ok(Severity::Pass.into()),
            "warn" => Ok(Severity::Warn.into()),
            "fail" => Ok(Severity::Fail.into()),
            "disabled" => Ok(ConfiguredSeverity::Disabled),
            other => Err(format!(
                "unknown severity '{other}' (expected one of: pass, warn, fail, disabled)"
            )),
        }
    }
}

impl fmt::Display for ConfiguredSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "severity_tests.rs"]
mod tests;
