// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Named profiles and rule packs.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::{DiffMode, LayerOrigin, PolicyLayer};
use crate::registry::ids;
use crate::severity::{ConfiguredSeverity, Severity};

/// Run-context preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// Local loop; skips the secret scanner.
    Quick,
    #[default]
    Full,
    /// Strict, with pull request diff detection.
    Ci,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Quick, Profile::Full, Profile::Ci];

    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Quick => "quick",
            Profile::Full => "full",
            Profile::Ci => "ci",
        }
    }

    pub fn layer(self) -> PolicyLayer {
        let mut layer = PolicyLayer::new(LayerOrigin::Profile(self.as_str()));
        match self {
            Profile::Quick => {
                layer.gitleaks = Some(false);
            }
            Profile::Full => {}
            Profile::Ci => {
                layer.strict = Some(true);
                layer.gitleaks = Some(true);
                layer.diff_mode = Some(DiffMode::Pr);
            }
        }
        layer
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profile::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown profile '{s}' (expected one of: quick, full, ci)"))
    }
}

/// Repository-archetype preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RulePack {
    OssLibrary,
    InternalService,
    CliTool,
}

impl RulePack {
    pub const ALL: [RulePack; 3] = [
        RulePack::OssLibrary,
        RulePack::InternalService,
        RulePack::CliTool,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RulePack::OssLibrary => "oss-library",
            RulePack::InternalService => "internal-service",
            RulePack::CliTool => "cli-tool",
        }
    }

    pub fn layer(self) -> PolicyLayer {
        use Severity::{Fail, Pass, Warn};

        let (strict, overrides): (bool, &[(&str, Severity)]) = match self {
            RulePack::OssLibrary => (
                true,
                &[
                    (ids::LICENSE_PRESENT, Fail),
                    (ids::LICENSE_IDENTIFIER, Fail),
                    (ids::SECURITY_POLICY_PRESENT, Fail),
                ],
            ),
            RulePack::InternalService => (
                true,
                &[
                    (ids::REMOTE_ORIGIN, Fail),
                    (ids::LICENSE_PRESENT, Pass),
                    (ids::LICENSE_IDENTIFIER, Pass),
                    (ids::SECURITY_POLICY_PRESENT, Warn),
                ],
            ),
            RulePack::CliTool => (
                false,
                &[
                    (ids::LICENSE_PRESENT, Fail),
                    (ids::LICENSE_IDENTIFIER, Warn),
                    (ids::SECURITY_POLICY_PRESENT, Warn),
                ],
            ),
        };

        let mut layer = PolicyLayer::new(LayerOrigin::RulePack(self.as_str()));
        layer.strict = Some(strict);
        layer.severity_overrides = overrides
            .iter()
            .map(|(id, s)| (id.to_string(), ConfiguredSeverity::Level(*s)))
            .collect();
        layer
    }
}

impl fmt::Display for RulePack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RulePack {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RulePack::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown rule pack '{s}' (expected one of: oss-library, internal-service, cli-tool)"
                )
            })
    }
}

#[cfg(test)]
#[path = "presets_tests.rs"]
mod tests;
