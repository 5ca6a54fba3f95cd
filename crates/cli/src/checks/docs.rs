// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Documentation file checks.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::check::{Check, CheckContext, Outcome};
use crate::error::{Error, Result};
use crate::registry::ids;

/// License file names, in lookup order.
const LICENSE_FILES: &[&str] = &["LICENSE", "LICENSE.md"];

#[allow(clippy::expect_used)]
static SPDX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)SPDX-License-Identifier:\s*([A-Za-z0-9.+\-]+(?:\s+(?:OR|AND|WITH)\s+[A-Za-z0-9.+\-]+)*)")
        .expect("valid regex")
});

/// Markers of well-known license texts, lowercase, with their SPDX ids.
const KNOWN_LICENSES: &[(&str, &str)] = &[
    ("mit license", "MIT"),
    ("apache license", "Apache-2.0"),
    ("mozilla public license", "MPL-2.0"),
    ("gnu lesser general public license", "LGPL-3.0-or-later"),
    ("gnu affero general public license", "AGPL-3.0-or-later"),
    ("gnu general public license", "GPL-3.0-or-later"),
    ("bsd", "BSD-3-Clause"),
];

fn find_license(root: &Path) -> Option<PathBuf> {
    LICENSE_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

pub struct ReadmePresent;

impl Check for ReadmePresent {
    fn id(&self) -> &'static str {
        ids::README_PRESENT
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        Ok(if ctx.root.join("README.md").is_file() {
            Outcome::pass("README.md present")
        } else {
            Outcome::fail("README.md is missing")
                .with_fix("Add a README.md covering purpose, usage and examples.")
        })
    }
}

pub struct LicensePresent;

impl Check for LicensePresent {
    fn id(&self) -> &'static str {
        ids::LICENSE_PRESENT
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        Ok(match find_license(ctx.root) {
            Some(path) => Outcome::pass(format!(
                "{} present",
                path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
            )),
            None => Outcome::warn("no LICENSE or LICENSE.md found")
                .with_fix("Add a LICENSE file so reuse terms are explicit."),
        })
    }
}

pub struct LicenseIdentifier;

impl Check for LicenseIdentifier {
    fn id(&self) -> &'static str {
        ids::LICENSE_IDENTIFIER
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        let Some(path) = find_license(ctx.root) else {
            return Ok(Outcome::warn("skipped: no license file to inspect")
                .with_fix("Add a LICENSE file with an SPDX identifier."));
        };
        let bytes = std::fs::read(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        Ok(classify_license(&String::from_utf8_lossy(&bytes)))
    }
}

/// Classify license text by SPDX tag, else by known wording.
pub fn classify_license(text: &str) -> Outcome {
    if let Some(caps) = SPDX_PATTERN.captures(text) {
        let id = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
        return Outcome::pass(format!("SPDX identifier found ({id})"));
    }

    let lower = text.to_lowercase();
    match KNOWN_LICENSES.iter().find(|(marker, _)| lower.contains(marker)) {
        Some((_, spdx)) => Outcome::warn(format!(
            "license text looks like {spdx} but declares no SPDX identifier"
        ))
        .with_fix(format!(
            "Add a line such as `SPDX-License-Identifier: {spdx}` for machine-readable licensing."
        )),
        None => Outcome::warn("license text not recognized and declares no SPDX identifier")
            .with_fix("Verify the license text and add an SPDX identifier."),
    }
}

pub struct SecurityPolicyPresent;

impl Check for SecurityPolicyPresent {
    fn id(&self) -> &'static str {
        ids::SECURITY_POLICY_PRESENT
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        Ok(if ctx.root.join("SECURITY.md").is_file() {
            Outcome::pass("SECURITY.md present")
        } else {
            Outcome::warn("SECURITY.md is missing")
                .with_fix("Add SECURITY.md describing how to report vulnerabilities.")
        })
    }
}

#[cfg(test)]
#[path = "docs_tests.rs"]
mod tests;
