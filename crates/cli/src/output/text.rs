// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable formats.
//!
//! Default text:
//! ```text
//! repo-preflight: WARN (0 fail, 1 warn, 17 pass)
//! path: /work/repo
//! ...
//! - [WARN] remote_origin: no origin remote
//!   fix: git remote add origin <url>
//! ```
//!
//! Compact prints only non-pass results and one summary line.

use std::io::{self, Write};

use termcolor::WriteColor;

use super::Report;
use crate::color::{scheme, write_status};
use crate::severity::Severity;

pub fn write_text<W: WriteColor>(out: &mut W, report: &Report) -> io::Result<()> {
    let policy = report.policy;
    let summary = report.summary;

    out.set_color(&scheme::emphasis())?;
    write!(out, "repo-preflight:")?;
    out.reset()?;
    write!(out, " ")?;
    let verdict = report.verdict();
    write_status(out, verdict, verdict.label())?;
    writeln!(
        out,
        " ({} fail, {} warn, {} pass)",
        summary.fail, summary.warn, summary.pass
    )?;

    writeln!(out, "path: {}", report.path.display())?;
    writeln!(out, "profile: {}", policy.profile)?;
    match policy.rule_pack {
        Some(pack) => writeln!(out, "rule pack: {pack}")?,
        None => writeln!(out, "rule pack: none")?,
    }
    writeln!(out, "mode: {}", if policy.strict { "strict" } else { "default" })?;
    if let Some(refs) = report.diff {
        writeln!(
            out,
            "diff: {}..{} ({})",
            refs.base_ref,
            refs.target_ref,
            refs.source.as_str()
        )?;
    }
    writeln!(out, "checks: {}", policy.enabled_check_ids.join(", "))?;

    for result in report.results {
        write!(out, "- [")?;
        write_status(out, result.status, result.status.label())?;
        write!(out, "] ")?;
        out.set_color(&scheme::emphasis())?;
        write!(out, "{}", result.id)?;
        out.reset()?;
        writeln!(out, ": {}", result.message)?;

        if let Some(fix) = &result.fix
            && result.status != Severity::Pass
        {
            write!(out, "  fix: ")?;
            out.set_color(&scheme::fix())?;
            write!(out, "{fix}")?;
            out.reset()?;
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn write_compact<W: WriteColor>(out: &mut W, report: &Report) -> io::Result<()> {
    for result in report.results.iter().filter(|r| r.status != Severity::Pass) {
        write_status(out, result.status, result.status.label())?;
        writeln!(out, " {}: {}", result.id, result.message)?;
    }
    let summary = report.summary;
    writeln!(
        out,
        "{} {} fail, {} warn, {} pass (exit {})",
        report.verdict().label(),
        summary.fail,
        summary.warn,
        summary.pass,
        report.exit_code.code()
    )
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
