// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for check results.
//!
//! Every format renders the same [`Report`]; the exit code inside it comes
//! from the aggregator and is identical across formats.

pub mod json;
pub mod markdown;
pub mod sarif;
pub mod text;

use std::io::Write;
use std::path::Path;

use termcolor::WriteColor;

use crate::aggregate::Summary;
use crate::check::CheckResult;
use crate::diff::DiffRefs;
use crate::error::{Error, ExitCode, Result};
use crate::policy::EffectivePolicy;
use crate::registry::CheckRegistry;
use crate::severity::Severity;

/// Output format for `check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Sarif,
    Compact,
    Markdown,
}

/// Everything a renderer needs about one run.
pub struct Report<'a> {
    pub path: &'a Path,
    pub config_path: Option<&'a Path>,
    pub registry: &'a CheckRegistry,
    pub policy: &'a EffectivePolicy,
    /// Resolved diff range, when one was available.
    pub diff: Option<&'a DiffRefs>,
    pub results: &'a [CheckResult],
    pub summary: Summary,
    pub exit_code: ExitCode,
}

impl Report<'_> {
    /// Headline status, derived from the exit code so strict warnings read FAIL.
    pub fn verdict(&self) -> Severity {
        match self.exit_code {
            ExitCode::Success => Severity::Pass,
            ExitCode::Warnings => Severity::Warn,
            _ => Severity::Fail,
        }
    }
}

/// Render `report` in `format` to `out`.
pub fn write_report<W: WriteColor>(out: &mut W, format: OutputFormat, report: &Report) -> Result<()> {
    let written = match format {
        OutputFormat::Text => text::write_text(out, report),
        OutputFormat::Compact => text::write_compact(out, report),
        OutputFormat::Json => writeln!(out, "{}", json::render(report)?),
        OutputFormat::Sarif => writeln!(out, "{}", sarif::render(report)?),
        OutputFormat::Markdown => write!(out, "{}", markdown::results_table(report)),
    };
    written.map_err(|source| Error::Io {
        path: "<stdout>".into(),
        source,
    })
}
