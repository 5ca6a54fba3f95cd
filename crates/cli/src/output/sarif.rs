// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SARIF 2.1.0 output for code scanning dashboards.
//!
//! Every enabled check becomes a rule; only non-pass results become
//! SARIF results. Findings are repository-level, so results carry no
//! physical location.

use serde::Serialize;

use super::Report;
use crate::error::{Error, Result};
use crate::policy::DiffMode;
use crate::severity::Severity;

const SARIF_SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";
const TOOL_NAME: &str = "repo-preflight";
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
struct SarifLog<'a> {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<Run<'a>>,
}

#[derive(Serialize)]
struct Run<'a> {
    tool: Tool,
    results: Vec<SarifResult<'a>>,
    properties: RunProperties<'a>,
}

#[derive(Serialize)]
struct Tool {
    driver: ToolDriver,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolDriver {
    name: &'static str,
    version: &'static str,
    rules: Vec<ReportingDescriptor>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportingDescriptor {
    id: &'static str,
    short_description: Message<&'static str>,
    default_configuration: ReportingConfiguration,
}

#[derive(Serialize)]
struct ReportingConfiguration {
    level: &'static str,
}

#[derive(Serialize)]
struct Message<T> {
    text: T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult<'a> {
    rule_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    rule_index: Option<usize>,
    level: &'static str,
    message: Message<String>,
}

#[derive(Serialize)]
struct RunProperties<'a> {
    profile: &'static str,
    strict: bool,
    diff_mode: DiffMode,
    pr_base_ref: Option<&'a str>,
    diff_base: Option<&'a str>,
    diff_target: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved_base: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved_target: Option<&'a str>,
    exit_code: i32,
}

/// SARIF level for a severity.
fn level(severity: Severity) -> &'static str {
    match severity {
        Severity::Fail => "error",
        Severity::Warn => "warning",
        Severity::Pass => "none",
    }
}

/// Render the report as a SARIF log.
pub fn render(report: &Report) -> Result<String> {
    let policy = report.policy;

    let rules: Vec<ReportingDescriptor> = report
        .registry
        .iter()
        .filter(|def| policy.is_enabled(def.id))
        .map(|def| ReportingDescriptor {
            id: def.id,
            short_description: Message {
                text: def.description,
            },
            default_configuration: ReportingConfiguration {
                level: level(def.default_severity),
            },
        })
        .collect();

    let results = report
        .results
        .iter()
        .filter(|r| r.status != Severity::Pass)
        .map(|r| {
            let text = match &r.fix {
                Some(fix) => format!("{} (fix: {fix})", r.message),
                None => r.message.clone(),
            };
            SarifResult {
                rule_id: &r.id,
                rule_index: rules.iter().position(|rule| rule.id == r.id),
                level: level(r.status),
                message: Message { text },
            }
        })
        .collect();

    let log = SarifLog {
        schema: SARIF_SCHEMA,
        version: SARIF_VERSION,
        runs: vec![Run {
            tool: Tool {
                driver: ToolDriver {
                    name: TOOL_NAME,
                    version: TOOL_VERSION,
                    rules,
                },
            },
            results,
            properties: RunProperties {
                profile: policy.profile.as_str(),
                strict: policy.strict,
                diff_mode: policy.diff_mode,
                pr_base_ref: policy.pr_base_ref.as_deref(),
                diff_base: policy.diff_base.as_deref(),
                diff_target: policy.diff_target.as_deref(),
                resolved_base: report.diff.map(|d| d.base_commit.as_str()),
                resolved_target: report.diff.map(|d| d.target_commit.as_str()),
                exit_code: report.exit_code.code(),
            },
        }],
    };

    serde_json::to_string_pretty(&log)
        .map_err(|e| Error::Internal(format!("failed to serialize SARIF report: {e}")))
}

#[cfg(test)]
#[path = "sarif_tests.rs"]
mod tests;
