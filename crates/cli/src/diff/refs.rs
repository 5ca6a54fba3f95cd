// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diff range resolution.
//!
//! Manual mode uses `diff_base`/`diff_target` verbatim. PR mode tries a
//! prioritized list of strategies, each of which either proposes a base
//! ref or passes. A proposed base that does not resolve is skipped; an
//! explicit ref that does not resolve is a git error.

use serde::Serialize;
use tracing::debug;

use crate::env::{Env, names};
use crate::error::Result;
use crate::git::GitQuery;
use crate::policy::{DiffMode, EffectivePolicy};

/// Refs probed when nothing else names a base.
pub const FALLBACK_BASES: &[&str] = &["origin/main", "origin/master"];

/// Which strategy produced the base ref.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefSource {
    Explicit,
    GithubActions,
    Gitlab,
    AzurePipelines,
    Buildkite,
    PrBaseRef,
    Fallback,
}

impl RefSource {
    pub fn as_str(self) -> &'static str {
        match self {
            RefSource::Explicit => "explicit",
            RefSource::GithubActions => "github-actions",
            RefSource::Gitlab => "gitlab",
            RefSource::AzurePipelines => "azure-pipelines",
            RefSource::Buildkite => "buildkite",
            RefSource::PrBaseRef => "pr-base-ref",
            RefSource::Fallback => "fallback",
        }
    }
}

/// Resolved base/target pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRefs {
    pub base_ref: String,
    pub base_commit: String,
    pub target_ref: String,
    pub target_commit: String,
    pub source: RefSource,
}

/// A base ref proposed by one strategy, with the head it reports.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    base: String,
    head: Option<String>,
    source: RefSource,
}

impl Candidate {
    fn new(base: String, head: Option<&str>, source: RefSource) -> Self {
        Self {
            base,
            head: head.map(String::from),
            source,
        }
    }
}

fn remote_branch(branch: &str) -> String {
    let branch = branch.strip_prefix("refs/heads/").unwrap_or(branch);
    format!("origin/{branch}")
}

fn github_actions(env: &Env) -> Option<Candidate> {
    let base = env.get(names::GITHUB_BASE_REF)?;
    Some(Candidate::new(
        remote_branch(base),
        env.get(names::GITHUB_SHA),
        RefSource::GithubActions,
    ))
}

fn gitlab(env: &Env) -> Option<Candidate> {
    let base = env
        .get(names::CI_MERGE_REQUEST_DIFF_BASE_SHA)
        .map(String::from)
        .or_else(|| env.get(names::CI_MERGE_REQUEST_TARGET_BRANCH_NAME).map(remote_branch))?;
    Some(Candidate::new(
        base,
        env.get(names::CI_COMMIT_SHA),
        RefSource::Gitlab,
    ))
}

fn azure_pipelines(env: &Env) -> Option<Candidate> {
    let base = env.get(names::SYSTEM_PULLREQUEST_TARGETBRANCH)?;
    Some(Candidate::new(
        remote_branch(base),
        env.get(names::BUILD_SOURCEVERSION),
        RefSource::AzurePipelines,
    ))
}

fn buildkite(env: &Env) -> Option<Candidate> {
    let base = env.get(names::BUILDKITE_PULL_REQUEST_BASE_BRANCH)?;
    Some(Candidate::new(
        remote_branch(base),
        env.get(names::BUILDKITE_COMMIT),
        RefSource::Buildkite,
    ))
}

/// CI environment strategies in priority order.
const ENV_STRATEGIES: &[fn(&Env) -> Option<Candidate>] =
    &[github_actions, gitlab, azure_pipelines, buildkite];

/// Candidates for PR mode in the order they are tried.
fn pr_candidates(policy: &EffectivePolicy, env: &Env) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = ENV_STRATEGIES
        .iter()
        .filter_map(|strategy| strategy(env))
        .collect();
    if let Some(base) = &policy.pr_base_ref {
        candidates.push(Candidate::new(base.clone(), None, RefSource::PrBaseRef));
    }
    candidates.extend(
        FALLBACK_BASES
            .iter()
            .map(|base| Candidate::new(base.to_string(), None, RefSource::Fallback)),
    );
    candidates
}

/// Resolve the diff refs for this run, `None` when there is no range.
pub fn resolve_refs(
    git: &dyn GitQuery,
    policy: &EffectivePolicy,
    env: &Env,
) -> Result<Option<DiffRefs>> {
    match policy.diff_mode {
        DiffMode::Manual => {
            let (Some(base), Some(target)) = (&policy.diff_base, &policy.diff_target) else {
                debug!("manual diff mode without both refs, no diff range");
                return Ok(None);
            };
            Ok(Some(DiffRefs {
                base_commit: git.resolve_ref(base)?,
                base_ref: base.clone(),
                target_commit: git.resolve_ref(target)?,
                target_ref: target.clone(),
                source: RefSource::Explicit,
            }))
        }
        DiffMode::Pr => resolve_pr(git, policy, env),
    }
}

fn resolve_pr(git: &dyn GitQuery, policy: &EffectivePolicy, env: &Env) -> Result<Option<DiffRefs>> {
    let explicit_target = match &policy.diff_target {
        Some(target) => Some((target.clone(), git.resolve_ref(target)?)),
        None => None,
    };

    for candidate in pr_candidates(policy, env) {
        let base_commit = match git.resolve_ref(&candidate.base) {
            Ok(commit) => commit,
            Err(e) => {
                debug!(base = %candidate.base, source = candidate.source.as_str(), error = %e, "skipping base candidate");
                continue;
            }
        };

        let target = match &explicit_target {
            Some(target) => Some(target.clone()),
            None => head_target(git, candidate.head.as_deref()),
        };
        let Some((target_ref, target_commit)) = target else {
            debug!("no target commit (unborn HEAD?), no diff range");
            return Ok(None);
        };

        debug!(
            base = %candidate.base,
            target = %target_ref,
            source = candidate.source.as_str(),
            "resolved pull request range"
        );
        return Ok(Some(DiffRefs {
            base_ref: candidate.base,
            base_commit,
            target_ref,
            target_commit,
            source: candidate.source,
        }));
    }

    debug!("no pull request base found, no diff range");
    Ok(None)
}

/// The head a CI system reported, else the current checkout.
fn head_target(git: &dyn GitQuery, reported: Option<&str>) -> Option<(String, String)> {
    reported
        .into_iter()
        .chain(std::iter::once("HEAD"))
        .find_map(|rev| git.resolve_ref(rev).ok().map(|commit| (rev.to_string(), commit)))
}

#[cfg(test)]
#[path = "refs_tests.rs"]
mod tests;
