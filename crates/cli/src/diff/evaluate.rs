// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The four diff checks as pure functions of the captured range.
//!
//! Each reports `pass` when there is no range, and `warn` on findings.

use super::{DiffRange, DiffState};
use crate::check::{Outcome, format_kib, list_capped};
use crate::policy::Thresholds;

fn kib_to_bytes(kib: u64) -> u64 {
    kib.saturating_mul(1024)
}

fn with_range(state: &DiffState, eval: impl FnOnce(&DiffRange) -> Outcome) -> Outcome {
    match state {
        DiffState::Ready(range) => eval(range),
        DiffState::Skipped(reason) => Outcome::pass(format!("skipped: {reason}")),
    }
}

/// Number of changed paths against `max_diff_files`.
pub fn changed_files(state: &DiffState, t: &Thresholds) -> Outcome {
    with_range(state, |range| {
        let count = range.changes.len() as u64;
        if count > t.max_diff_files {
            Outcome::warn(format!(
                "{count} changed files exceeds limit of {}",
                t.max_diff_files
            ))
            .with_fix("Split the change into smaller pull requests.")
        } else {
            Outcome::pass(format!(
                "{count} changed files (limit {})",
                t.max_diff_files
            ))
        }
    })
}

/// Target-tree size of each changed path against `max_tracked_file_kib`.
pub fn large_files(state: &DiffState, t: &Thresholds) -> Outcome {
    with_range(state, |range| {
        let limit = kib_to_bytes(t.max_tracked_file_kib);
        let offenders: Vec<String> = range
            .changes
            .iter()
            .filter_map(|c| {
                let size = range.target_size(c)?;
                (size > limit).then(|| format!("{} ({})", c.path, format_kib(size)))
            })
            .collect();

        if offenders.is_empty() {
            Outcome::pass(format!(
                "no changed file exceeds {} KiB",
                t.max_tracked_file_kib
            ))
        } else {
            Outcome::warn(format!(
                "{} changed file(s) exceed {} KiB: {}",
                offenders.len(),
                t.max_tracked_file_kib,
                list_capped(&offenders)
            ))
            .with_fix("Move large assets to Git LFS or external storage.")
        }
    })
}

/// Per-path growth between base and target against `max_diff_object_kib`.
///
/// Absent objects count as size 0; shrinking never triggers.
pub fn object_sizes(state: &DiffState, t: &Thresholds) -> Outcome {
    with_range(state, |range| {
        let limit = kib_to_bytes(t.max_diff_object_kib);
        let offenders: Vec<String> = range
            .changes
            .iter()
            .filter_map(|c| {
                let base = range.base_size(c).unwrap_or(0);
                let target = range.target_size(c).unwrap_or(0);
                let growth = target.saturating_sub(base);
                (growth > limit).then(|| format!("{} (+{})", c.path, format_kib(growth)))
            })
            .collect();

        if offenders.is_empty() {
            Outcome::pass(format!(
                "no object grows by more than {} KiB",
                t.max_diff_object_kib
            ))
        } else {
            Outcome::warn(format!(
                "{} object(s) grow by more than {} KiB: {}",
                offenders.len(),
                t.max_diff_object_kib,
                list_capped(&offenders)
            ))
            .with_fix("Avoid committing generated or binary artifacts.")
        }
    })
}

/// Total changed lines against `max_diff_changed_lines`, and file count
/// against `max_diff_files`.
pub fn patch_size(state: &DiffState, t: &Thresholds) -> Outcome {
    with_range(state, |range| {
        let lines = range.changed_lines();
        let files = range.changes.len() as u64;

        let mut problems = Vec::new();
        if lines > t.max_diff_changed_lines {
            problems.push(format!(
                "{lines} changed lines exceeds limit of {}",
                t.max_diff_changed_lines
            ));
        }
        if files > t.max_diff_files {
            problems.push(format!(
                "{files} changed files exceeds limit of {}",
                t.max_diff_files
            ));
        }

        if problems.is_empty() {
            Outcome::pass(format!("{lines} changed lines across {files} files"))
        } else {
            Outcome::warn(problems.join("; "))
                .with_fix("Split the change into smaller, reviewable patches.")
        }
    })
}

#[cfg(test)]
#[path = "evaluate_tests.rs"]
mod tests;
