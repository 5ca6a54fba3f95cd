// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diff checks, delegating to [`crate::diff::evaluate`].

use crate::check::{Check, CheckContext, Outcome};
use crate::diff::evaluate;
use crate::error::Result;
use crate::registry::ids;

pub struct DiffChangedFiles;

impl Check for DiffChangedFiles {
    fn id(&self) -> &'static str {
        ids::DIFF_CHANGED_FILES
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        Ok(evaluate::changed_files(ctx.diff, &ctx.policy.thresholds))
    }
}

pub struct DiffLargeFiles;

impl Check for DiffLargeFiles {
    fn id(&self) -> &'static str {
        ids::DIFF_LARGE_FILES
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        Ok(evaluate::large_files(ctx.diff, &ctx.policy.thresholds))
    }
}

pub struct DiffObjectSizes;

impl Check for DiffObjectSizes {
    fn id(&self) -> &'static str {
        ids::DIFF_OBJECT_SIZES
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        Ok(evaluate::object_sizes(ctx.diff, &ctx.policy.thresholds))
    }
}

pub struct DiffPatchSize;

impl Check for DiffPatchSize {
    fn id(&self) -> &'static str {
        ids::DIFF_PATCH_SIZE
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        Ok(evaluate::patch_size(ctx.diff, &ctx.policy.thresholds))
    }
}
