// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Partial policy updates folded into an [`EffectivePolicy`](super::EffectivePolicy).

use std::collections::BTreeMap;
use std::fmt;

use super::{DiffMode, Thresholds};
use crate::severity::ConfiguredSeverity;

/// Where a layer came from, lowest precedence first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LayerOrigin {
    #[default]
    Baseline,
    Profile(&'static str),
    RulePack(&'static str),
    ConfigFile,
    Cli,
}

impl fmt::Display for LayerOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerOrigin::Baseline => f.write_str("built-in defaults"),
            LayerOrigin::Profile(name) => write!(f, "profile '{name}'"),
            LayerOrigin::RulePack(name) => write!(f, "rule pack '{name}'"),
            LayerOrigin::ConfigFile => f.write_str("config file"),
            LayerOrigin::Cli => f.write_str("command line"),
        }
    }
}

/// Threshold fields a layer may set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThresholdOverrides {
    pub max_tracked_file_kib: Option<u64>,
    pub max_history_blob_kib: Option<u64>,
    pub history_object_limit: Option<u64>,
    pub max_diff_files: Option<u64>,
    pub max_diff_changed_lines: Option<u64>,
    pub max_diff_object_kib: Option<u64>,
}

impl ThresholdOverrides {
    fn merged(self, over: ThresholdOverrides) -> Self {
        Self {
            max_tracked_file_kib: over.max_tracked_file_kib.or(self.max_tracked_file_kib),
            max_history_blob_kib: over.max_history_blob_kib.or(self.max_history_blob_kib),
            history_object_limit: over.history_object_limit.or(self.history_object_limit),
            max_diff_files: over.max_diff_files.or(self.max_diff_files),
            max_diff_changed_lines: over.max_diff_changed_lines.or(self.max_diff_changed_lines),
            max_diff_object_kib: over.max_diff_object_kib.or(self.max_diff_object_kib),
        }
    }

    /// Fill unset fields from `defaults`.
    pub fn or_defaults(self, defaults: Thresholds) -> Thresholds {
        Thresholds {
            max_tracked_file_kib: self
                .max_tracked_file_kib
                .unwrap_or(defaults.max_tracked_file_kib),
            max_history_blob_kib: self
                .max_history_blob_kib
                .unwrap_or(defaults.max_history_blob_kib),
            history_object_limit: self
                .history_object_limit
                .unwrap_or(defaults.history_object_limit),
            max_diff_files: self.max_diff_files.unwrap_or(defaults.max_diff_files),
            max_diff_changed_lines: self
                .max_diff_changed_lines
                .unwrap_or(defaults.max_diff_changed_lines),
            max_diff_object_kib: self
                .max_diff_object_kib
                .unwrap_or(defaults.max_diff_object_kib),
        }
    }
}

impl From<Thresholds> for ThresholdOverrides {
    fn from(t: Thresholds) -> Self {
        Self {
            max_tracked_file_kib: Some(t.max_tracked_file_kib),
            max_history_blob_kib: Some(t.max_history_blob_kib),
            history_object_limit: Some(t.history_object_limit),
            max_diff_files: Some(t.max_diff_files),
            max_diff_changed_lines: Some(t.max_diff_changed_lines),
            max_diff_object_kib: Some(t.max_diff_object_kib),
        }
    }
}

/// One partial update of policy fields. `None` leaves lower layers alone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolicyLayer {
    pub origin: LayerOrigin,
    pub strict: Option<bool>,
    pub gitleaks: Option<bool>,
    /// Ids force-enabled even if disabled by a lower layer.
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub severity_overrides: BTreeMap<String, ConfiguredSeverity>,
    pub thresholds: ThresholdOverrides,
    pub diff_mode: Option<DiffMode>,
    pub pr_base_ref: Option<String>,
    pub diff_base: Option<String>,
    pub diff_target: Option<String>,
}

impl PolicyLayer {
    pub fn new(origin: LayerOrigin) -> Self {
        Self {
            origin,
            ..Self::default()
        }
    }

    /// The hard-coded baseline every resolution starts from.
    pub fn baseline() -> Self {
        Self {
            origin: LayerOrigin::Baseline,
            strict: Some(false),
            gitleaks: Some(true),
            thresholds: Thresholds::default().into(),
            diff_mode: Some(DiffMode::Manual),
            ..Self::default()
        }
    }

    /// Check ids this layer mentions, for validation.
    pub fn mentioned_ids(&self) -> impl Iterator<Item = (&'static str, &str)> {
        let include = self.include.iter().map(|id| ("include", id.as_str()));
        let exclude = self.exclude.iter().map(|id| ("exclude", id.as_str()));
        let overrides = self
            .severity_overrides
            .keys()
            .map(|id| ("severity_overrides", id.as_str()));
        include.chain(exclude).chain(overrides)
    }

    /// Apply `over` on top of `self`, field by field.
    pub fn merged(mut self, over: &PolicyLayer) -> Self {
        self.strict = over.strict.or(self.strict);
        self.gitleaks = over.gitleaks.or(self.gitleaks);
        for id in &over.include {
            if !self.include.contains(id) {
                self.include.push(id.clone());
            }
        }
        for id in &over.exclude {
            if !self.exclude.contains(id) {
                self.exclude.push(id.clone());
            }
        }
        for (id, severity) in &over.severity_overrides {
            self.severity_overrides.insert(id.clone(), *severity);
        }
        self.thresholds = self.thresholds.merged(over.thresholds);
        self.diff_mode = over.diff_mode.or(self.diff_mode);
        self.pr_base_ref = over.pr_base_ref.clone().or(self.pr_base_ref);
        self.diff_base = over.diff_base.clone().or(self.diff_base);
        self.diff_target = over.diff_target.clone().or(self.diff_target);
        self.origin = over.origin.clone();
        self
    }
}

#[cfg(test)]
#[path = "layer_tests.rs"]
mod tests;
