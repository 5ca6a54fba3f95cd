// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed value extraction for configuration.

use std::path::Path;

use crate::error::{Error, Result};

fn type_error(key: &str, expected: &str, value: &toml::Value, path: &Path) -> Error {
    Error::config_at(
        format!("{key}: expected {expected}, found {}", value.type_str()),
        path,
    )
}

pub(super) fn expect_str<'a>(value: &'a toml::Value, key: &str, path: &Path) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| type_error(key, "a string", value, path))
}

pub(super) fn expect_bool(value: &toml::Value, key: &str, path: &Path) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| type_error(key, "a boolean", value, path))
}

/// Non-negative integer.
pub(super) fn expect_u64(value: &toml::Value, key: &str, path: &Path) -> Result<u64> {
    value
        .as_integer()
        .and_then(|n| u64::try_from(n).ok())
        .ok_or_else(|| type_error(key, "a non-negative integer", value, path))
}

pub(super) fn expect_string_array(
    value: &toml::Value,
    key: &str,
    path: &Path,
) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| type_error(key, "an array of strings", value, path))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(String::from)
                .ok_or_else(|| type_error(key, "an array of strings", item, path))
        })
        .collect()
}

pub(super) fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "repo-preflight: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
