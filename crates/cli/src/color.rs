// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Color detection and terminal styling.
//!
//! Detection order:
//! 1. `NO_COLOR` set (any value) → no color
//! 2. `COLOR` set (any value) → color
//! 3. otherwise color only when stdout is a TTY

use std::io::{IsTerminal, Write};

use termcolor::ColorChoice;

use crate::env::names;
use crate::severity::Severity;

/// Resolve color choice from the process environment.
pub fn resolve_color() -> ColorChoice {
    choose(
        std::env::var_os(names::NO_COLOR).is_some(),
        std::env::var_os(names::COLOR).is_some(),
        std::io::stdout().is_terminal(),
    )
}

/// Pure decision behind [`resolve_color`].
pub fn choose(no_color: bool, force: bool, is_tty: bool) -> ColorChoice {
    if no_color {
        ColorChoice::Never
    } else if force {
        ColorChoice::Always
    } else if is_tty {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Color scheme for human output.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    use crate::severity::Severity;

    /// Bold headline and check id.
    pub fn emphasis() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    /// Status label: green pass, yellow warn, red fail.
    pub fn status(severity: Severity) -> ColorSpec {
        let color = match severity {
            Severity::Pass => Color::Green,
            Severity::Warn => Color::Yellow,
            Severity::Fail => Color::Red,
        };
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(color)).set_bold(true);
        spec
    }

    /// Cyan for remediation hints.
    pub fn fix() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }
}

/// Write `text` in the status color for `severity`.
pub fn write_status<W: termcolor::WriteColor>(
    out: &mut W,
    severity: Severity,
    text: &str,
) -> std::io::Result<()> {
    out.set_color(&scheme::status(severity))?;
    write!(out, "{text}")?;
    out.reset()
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
