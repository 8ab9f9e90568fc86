// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color policy for clap's own help/usage rendering.

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use std::io::IsTerminal;

mod codes {
    /// Section headers.
    pub const HEADER: u8 = 74;
    /// Commands and literals.
    pub const LITERAL: u8 = 250;
    /// Descriptions and placeholders.
    pub const CONTEXT: u8 = 245;
}

/// Whether color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables, `COLOR=1` forces, otherwise a TTY
/// check decides.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Build the `clap` `Styles` used for help/usage text.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER)))))
        .literal(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL)))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::CONTEXT)))))
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
