// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use owo_colors::Style;

/// Styles used by the human-readable views.
///
/// The default is unstyled output.
#[derive(Clone, Debug, Default)]
pub struct Styles {
    pub(super) banner: Style,
    pub(super) pass: Style,
    pub(super) skip: Style,
    pub(super) fail: Style,
    pub(super) count: Style,
}

impl Styles {
    /// Enables colors.
    pub fn colorize(&mut self) {
        self.banner = Style::new().green();
        self.pass = Style::new().green().bold();
        self.skip = Style::new().yellow().bold();
        self.fail = Style::new().red().bold();
        self.count = Style::new().bold();
    }
}
