// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{GtestSummary, LogsView, Styles, Tally, junit::to_junit_report, run_summary};
use crate::{
    config::{ReportConfig, ReportView},
    errors::WriteReportError,
    result_set::ResultSnapshot,
};
use camino::Utf8Path;
use std::{fs::File, io};
use tracing::debug;

/// Writes the configured views of a snapshot.
#[derive(Clone, Debug)]
pub struct ReportWriter<'a> {
    config: &'a ReportConfig,
    styles: Styles,
}

impl<'a> ReportWriter<'a> {
    /// Creates a new writer for the given config, with unstyled output.
    pub fn new(config: &'a ReportConfig) -> Self {
        Self {
            config,
            styles: Styles::default(),
        }
    }

    /// Colorizes human-readable views.
    pub fn colorize(&mut self) {
        self.styles.colorize();
    }

    /// Writes every configured view, in order.
    pub fn write_views(
        &self,
        snapshot: &ResultSnapshot,
        writer: &mut dyn io::Write,
    ) -> Result<(), WriteReportError> {
        for view in self.config.views() {
            self.write_view(*view, snapshot, writer)?;
        }
        Ok(())
    }

    /// Writes a single view, followed by a newline. Views with no content write nothing.
    pub fn write_view(
        &self,
        view: ReportView,
        snapshot: &ResultSnapshot,
        writer: &mut dyn io::Write,
    ) -> Result<(), WriteReportError> {
        match view {
            ReportView::Logs => {
                let logs = LogsView::new(snapshot).to_string();
                if !logs.is_empty() {
                    writeln!(writer, "{logs}")?;
                }
            }
            ReportView::Summary => {
                writeln!(writer, "{}", GtestSummary::new(snapshot, &self.styles))?;
            }
            ReportView::Tally => {
                let tally =
                    Tally::new(snapshot).with_column_width(self.config.tally_column_width());
                writeln!(writer, "{tally}")?;
            }
            ReportView::Junit => {
                to_junit_report(snapshot, self.config.junit()).serialize(&mut *writer)?;
                writeln!(writer)?;
            }
            ReportView::Json => {
                serde_json::to_writer_pretty(&mut *writer, &run_summary(snapshot))?;
                writeln!(writer)?;
            }
        }
        Ok(())
    }

    /// Writes the JUnit report to the configured path, if any, creating parent directories.
    ///
    /// Returns the path written to.
    pub fn write_junit_file(
        &self,
        snapshot: &ResultSnapshot,
    ) -> Result<Option<&'a Utf8Path>, WriteReportError> {
        let Some(path) = self.config.junit().path() else {
            return Ok(None);
        };

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|err| WriteReportError::CreateFile {
                path: dir.to_owned(),
                err,
            })?;
        }
        let f = File::create(path).map_err(|err| WriteReportError::CreateFile {
            path: path.to_owned(),
            err,
        })?;
        to_junit_report(snapshot, self.config.junit()).serialize(f)?;
        debug!(%path, "wrote JUnit report");

        Ok(Some(path))
    }
}
