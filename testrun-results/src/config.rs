// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for report generation.
//!
//! The embedded [default config](ReportConfig::DEFAULT_CONFIG) is always loaded first. A
//! repository config, either passed in explicitly or found at
//! [`.config/testrun.toml`](ReportConfig::CONFIG_PATH) under the root, is layered on top of it.

use crate::{errors::ConfigParseError, reporter::DEFAULT_TALLY_COLUMN_WIDTH};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use tracing::debug;

/// A view that can be produced from a result snapshot.
#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ReportView {
    /// Logs of every test that didn't pass.
    Logs,

    /// A gtest-style pass/fail summary.
    Summary,

    /// A single-line tally of per-kind counts.
    Tally,

    /// A JUnit XML report.
    Junit,

    /// A machine-readable JSON summary.
    Json,
}

/// Resolved report configuration.
#[derive(Clone, Debug)]
pub struct ReportConfig {
    views: Vec<ReportView>,
    tally_column_width: usize,
    junit: JunitConfig,
}

impl ReportConfig {
    /// The location of the repository config, relative to the root directory.
    pub const CONFIG_PATH: &'static str = ".config/testrun.toml";

    /// Contains the default config as a TOML file.
    ///
    /// Repository-specific configuration is layered on top of the default config.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../default-config.toml");

    /// Reads the config from `config_file`, or if not specified from `.config/testrun.toml` under
    /// `root`.
    ///
    /// An explicitly specified file must exist. If it isn't specified and the default location
    /// has no file, only the default config is used.
    pub fn from_sources(
        root: impl Into<Utf8PathBuf>,
        config_file: Option<&Utf8Path>,
    ) -> Result<Self, ConfigParseError> {
        let root = root.into();
        let (config_file, source) = match config_file {
            Some(file) => (file.to_owned(), File::new(file.as_str(), FileFormat::Toml)),
            None => {
                let config_file = root.join(Self::CONFIG_PATH);
                let source = File::new(config_file.as_str(), FileFormat::Toml).required(false);
                (config_file, source)
            }
        };
        debug!(%config_file, "reading testrun config");

        let config = Self::make_default_config()
            .add_source(source)
            .build()
            .and_then(|config| config.try_deserialize::<ReportConfigImpl>())
            .map_err(|err| ConfigParseError::new(&config_file, err))?;

        Ok(config.resolve(&root))
    }

    /// Returns the default config, with paths resolved relative to `root`.
    pub fn default_config(root: impl AsRef<Utf8Path>) -> Self {
        let config = Self::make_default_config()
            .build()
            .and_then(|config| config.try_deserialize::<ReportConfigImpl>())
            .expect("default config is always valid");
        config.resolve(root.as_ref())
    }

    /// Returns the views to produce, in order.
    pub fn views(&self) -> &[ReportView] {
        &self.views
    }

    /// Overrides the views to produce.
    pub fn set_views(&mut self, views: Vec<ReportView>) -> &mut Self {
        self.views = views;
        self
    }

    /// Returns the column width of the tally view.
    pub fn tally_column_width(&self) -> usize {
        self.tally_column_width
    }

    /// Returns the JUnit configuration.
    pub fn junit(&self) -> &JunitConfig {
        &self.junit
    }

    /// Overrides the path the JUnit report is written to.
    pub fn set_junit_path(&mut self, path: impl Into<Utf8PathBuf>) -> &mut Self {
        self.junit.path = Some(path.into());
        self
    }

    fn make_default_config() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
    }
}

/// JUnit report configuration.
#[derive(Clone, Debug)]
pub struct JunitConfig {
    path: Option<Utf8PathBuf>,
    report_name: String,
    store_logs: bool,
}

impl JunitConfig {
    /// Returns the absolute path to the JUnit report, if one is configured.
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// Returns the name of the JUnit report.
    pub fn report_name(&self) -> &str {
        &self.report_name
    }

    /// Returns true if non-empty test logs should be stored in the report.
    pub fn store_logs(&self) -> bool {
        self.store_logs
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ReportConfigImpl {
    report: ReportImpl,
    junit: JunitImpl,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ReportImpl {
    views: Vec<ReportView>,
    #[serde(default = "default_tally_column_width")]
    tally_column_width: usize,
}

fn default_tally_column_width() -> usize {
    DEFAULT_TALLY_COLUMN_WIDTH
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct JunitImpl {
    #[serde(default)]
    path: Option<Utf8PathBuf>,
    report_name: String,
    store_logs: bool,
}

impl ReportConfigImpl {
    fn resolve(self, root: &Utf8Path) -> ReportConfig {
        ReportConfig {
            views: self.report.views,
            tally_column_width: self.report.tally_column_width,
            junit: JunitConfig {
                path: self.junit.path.map(|path| root.join(path)),
                report_name: self.junit.report_name,
                store_logs: self.junit.store_logs,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino_tempfile::tempdir;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_is_valid() {
        let config = ReportConfig::default_config("/fake/dir");
        assert_eq!(config.views(), [ReportView::Summary]);
        assert_eq!(config.tally_column_width(), DEFAULT_TALLY_COLUMN_WIDTH);
        assert_eq!(config.junit().path(), None);
        assert_eq!(config.junit().report_name(), "testrun");
        assert!(config.junit().store_logs());
    }

    #[test]
    fn repository_config_is_layered_on_default() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join(".config")).unwrap();
        std::fs::write(
            root.join(ReportConfig::CONFIG_PATH),
            indoc! {r#"
                [report]
                views = ["logs", "summary", "tally"]

                [junit]
                path = "out/junit.xml"
            "#},
        )
        .unwrap();

        let config = ReportConfig::from_sources(root, None).unwrap();
        assert_eq!(
            config.views(),
            [ReportView::Logs, ReportView::Summary, ReportView::Tally]
        );
        assert_eq!(config.tally_column_width(), 15, "default retained");
        assert_eq!(
            config.junit().path(),
            Some(root.join("out/junit.xml").as_path())
        );
        assert_eq!(config.junit().report_name(), "testrun", "default retained");
    }

    #[test]
    fn missing_default_location_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = ReportConfig::from_sources(dir.path(), None).unwrap();
        assert_eq!(config.views(), [ReportView::Summary]);
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = ReportConfig::from_sources(dir.path(), Some(&missing)).unwrap_err();
        assert_eq!(err.config_file(), missing);
    }

    #[test]
    fn invalid_view_is_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("custom.toml");
        std::fs::write(
            &file,
            indoc! {r#"
                [report]
                views = ["html"]
            "#},
        )
        .unwrap();
        let err = ReportConfig::from_sources(dir.path(), Some(&file)).unwrap_err();
        assert_eq!(err.config_file(), file);
    }

    #[test]
    fn overrides() {
        let mut config = ReportConfig::default_config("/fake/dir");
        config
            .set_views(vec![ReportView::Json])
            .set_junit_path("/tmp/junit.xml");
        assert_eq!(config.views(), [ReportView::Json]);
        assert_eq!(config.junit().path(), Some(Utf8Path::new("/tmp/junit.xml")));
    }
}
