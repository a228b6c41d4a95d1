// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError,
    errors::Result,
    output::{OutputContext, OutputOpts, OutputWriter},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::{io::Write, thread};
use testrun_metadata::TestRunExitCode;
use testrun_results::{
    config::{ReportConfig, ReportView},
    errors::{ReadOutcomesError, WriteReportError},
    ingest::read_outcomes,
    reporter::ReportWriter,
    result_set::ResultSet,
};
use tracing::{debug, info};

/// Aggregates test outcomes from many shards and reports on them.
#[derive(Debug, Parser)]
#[command(
    name = "testrun",
    version,
    styles = crate::output::clap_styles::style(),
    max_term_width = 100
)]
pub struct TestrunApp {
    #[clap(flatten)]
    output: OutputOpts,

    #[clap(subcommand)]
    command: Command,
}

impl TestrunApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app, returning the exit code on success.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        match self.command {
            Command::Report(opts) => opts.exec(output, output_writer),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Aggregate outcome files and print reports
    ///
    /// Each input is a JSON Lines file with one outcome record per line. Inputs are read in
    /// parallel and combined. Within a file, a later record for the same test replaces an earlier
    /// one; duplicates across files are resolved in an unspecified order.
    Report(ReportOpts),
}

#[derive(Debug, Args)]
struct ReportOpts {
    /// Outcome files to aggregate
    #[arg(required = true, value_name = "INPUT")]
    inputs: Vec<Utf8PathBuf>,

    /// Views to print, in order [default: from config]
    #[arg(long = "view", value_enum, value_name = "VIEW")]
    views: Vec<ViewOpt>,

    /// Also write a JUnit report to this path
    #[arg(long, value_name = "PATH")]
    junit_path: Option<Utf8PathBuf>,

    /// Attach a run-level link (can be specified multiple times)
    #[arg(long = "link", value_name = "NAME=URL")]
    links: Vec<String>,

    /// Config file [default: <root>/.config/testrun.toml]
    #[arg(long, value_name = "PATH")]
    config_file: Option<Utf8PathBuf>,

    /// Root directory for config lookup and relative paths [default: current directory]
    #[arg(long, value_name = "DIR")]
    root: Option<Utf8PathBuf>,
}

impl ReportOpts {
    fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        let root = match self.root {
            Some(root) => root,
            None => current_dir()?,
        };
        let mut config = ReportConfig::from_sources(&root, self.config_file.as_deref())?;
        if !self.views.is_empty() {
            config.set_views(self.views.into_iter().map(ReportView::from).collect());
        }
        if let Some(junit_path) = self.junit_path {
            config.set_junit_path(junit_path);
        }
        let links = self
            .links
            .iter()
            .map(|input| parse_link(input))
            .collect::<Result<Vec<_>>>()?;

        let results = ResultSet::new();
        read_inputs(&results, &self.inputs, output)?;
        for (name, url) in links {
            results.set_link(name, url);
        }

        let snapshot = results.snapshot();
        let mut report_writer = ReportWriter::new(&config);
        if output.colorize_stdout() {
            report_writer.colorize();
        }

        let mut stdout = output_writer.stdout_writer();
        report_writer.write_views(&snapshot, &mut stdout)?;
        stdout.flush().map_err(WriteReportError::Io)?;

        if let Some(path) = report_writer.write_junit_file(&snapshot)? {
            if output.verbose {
                info!("wrote JUnit report to `{path}`");
            }
        }

        if snapshot.did_pass() {
            Ok(TestRunExitCode::OK)
        } else {
            Err(ExpectedError::TestRunFailed)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ViewOpt {
    /// Logs of every test that didn't pass
    Logs,
    /// A gtest-style summary
    Summary,
    /// A single-line tally of counts per kind
    Tally,
    /// A JUnit XML report
    Junit,
    /// A JSON summary
    Json,
}

impl From<ViewOpt> for ReportView {
    fn from(view: ViewOpt) -> Self {
        match view {
            ViewOpt::Logs => ReportView::Logs,
            ViewOpt::Summary => ReportView::Summary,
            ViewOpt::Tally => ReportView::Tally,
            ViewOpt::Junit => ReportView::Junit,
            ViewOpt::Json => ReportView::Json,
        }
    }
}

fn current_dir() -> Result<Utf8PathBuf> {
    let dir = std::env::current_dir().map_err(|err| ExpectedError::CurrentDirFailed { err })?;
    Utf8PathBuf::try_from(dir).map_err(|err| ExpectedError::CurrentDirFailed {
        err: err.into_io_error(),
    })
}

fn parse_link(input: &str) -> Result<(String, String)> {
    match input.split_once('=') {
        Some((name, url)) if !name.is_empty() && !url.is_empty() => {
            Ok((name.to_owned(), url.to_owned()))
        }
        _ => Err(ExpectedError::InvalidLink {
            input: input.to_owned(),
        }),
    }
}

/// Reads every input on its own thread, submitting each file's outcomes to `results` as a single
/// batch.
///
/// All readers run to completion. The first failing input, in command-line order, is reported.
fn read_inputs(results: &ResultSet, inputs: &[Utf8PathBuf], output: OutputContext) -> Result<()> {
    debug!(count = inputs.len(), "reading outcome files");

    let read_results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|path| (path, s.spawn(move || read_one(results, path, output))))
            .collect();
        handles
            .into_iter()
            .map(|(path, handle)| {
                handle.join().map_err(|_| ExpectedError::ReaderPanicked {
                    path: path.clone(),
                })
            })
            .collect()
    });

    for res in read_results {
        res??;
    }
    Ok(())
}

fn read_one(
    results: &ResultSet,
    path: &Utf8Path,
    output: OutputContext,
) -> Result<(), ReadOutcomesError> {
    let outcomes = read_outcomes(path)?;
    if output.verbose {
        info!("read {} outcomes from `{path}`", outcomes.len());
    }
    results.add_outcomes(outcomes);
    Ok(())
}
