use super::{fetch_all, output_heatmap, output_json, HeatView};
use crate::cli::CommonArgs;
use crate::clock::Clock;
use crate::config::{resolve_repositories, Repository};
use crate::report::{Options, Report};
use anyhow::Context;
use console::Term;

pub fn exec(common: CommonArgs, view: HeatView) -> anyhow::Result<()> {
    let repos = resolve_repositories(common.repo.as_deref(), common.config.as_deref())
        .context("Failed to resolve repositories")?;

    let report = build_report(&common, &repos, view.missing);

    if view.json {
        output_json(&report, &repos)?;
    } else {
        output_heatmap(&report, &view, common.zone())?;
    }

    Ok(())
}

/// Reads every repository and runs the analysis with the options from `common`.
pub fn build_report(common: &CommonArgs, repos: &[Repository], report_missing: bool) -> Report {
    // keep stdout clean for JSON consumers; the spinner only goes to a terminal
    let timestamps = fetch_all(repos, Term::stderr().is_term());

    let clock = Clock::system(common.zone());
    let options = Options {
        filter: common.year_filter(),
        mode: common.window_mode(),
        report_missing,
    };
    Report::build(&timestamps, &clock, &options)
}
