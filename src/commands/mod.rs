pub mod check;
pub mod classify;

use crate::cli::{SampleArgs, SettingsArgs};
use crate::config::{Config, RunSettings};
use crate::export::{write_outputs, OutputPaths, SexCheckReport};
use crate::idxstats::IdxstatsTable;
use crate::pipeline;
use crate::verdict::SexMatch;
use anyhow::{Context, Result};
use log::{info, warn};

/// Loads the configuration file and applies command line overrides.
///
/// Runs before any idxstats work so misconfigured thresholds fail fast.
pub(crate) fn load_settings(args: &SettingsArgs) -> Result<RunSettings> {
    let mut config = Config::load(args.config.as_deref())?;
    config.apply(&args.overrides());
    config.settings().context("Invalid sex check configuration")
}

/// Turns raw idxstats text into a verdict and writes both outputs.
/// Nothing is written unless a verdict was reached.
pub(crate) fn finish(
    raw_idxstats: &str,
    sample_name: &str,
    sample: &SampleArgs,
    settings: &RunSettings,
) -> Result<OutputPaths> {
    let table: IdxstatsTable = raw_idxstats.parse()?;
    if table.is_empty() {
        warn!("idxstats output for {} is empty", sample_name);
    } else {
        info!("Read {} reference sequences", table.len());
    }

    let verdict = pipeline::evaluate(&table, sample_name, settings)?;
    match verdict.matched {
        SexMatch::Match => info!("{}", verdict),
        SexMatch::Mismatch => warn!("Sex mismatch: {}", verdict),
        SexMatch::NotApplicable => warn!("Sex check inconclusive: {}", verdict),
    }

    let report = SexCheckReport::from_verdict(&verdict, &settings.thresholds);
    let prefix = sample.prefix.as_deref().unwrap_or(sample_name);
    let paths = write_outputs(&sample.output_dir, prefix, table.raw(), &report)?;
    info!(
        "Wrote {} and {}",
        paths.idxstats.display(),
        paths.report.display()
    );

    Ok(paths)
}
