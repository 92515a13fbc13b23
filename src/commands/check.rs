use crate::cli::{IdxstatsSourceKind, SampleArgs, SettingsArgs};
use crate::idxstats::{HtslibIdxstats, IdxstatsSource, SamtoolsIdxstats};
use crate::label::sample_name_from_path;
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::Result;
use log::info;
use std::path::Path;
use std::time::Duration;

pub fn run(
    bam_file: &Path,
    index_file: Option<&Path>,
    source_kind: IdxstatsSourceKind,
    samtools: &Path,
    sample: &SampleArgs,
    settings: &SettingsArgs,
) -> Result<()> {
    let settings = super::load_settings(settings)?;
    let sample_name = sample
        .sample_name
        .clone()
        .unwrap_or_else(|| sample_name_from_path(bam_file));
    info!("Checking sex of {} from {}", sample_name, bam_file.display());

    let source: Box<dyn IdxstatsSource> = match source_kind {
        IdxstatsSourceKind::Samtools => Box::new(SamtoolsIdxstats::with_program(samtools)),
        IdxstatsSourceKind::Htslib => Box::new(HtslibIdxstats),
    };

    let progress = ProgressBarBuilder::new(format!("Collecting read counts with {}...", source.name()))
        .with_tick(Duration::from_millis(120))
        .build()?;
    let collected = source.collect(bam_file, index_file);
    progress.finish_and_clear();

    super::finish(&collected?, &sample_name, sample, &settings)?;
    Ok(())
}
