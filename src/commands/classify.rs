use crate::cli::{SampleArgs, SettingsArgs};
use crate::label::sample_name_from_path;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

const IDXSTATS_SUFFIXES: &[&str] = &["_idxstat.tsv", "_idxstats.tsv", ".idxstats", ".idxstat"];

pub fn run(idxstats_file: &Path, sample: &SampleArgs, settings: &SettingsArgs) -> Result<()> {
    let settings = super::load_settings(settings)?;
    let sample_name = sample
        .sample_name
        .clone()
        .unwrap_or_else(|| sample_name_from_table_path(idxstats_file));
    info!("Checking sex of {} from {}", sample_name, idxstats_file.display());

    let raw = fs::read_to_string(idxstats_file)
        .with_context(|| format!("Failed to read {}", idxstats_file.display()))?;

    super::finish(&raw, &sample_name, sample, &settings)?;
    Ok(())
}

/// `S1_F_markdup_idxstat.tsv` names sample `S1_F`.
fn sample_name_from_table_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let stem = IDXSTATS_SUFFIXES
        .iter()
        .find_map(|suffix| file_name.strip_suffix(suffix))
        .unwrap_or(&file_name);

    sample_name_from_path(Path::new(stem))
}
