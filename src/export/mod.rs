pub mod formats;

use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub use formats::multiqc::SexCheckReport;

pub const IDXSTATS_SUFFIX: &str = "_idxstat.tsv";
pub const MULTIQC_SUFFIX: &str = "_mqc.json";

/// Locations of the two files a successful run leaves behind.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub idxstats: PathBuf,
    pub report: PathBuf,
}

impl OutputPaths {
    pub fn new(output_dir: &Path, prefix: &str) -> Self {
        Self {
            idxstats: output_dir.join(format!("{}{}", prefix, IDXSTATS_SUFFIX)),
            report: output_dir.join(format!("{}{}", prefix, MULTIQC_SUFFIX)),
        }
    }
}

/// Writes the raw idxstats table and the MultiQC report.
///
/// Both files are staged next to their destination and only moved into
/// place once both have been written in full. If the report cannot be moved
/// into place the already persisted table is removed again.
pub fn write_outputs(
    output_dir: &Path,
    prefix: &str,
    idxstats_raw: &str,
    report: &SexCheckReport,
) -> Result<OutputPaths> {
    let paths = OutputPaths::new(output_dir, prefix);
    let json = report.to_json().context("Failed to serialise MultiQC report")?;

    let staged_idxstats = stage(output_dir, idxstats_raw.as_bytes())?;
    let staged_report = stage(output_dir, json.as_bytes())?;

    staged_idxstats
        .persist(&paths.idxstats)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write {}", paths.idxstats.display()))?;
    if let Err(e) = staged_report.persist(&paths.report) {
        // Never leave the table behind without its report
        if let Err(cleanup) = fs::remove_file(&paths.idxstats) {
            warn!("Failed to remove {}: {}", paths.idxstats.display(), cleanup);
        }
        return Err(e.error)
            .with_context(|| format!("Failed to write {}", paths.report.display()));
    }

    Ok(paths)
}

fn stage(output_dir: &Path, contents: &[u8]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new_in(output_dir)
        .with_context(|| format!("Failed to create a file in {}", output_dir.display()))?;
    file.write_all(contents)?;
    file.flush()?;
    Ok(file)
}
