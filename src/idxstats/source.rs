use crate::idxstats::CoverageRecord;
use crate::utils::external_tools::check_samtools;
use anyhow::{bail, Context, Result};
use log::{debug, warn};
use rust_htslib::bam::{self, Read};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Produces idxstats-formatted text for an indexed alignment file.
pub trait IdxstatsSource {
    /// Human readable name used in progress messages.
    fn name(&self) -> &str;

    fn collect(&self, bam_file: &Path, index_file: Option<&Path>) -> Result<String>;
}

/// Runs `samtools idxstats` and captures its standard output.
pub struct SamtoolsIdxstats {
    program: PathBuf,
}

impl SamtoolsIdxstats {
    pub fn new() -> Self {
        Self::with_program("samtools")
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SamtoolsIdxstats {
    fn default() -> Self {
        Self::new()
    }
}

impl IdxstatsSource for SamtoolsIdxstats {
    fn name(&self) -> &str {
        "samtools idxstats"
    }

    fn collect(&self, bam_file: &Path, index_file: Option<&Path>) -> Result<String> {
        check_samtools(&self.program)?;

        if let Some(index) = index_file {
            // samtools locates the index next to the alignment file on its own
            warn!(
                "samtools idxstats ignores the explicit index {}; use the htslib source to honour it",
                index.display()
            );
        }

        debug!("Running {} idxstats {}", self.program.display(), bam_file.display());
        let output = Command::new(&self.program)
            .arg("idxstats")
            .arg(bam_file)
            .output()
            .with_context(|| format!("Failed to launch {}", self.program.display()))?;

        if !output.status.success() {
            bail!(
                "samtools idxstats failed on {} ({}): {}",
                bam_file.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        String::from_utf8(output.stdout).context("samtools idxstats produced non UTF-8 output")
    }
}

/// Reads the index statistics in-process through htslib.
#[derive(Default)]
pub struct HtslibIdxstats;

impl IdxstatsSource for HtslibIdxstats {
    fn name(&self) -> &str {
        "htslib index statistics"
    }

    fn collect(&self, bam_file: &Path, index_file: Option<&Path>) -> Result<String> {
        let mut reader = match index_file {
            Some(index) => bam::IndexedReader::from_path_and_index(bam_file, index),
            None => bam::IndexedReader::from_path(bam_file),
        }
        .with_context(|| format!("Failed to open indexed alignment file {}", bam_file.display()))?;

        let header = reader.header().clone();
        let stats = reader
            .index_stats()
            .with_context(|| format!("Failed to read index statistics for {}", bam_file.display()))?;

        let mut text = String::new();
        for (tid, length, mapped, unmapped) in stats {
            let name = if tid < 0 {
                "*".to_string()
            } else {
                String::from_utf8_lossy(header.tid2name(tid as u32)).into_owned()
            };
            let record = CoverageRecord {
                name,
                length,
                mapped,
                unmapped,
            };
            text.push_str(&record.to_line());
            text.push('\n');
        }

        Ok(text)
    }
}
