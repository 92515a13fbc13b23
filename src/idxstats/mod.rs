pub mod source;

use crate::error::{SexCheckError, SexCheckResult};
use std::str::FromStr;

pub use source::{HtslibIdxstats, IdxstatsSource, SamtoolsIdxstats};

/// One row of an idxstats table: a reference sequence with its read counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageRecord {
    pub name: String,
    pub length: u64,
    pub mapped: u64,
    pub unmapped: u64,
}

impl CoverageRecord {
    /// Renders the record the way `samtools idxstats` prints it.
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}",
            self.name, self.length, self.mapped, self.unmapped
        )
    }
}

/// Parsed idxstats output. The raw text is kept alongside the records so it
/// can be written back out unmodified.
#[derive(Debug, Clone)]
pub struct IdxstatsTable {
    raw: String,
    records: Vec<CoverageRecord>,
}

impl IdxstatsTable {
    pub fn parse(raw: impl Into<String>) -> SexCheckResult<Self> {
        let raw = raw.into();
        let mut records = Vec::new();

        for (idx, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            records.push(parse_record(line, idx + 1)?);
        }

        Ok(Self { raw, records })
    }

    pub fn records(&self) -> &[CoverageRecord] {
        &self.records
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromStr for IdxstatsTable {
    type Err = SexCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_record(line: &str, line_number: usize) -> SexCheckResult<CoverageRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(SexCheckError::MalformedIdxstats {
            line: line_number,
            reason: format!("expected 4 columns, found {}", fields.len()),
        });
    }

    let count = |value: &str, column: &str| -> SexCheckResult<u64> {
        value.parse::<u64>().map_err(|_| SexCheckError::MalformedIdxstats {
            line: line_number,
            reason: format!("{} '{}' is not a non-negative integer", column, value),
        })
    };

    Ok(CoverageRecord {
        name: fields[0].to_string(),
        length: count(fields[1], "length")?,
        mapped: count(fields[2], "mapped reads")?,
        unmapped: count(fields[3], "unmapped reads")?,
    })
}
