use crate::error::{SexCheckError, SexCheckResult};
use crate::idxstats::{CoverageRecord, IdxstatsTable};
use serde::{Deserialize, Serialize};

/// Names the autosomal baseline (chromosome 1) goes by across common builds:
/// UCSC, Ensembl/1000G, then RefSeq and GenBank accessions for GRCh37,
/// GRCh38 and T2T-CHM13v2.0.
pub const DEFAULT_AUTOSOME_ALIASES: &[&str] = &[
    "chr1",
    "1",
    "NC_000001.10",
    "NC_000001.11",
    "CM000663.1",
    "CM000663.2",
    "CP068277.2",
];

/// Names chromosome Y goes by across the same builds.
pub const DEFAULT_Y_ALIASES: &[&str] = &[
    "chrY",
    "Y",
    "NC_000024.9",
    "NC_000024.10",
    "CM000686.1",
    "CM000686.2",
    "CP086569.2",
];

/// Alias table for the two references the score is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceAliases {
    pub autosome: Vec<String>,
    pub y: Vec<String>,
}

impl Default for ReferenceAliases {
    fn default() -> Self {
        Self {
            autosome: DEFAULT_AUTOSOME_ALIASES.iter().map(|s| s.to_string()).collect(),
            y: DEFAULT_Y_ALIASES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Mapped read counts for the baseline autosome and chromosome Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleCoverage {
    pub chr1_mapped: u64,
    pub chry_mapped: u64,
}

/// Finds the single record whose name is one of `aliases`.
///
/// Matching is exact per alias, ignoring ASCII case, so `chr11` never
/// stands in for `chr1`. A table carrying two names for the same chromosome
/// (say both `Y` and `chrY`) is rejected rather than guessed at.
pub fn find_reference<'a>(
    records: &'a [CoverageRecord],
    reference: &str,
    aliases: &[String],
) -> SexCheckResult<&'a CoverageRecord> {
    let matches: Vec<&CoverageRecord> = records
        .iter()
        .filter(|record| aliases.iter().any(|alias| alias.eq_ignore_ascii_case(&record.name)))
        .collect();

    match matches.as_slice() {
        [record] => Ok(*record),
        [] => Err(SexCheckError::ReferenceNotFound {
            reference: reference.to_string(),
            aliases: format!("[{}]", aliases.join(", ")),
        }),
        many => Err(SexCheckError::AmbiguousReference {
            reference: reference.to_string(),
            matches: many
                .iter()
                .map(|record| record.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

pub fn extract_sample_coverage(
    table: &IdxstatsTable,
    aliases: &ReferenceAliases,
) -> SexCheckResult<SampleCoverage> {
    let chr1 = find_reference(table.records(), "chromosome 1", &aliases.autosome)?;
    let chry = find_reference(table.records(), "chromosome Y", &aliases.y)?;

    Ok(SampleCoverage {
        chr1_mapped: chr1.mapped,
        chry_mapped: chry.mapped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> IdxstatsTable {
        IdxstatsTable::parse(text).unwrap()
    }

    #[test]
    fn test_extracts_ensembl_names() {
        let t = table("1\t100\t100\t0\n2\t90\t80\t10\nX\t80\t70\t10\nY\t70\t60\t10\nZ\t50\t0\t50\n");
        let coverage = extract_sample_coverage(&t, &ReferenceAliases::default()).unwrap();
        assert_eq!(
            coverage,
            SampleCoverage {
                chr1_mapped: 100,
                chry_mapped: 60
            }
        );
    }

    #[test]
    fn test_extracts_ucsc_names() {
        let t = table("chr1\t248956422\t1000000\t12\nchr11\t135086622\t5000\t0\nchrY\t57227415\t5000\t3\n");
        let coverage = extract_sample_coverage(&t, &ReferenceAliases::default()).unwrap();
        assert_eq!(coverage.chr1_mapped, 1_000_000);
        assert_eq!(coverage.chry_mapped, 5000);
    }

    #[test]
    fn test_extracts_accession_names_case_insensitively() {
        let t = table("NC_000001.11\t10\t42\t0\ncm000686.2\t10\t7\t0\n");
        let coverage = extract_sample_coverage(&t, &ReferenceAliases::default()).unwrap();
        assert_eq!(coverage.chr1_mapped, 42);
        assert_eq!(coverage.chry_mapped, 7);
    }

    #[test]
    fn test_chr11_is_not_chr1() {
        let t = table("11\t100\t100\t0\n2\t90\t80\t10\nY\t70\t60\t10\n");
        let err = extract_sample_coverage(&t, &ReferenceAliases::default()).unwrap_err();
        assert!(matches!(
            err,
            SexCheckError::ReferenceNotFound { ref reference, .. } if reference == "chromosome 1"
        ));
    }

    #[test]
    fn test_missing_y_is_fatal() {
        let t = table("1\t100\t100\t0\n2\t90\t80\t10\nX\t80\t70\t10\n");
        let err = extract_sample_coverage(&t, &ReferenceAliases::default()).unwrap_err();
        assert!(matches!(
            err,
            SexCheckError::ReferenceNotFound { ref reference, .. } if reference == "chromosome Y"
        ));
    }

    #[test]
    fn test_two_names_for_y_is_ambiguous() {
        let t = table("1\t100\t100\t0\nY\t70\t60\t10\nchrY\t70\t3\t0\n");
        let err = extract_sample_coverage(&t, &ReferenceAliases::default()).unwrap_err();
        assert_eq!(
            err,
            SexCheckError::AmbiguousReference {
                reference: "chromosome Y".to_string(),
                matches: "Y, chrY".to_string(),
            }
        );
    }

    #[test]
    fn test_custom_aliases() {
        let aliases = ReferenceAliases {
            autosome: vec!["Chr01".to_string()],
            y: vec!["ChrY_hap1".to_string()],
        };
        let t = table("Chr01\t10\t9\t0\nchr1\t10\t1\t0\nChrY_hap1\t10\t2\t0\n");
        let coverage = extract_sample_coverage(&t, &aliases).unwrap();
        assert_eq!(coverage.chr1_mapped, 9);
        assert_eq!(coverage.chry_mapped, 2);
    }
}
