use crate::classify::classify;
use crate::config::RunSettings;
use crate::error::SexCheckResult;
use crate::idxstats::IdxstatsTable;
use crate::reference::extract_sample_coverage;
use crate::score::compute_score;
use crate::verdict::Verdict;
use log::info;

/// Runs the decision chain on a parsed idxstats table: extract the chr1 and
/// chrY counts, score, classify, then reconcile against the sample label.
///
/// Any error aborts before a verdict exists.
pub fn evaluate(
    table: &IdxstatsTable,
    sample_name: &str,
    settings: &RunSettings,
) -> SexCheckResult<Verdict> {
    let coverage = extract_sample_coverage(table, &settings.references)?;
    info!(
        "Mapped reads: chr1={} chrY={}",
        coverage.chr1_mapped, coverage.chry_mapped
    );

    let score = compute_score(&coverage, settings.method)?;
    let predicted = classify(score.value, &settings.thresholds);
    info!(
        "Score {:.4} ({}) -> predicted {}",
        score.value, settings.method, predicted
    );

    let reported = settings.convention.reported_sex(sample_name);

    Ok(Verdict::new(sample_name, coverage, score, reported, predicted))
}
