use crate::classify::PredictedSex;
use crate::label::ReportedSex;
use crate::reference::SampleCoverage;
use crate::score::Score;
use serde::{Serialize, Serializer};
use std::fmt;

/// Outcome of comparing reported against predicted sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SexMatch {
    Match,
    Mismatch,
    /// Either side was unknown or ambiguous.
    NotApplicable,
}

impl SexMatch {
    pub fn code(&self) -> &'static str {
        match self {
            SexMatch::Match => "True",
            SexMatch::Mismatch => "False",
            SexMatch::NotApplicable => "NA",
        }
    }
}

impl fmt::Display for SexMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for SexMatch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

pub fn reconcile(reported: ReportedSex, predicted: PredictedSex) -> SexMatch {
    match (reported, predicted) {
        (ReportedSex::Unknown, _) | (_, PredictedSex::Ambiguous) => SexMatch::NotApplicable,
        (ReportedSex::Male, PredictedSex::Male) | (ReportedSex::Female, PredictedSex::Female) => {
            SexMatch::Match
        }
        _ => SexMatch::Mismatch,
    }
}

/// Final QC record for one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub sample_name: String,
    pub coverage: SampleCoverage,
    pub score: Score,
    pub reported_sex: ReportedSex,
    pub predicted_sex: PredictedSex,
    pub matched: SexMatch,
}

impl Verdict {
    pub fn new(
        sample_name: impl Into<String>,
        coverage: SampleCoverage,
        score: Score,
        reported_sex: ReportedSex,
        predicted_sex: PredictedSex,
    ) -> Self {
        Self {
            sample_name: sample_name.into(),
            coverage,
            score,
            reported_sex,
            predicted_sex,
            matched: reconcile(reported_sex, predicted_sex),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: chr1={} chrY={} score={:.4} reported={} predicted={} matched={}",
            self.sample_name,
            self.coverage.chr1_mapped,
            self.coverage.chry_mapped,
            self.score.value,
            self.reported_sex,
            self.predicted_sex,
            self.matched
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_table() {
        use PredictedSex as P;
        use ReportedSex as R;

        let cases = [
            (R::Male, P::Male, SexMatch::Match),
            (R::Female, P::Female, SexMatch::Match),
            (R::Male, P::Female, SexMatch::Mismatch),
            (R::Female, P::Male, SexMatch::Mismatch),
            (R::Male, P::Ambiguous, SexMatch::NotApplicable),
            (R::Female, P::Ambiguous, SexMatch::NotApplicable),
            (R::Unknown, P::Male, SexMatch::NotApplicable),
            (R::Unknown, P::Female, SexMatch::NotApplicable),
            (R::Unknown, P::Ambiguous, SexMatch::NotApplicable),
        ];

        for (reported, predicted, expected) in cases {
            assert_eq!(
                reconcile(reported, predicted),
                expected,
                "reported={:?} predicted={:?}",
                reported,
                predicted
            );
        }
    }

    #[test]
    fn test_match_codes_are_distinct() {
        assert_eq!(SexMatch::Match.code(), "True");
        assert_eq!(SexMatch::Mismatch.code(), "False");
        assert_eq!(SexMatch::NotApplicable.code(), "NA");
        assert_eq!(serde_json::to_string(&SexMatch::NotApplicable).unwrap(), "\"NA\"");
    }
}
