use thiserror::Error;

/// Fatal conditions raised by the sex check decision chain.
///
/// Every variant aborts the run before a verdict is produced. Unrecognised
/// sample labels are deliberately absent: they are encoded as
/// [`ReportedSex::Unknown`](crate::label::ReportedSex::Unknown) instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SexCheckError {
    #[error("coverage extraction: no reference named {aliases} found for {reference}")]
    ReferenceNotFound { reference: String, aliases: String },

    #[error("coverage extraction: {reference} matched several references ({matches})")]
    AmbiguousReference { reference: String, matches: String },

    #[error("score calculation: {reference} has no mapped reads, cannot normalise chrY reads (chrY mapped: {chry_mapped})")]
    UndefinedScore { reference: String, chry_mapped: u64 },

    #[error("threshold validation: male threshold ({male}) must be a finite value below female threshold ({female})")]
    InvalidThresholdConfiguration { male: f64, female: f64 },

    #[error("score calculation: scale must be a finite positive number, got {0}")]
    InvalidScale(f64),

    #[error("idxstats parsing: line {line}: {reason}")]
    MalformedIdxstats { line: usize, reason: String },
}

pub type SexCheckResult<T> = Result<T, SexCheckError>;
