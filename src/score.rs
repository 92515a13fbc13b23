use crate::error::{SexCheckError, SexCheckResult};
use crate::reference::SampleCoverage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset that keeps the negative log finite when no chrY reads mapped.
pub const NEG_LOG_EPSILON: f64 = 1e-9;

/// Selects how chrY reads are normalised against the chromosome 1 baseline.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreMethodKind {
    /// chrY / chr1 multiplied by an explicit scale
    #[value(name = "scaled-ratio")]
    ScaledRatio,
    /// -ln(chrY / chr1 + 1e-9)
    #[value(name = "neg-log")]
    NegLog,
}

/// A fully specified scoring convention. Thresholds must be expressed in
/// the units of the method in use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreMethod {
    ScaledRatio { scale: f64 },
    NegLog,
}

impl ScoreMethod {
    pub fn scaled_ratio(scale: f64) -> SexCheckResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(SexCheckError::InvalidScale(scale));
        }
        Ok(ScoreMethod::ScaledRatio { scale })
    }

    /// Short description of the score units, used in report headers.
    pub fn describe(&self) -> String {
        match self {
            ScoreMethod::ScaledRatio { scale } => {
                format!("mapped_chrY/mapped_chr1 multiplied by {}", scale)
            }
            ScoreMethod::NegLog => "Negative log of mapped_chrY/mapped_chr1".to_string(),
        }
    }
}

impl fmt::Display for ScoreMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreMethod::ScaledRatio { scale } => write!(f, "scaled-ratio (x{})", scale),
            ScoreMethod::NegLog => write!(f, "neg-log"),
        }
    }
}

/// Normalised chrY signal for a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub value: f64,
    pub method: ScoreMethod,
}

pub fn compute_score(coverage: &SampleCoverage, method: ScoreMethod) -> SexCheckResult<Score> {
    if coverage.chr1_mapped == 0 {
        return Err(SexCheckError::UndefinedScore {
            reference: "chromosome 1".to_string(),
            chry_mapped: coverage.chry_mapped,
        });
    }

    let chr1 = coverage.chr1_mapped as f64;
    let chry = coverage.chry_mapped as f64;

    let value = match method {
        // Scale before dividing so the only rounding step is the division.
        ScoreMethod::ScaledRatio { scale } => (chry * scale) / chr1,
        ScoreMethod::NegLog => -(chry / chr1 + NEG_LOG_EPSILON).ln(),
    };

    Ok(Score { value, method })
}
