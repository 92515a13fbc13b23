use crate::error::{SexCheckError, SexCheckResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score cut-offs. A lower score means more chrY signal, so the male
/// cut-off must sit strictly below the female one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    male: f64,
    female: f64,
}

impl Thresholds {
    pub fn new(male: f64, female: f64) -> SexCheckResult<Self> {
        if !male.is_finite() || !female.is_finite() || male >= female {
            return Err(SexCheckError::InvalidThresholdConfiguration { male, female });
        }
        Ok(Self { male, female })
    }

    pub fn male(&self) -> f64 {
        self.male
    }

    pub fn female(&self) -> f64 {
        self.female
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictedSex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "U")]
    Ambiguous,
}

impl PredictedSex {
    pub fn code(&self) -> &'static str {
        match self {
            PredictedSex::Male => "M",
            PredictedSex::Female => "F",
            PredictedSex::Ambiguous => "U",
        }
    }
}

impl fmt::Display for PredictedSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PredictedSex::Male => "male",
            PredictedSex::Female => "female",
            PredictedSex::Ambiguous => "ambiguous",
        };
        f.write_str(s)
    }
}

/// Both thresholds belong to the ambiguous band.
pub fn classify(score: f64, thresholds: &Thresholds) -> PredictedSex {
    if score < thresholds.male {
        PredictedSex::Male
    } else if score > thresholds.female {
        PredictedSex::Female
    } else {
        PredictedSex::Ambiguous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> Thresholds {
        Thresholds::new(0.01, 0.05).unwrap()
    }

    #[test]
    fn test_below_male_threshold_is_male() {
        for score in [0.0, 0.001, 0.009999] {
            assert_eq!(classify(score, &thresholds()), PredictedSex::Male);
        }
    }

    #[test]
    fn test_above_female_threshold_is_female() {
        for score in [0.050001, 1.0, 5.0, 1e9] {
            assert_eq!(classify(score, &thresholds()), PredictedSex::Female);
        }
    }

    #[test]
    fn test_thresholds_are_inclusive_in_ambiguous_band() {
        let t = thresholds();
        assert_eq!(classify(t.male(), &t), PredictedSex::Ambiguous);
        assert_eq!(classify(t.female(), &t), PredictedSex::Ambiguous);
        assert_eq!(classify(0.03, &t), PredictedSex::Ambiguous);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let t = thresholds();
        for score in [0.0, 0.01, 0.02, 0.05, 0.5] {
            assert_eq!(classify(score, &t), classify(score, &t));
        }
    }

    #[test]
    fn test_misordered_thresholds_rejected() {
        assert_eq!(
            Thresholds::new(0.05, 0.01),
            Err(SexCheckError::InvalidThresholdConfiguration {
                male: 0.05,
                female: 0.01
            })
        );
        assert!(Thresholds::new(0.05, 0.05).is_err());
        assert!(Thresholds::new(f64::NAN, 0.05).is_err());
        assert!(Thresholds::new(0.01, f64::INFINITY).is_err());
    }
}
