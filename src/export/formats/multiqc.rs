use crate::classify::{PredictedSex, Thresholds};
use crate::label::ReportedSex;
use crate::verdict::{SexMatch, Verdict};
use serde::Serialize;
use std::collections::BTreeMap;

/// MultiQC custom-content table holding the sex check verdict.
///
/// Serialises to the `*_mqc.json` layout MultiQC picks up on its own:
/// section metadata, per-column headers with conditional formatting, and a
/// `data` map keyed by sample name.
#[derive(Debug, Serialize)]
pub struct SexCheckReport {
    pub id: String,
    pub section_name: String,
    pub description: String,
    pub plot_type: String,
    pub pconfig: TableConfig,
    pub headers: Headers,
    pub data: BTreeMap<String, SampleRow>,
}

#[derive(Debug, Serialize)]
pub struct TableConfig {
    pub id: String,
    pub title: String,
    pub format: String,
}

#[derive(Debug, Serialize)]
pub struct Headers {
    pub matched: Header,
    pub reported_sex: Header,
    pub predicted_sex: Header,
    pub score: Header,
    #[serde(rename = "mapped_chrY")]
    pub mapped_chry: Header,
    pub mapped_chr1: Header,
}

#[derive(Debug, Serialize)]
pub struct Header {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub cond_formatting_rules: BTreeMap<String, Vec<StringEquals>>,
}

/// A `{"s_eq": ...}` conditional formatting rule.
#[derive(Debug, Serialize)]
pub struct StringEquals {
    pub s_eq: String,
}

#[derive(Debug, Serialize)]
pub struct SampleRow {
    pub matched: SexMatch,
    pub reported_sex: ReportedSex,
    pub predicted_sex: PredictedSex,
    pub score: f64,
    #[serde(rename = "mapped_chrY")]
    pub mapped_chry: u64,
    pub mapped_chr1: u64,
}

impl Header {
    fn new(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            format: None,
            cond_formatting_rules: BTreeMap::new(),
        }
    }

    fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    fn with_rule(mut self, level: &str, values: &[&str]) -> Self {
        self.cond_formatting_rules.insert(
            level.to_string(),
            values
                .iter()
                .map(|v| StringEquals { s_eq: v.to_string() })
                .collect(),
        );
        self
    }
}

impl SexCheckReport {
    pub fn from_verdict(verdict: &Verdict, thresholds: &Thresholds) -> Self {
        let headers = Headers {
            matched: Header::new("Matched", "Whether reported sex is same as predicted sex")
                .with_rule("pass", &[SexMatch::Match.code()])
                .with_rule("warn", &[SexMatch::NotApplicable.code()])
                .with_rule("fail", &[SexMatch::Mismatch.code()]),
            reported_sex: Header::new("Reported Sex", "Expected sex reported in sample name")
                .with_rule("warn", &[ReportedSex::Unknown.code()]),
            predicted_sex: Header::new("Predicted Sex", "Sex inferred from normalised score")
                .with_rule("warn", &[PredictedSex::Ambiguous.code()]),
            score: Header::new("Normalised ChrY Reads", verdict.score.method.describe())
                .with_format("{:.4f}"),
            mapped_chry: Header::new("Mapped Reads ChrY", "Number of reads mapped to chromosome Y"),
            mapped_chr1: Header::new("Mapped Reads Chr1", "Number of reads mapped to chromosome 1"),
        };

        let row = SampleRow {
            matched: verdict.matched,
            reported_sex: verdict.reported_sex,
            predicted_sex: verdict.predicted_sex,
            score: verdict.score.value,
            mapped_chry: verdict.coverage.chry_mapped,
            mapped_chr1: verdict.coverage.chr1_mapped,
        };

        let mut data = BTreeMap::new();
        data.insert(verdict.sample_name.clone(), row);

        Self {
            id: "sex_check".to_string(),
            section_name: "Sex Check".to_string(),
            description: format!(
                "Table comparing reported and predicted sex (male below {}, female above {}, scoring: {})",
                thresholds.male(),
                thresholds.female(),
                verdict.score.method
            ),
            plot_type: "table".to_string(),
            pconfig: TableConfig {
                id: "sex_check_table".to_string(),
                title: "Sex Check Table".to_string(),
                format: "{:.0f}".to_string(),
            },
            headers,
            data,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
