use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Sex label carried in a sample identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportedSex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "N")]
    Unknown,
}

impl ReportedSex {
    pub fn code(&self) -> &'static str {
        match self {
            ReportedSex::Male => "M",
            ReportedSex::Female => "F",
            ReportedSex::Unknown => "N",
        }
    }
}

impl fmt::Display for ReportedSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReportedSex::Male => "male",
            ReportedSex::Female => "female",
            ReportedSex::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// What a single token says about sex, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Sex(ReportedSex),
    ExplicitUnknown,
}

fn parse_marker(token: &str) -> Option<Marker> {
    match token.to_ascii_uppercase().as_str() {
        "M" | "MALE" => Some(Marker::Sex(ReportedSex::Male)),
        "F" | "FEMALE" => Some(Marker::Sex(ReportedSex::Female)),
        "U" | "UNKNOWN" => Some(Marker::ExplicitUnknown),
        _ => None,
    }
}

/// A naming convention that encodes reported sex in a sample identifier.
///
/// Implementations never fail: an identifier without a usable marker
/// yields [`ReportedSex::Unknown`].
pub trait SexLabelConvention {
    fn reported_sex(&self, sample_name: &str) -> ReportedSex;
}

/// Scans every delimiter-separated token for a sex marker.
///
/// Recognises `M`, `MALE`, `F` and `FEMALE` in any case. An explicit `U` or
/// `UNKNOWN` token, or markers that disagree with each other, give
/// `Unknown`.
#[derive(Debug, Clone)]
pub struct DelimitedTokenConvention {
    delimiters: Vec<char>,
}

pub const DEFAULT_DELIMITERS: &str = "-_.";

impl DelimitedTokenConvention {
    pub fn new(delimiters: &str) -> Self {
        Self {
            delimiters: delimiters.chars().collect(),
        }
    }
}

impl Default for DelimitedTokenConvention {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITERS)
    }
}

impl SexLabelConvention for DelimitedTokenConvention {
    fn reported_sex(&self, sample_name: &str) -> ReportedSex {
        let mut markers: Vec<Marker> = sample_name
            .split(|c: char| self.delimiters.contains(&c))
            .filter_map(parse_marker)
            .collect();
        markers.dedup();

        match markers.as_slice() {
            [] => {
                warn!("No sex marker found in sample name {}", sample_name);
                ReportedSex::Unknown
            }
            [Marker::Sex(sex)] => *sex,
            [Marker::ExplicitUnknown] => ReportedSex::Unknown,
            _ => {
                warn!("Conflicting sex markers in sample name {}", sample_name);
                ReportedSex::Unknown
            }
        }
    }
}

/// Reads the second-to-last `-`-separated field, as in
/// `X12345-GM1234567-23xxxx4-1234-F-12345678`.
#[derive(Debug, Clone, Default)]
pub struct PositionalConvention;

impl SexLabelConvention for PositionalConvention {
    fn reported_sex(&self, sample_name: &str) -> ReportedSex {
        let parts: Vec<&str> = sample_name.split('-').collect();
        if parts.len() < 3 {
            warn!("{} is too short to determine sex", sample_name);
            return ReportedSex::Unknown;
        }

        let field = parts[parts.len() - 2];
        match field.to_ascii_uppercase().as_str() {
            "M" => ReportedSex::Male,
            "F" => ReportedSex::Female,
            "U" => ReportedSex::Unknown,
            _ => {
                warn!("Extracted {} from {} is not a sex marker", field, sample_name);
                ReportedSex::Unknown
            }
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelConventionKind {
    /// Any delimiter-separated token may carry the marker
    #[value(name = "token")]
    Token,
    /// The second-to-last '-'-separated field carries the marker
    #[value(name = "positional")]
    Positional,
}

impl LabelConventionKind {
    /// The positional convention always splits on `-`.
    pub fn ignores_delimiters(&self, delimiters: &str) -> bool {
        *self == LabelConventionKind::Positional && delimiters != DEFAULT_DELIMITERS
    }

    pub fn build(&self, delimiters: &str) -> Box<dyn SexLabelConvention> {
        if self.ignores_delimiters(delimiters) {
            warn!(
                "Label delimiters '{}' are ignored by the positional convention, which splits on '-'",
                delimiters
            );
        }
        match self {
            LabelConventionKind::Token => Box::new(DelimitedTokenConvention::new(delimiters)),
            LabelConventionKind::Positional => Box::new(PositionalConvention),
        }
    }
}

const ALIGNMENT_EXTENSIONS: &[&str] = &["bam", "cram", "sam"];
const MARKDUP_SUFFIX: &str = "_markdup";

/// Derives the sample identifier from an alignment file path: the file name
/// without its alignment extension and without a trailing `_markdup`.
pub fn sample_name_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let stem = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ALIGNMENT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or(file_name),
        _ => file_name,
    };

    stem.strip_suffix(MARKDUP_SUFFIX)
        .map(str::to_string)
        .unwrap_or(stem)
}
