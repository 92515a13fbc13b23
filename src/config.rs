use crate::classify::Thresholds;
use crate::label::{LabelConventionKind, SexLabelConvention, DEFAULT_DELIMITERS};
use crate::reference::ReferenceAliases;
use crate::score::{ScoreMethod, ScoreMethodKind};
use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk configuration, usually `config.toml` in the platform config
/// directory.
///
/// ```toml
/// [thresholds]
/// male = 0.01
/// female = 0.05
///
/// [scoring]
/// method = "scaled-ratio"
/// scale = 1000.0
///
/// [references]
/// autosome = ["chr1", "1"]
/// y = ["chrY", "Y"]
///
/// [label]
/// convention = "token"
/// delimiters = "-_."
/// ```
///
/// `delimiters` only applies to the `token` convention; `positional` always
/// splits on `-` and warns when other delimiters are configured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub thresholds: ThresholdConfig,
    pub scoring: ScoringConfig,
    pub references: ReferenceAliases,
    pub label: LabelConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdConfig {
    pub male: Option<f64>,
    pub female: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub method: Option<ScoreMethodKind>,
    pub scale: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    pub convention: LabelConventionKind,
    pub delimiters: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            convention: LabelConventionKind::Token,
            delimiters: DEFAULT_DELIMITERS.to_string(),
        }
    }
}

/// Command line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub male_threshold: Option<f64>,
    pub female_threshold: Option<f64>,
    pub score_method: Option<ScoreMethodKind>,
    pub scale: Option<f64>,
    pub label_convention: Option<LabelConventionKind>,
}

/// Validated settings for one run.
pub struct RunSettings {
    pub thresholds: Thresholds,
    pub method: ScoreMethod,
    pub references: ReferenceAliases,
    pub convention: Box<dyn SexLabelConvention>,
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "sex-check", "sex-check")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

impl Config {
    /// Loads `path` when given, otherwise the default config file if one
    /// exists, otherwise an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Config::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(male) = overrides.male_threshold {
            self.thresholds.male = Some(male);
        }
        if let Some(female) = overrides.female_threshold {
            self.thresholds.female = Some(female);
        }
        if let Some(method) = overrides.score_method {
            self.scoring.method = Some(method);
        }
        if let Some(scale) = overrides.scale {
            self.scoring.scale = Some(scale);
        }
        if let Some(convention) = overrides.label_convention {
            self.label.convention = convention;
        }
    }

    pub fn settings(&self) -> Result<RunSettings> {
        let (Some(male), Some(female)) = (self.thresholds.male, self.thresholds.female) else {
            bail!("Both thresholds are required: set --male-threshold/--female-threshold or [thresholds] male/female");
        };
        let thresholds = Thresholds::new(male, female)?;

        let method = match (self.scoring.method, self.scoring.scale) {
            (None, _) => {
                bail!("No scoring method configured: set --score-method or [scoring] method")
            }
            (Some(ScoreMethodKind::ScaledRatio), Some(scale)) => ScoreMethod::scaled_ratio(scale)?,
            (Some(ScoreMethodKind::ScaledRatio), None) => {
                bail!("The scaled-ratio method needs an explicit scale: set --scale or [scoring] scale")
            }
            (Some(ScoreMethodKind::NegLog), None) => ScoreMethod::NegLog,
            (Some(ScoreMethodKind::NegLog), Some(scale)) => {
                bail!("The neg-log method takes no scale, but scale {} was configured", scale)
            }
        };

        if self.references.autosome.is_empty() || self.references.y.is_empty() {
            bail!("Reference alias lists for the autosome and chromosome Y must not be empty");
        }

        Ok(RunSettings {
            thresholds,
            method,
            references: self.references.clone(),
            convention: self.label.convention.build(&self.label.delimiters),
        })
    }
}
